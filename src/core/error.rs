//! Error types of the extraction core.
//!
//! Two outcome kinds:
//!
//! - [`ProcessError`] is a broken contract between the tree walker and the
//!   processor. It aborts processing of the current file.
//! - [`LiteralError`] means an expression (or creation argument) has no
//!   literal value the processor understands. Callers recover by skipping the
//!   property or binding at hand.

use thiserror::Error;

/// Fatal failure while dispatching a node.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("the processor cannot support this ast: {kind}[{line}]")]
    UnacceptableNode { kind: String, line: usize },
}

/// Recoverable failure to reduce an expression to a literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// The configuration factory call has an argument shape that names no module.
    #[error("unsupported creation argument: {reason} (line {line})")]
    UnsupportedCreationArgument { reason: String, line: usize },

    /// `file.getPath()` on a `final File` local: its runtime value is unknown.
    #[error("file variables are not supported as values: {name} (line {line})")]
    UnsupportedFileVariable { name: String, line: usize },

    /// Any other expression shape.
    #[error("unsupported construct: {kind} (line {line})")]
    UnsupportedConstruct { kind: String, line: usize },
}

impl LiteralError {
    pub fn line(&self) -> usize {
        match self {
            LiteralError::UnsupportedCreationArgument { line, .. }
            | LiteralError::UnsupportedFileVariable { line, .. }
            | LiteralError::UnsupportedConstruct { line, .. } => *line,
        }
    }
}

/// Result of literalizing an expression: `Ok(None)` is the `null` literal.
pub type LiteralResult = Result<Option<String>, LiteralError>;
