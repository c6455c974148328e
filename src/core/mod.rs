//! Extraction engine.
//!
//! ## Pipeline
//!
//! 1. `file_scanner`: discover `*.java` test sources
//! 2. `parsers`: parse each file and lower it into a `syntax::SyntaxTree`
//! 3. `walker`: deliver visit/leave events to the `processor`
//! 4. `processor`: match the test idiom (via `extract`) and merge verified
//!    methods into the `aggregate` accumulation
//!
//! `context` ties the steps together for one scan.

pub mod aggregate;
pub mod context;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod patterns;
pub mod processor;
pub mod syntax;
pub mod walker;

pub use aggregate::{ModuleAccumulation, ModuleProperties, Property, PropertySet};
pub use context::{FailureKind, FileDiagnostic, FileFailure, ScanContext, ScanReport};
pub use error::{LiteralError, LiteralResult, ProcessError};
pub use processor::{ACCEPTABLE_KINDS, Diagnostic, Skipped, UnitTestProcessor};
pub use syntax::{NodeId, SyntaxKind, SyntaxNode, SyntaxTree};
pub use walker::{TreeCheck, walk_tree};
