//! Reduction of expression subtrees to literal strings.
//!
//! Supported shapes, most specific first:
//!
//! ```text
//! "text"                          → text
//! null                            → (absent)
//! a + b                           → literal(a) ++ literal(b)
//! Enum.CONSTANT.toString()        → CONSTANT        (also getName(), name())
//! file.getPath()                  → error: file variable (for `final File file`)
//! getPath("x")                    → <base>src/test/resources/<package>/x
//! getNonCompilablePath("x")       → <base>src/test/resources-noncompilable/<package>/x
//! ```
//!
//! Everything else is rejected with [`LiteralError::UnsupportedConstruct`].

use std::collections::HashSet;

use crate::core::error::{LiteralError, LiteralResult};
use crate::core::patterns::{FILE_PATH_ACCESSOR, PathBuilder, is_enum_name_accessor};
use crate::core::syntax::{SyntaxKind, SyntaxNode};

/// Text rendered for an absent operand of a concatenation.
const NULL_TEXT: &str = "null";

/// Strip the surrounding quote characters of a string literal.
pub(crate) fn unquote(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    chars.next()?;
    chars.next_back()?;
    Some(chars.as_str())
}

pub(crate) fn unsupported(node: SyntaxNode<'_>) -> LiteralError {
    LiteralError::UnsupportedConstruct {
        kind: node.kind().to_string(),
        line: node.line(),
    }
}

/// Expression evaluator bound to the state of the file and method being scanned.
pub struct Literalizer<'a> {
    /// Configurable prefix for path-builder results.
    base_path: &'a str,
    /// Package of the current file as `a/b/c/`, or empty.
    package_path: &'a str,
    /// `final File` locals of the current method.
    file_handles: &'a HashSet<String>,
}

impl<'a> Literalizer<'a> {
    pub fn new(base_path: &'a str, package_path: &'a str, file_handles: &'a HashSet<String>) -> Self {
        Self {
            base_path,
            package_path,
            file_handles,
        }
    }

    /// Literalize the content of an `Expression` wrapper.
    pub fn literalize_expression(&self, expression: SyntaxNode<'_>) -> LiteralResult {
        match expression.first_child() {
            Some(content) => self.literalize(content),
            None => Err(unsupported(expression)),
        }
    }

    /// Literalize an expression node. `Ok(None)` stands for `null`.
    pub fn literalize(&self, node: SyntaxNode<'_>) -> LiteralResult {
        match node.kind() {
            SyntaxKind::StringLiteral => node
                .text()
                .and_then(unquote)
                .map(|text| Some(text.to_owned()))
                .ok_or_else(|| unsupported(node)),
            SyntaxKind::NullLiteral => Ok(None),
            SyntaxKind::Concatenation => {
                let (Some(left), Some(right)) = (node.first_child(), node.last_child()) else {
                    return Err(unsupported(node));
                };
                let left = self.literalize(left)?;
                let right = self.literalize(right)?;
                Ok(Some(format!(
                    "{}{}",
                    left.as_deref().unwrap_or(NULL_TEXT),
                    right.as_deref().unwrap_or(NULL_TEXT)
                )))
            }
            SyntaxKind::MethodCall => self.literalize_call(node).map(Some),
            _ => Err(unsupported(node)),
        }
    }

    /// Literalize a method call used as a value.
    fn literalize_call(&self, call: SyntaxNode<'_>) -> Result<String, LiteralError> {
        let Some(callee) = call.first_child() else {
            return Err(unsupported(call));
        };
        let arguments = call.find_first_child(&SyntaxKind::ArgumentList);

        match callee.kind() {
            SyntaxKind::MemberAccess => {
                let object = callee.first_child();
                let member = object.and_then(|o| o.next_sibling());

                if let (Some(object), Some(member)) = (object, member) {
                    if object.is(&SyntaxKind::MemberAccess) {
                        if let Some(constant) = enum_constant_name(object, member, arguments) {
                            return Ok(constant.to_owned());
                        }
                    } else if let Some(variable) = self.file_handle_path_call(object, member) {
                        return Err(LiteralError::UnsupportedFileVariable {
                            name: variable.to_owned(),
                            line: call.line(),
                        });
                    }
                }
            }
            SyntaxKind::Identifier => {
                if let Some(builder) = callee.text().and_then(PathBuilder::from_method_name)
                    && let Some(path) = self.build_path(builder, arguments)?
                {
                    return Ok(path);
                }
            }
            _ => {}
        }

        Err(unsupported(call))
    }

    /// `file.getPath()` where `file` is a known `final File` local.
    fn file_handle_path_call<'t>(
        &self,
        object: SyntaxNode<'t>,
        member: SyntaxNode<'t>,
    ) -> Option<&'t str> {
        let variable = object.text().filter(|_| object.is(&SyntaxKind::Identifier))?;
        (member.text() == Some(FILE_PATH_ACCESSOR) && self.file_handles.contains(variable))
            .then_some(variable)
    }

    /// Expand `getPath("name")`-style helpers into a resource path.
    ///
    /// Returns `Ok(None)` when the call does not have exactly one argument or
    /// the argument is `null`.
    fn build_path(
        &self,
        builder: PathBuilder,
        arguments: Option<SyntaxNode<'_>>,
    ) -> Result<Option<String>, LiteralError> {
        let Some(arguments) = arguments else {
            return Ok(None);
        };
        if arguments.child_count() != 1 {
            return Ok(None);
        }
        let Some(argument) = arguments.find_first_child(&SyntaxKind::Expression) else {
            return Ok(None);
        };

        Ok(self.literalize_expression(argument)?.map(|name| {
            format!(
                "{}{}{}{}",
                self.base_path,
                builder.resource_dir(),
                self.package_path,
                name
            )
        }))
    }
}

/// `Type.CONSTANT.toString()` / `.getName()` / `.name()` with no arguments → `CONSTANT`.
fn enum_constant_name<'t>(
    access: SyntaxNode<'t>,
    accessor: SyntaxNode<'t>,
    arguments: Option<SyntaxNode<'t>>,
) -> Option<&'t str> {
    let owner = access.first_child()?;
    let constant = owner.next_sibling()?;

    let is_accessor = accessor.text().is_some_and(is_enum_name_accessor);
    let no_arguments = arguments.is_none_or(|args| args.child_count() == 0);

    if owner.is(&SyntaxKind::Identifier) && is_accessor && no_arguments {
        constant.text()
    } else {
        None
    }
}
