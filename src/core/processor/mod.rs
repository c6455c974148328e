//! The unit-test processor.
//!
//! Receives visit/leave events for package declarations, method declarations,
//! variable declarations and method calls, and accumulates the configuration
//! properties asserted by verified test methods:
//!
//! ```java
//! @Test
//! public void testIt() throws Exception {
//!     final DefaultConfiguration checkConfig = createModuleConfig(TodoCommentCheck.class);
//!     checkConfig.addAttribute("format", "FIXME:");
//!     verify(checkConfig, getPath("InputTodoComment.java"), expected);
//! }
//! ```
//!
//! yields `TodoCommentCheck: { format = FIXME: }`.

use std::fmt;

use crate::core::aggregate::{ModuleAccumulation, ModuleProperties};
use crate::core::error::{LiteralError, ProcessError};
use crate::core::extract::{
    CallSite, Declaration, Literalizer, MethodScope, classify_call, classify_declaration,
    extract_property,
};
use crate::core::patterns::is_test_annotation;
use crate::core::syntax::{SyntaxKind, SyntaxNode, full_ident};
use crate::core::walker::TreeCheck;


/// Node kinds the processor subscribes to.
pub const ACCEPTABLE_KINDS: &[SyntaxKind] = &[
    SyntaxKind::Package,
    SyntaxKind::MethodDecl,
    SyntaxKind::VariableDecl,
    SyntaxKind::MethodCall,
];

/// What was being extracted when a [`LiteralError`] was recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skipped {
    /// A configuration handle that could not be bound.
    Binding { variable: String },
    /// A property of a bound module.
    Property { module: String },
}

impl fmt::Display for Skipped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skipped::Binding { variable } => write!(f, "skipped configuration `{variable}`"),
            Skipped::Property { module } => write!(f, "skipped property of {module}"),
        }
    }
}

/// A recovered extraction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Line of the declaration or call that was skipped.
    pub line: usize,
    pub skipped: Skipped,
    pub reason: LiteralError,
}

pub struct UnitTestProcessor {
    base_path: String,
    /// Package of the current file, `a/b/c/`, or empty.
    package_path: String,
    scope: MethodScope,
    accumulation: ModuleAccumulation,
    diagnostics: Vec<Diagnostic>,
}

impl UnitTestProcessor {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            package_path: String::new(),
            scope: MethodScope::new(),
            accumulation: ModuleAccumulation::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Return everything accumulated so far and clear it.
    pub fn drain(&mut self) -> ModuleProperties {
        self.accumulation.drain()
    }

    /// Return the diagnostics recorded since the last call.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    // ============================================================
    // Visitors
    // ============================================================

    fn visit_package(&mut self, package: SyntaxNode<'_>) {
        let name = package
            .children()
            .find(|child| child.is(&SyntaxKind::Identifier) || child.is(&SyntaxKind::MemberAccess))
            .and_then(full_ident);

        self.package_path = match name {
            Some(name) => format!("{}/", name.replace('.', "/")),
            None => String::new(),
        };
    }

    fn visit_method(&mut self, method: SyntaxNode<'_>) {
        if !self.scope.is_active() && has_test_annotation(method) {
            self.scope.enter(method.id());
        }
    }

    fn visit_variable(&mut self, declaration: SyntaxNode<'_>) {
        match classify_declaration(declaration) {
            Ok(Declaration::Configuration { variable, module }) => self.scope.bind(variable, module),
            Ok(Declaration::FileHandle { variable }) => self.scope.add_file_handle(variable),
            Ok(Declaration::Ignored) => {}
            Err(reason) => {
                let variable = declaration
                    .find_first_child(&SyntaxKind::Identifier)
                    .and_then(|name| name.text())
                    .unwrap_or_default()
                    .to_owned();
                self.diagnostics.push(Diagnostic {
                    line: declaration.line(),
                    skipped: Skipped::Binding { variable },
                    reason,
                });
            }
        }
    }

    fn visit_method_call(&mut self, call: SyntaxNode<'_>) {
        let site = classify_call(call, |variable| self.scope.is_bound(variable));

        match site {
            CallSite::SetProperty { variable, arguments } => {
                let Some(module) = self.scope.module_of(variable).map(str::to_owned) else {
                    return;
                };
                let literalizer =
                    Literalizer::new(&self.base_path, &self.package_path, self.scope.file_handles());
                match extract_property(arguments, &literalizer) {
                    Ok(Some(property)) => self.scope.add_property(&module, property),
                    Ok(None) => {}
                    Err(reason) => self.diagnostics.push(Diagnostic {
                        line: call.line(),
                        skipped: Skipped::Property { module },
                        reason,
                    }),
                }
            }
            CallSite::Verification => self.scope.mark_verified(),
            CallSite::Other => {}
        }
    }
}

impl TreeCheck for UnitTestProcessor {
    fn acceptable_kinds(&self) -> &[SyntaxKind] {
        ACCEPTABLE_KINDS
    }

    /// Full reset for a new file. The accumulation is kept.
    fn begin_tree(&mut self) {
        self.package_path.clear();
        self.scope = MethodScope::new();
    }

    fn visit_node(&mut self, node: SyntaxNode<'_>) -> Result<(), ProcessError> {
        match node.kind() {
            SyntaxKind::Package => self.visit_package(node),
            SyntaxKind::MethodDecl => self.visit_method(node),
            SyntaxKind::VariableDecl => {
                if self.scope.is_active() {
                    self.visit_variable(node);
                }
            }
            SyntaxKind::MethodCall => {
                if self.scope.is_active() {
                    self.visit_method_call(node);
                }
            }
            SyntaxKind::CompilationUnit
            | SyntaxKind::ClassDecl
            | SyntaxKind::ClassBody
            | SyntaxKind::Block
            | SyntaxKind::MemberAccess
            | SyntaxKind::ArgumentList
            | SyntaxKind::Expression
            | SyntaxKind::StringLiteral
            | SyntaxKind::Concatenation
            | SyntaxKind::NullLiteral
            | SyntaxKind::Identifier
            | SyntaxKind::ClassLiteral
            | SyntaxKind::TryBlock
            | SyntaxKind::TypeRef
            | SyntaxKind::Modifiers
            | SyntaxKind::Final
            | SyntaxKind::Annotation
            | SyntaxKind::Other(_) => {
                return Err(ProcessError::UnacceptableNode {
                    kind: node.kind().to_string(),
                    line: node.line(),
                });
            }
        }
        Ok(())
    }

    fn leave_node(&mut self, node: SyntaxNode<'_>) {
        if node.is(&SyntaxKind::MethodDecl)
            && self.scope.is_active_method(node.id())
            && let Some(properties) = self.scope.finish()
        {
            self.accumulation.merge(properties);
        }
    }
}

/// Whether the method carries `@Test` (short or qualified).
fn has_test_annotation(method: SyntaxNode<'_>) -> bool {
    let Some(modifiers) = method.find_first_child(&SyntaxKind::Modifiers) else {
        return false;
    };
    modifiers
        .children()
        .filter(|child| child.is(&SyntaxKind::Annotation))
        .filter_map(|annotation| annotation.first_child().and_then(full_ident))
        .any(|name| is_test_annotation(&name))
}
