//! Classification of variable declarations inside a test method.

use crate::core::error::LiteralError;
use crate::core::extract::call_site::creation_call;
use crate::core::extract::literalizer::unquote;
use crate::core::patterns::{
    CreateMethodTarget, ROOT_MODULE, TREE_WALKER_MODULE, create_method_target,
    is_configuration_type, is_file_handle_type,
};
use crate::core::syntax::{SyntaxKind, SyntaxNode};

/// What a declaration contributes to the method scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// `DefaultConfiguration checkConfig = createModuleConfig(X.class);`
    Configuration { variable: String, module: String },
    /// `final File file = ...;`
    FileHandle { variable: String },
    Ignored,
}

/// Classify one `VariableDecl` node.
///
/// Fields (declarations directly under a class body) and declarations with
/// unrecognized types or initializers are [`Declaration::Ignored`]. A
/// recognized factory call whose argument names no module is an error.
pub fn classify_declaration(declaration: SyntaxNode<'_>) -> Result<Declaration, LiteralError> {
    if !is_local(declaration) {
        return Ok(Declaration::Ignored);
    }
    let (Some(type_name), Some(variable)) = (declared_type_name(declaration), declared_name(declaration))
    else {
        return Ok(Declaration::Ignored);
    };

    if is_configuration_type(type_name) {
        let Some(initializer) = initializer(declaration) else {
            return Ok(Declaration::Ignored);
        };
        let Some((method, arguments)) = creation_call(initializer) else {
            return Ok(Declaration::Ignored);
        };
        let Some(target) = create_method_target(method) else {
            return Ok(Declaration::Ignored);
        };

        let module = resolve_module(target, initializer, arguments)?;
        return Ok(Declaration::Configuration {
            variable: variable.to_owned(),
            module,
        });
    }

    if is_file_handle_type(type_name) && is_final(declaration) {
        return Ok(Declaration::FileHandle {
            variable: variable.to_owned(),
        });
    }

    Ok(Declaration::Ignored)
}

fn is_local(declaration: SyntaxNode<'_>) -> bool {
    declaration
        .parent()
        .is_some_and(|parent| !parent.is(&SyntaxKind::ClassBody))
}

fn declared_type_name<'t>(declaration: SyntaxNode<'t>) -> Option<&'t str> {
    declaration
        .find_first_child(&SyntaxKind::TypeRef)?
        .find_first_child(&SyntaxKind::Identifier)?
        .text()
}

fn declared_name<'t>(declaration: SyntaxNode<'t>) -> Option<&'t str> {
    declaration.find_first_child(&SyntaxKind::Identifier)?.text()
}

fn initializer<'t>(declaration: SyntaxNode<'t>) -> Option<SyntaxNode<'t>> {
    declaration.find_first_child(&SyntaxKind::Expression)?.first_child()
}

fn is_final(declaration: SyntaxNode<'_>) -> bool {
    declaration
        .find_first_child(&SyntaxKind::Modifiers)
        .and_then(|modifiers| modifiers.find_first_child(&SyntaxKind::Final))
        .is_some()
}

/// Module identifier named by a factory call.
fn resolve_module(
    target: CreateMethodTarget,
    call: SyntaxNode<'_>,
    arguments: Option<SyntaxNode<'_>>,
) -> Result<String, LiteralError> {
    match target {
        CreateMethodTarget::Root => Ok(ROOT_MODULE.to_owned()),
        CreateMethodTarget::TreeWalker => Ok(TREE_WALKER_MODULE.to_owned()),
        CreateMethodTarget::FromArgument => module_from_argument(call, arguments),
    }
}

/// `createModuleConfig("Name")` or `createModuleConfig(Name.class)`.
fn module_from_argument(
    call: SyntaxNode<'_>,
    arguments: Option<SyntaxNode<'_>>,
) -> Result<String, LiteralError> {
    let rejected = |reason: String| LiteralError::UnsupportedCreationArgument {
        reason,
        line: call.line(),
    };

    let expressions: Vec<_> = arguments
        .map(|args| args.children().filter(|c| c.is(&SyntaxKind::Expression)).collect())
        .unwrap_or_default();
    let [expression] = expressions.as_slice() else {
        return Err(rejected(format!(
            "expected exactly one argument, found {}",
            expressions.len()
        )));
    };
    let Some(argument) = expression.first_child() else {
        return Err(rejected("empty argument".to_owned()));
    };

    match argument.kind() {
        SyntaxKind::StringLiteral => argument
            .text()
            .and_then(unquote)
            .map(str::to_owned)
            .ok_or_else(|| rejected("malformed string literal".to_owned())),
        SyntaxKind::MemberAccess => class_literal_name(argument)
            .map(str::to_owned)
            .ok_or_else(|| rejected(format!("{} is not a class literal", argument.kind()))),
        kind => Err(rejected(format!("{kind} is neither a string nor a class literal"))),
    }
}

/// `Foo.class` → `Foo`; `a.b.Foo.class` → `Foo`.
fn class_literal_name<'t>(access: SyntaxNode<'t>) -> Option<&'t str> {
    let owner = access.first_child()?;
    if !owner.next_sibling()?.is(&SyntaxKind::ClassLiteral) {
        return None;
    }
    match owner.kind() {
        SyntaxKind::Identifier => owner.text(),
        SyntaxKind::MemberAccess => owner
            .last_child()
            .filter(|name| name.is(&SyntaxKind::Identifier))?
            .text(),
        _ => None,
    }
}
