//! Matching of method calls against the recognized test idiom.

use crate::core::aggregate::Property;
use crate::core::error::LiteralError;
use crate::core::extract::literalizer::Literalizer;
use crate::core::patterns::{ADD_ATTRIBUTE_METHOD, is_verify_method};
use crate::core::syntax::{SyntaxKind, SyntaxNode};

/// Role of a method call in a test method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite<'t> {
    /// `checkConfig.addAttribute(name, value)` on a bound configuration.
    SetProperty {
        variable: &'t str,
        arguments: Option<SyntaxNode<'t>>,
    },
    /// Standalone `verify(...)`, `verifyWarns(...)` or `verifySuppressed(...)`.
    Verification,
    Other,
}

/// Simple name of the called method: `a.b.c()` → `c`.
pub fn call_name<'t>(callee: SyntaxNode<'t>) -> Option<&'t str> {
    match callee.kind() {
        SyntaxKind::Identifier => callee.text(),
        SyntaxKind::MemberAccess => call_name(callee.first_child()?.next_sibling()?),
        _ => None,
    }
}

/// Name of the receiver: `a.b.c()` → `b`; an undotted `c()` is its own receiver.
pub fn receiver_name<'t>(callee: SyntaxNode<'t>) -> Option<&'t str> {
    match callee.kind() {
        SyntaxKind::Identifier => callee.text(),
        SyntaxKind::MemberAccess => call_name(callee.first_child()?),
        _ => None,
    }
}

/// Undotted method call used as an initializer: `name(args)`.
pub fn creation_call<'t>(expression: SyntaxNode<'t>) -> Option<(&'t str, Option<SyntaxNode<'t>>)> {
    if !expression.is(&SyntaxKind::MethodCall) {
        return None;
    }
    let callee = expression.first_child()?;
    if !callee.is(&SyntaxKind::Identifier) {
        return None;
    }
    Some((
        callee.text()?,
        expression.find_first_child(&SyntaxKind::ArgumentList),
    ))
}

/// Classify a `MethodCall` node.
///
/// `is_bound` tells whether a variable name is a configuration handle of the
/// current method.
pub fn classify_call<'t>(call: SyntaxNode<'t>, is_bound: impl Fn(&str) -> bool) -> CallSite<'t> {
    let Some(callee) = call.first_child() else {
        return CallSite::Other;
    };
    let (Some(name), Some(receiver)) = (call_name(callee), receiver_name(callee)) else {
        return CallSite::Other;
    };

    if name == ADD_ATTRIBUTE_METHOD && callee.is(&SyntaxKind::MemberAccess) && is_bound(receiver) {
        return CallSite::SetProperty {
            variable: receiver,
            arguments: call.find_first_child(&SyntaxKind::ArgumentList),
        };
    }

    if callee.is(&SyntaxKind::Identifier)
        && is_verify_method(name)
        && !is_nested_in_call(call)
        && !is_inside_try(call)
    {
        return CallSite::Verification;
    }

    CallSite::Other
}

/// Whether the call is an argument of another call, or the receiver of a chained call.
pub fn is_nested_in_call(call: SyntaxNode<'_>) -> bool {
    let Some(parent) = call.parent() else {
        return false;
    };
    let grandparent = parent.parent();
    match parent.kind() {
        SyntaxKind::Expression => grandparent.is_some_and(|g| g.is(&SyntaxKind::ArgumentList)),
        SyntaxKind::MemberAccess => grandparent.is_some_and(|g| g.is(&SyntaxKind::MethodCall)),
        _ => false,
    }
}

fn is_inside_try(call: SyntaxNode<'_>) -> bool {
    call.ancestors().any(|node| node.is(&SyntaxKind::TryBlock))
}

/// Literalize the name (argument 0) and value (argument 1) of a property call.
///
/// `Ok(None)` when either side is missing or `null`.
pub fn extract_property(
    arguments: Option<SyntaxNode<'_>>,
    literalizer: &Literalizer<'_>,
) -> Result<Option<Property>, LiteralError> {
    let Some(arguments) = arguments else {
        return Ok(None);
    };
    let mut expressions = arguments
        .children()
        .filter(|child| child.is(&SyntaxKind::Expression));

    let name = match expressions.next() {
        Some(expression) => literalizer.literalize_expression(expression)?,
        None => None,
    };
    let value = match expressions.next() {
        Some(expression) => literalizer.literalize_expression(expression)?,
        None => None,
    };

    Ok(name.zip(value).map(|(name, value)| Property::new(name, value)))
}
