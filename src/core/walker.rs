//! Token-dispatch driver: delivers visit/leave events to a [`TreeCheck`].

use crate::core::error::ProcessError;
use crate::core::syntax::{SyntaxKind, SyntaxNode, SyntaxTree};

/// A check driven by [`walk_tree`].
pub trait TreeCheck {
    /// Kinds this check wants to see. Only these reach `visit_node` / `leave_node`.
    fn acceptable_kinds(&self) -> &[SyntaxKind];

    /// Called once before the first node of every tree.
    fn begin_tree(&mut self);

    fn visit_node(&mut self, node: SyntaxNode<'_>) -> Result<(), ProcessError>;

    fn leave_node(&mut self, node: SyntaxNode<'_>);
}

enum Step<'t> {
    Enter(SyntaxNode<'t>),
    Leave(SyntaxNode<'t>),
}

/// Walk `tree` in pre-order, stopping at the first [`ProcessError`].
pub fn walk_tree<C: TreeCheck + ?Sized>(tree: &SyntaxTree, check: &mut C) -> Result<(), ProcessError> {
    check.begin_tree();
    let Some(root) = tree.root() else {
        return Ok(());
    };

    let mut stack = vec![Step::Enter(root)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(node) => {
                if check.acceptable_kinds().contains(node.kind()) {
                    check.visit_node(node)?;
                    stack.push(Step::Leave(node));
                }
                let children: Vec<_> = node.children().collect();
                stack.extend(children.into_iter().rev().map(Step::Enter));
            }
            Step::Leave(node) => check.leave_node(node),
        }
    }
    Ok(())
}
