//! Language-neutral syntax tree consumed by the extraction core.
//!
//! The front end (see `crate::core::parsers`) lowers a concrete parse tree into
//! a [`SyntaxTree`]: an immutable arena of nodes tagged with a closed
//! [`SyntaxKind`]. The core never sees parser-specific types; it only reads
//! the tree through [`SyntaxNode`] views, navigating down (children), up
//! (parent) and right (next sibling).
//!
//! Shapes produced by the front end and relied upon by the core:
//!
//! ```text
//! Package      [Identifier | MemberAccess]
//! MethodDecl   [Modifiers, TypeRef, Identifier, ..., Block]
//! VariableDecl [Modifiers, TypeRef, Identifier, Expression?]
//! MethodCall   [Identifier | MemberAccess, ArgumentList]
//! MemberAccess [object, Identifier | ClassLiteral]
//! ArgumentList [Expression*]
//! Expression   [expression]
//! Concatenation[left, right]
//! Annotation   [Identifier | MemberAccess, ...]
//! Modifiers    [Annotation | Final]*
//! ```

use std::fmt;

/// Closed set of node kinds understood by the extraction core.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// Root of one source file.
    CompilationUnit,
    /// `package a.b.c;`
    Package,
    /// Class, interface, enum, record or annotation type declaration.
    ClassDecl,
    /// Member container of a type declaration (fields live directly under it).
    ClassBody,
    MethodDecl,
    /// Local variable or field declaration, one node per declarator.
    VariableDecl,
    /// `{ ... }` statement block.
    Block,
    MethodCall,
    /// Dotted access `object.member`, also used for qualified names.
    MemberAccess,
    ArgumentList,
    /// Wrapper around a call argument, variable initializer or expression statement.
    Expression,
    /// String literal; the text keeps its surrounding quotes.
    StringLiteral,
    /// Binary `+`.
    Concatenation,
    NullLiteral,
    Identifier,
    /// The `class` pseudo-member of `Foo.class`.
    ClassLiteral,
    /// `try` statement, including its catch and finally clauses.
    TryBlock,
    TypeRef,
    Modifiers,
    /// The `final` keyword inside [`SyntaxKind::Modifiers`].
    Final,
    Annotation,
    /// Any construct the core never inspects, tagged with the grammar's name for it.
    Other(String),
}

impl SyntaxKind {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &str {
        match self {
            SyntaxKind::CompilationUnit => "COMPILATION_UNIT",
            SyntaxKind::Package => "PACKAGE_DEF",
            SyntaxKind::ClassDecl => "CLASS_DEF",
            SyntaxKind::ClassBody => "OBJBLOCK",
            SyntaxKind::MethodDecl => "METHOD_DEF",
            SyntaxKind::VariableDecl => "VARIABLE_DEF",
            SyntaxKind::Block => "SLIST",
            SyntaxKind::MethodCall => "METHOD_CALL",
            SyntaxKind::MemberAccess => "DOT",
            SyntaxKind::ArgumentList => "ELIST",
            SyntaxKind::Expression => "EXPR",
            SyntaxKind::StringLiteral => "STRING_LITERAL",
            SyntaxKind::Concatenation => "PLUS",
            SyntaxKind::NullLiteral => "LITERAL_NULL",
            SyntaxKind::Identifier => "IDENT",
            SyntaxKind::ClassLiteral => "LITERAL_CLASS",
            SyntaxKind::TryBlock => "LITERAL_TRY",
            SyntaxKind::TypeRef => "TYPE",
            SyntaxKind::Modifiers => "MODIFIERS",
            SyntaxKind::Final => "FINAL",
            SyntaxKind::Annotation => "ANNOTATION",
            SyntaxKind::Other(name) => name,
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: SyntaxKind,
    text: Option<String>,
    line: usize,
    parent: Option<NodeId>,
    next_sibling: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed syntax tree.
///
/// Trees are built bottom-up: children are added first, then attached to
/// their parent with [`SyntaxTree::add_node`], which fixes up the parent and
/// sibling links. The last node passed to [`SyntaxTree::set_root`] is the root.
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf node carrying raw source text.
    pub fn add_token(&mut self, kind: SyntaxKind, text: impl Into<String>, line: usize) -> NodeId {
        self.push(kind, Some(text.into()), line, Vec::new())
    }

    /// Add an interior node owning `children` (in source order).
    ///
    /// Each child must not already have a parent.
    pub fn add_node(&mut self, kind: SyntaxKind, line: usize, children: Vec<NodeId>) -> NodeId {
        self.push(kind, None, line, children)
    }

    pub fn set_root(&mut self, root: NodeId) {
        self.root = Some(root);
    }

    pub fn root(&self) -> Option<SyntaxNode<'_>> {
        self.root.map(|id| self.node(id))
    }

    /// Borrow a view of the node `id`.
    ///
    /// Panics if `id` was not produced by this tree.
    pub fn node(&self, id: NodeId) -> SyntaxNode<'_> {
        assert!(id.index() < self.nodes.len(), "node {id:?} is not part of this tree");
        SyntaxNode { tree: self, id }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn push(
        &mut self,
        kind: SyntaxKind,
        text: Option<String>,
        line: usize,
        children: Vec<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);

        for pair in children.windows(2) {
            self.nodes[pair[0].index()].next_sibling = Some(pair[1]);
        }
        for child in &children {
            let data = &mut self.nodes[child.index()];
            debug_assert!(data.parent.is_none(), "node {child:?} already has a parent");
            data.parent = Some(id);
        }

        self.nodes.push(NodeData {
            kind,
            text,
            line,
            parent: None,
            next_sibling: None,
            children,
        });
        id
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Borrowed, copyable view of one node.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> SyntaxNode<'t> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn kind(self) -> &'t SyntaxKind {
        &self.tree.data(self.id).kind
    }

    pub fn is(self, kind: &SyntaxKind) -> bool {
        self.kind() == kind
    }

    pub fn text(self) -> Option<&'t str> {
        self.tree.data(self.id).text.as_deref()
    }

    /// 1-based source line.
    pub fn line(self) -> usize {
        self.tree.data(self.id).line
    }

    pub fn parent(self) -> Option<SyntaxNode<'t>> {
        self.tree.data(self.id).parent.map(|id| self.tree.node(id))
    }

    pub fn next_sibling(self) -> Option<SyntaxNode<'t>> {
        self.tree.data(self.id).next_sibling.map(|id| self.tree.node(id))
    }

    pub fn first_child(self) -> Option<SyntaxNode<'t>> {
        self.children().next()
    }

    pub fn last_child(self) -> Option<SyntaxNode<'t>> {
        self.tree
            .data(self.id)
            .children
            .last()
            .map(|id| self.tree.node(*id))
    }

    pub fn child_count(self) -> usize {
        self.tree.data(self.id).children.len()
    }

    pub fn children(self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |id| tree.node(*id))
    }

    /// First direct child of the given kind.
    pub fn find_first_child(self, kind: &SyntaxKind) -> Option<SyntaxNode<'t>> {
        self.children().find(|child| child.is(kind))
    }

    /// This node and everything below it, in pre-order.
    pub fn descendants(self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev());
            Some(node)
        })
    }

    /// Strict ancestors, nearest first.
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'t>> + 't {
        std::iter::successors(self.parent(), |node| node.parent())
    }
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{}({:?})@{}", self.kind(), text, self.line()),
            None => write!(f, "{}@{}", self.kind(), self.line()),
        }
    }
}

/// Flatten an `Identifier` / `MemberAccess` chain into its dotted text.
///
/// Returns `None` for any other shape, e.g. `foo().bar`.
pub fn full_ident(node: SyntaxNode<'_>) -> Option<String> {
    match node.kind() {
        SyntaxKind::Identifier => node.text().map(str::to_owned),
        SyntaxKind::MemberAccess => {
            let object = node.first_child()?;
            let member = object.next_sibling()?;
            Some(format!("{}.{}", full_ident(object)?, full_ident(member)?))
        }
        _ => None,
    }
}
