//! Java front end: tree-sitter parse tree → [`SyntaxTree`].
//!
//! Only the constructs the extraction core inspects get a dedicated kind;
//! everything else is kept as `Other(<grammar kind>)` so that ancestry
//! (e.g. an enclosing `try`) is preserved.

use thiserror::Error;
use tree_sitter::{Node, Parser};

use crate::core::syntax::{NodeId, SyntaxKind, SyntaxTree};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to load the Java grammar: {0}")]
    Language(String),

    #[error("the parser returned no tree")]
    NoTree,

    #[error("syntax error at line {line}")]
    Syntax { line: usize },
}

/// Parse Java source code into a [`SyntaxTree`].
///
/// Sources with syntax errors are rejected rather than partially lowered.
pub fn parse_java_source(source: &str) -> Result<SyntaxTree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| ParseError::Language(e.to_string()))?;

    let parsed = parser.parse(source, None).ok_or(ParseError::NoTree)?;
    let root = parsed.root_node();
    if root.has_error() {
        let line = first_error_line(root).unwrap_or_else(|| line_of(root));
        return Err(ParseError::Syntax { line });
    }

    let mut lowering = Lowering {
        source: source.as_bytes(),
        tree: SyntaxTree::new(),
    };
    let children = lowering.lower_children(root);
    let unit = lowering
        .tree
        .add_node(SyntaxKind::CompilationUnit, line_of(root), children);
    lowering.tree.set_root(unit);
    Ok(lowering.tree)
}

fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

fn first_error_line(node: Node<'_>) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(line_of(node));
    }
    node.children(&mut node.walk())
        .filter(|child| child.has_error())
        .find_map(first_error_line)
}

struct Lowering<'s> {
    source: &'s [u8],
    tree: SyntaxTree,
}

impl<'s> Lowering<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn token(&mut self, kind: SyntaxKind, node: Node<'_>) -> NodeId {
        let text = self.text(node);
        self.tree.add_token(kind, text, line_of(node))
    }

    /// Lower every named child of `node`, skipping comments.
    fn lower_children(&mut self, node: Node<'_>) -> Vec<NodeId> {
        let mut lowered = Vec::new();
        for child in node.named_children(&mut node.walk()) {
            self.lower_into(child, &mut lowered);
        }
        lowered
    }

    fn interior(&mut self, kind: SyntaxKind, node: Node<'_>) -> NodeId {
        let children = self.lower_children(node);
        self.tree.add_node(kind, line_of(node), children)
    }

    /// Lower `node` and append the result(s) to `out`.
    ///
    /// Most nodes lower to one node; comments lower to none, parentheses to
    /// their content and multi-declarator declarations to one node per
    /// declarator.
    fn lower_into(&mut self, node: Node<'_>, out: &mut Vec<NodeId>) {
        match node.kind() {
            "line_comment" | "block_comment" => {}
            "parenthesized_expression" => {
                for child in node.named_children(&mut node.walk()) {
                    self.lower_into(child, out);
                }
            }
            "local_variable_declaration" | "field_declaration" | "constant_declaration" => {
                self.lower_declaration(node, out);
            }
            _ => out.push(self.lower(node)),
        }
    }

    fn lower(&mut self, node: Node<'_>) -> NodeId {
        match node.kind() {
            "package_declaration" => self.lower_package(node),
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration" => self.interior(SyntaxKind::ClassDecl, node),
            "class_body" | "interface_body" | "enum_body" | "enum_body_declarations"
            | "annotation_type_body" => self.interior(SyntaxKind::ClassBody, node),
            "method_declaration" => self.interior(SyntaxKind::MethodDecl, node),
            "block" => self.interior(SyntaxKind::Block, node),
            "expression_statement" => self.interior(SyntaxKind::Expression, node),
            "try_statement" | "try_with_resources_statement" => {
                self.interior(SyntaxKind::TryBlock, node)
            }
            "modifiers" => self.lower_modifiers(node),
            "marker_annotation" | "annotation" => self.lower_annotation(node),
            "method_invocation" => self.lower_method_invocation(node),
            "argument_list" => self.lower_arguments(node),
            "field_access" => self.lower_field_access(node),
            "scoped_identifier" => self.lower_name(node),
            "class_literal" => self.lower_class_literal(node),
            "binary_expression" => self.lower_binary(node),
            "string_literal" => {
                if self.text(node).starts_with("\"\"\"") {
                    self.token(SyntaxKind::Other("text_block".to_owned()), node)
                } else {
                    self.token(SyntaxKind::StringLiteral, node)
                }
            }
            "null_literal" => self.token(SyntaxKind::NullLiteral, node),
            "identifier" => self.token(SyntaxKind::Identifier, node),
            "type_identifier"
            | "scoped_type_identifier"
            | "generic_type"
            | "array_type"
            | "integral_type"
            | "floating_point_type"
            | "boolean_type"
            | "void_type" => self.lower_type(node),
            kind => {
                let kind = SyntaxKind::Other(kind.to_owned());
                if node.named_child_count() == 0 {
                    self.token(kind, node)
                } else {
                    self.interior(kind, node)
                }
            }
        }
    }

    // ============================================================
    // Declarations
    // ============================================================

    fn lower_package(&mut self, node: Node<'_>) -> NodeId {
        let mut children = Vec::new();
        for child in node.named_children(&mut node.walk()) {
            if matches!(child.kind(), "identifier" | "scoped_identifier") {
                children.push(self.lower_name(child));
            }
        }
        self.tree.add_node(SyntaxKind::Package, line_of(node), children)
    }

    /// `final int a = 1, b;` → `VariableDecl` for `a` and for `b`.
    fn lower_declaration(&mut self, node: Node<'_>, out: &mut Vec<NodeId>) {
        let modifiers = node
            .named_children(&mut node.walk())
            .find(|child| child.kind() == "modifiers");
        let type_node = node.child_by_field_name("type");
        let declarators: Vec<_> = node
            .children_by_field_name("declarator", &mut node.walk())
            .collect();

        for declarator in declarators {
            let mut children = Vec::new();
            children.push(match modifiers {
                Some(modifiers) => self.lower_modifiers(modifiers),
                None => self.tree.add_node(SyntaxKind::Modifiers, line_of(node), Vec::new()),
            });
            if let Some(type_node) = type_node {
                children.push(self.lower_type(type_node));
            }
            if let Some(name) = declarator.child_by_field_name("name") {
                children.push(self.token(SyntaxKind::Identifier, name));
            }
            if let Some(value) = declarator.child_by_field_name("value") {
                let mut lowered = Vec::new();
                self.lower_into(value, &mut lowered);
                let line = line_of(value);
                children.push(self.tree.add_node(SyntaxKind::Expression, line, lowered));
            }
            out.push(
                self.tree
                    .add_node(SyntaxKind::VariableDecl, line_of(declarator), children),
            );
        }
    }

    fn lower_modifiers(&mut self, node: Node<'_>) -> NodeId {
        let mut children = Vec::new();
        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "final" => children.push(self.token(SyntaxKind::Final, child)),
                "marker_annotation" | "annotation" => children.push(self.lower_annotation(child)),
                _ => {}
            }
        }
        self.tree.add_node(SyntaxKind::Modifiers, line_of(node), children)
    }

    fn lower_annotation(&mut self, node: Node<'_>) -> NodeId {
        let mut children = Vec::new();
        if let Some(name) = node.child_by_field_name("name") {
            children.push(self.lower_name(name));
        }
        if let Some(arguments) = node.child_by_field_name("arguments") {
            children.push(self.lower(arguments));
        }
        self.tree.add_node(SyntaxKind::Annotation, line_of(node), children)
    }

    // ============================================================
    // Names and types
    // ============================================================

    /// Dotted name → `Identifier` or left-nested `MemberAccess` chain.
    fn lower_name(&mut self, node: Node<'_>) -> NodeId {
        match node.kind() {
            "identifier" | "type_identifier" => self.token(SyntaxKind::Identifier, node),
            "scoped_identifier" | "scoped_type_identifier" => {
                let named: Vec<_> = node.named_children(&mut node.walk()).collect();
                match (named.first(), named.last()) {
                    (Some(&scope), Some(&name)) if named.len() >= 2 => {
                        let scope = self.lower_name(scope);
                        let name = self.token(SyntaxKind::Identifier, name);
                        self.tree
                            .add_node(SyntaxKind::MemberAccess, line_of(node), vec![scope, name])
                    }
                    _ => self.token(SyntaxKind::Identifier, node),
                }
            }
            "generic_type" => match node.named_child(0) {
                Some(base) => self.lower_name(base),
                None => self.token(SyntaxKind::Other("generic_type".to_owned()), node),
            },
            kind => self.token(SyntaxKind::Other(kind.to_owned()), node),
        }
    }

    /// Any type → `TypeRef[name?]`. Primitive and array types carry no name.
    fn lower_type(&mut self, node: Node<'_>) -> NodeId {
        let children = match node.kind() {
            "type_identifier" | "scoped_type_identifier" | "generic_type" => {
                vec![self.lower_name(node)]
            }
            _ => Vec::new(),
        };
        self.tree.add_node(SyntaxKind::TypeRef, line_of(node), children)
    }

    // ============================================================
    // Expressions
    // ============================================================

    /// `object.name(args)` → `MethodCall[MemberAccess[object, name], ArgumentList]`.
    fn lower_method_invocation(&mut self, node: Node<'_>) -> NodeId {
        let line = line_of(node);
        let name = node
            .child_by_field_name("name")
            .map(|name| self.token(SyntaxKind::Identifier, name));

        let callee = match (node.child_by_field_name("object"), name) {
            (Some(object), Some(name)) => {
                let object = self.lower(object);
                Some(self.tree.add_node(SyntaxKind::MemberAccess, line, vec![object, name]))
            }
            (None, name) => name,
            (Some(object), None) => Some(self.lower(object)),
        };

        let mut children: Vec<_> = callee.into_iter().collect();
        if let Some(arguments) = node.child_by_field_name("arguments") {
            children.push(self.lower_arguments(arguments));
        }
        self.tree.add_node(SyntaxKind::MethodCall, line, children)
    }

    /// Every argument is wrapped in an `Expression`.
    fn lower_arguments(&mut self, node: Node<'_>) -> NodeId {
        let mut arguments = Vec::new();
        for argument in node.named_children(&mut node.walk()) {
            let mut lowered = Vec::new();
            self.lower_into(argument, &mut lowered);
            if lowered.is_empty() {
                continue;
            }
            arguments.push(
                self.tree
                    .add_node(SyntaxKind::Expression, line_of(argument), lowered),
            );
        }
        self.tree
            .add_node(SyntaxKind::ArgumentList, line_of(node), arguments)
    }

    fn lower_field_access(&mut self, node: Node<'_>) -> NodeId {
        let mut children = Vec::new();
        if let Some(object) = node.child_by_field_name("object") {
            children.push(self.lower(object));
        }
        if let Some(field) = node.child_by_field_name("field") {
            children.push(self.lower(field));
        }
        self.tree
            .add_node(SyntaxKind::MemberAccess, line_of(node), children)
    }

    /// `Foo.class` → `MemberAccess[Foo, ClassLiteral]`.
    fn lower_class_literal(&mut self, node: Node<'_>) -> NodeId {
        let line = line_of(node);
        let mut children = Vec::new();
        if let Some(type_node) = node.named_child(0) {
            children.push(self.lower_name(type_node));
        }
        children.push(self.tree.add_token(SyntaxKind::ClassLiteral, "class", line));
        self.tree.add_node(SyntaxKind::MemberAccess, line, children)
    }

    fn lower_binary(&mut self, node: Node<'_>) -> NodeId {
        let operator = node.child_by_field_name("operator").map(|op| op.kind());
        let kind = match operator {
            Some("+") => SyntaxKind::Concatenation,
            _ => SyntaxKind::Other("binary_expression".to_owned()),
        };

        let mut children = Vec::new();
        for field in ["left", "right"] {
            if let Some(operand) = node.child_by_field_name(field) {
                self.lower_into(operand, &mut children);
            }
        }
        self.tree.add_node(kind, line_of(node), children)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::syntax::{SyntaxNode, full_ident};

    fn parse(source: &str) -> SyntaxTree {
        parse_java_source(source).unwrap()
    }

    fn all<'t>(tree: &'t SyntaxTree, kind: SyntaxKind) -> Vec<SyntaxNode<'t>> {
        tree.root()
            .unwrap()
            .descendants()
            .filter(|node| node.is(&kind))
            .collect()
    }

    fn kinds(node: SyntaxNode<'_>) -> Vec<String> {
        node.children().map(|child| child.kind().to_string()).collect()
    }

    /// Wrap statements in a test class.
    fn in_method(body: &str) -> String {
        format!("class A {{\n  @Test\n  public void test() {{\n{body}\n  }}\n}}\n")
    }

    #[test]
    fn test_package_name() {
        let tree = parse("package com.example.checks;\n\nclass A {}\n");
        let root = tree.root().unwrap();
        assert_eq!(kinds(root), vec!["PACKAGE_DEF", "CLASS_DEF"]);

        let package = all(&tree, SyntaxKind::Package)[0];
        assert_eq!(
            full_ident(package.first_child().unwrap()).as_deref(),
            Some("com.example.checks")
        );
    }

    #[test]
    fn test_method_declaration_shape() {
        let tree = parse(&in_method(""));
        let method = all(&tree, SyntaxKind::MethodDecl)[0];
        assert_eq!(
            kinds(method),
            vec!["MODIFIERS", "TYPE", "IDENT", "formal_parameters", "SLIST"]
        );

        let annotation = all(&tree, SyntaxKind::Annotation)[0];
        assert_eq!(annotation.first_child().unwrap().text(), Some("Test"));
        assert_eq!(annotation.parent().unwrap().kind(), &SyntaxKind::Modifiers);
    }

    #[test]
    fn test_property_call_shape() {
        let tree = parse(&in_method(r#"    checkConfig.addAttribute("a", ("b" + "c"));"#));
        let call = all(&tree, SyntaxKind::MethodCall)[0];
        assert_eq!(kinds(call), vec!["DOT", "ELIST"]);
        assert_eq!(call.parent().unwrap().kind(), &SyntaxKind::Expression);

        let callee = call.first_child().unwrap();
        assert_eq!(full_ident(callee).as_deref(), Some("checkConfig.addAttribute"));

        let arguments = call.last_child().unwrap();
        assert_eq!(kinds(arguments), vec!["EXPR", "EXPR"]);
        let value = arguments.last_child().unwrap().first_child().unwrap();
        assert_eq!(value.kind(), &SyntaxKind::Concatenation);
        assert_eq!(kinds(value), vec!["STRING_LITERAL", "STRING_LITERAL"]);
        assert_eq!(value.first_child().unwrap().text(), Some("\"b\""));
    }

    #[test]
    fn test_class_literal_and_enum_access() {
        let tree = parse(&in_method(
            "    final DefaultConfiguration c = createModuleConfig(FooCheck.class);\n    \
             c.addAttribute(\"tokens\", TokenTypes.METHOD_DEF.name());",
        ));
        let calls = all(&tree, SyntaxKind::MethodCall);

        let argument = calls[0].last_child().unwrap().first_child().unwrap();
        let literal = argument.first_child().unwrap();
        assert_eq!(kinds(literal), vec!["IDENT", "LITERAL_CLASS"]);
        assert_eq!(literal.first_child().unwrap().text(), Some("FooCheck"));

        // calls[1] is addAttribute, calls[2] the nested name() call
        let name_call = calls[2];
        assert_eq!(
            full_ident(name_call.first_child().unwrap()).as_deref(),
            Some("TokenTypes.METHOD_DEF.name")
        );
    }

    #[test]
    fn test_declaration_per_declarator() {
        let tree = parse(&in_method("    final File a = null, b;"));
        let declarations = all(&tree, SyntaxKind::VariableDecl);
        assert_eq!(declarations.len(), 2);

        assert_eq!(kinds(declarations[0]), vec!["MODIFIERS", "TYPE", "IDENT", "EXPR"]);
        assert_eq!(kinds(declarations[1]), vec!["MODIFIERS", "TYPE", "IDENT"]);
        for declaration in declarations {
            let modifiers = declaration.first_child().unwrap();
            assert_eq!(kinds(modifiers), vec!["FINAL"]);
            assert_eq!(declaration.parent().unwrap().kind(), &SyntaxKind::Block);
        }
    }

    #[test]
    fn test_field_lives_in_class_body() {
        let tree = parse("class A {\n  private final Configuration c = createRootConfig(null);\n}\n");
        let field = all(&tree, SyntaxKind::VariableDecl)[0];
        assert_eq!(field.parent().unwrap().kind(), &SyntaxKind::ClassBody);
        assert_eq!(field.line(), 2);
    }

    #[test]
    fn test_try_block_ancestry() {
        let tree = parse(&in_method(
            "    try {\n      verify(c, \"f\");\n    } catch (Exception e) {}",
        ));
        let call = all(&tree, SyntaxKind::MethodCall)[0];
        assert!(call.ancestors().any(|node| node.is(&SyntaxKind::TryBlock)));
        assert_eq!(call.line(), 5);
    }

    #[test]
    fn test_non_plus_binary_is_other() {
        let tree = parse(&in_method("    int x = 1 - 2;"));
        let declaration = all(&tree, SyntaxKind::VariableDecl)[0];
        let value = declaration.last_child().unwrap().first_child().unwrap();
        assert_eq!(value.kind().to_string(), "binary_expression");
    }

    #[test]
    fn test_comments_are_dropped() {
        let tree = parse("// header\nclass A { /* body */ }\n");
        let root = tree.root().unwrap();
        assert_eq!(kinds(root), vec!["CLASS_DEF"]);
    }

    #[test]
    fn test_syntax_error_is_rejected() {
        let result = parse_java_source("class A {\n  void m( {\n}\n");
        assert!(matches!(result, Err(ParseError::Syntax { .. })));
    }
}
