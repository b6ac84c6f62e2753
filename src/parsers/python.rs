//! Python parser built on tree-sitter
//!
//! tree-sitter recovers from syntax errors by inserting `ERROR`/`MISSING`
//! nodes. Any such node makes the whole source a parse failure: analysis
//! metrics are only reported for trees the grammar accepted cleanly. The
//! grammar also still accepts the Python 2 `print` and `exec` statements,
//! which Python 3 rejects, so those fail the parse too.

use super::syntax_tree::{
    string_literal_value, ConstantKind, DecisionKind, DefinitionKind, NodeKind, OperatorKind, Span,
    SyntaxNode, SyntaxTree,
};
use crate::models::analysis::ParseFailure;
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

/// Parser for Python 3 source text
#[derive(Clone)]
pub struct PythonParser {
    language: Language,
}

impl PythonParser {
    /// Create a new parser for the bundled Python grammar
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::language(),
        }
    }

    /// Parse source text into a syntax tree, or report why it was rejected
    pub fn parse(&self, source: &str) -> std::result::Result<SyntaxTree, ParseFailure> {
        // tree_sitter::Parser is not Sync, so each call gets its own
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| ParseFailure::new(format!("grammar unavailable: {}", e), None))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseFailure::new("parser produced no tree", None))?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(root);
            debug!(?line, "source rejected by the python grammar");
            return Err(ParseFailure::invalid_syntax(line));
        }
        if let Some(line) = legacy_statement_line(root) {
            debug!(line, "python 2 statement rejected");
            return Err(ParseFailure::invalid_syntax(Some(line)));
        }

        Ok(SyntaxTree::new(lower(root, None, "", source)))
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 1-indexed line of the first ERROR or MISSING node
fn first_error_line(root: Node<'_>) -> Option<usize> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            return Some(node.start_position().row + 1);
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

/// 1-indexed line of the first `print`/`exec` statement
fn legacy_statement_line(root: Node<'_>) -> Option<usize> {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if matches!(node.kind(), "print_statement" | "exec_statement") {
            return Some(node.start_position().row + 1);
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    None
}

fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.start_byte()..node.end_byte()]
}

fn lower(node: Node<'_>, field: Option<&str>, parent_kind: &str, source: &str) -> SyntaxNode {
    let span = Span::new(node.start_position().row + 1, node.end_position().row + 1);

    let kind = match node.kind() {
        "module" => NodeKind::Module,
        "function_definition" => definition(node, DefinitionKind::Function, source),
        "class_definition" => definition(node, DefinitionKind::Class, source),
        "import_statement" => NodeKind::Import {
            modules: imported_modules(node, source),
        },
        "import_from_statement" => NodeKind::ImportFrom {
            module: node
                .child_by_field_name("module_name")
                .filter(|module| module.kind() == "dotted_name")
                .map(|module| text(module, source).to_string()),
        },
        "binary_operator" | "augmented_assignment" => {
            operation(node, OperatorKind::from_binary_token)
        }
        "boolean_operator" => operation(node, OperatorKind::from_boolean_token),
        "unary_operator" => operation(node, OperatorKind::from_unary_token),
        "not_operator" => NodeKind::Operation(vec![OperatorKind::Not]),
        "comparison_operator" => NodeKind::Operation(comparison_operators(node)),
        "identifier" if is_reference(field, parent_kind) && !is_splat_parameter(node) => {
            NodeKind::Name(text(node, source).to_string())
        }
        "integer" => constant(node, ConstantKind::Integer, source),
        "float" => constant(node, ConstantKind::Float, source),
        "true" | "false" => constant(node, ConstantKind::Boolean, source),
        "none" => constant(node, ConstantKind::None, source),
        "ellipsis" => constant(node, ConstantKind::Ellipsis, source),
        "string" | "concatenated_string" => constant(node, ConstantKind::String, source),
        "if_statement" => NodeKind::Decision(DecisionKind::If),
        "elif_clause" => NodeKind::Decision(DecisionKind::Elif),
        "conditional_expression" => NodeKind::Decision(DecisionKind::ConditionalExpression),
        "for_statement" | "while_statement" => NodeKind::Decision(DecisionKind::Loop),
        "else_clause" if matches!(parent_kind, "for_statement" | "while_statement") => {
            NodeKind::Decision(DecisionKind::LoopElse)
        }
        "except_clause" | "except_group_clause" => NodeKind::Decision(DecisionKind::Except),
        "with_statement" => NodeKind::Decision(DecisionKind::With),
        "assert_statement" => NodeKind::Decision(DecisionKind::Assert),
        "for_in_clause" => NodeKind::Decision(DecisionKind::ComprehensionFor),
        "if_clause" => NodeKind::Decision(DecisionKind::ComprehensionIf),
        "case_clause" => NodeKind::Decision(DecisionKind::MatchCase),
        other => NodeKind::Other(other.to_string()),
    };

    let children = match kind {
        // Literal text is captured whole; only f-string interpolations hold
        // further expressions worth lowering.
        NodeKind::Constant { .. } => interpolations(node)
            .into_iter()
            .map(|child| lower(child, None, node.kind(), source))
            .collect(),
        _ => lower_children(node, source),
    };

    SyntaxNode::new(kind, span, children)
}

fn lower_children(node: Node<'_>, source: &str) -> Vec<SyntaxNode> {
    let mut children = Vec::with_capacity(node.named_child_count());
    let mut cursor = node.walk();
    if cursor.goto_first_child() {
        loop {
            let child = cursor.node();
            if child.is_named() {
                children.push(lower(child, cursor.field_name(), node.kind(), source));
            }
            if !cursor.goto_next_sibling() {
                break;
            }
        }
    }
    children
}

/// Whether an identifier in this position is a value reference (an `ast.Name`)
/// rather than a declaration name, parameter, attribute or import path.
fn is_reference(field: Option<&str>, parent_kind: &str) -> bool {
    !matches!(
        (parent_kind, field),
        ("function_definition" | "class_definition", Some("name"))
            | ("attribute", Some("attribute"))
            | ("keyword_argument", Some("name"))
            | ("default_parameter" | "typed_default_parameter", Some("name"))
            | ("aliased_import", Some("alias"))
            | ("typed_parameter", _)
            | ("parameters" | "lambda_parameters", _)
            | ("dotted_name" | "global_statement" | "nonlocal_statement", _)
    )
}

/// `*args` / `**kwargs` in a parameter list name parameters, not values
fn is_splat_parameter(node: Node<'_>) -> bool {
    let Some(splat) = node
        .parent()
        .filter(|parent| matches!(parent.kind(), "list_splat_pattern" | "dictionary_splat_pattern"))
    else {
        return false;
    };
    splat.parent().map_or(false, |owner| {
        matches!(
            owner.kind(),
            "parameters" | "lambda_parameters" | "typed_parameter"
        )
    })
}

fn definition(node: Node<'_>, kind: DefinitionKind, source: &str) -> NodeKind {
    let name = node
        .child_by_field_name("name")
        .map(|name| text(name, source).to_string())
        .unwrap_or_default();

    NodeKind::Definition {
        kind,
        name,
        docstring: docstring(node, source),
    }
}

/// Leading documentation string of a function or class body, if non-empty
fn docstring(node: Node<'_>, source: &str) -> Option<String> {
    let body = node.child_by_field_name("body")?;
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|stmt| stmt.kind() != "comment")?;

    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }

    let expr = first.named_child(0)?;
    let value = match expr.kind() {
        "string" => string_literal_value(text(expr, source))?,
        "concatenated_string" => {
            let mut cursor = expr.walk();
            let parts: Option<Vec<String>> = expr
                .named_children(&mut cursor)
                .filter(|part| part.kind() == "string")
                .map(|part| string_literal_value(text(part, source)))
                .collect();
            parts?.concat()
        }
        _ => return None,
    };

    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn imported_modules(node: Node<'_>, source: &str) -> Vec<String> {
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|name| match name.kind() {
            "dotted_name" => Some(text(name, source).to_string()),
            "aliased_import" => name
                .child_by_field_name("name")
                .map(|module| text(module, source).to_string()),
            _ => None,
        })
        .collect()
}

fn operation(node: Node<'_>, classify: fn(&str) -> Option<OperatorKind>) -> NodeKind {
    let ops = node
        .child_by_field_name("operator")
        .and_then(|op| classify(op.kind()))
        .into_iter()
        .collect();
    NodeKind::Operation(ops)
}

fn comparison_operators(node: Node<'_>) -> Vec<OperatorKind> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|child| !child.is_named())
        .filter_map(|child| OperatorKind::from_comparison_token(child.kind()))
        .collect()
}

fn constant(node: Node<'_>, kind: ConstantKind, source: &str) -> NodeKind {
    NodeKind::Constant {
        kind,
        text: text(node, source).to_string(),
    }
}

/// f-string interpolation nodes inside a string literal, in source order
fn interpolations(node: Node<'_>) -> Vec<Node<'_>> {
    let mut found = Vec::new();
    let mut stack = vec![node];
    while let Some(current) = stack.pop() {
        let mut cursor = current.walk();
        for child in current.named_children(&mut cursor) {
            if child.kind() == "interpolation" {
                found.push(child);
            } else {
                stack.push(child);
            }
        }
    }
    found.sort_by_key(|child| child.start_byte());
    found
}
