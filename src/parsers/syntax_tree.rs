//! Owned, language-level syntax tree
//!
//! The parser lowers the concrete tree-sitter tree into this sum-typed tree so
//! that analysis passes can `match` on node kinds instead of comparing grammar
//! strings, and so the tree can cross thread boundaries without borrowing the
//! source buffer.

use serde::{Deserialize, Serialize};

/// Line range of a node (1-indexed, inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    pub start_line: usize,
    pub end_line: usize,
}

impl Span {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self { start_line, end_line }
    }
}

/// Structural operation kinds counted as Halstead operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OperatorKind {
    // arithmetic and bitwise
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    Pow,
    MatMult,
    LShift,
    RShift,
    BitAnd,
    BitOr,
    BitXor,
    // boolean
    And,
    Or,
    Not,
    // unary
    Invert,
    UAdd,
    USub,
    // comparison
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    Is,
    IsNot,
    In,
    NotIn,
}

impl OperatorKind {
    /// Binary or augmented-assignment operator token (`+`, `//=`, ...)
    pub fn from_binary_token(token: &str) -> Option<Self> {
        let token = match token.strip_suffix('=') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => token,
        };
        let op = match token {
            "+" => Self::Add,
            "-" => Self::Sub,
            "*" => Self::Mult,
            "/" => Self::Div,
            "//" => Self::FloorDiv,
            "%" => Self::Mod,
            "**" => Self::Pow,
            "@" => Self::MatMult,
            "<<" => Self::LShift,
            ">>" => Self::RShift,
            "&" => Self::BitAnd,
            "|" => Self::BitOr,
            "^" => Self::BitXor,
            _ => return None,
        };
        Some(op)
    }

    pub fn from_unary_token(token: &str) -> Option<Self> {
        match token {
            "-" => Some(Self::USub),
            "+" => Some(Self::UAdd),
            "~" => Some(Self::Invert),
            "not" => Some(Self::Not),
            _ => None,
        }
    }

    pub fn from_boolean_token(token: &str) -> Option<Self> {
        match token {
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            _ => None,
        }
    }

    pub fn from_comparison_token(token: &str) -> Option<Self> {
        match token {
            "==" => Some(Self::Eq),
            "!=" | "<>" => Some(Self::NotEq),
            "<" => Some(Self::Lt),
            "<=" => Some(Self::LtE),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::GtE),
            "is" => Some(Self::Is),
            "is not" => Some(Self::IsNot),
            "in" => Some(Self::In),
            "not in" => Some(Self::NotIn),
            _ => None,
        }
    }

    pub fn is_boolean(self) -> bool {
        matches!(self, Self::And | Self::Or)
    }
}

/// Literal constant categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstantKind {
    Integer,
    Float,
    String,
    Boolean,
    None,
    Ellipsis,
}

impl ConstantKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "int",
            Self::Float => "float",
            Self::String => "str",
            Self::Boolean => "bool",
            Self::None => "none",
            Self::Ellipsis => "ellipsis",
        }
    }
}

/// Named constructs that can carry documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefinitionKind {
    Function,
    Class,
}

/// Control-flow decision points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    If,
    Elif,
    ConditionalExpression,
    Loop,
    LoopElse,
    Except,
    With,
    Assert,
    ComprehensionFor,
    ComprehensionIf,
    MatchCase,
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Module,
    Definition {
        kind: DefinitionKind,
        name: String,
        docstring: Option<String>,
    },
    /// `import a.b, c as d` - the dotted module names in order
    Import { modules: Vec<String> },
    /// `from a import b` - the source module, absent for `from . import x`
    ImportFrom { module: Option<String> },
    /// Binary, boolean, unary, comparison or augmented operation.
    /// Chained comparisons carry one entry per operator.
    Operation(Vec<OperatorKind>),
    /// Identifier used as a value reference or assignment target
    Name(String),
    Constant { kind: ConstantKind, text: String },
    Decision(DecisionKind),
    /// Any other grammar construct, by grammar name
    Other(String),
}

/// One node of the syntax tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, span: Span, children: Vec<SyntaxNode>) -> Self {
        Self { kind, span, children }
    }

    pub fn leaf(kind: NodeKind, span: Span) -> Self {
        Self::new(kind, span, Vec::new())
    }

    /// Pre-order traversal of this node and all descendants
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator over a subtree
pub struct Walk<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A successfully parsed module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntaxTree {
    root: SyntaxNode,
}

impl SyntaxTree {
    pub fn new(root: SyntaxNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &SyntaxNode {
        &self.root
    }

    /// Every node in source order
    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }

    /// Function and class definitions at any depth
    pub fn definitions(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.walk()
            .filter(|node| matches!(node.kind, NodeKind::Definition { .. }))
    }
}

/// Decode the value of a plain Python string literal.
///
/// Returns `None` for f-strings and bytes literals, which do not count as
/// documentation.
pub fn string_literal_value(raw: &str) -> Option<String> {
    let prefix_len = raw.find(['"', '\''])?;
    let prefix = raw[..prefix_len].to_ascii_lowercase();
    if prefix.contains('f') || prefix.contains('b') {
        return None;
    }

    let body = &raw[prefix_len..];
    ["\"\"\"", "'''", "\"", "'"]
        .iter()
        .find(|quote| {
            body.len() >= quote.len() * 2 && body.starts_with(**quote) && body.ends_with(**quote)
        })
        .map(|quote| body[quote.len()..body.len() - quote.len()].to_string())
}
