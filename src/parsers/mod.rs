//! Parsing functionality for source files
//!
//! Python source is parsed with tree-sitter and lowered into a small
//! tagged-variant tree that the analyzer walks.

pub mod python;
pub mod syntax_tree;

pub use python::PythonParser;
pub use syntax_tree::{
    ConstantKind, DecisionKind, DefinitionKind, NodeKind, OperatorKind, Span, SyntaxNode,
    SyntaxTree,
};
