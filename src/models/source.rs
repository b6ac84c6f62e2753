//! Source text paired with its parse result

use super::analysis::{MetricResult, ParseFailure};
use crate::parsers::{PythonParser, SyntaxTree};

/// Immutable analysis input: raw text plus its syntax tree, or the reason the
/// text could not be parsed
#[derive(Debug, Clone)]
pub struct SourceUnit {
    text: String,
    tree: MetricResult<SyntaxTree>,
}

impl SourceUnit {
    /// Parse `text` with a fresh Python parser
    pub fn parse(text: impl Into<String>) -> Self {
        Self::with_parser(&PythonParser::new(), text)
    }

    /// Parse `text` with an existing parser
    pub fn with_parser(parser: &PythonParser, text: impl Into<String>) -> Self {
        let text = text.into();
        let tree = parser.parse(&text);
        Self { text, tree }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The syntax tree, or an owned copy of the parse failure
    pub fn tree(&self) -> MetricResult<&SyntaxTree> {
        self.tree.as_ref().map_err(Clone::clone)
    }

    pub fn parse_failure(&self) -> Option<&ParseFailure> {
        self.tree.as_ref().err()
    }

    pub fn is_parsed(&self) -> bool {
        self.tree.is_ok()
    }
}
