//! Suspicious-pattern checks
//!
//! Each check is a pure function that reports at most one finding of its
//! kind. Credential and placeholder checks work on raw text so they still run
//! when the source does not parse; the duplicate-import check needs a tree.

use crate::models::analysis::FindingKind;
use crate::parsers::{NodeKind, SyntaxTree};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A secret-looking name bound to a quoted alphanumeric literal of 8+ chars.
/// The secret word must be a whole segment of the name: `api_key`,
/// `DB_PASSWORD` or `apiKey`, but not `monkey` or `keyboard_layout`.
static CREDENTIAL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"\b(?:(?:\w*_)?(?i:key|password|secret|token)|\w*[a-z0-9](?:Key|Password|Secret|Token))",
        r"(?:_\w*)?",
        r#"\s*=\s*["'][A-Za-z0-9]{8,}["']"#,
    ))
    .unwrap_or_else(|e| panic!("invalid credential pattern: {}", e))
});

static PLACEHOLDER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)#.*(?:TODO|FIXME|logic here|insert here|your code here)")
        .unwrap_or_else(|e| panic!("invalid placeholder pattern: {}", e))
});

pub fn detect_hardcoded_credential(text: &str) -> Option<FindingKind> {
    CREDENTIAL_PATTERN
        .is_match(text)
        .then_some(FindingKind::HardcodedCredential)
}

pub fn detect_placeholder_comment(text: &str) -> Option<FindingKind> {
    PLACEHOLDER_PATTERN
        .is_match(text)
        .then_some(FindingKind::PlaceholderComment)
}

/// Two `import` statements binding the same top-level package.
///
/// Only plain `import x` statements count; `from x import y` does not.
pub fn detect_duplicate_import(tree: &SyntaxTree) -> Option<FindingKind> {
    let mut seen = HashSet::new();
    for node in tree.walk() {
        if let NodeKind::Import { modules } = &node.kind {
            for module in modules {
                let package = module.split('.').next().unwrap_or(module);
                if !seen.insert(package) {
                    return Some(FindingKind::DuplicateImport);
                }
            }
        }
    }
    None
}

/// Text-only checks, in detection order
pub fn text_findings(text: &str) -> Vec<FindingKind> {
    [detect_hardcoded_credential(text), detect_placeholder_comment(text)]
        .into_iter()
        .flatten()
        .collect()
}
