//! Cyclomatic complexity of function blocks

use crate::models::analysis::round_to;
use crate::parsers::{DefinitionKind, NodeKind, SyntaxNode, SyntaxTree};

/// Mean cyclomatic complexity over every function or method, rounded to 2
/// decimals. 0.0 when the source defines no functions.
pub fn average_complexity(tree: &SyntaxTree) -> f64 {
    let scores: Vec<usize> = tree
        .walk()
        .filter(|node| {
            matches!(
                node.kind,
                NodeKind::Definition {
                    kind: DefinitionKind::Function,
                    ..
                }
            )
        })
        .map(block_complexity)
        .collect();

    if scores.is_empty() {
        return 0.0;
    }
    round_to(
        scores.iter().sum::<usize>() as f64 / scores.len() as f64,
        2,
    )
}

/// 1 + decision points in the body, excluding nested definitions
pub fn block_complexity(definition: &SyntaxNode) -> usize {
    1 + definition.children.iter().map(decision_points).sum::<usize>()
}

fn decision_points(node: &SyntaxNode) -> usize {
    let own = match &node.kind {
        // scored as a block of its own
        NodeKind::Definition { .. } => return 0,
        NodeKind::Decision(_) => 1,
        NodeKind::Operation(ops) => ops.iter().filter(|op| op.is_boolean()).count(),
        _ => 0,
    };
    own + node.children.iter().map(decision_points).sum::<usize>()
}
