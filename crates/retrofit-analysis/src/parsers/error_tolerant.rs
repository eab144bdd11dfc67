//! Error-tolerant parsing: count ERROR nodes, keep extracting around them.

use tree_sitter::Node;

use super::types::Span;

/// Count ERROR and MISSING nodes in a tree-sitter tree.
pub fn count_errors(root: Node, src: &[u8]) -> (u32, Vec<Span>) {
    let mut count = 0u32;
    let mut spans = Vec::new();
    collect_errors(root, src, &mut count, &mut spans);
    (count, spans)
}

fn collect_errors(node: Node, src: &[u8], count: &mut u32, spans: &mut Vec<Span>) {
    if node.is_error() || node.is_missing() {
        *count += 1;
        spans.push(Span::from_ts_node(&node, src));
    }
    if !node.has_error() {
        return;
    }
    for i in 0..node.child_count() {
        if let Some(child) = node.child(i) {
            collect_errors(child, src, count, spans);
        }
    }
}
