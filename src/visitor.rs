use crate::ast::SyntaxNode;
use crate::document::{Document, FeatureKind, JsDocument};

/// Visit `root` and every node below it once, depth-first, parents before
/// children, siblings in source order.
pub fn walk<'a>(root: &'a SyntaxNode, f: &mut impl FnMut(&'a SyntaxNode)) {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        f(node);
        stack.extend(node.children().rev());
    }
}

/// Walk every script block of `document` in document order.
///
/// Purely structural: no scope information is built. A document without
/// script blocks never invokes `f`.
pub fn walk_document<'a>(
    document: &'a Document,
    f: &mut impl FnMut(&'a JsDocument, &'a SyntaxNode),
) {
    for script in document.features(FeatureKind::JsDocument) {
        tracing::trace!(url = document.url(), kind = ?document.kind(), "walking script block");
        walk(&script.ast, &mut |node| f(script, node));
    }
}
