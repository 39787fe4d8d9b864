//! Call-shape predicates over [`SyntaxNode`].
//!
//! Every predicate is total: shapes it does not recognise simply don't match.

use crate::ast::{NodeKind, SyntaxNode};

/// Receiver of a matched method call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver<'a> {
    /// A bare identifier such as `Polymer`.
    Global(&'a str),
    /// The current instance, `this`.
    This,
}

/// Split a call into its receiver and dotted method name.
///
/// Returns `None` unless `node` is `receiver.method(...)` with a non-computed
/// property; `obj[name](...)` never yields a method name.
pub fn method_call(node: &SyntaxNode) -> Option<(Receiver<'_>, &str)> {
    let NodeKind::Call { callee, .. } = &node.kind else {
        return None;
    };
    let NodeKind::Member {
        object,
        property,
        computed: false,
    } = &callee.kind
    else {
        return None;
    };

    let method = property.as_identifier()?;
    let receiver = match &object.kind {
        NodeKind::Identifier { name } => Receiver::Global(name),
        NodeKind::This => Receiver::This,
        _ => return None,
    };
    Some((receiver, method))
}

/// `object_name.method_name(...)` where `object_name` is a bare identifier.
pub fn matches_static_method_call(node: &SyntaxNode, object_name: &str, method_name: &str) -> bool {
    matches!(
        method_call(node),
        Some((Receiver::Global(object), method)) if object == object_name && method == method_name
    )
}

/// `this.method_name(...)`.
pub fn matches_instance_method_call(node: &SyntaxNode, method_name: &str) -> bool {
    matches!(
        method_call(node),
        Some((Receiver::This, method)) if method == method_name
    )
}

pub fn is_polymer_instanceof(node: &SyntaxNode) -> bool {
    matches_static_method_call(node, "Polymer", "instanceof")
}

pub fn is_query_selector_shorthand(node: &SyntaxNode) -> bool {
    matches_instance_method_call(node, "$$")
}

pub fn is_event_fire(node: &SyntaxNode) -> bool {
    matches_instance_method_call(node, "fire")
}
