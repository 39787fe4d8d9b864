//! Owned JavaScript syntax tree.
//!
//! Only the node shapes the rules inspect get their own variant; everything
//! else is kept as [`NodeKind::Other`] so the walker still reaches the
//! expressions nested inside it.

use crate::diagnostics::SourceRange;

/// Immutable node of a parsed script block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub range: SourceRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a script block.
    Program { body: Vec<SyntaxNode> },
    /// `callee(arguments...)`
    Call {
        callee: Box<SyntaxNode>,
        arguments: Vec<SyntaxNode>,
    },
    /// `object.property`, or `object[property]` when `computed`.
    Member {
        object: Box<SyntaxNode>,
        property: Box<SyntaxNode>,
        computed: bool,
    },
    Identifier { name: String },
    This,
    /// String, number, regex and template literals, verbatim.
    Literal { raw: String },
    /// Any other grammar node, tagged with its grammar name.
    Other {
        kind: String,
        children: Vec<SyntaxNode>,
    },
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, range: SourceRange) -> Self {
        Self { kind, range }
    }

    /// Direct children in source order.
    pub fn children(&self) -> Children<'_> {
        let empty: &[SyntaxNode] = &[];
        let (head, tail) = match &self.kind {
            NodeKind::Program { body } => (body.as_slice(), empty),
            NodeKind::Call { callee, arguments } => {
                (std::slice::from_ref(callee.as_ref()), arguments.as_slice())
            }
            NodeKind::Member {
                object, property, ..
            } => (
                std::slice::from_ref(object.as_ref()),
                std::slice::from_ref(property.as_ref()),
            ),
            NodeKind::Other { children, .. } => (children.as_slice(), empty),
            NodeKind::Identifier { .. } | NodeKind::This | NodeKind::Literal { .. } => {
                (empty, empty)
            }
        };
        Children {
            inner: head.iter().chain(tail.iter()),
        }
    }

    pub fn as_identifier(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Identifier { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_this(&self) -> bool {
        matches!(self.kind, NodeKind::This)
    }

    /// Short grammar-style name, mostly for logging.
    pub fn kind_name(&self) -> &str {
        match &self.kind {
            NodeKind::Program { .. } => "program",
            NodeKind::Call { .. } => "call_expression",
            NodeKind::Member { computed: false, .. } => "member_expression",
            NodeKind::Member { computed: true, .. } => "subscript_expression",
            NodeKind::Identifier { .. } => "identifier",
            NodeKind::This => "this",
            NodeKind::Literal { .. } => "literal",
            NodeKind::Other { kind, .. } => kind.as_str(),
        }
    }
}

// The derived drop glue recurses once per level; tear deep trees down with
// an explicit stack instead.
impl Drop for SyntaxNode {
    fn drop(&mut self) {
        let mut pending = take_children(&mut self.kind);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut take_children(&mut node.kind));
        }
    }
}

fn take_children(kind: &mut NodeKind) -> Vec<SyntaxNode> {
    match std::mem::replace(kind, NodeKind::This) {
        NodeKind::Program { body } => body,
        NodeKind::Call {
            callee,
            mut arguments,
        } => {
            arguments.push(*callee);
            arguments
        }
        NodeKind::Member {
            object, property, ..
        } => vec![*object, *property],
        NodeKind::Other { children, .. } => children,
        NodeKind::Identifier { .. } | NodeKind::This | NodeKind::Literal { .. } => Vec::new(),
    }
}

/// Iterator over the direct children of a [`SyntaxNode`].
pub struct Children<'a> {
    inner: std::iter::Chain<std::slice::Iter<'a, SyntaxNode>, std::slice::Iter<'a, SyntaxNode>>,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

impl DoubleEndedIterator for Children<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

#[cfg(test)]
pub(crate) mod build {
    //! Terse constructors for hand-built trees in unit tests.

    use super::*;

    pub(crate) fn ident(name: &str) -> SyntaxNode {
        SyntaxNode::new(
            NodeKind::Identifier {
                name: name.to_string(),
            },
            SourceRange::default(),
        )
    }

    pub(crate) fn this() -> SyntaxNode {
        SyntaxNode::new(NodeKind::This, SourceRange::default())
    }

    pub(crate) fn string(raw: &str) -> SyntaxNode {
        SyntaxNode::new(
            NodeKind::Literal {
                raw: raw.to_string(),
            },
            SourceRange::default(),
        )
    }

    pub(crate) fn member(object: SyntaxNode, property: SyntaxNode) -> SyntaxNode {
        SyntaxNode::new(
            NodeKind::Member {
                object: Box::new(object),
                property: Box::new(property),
                computed: false,
            },
            SourceRange::default(),
        )
    }

    pub(crate) fn subscript(object: SyntaxNode, index: SyntaxNode) -> SyntaxNode {
        SyntaxNode::new(
            NodeKind::Member {
                object: Box::new(object),
                property: Box::new(index),
                computed: true,
            },
            SourceRange::default(),
        )
    }

    pub(crate) fn call(callee: SyntaxNode, arguments: Vec<SyntaxNode>) -> SyntaxNode {
        SyntaxNode::new(
            NodeKind::Call {
                callee: Box::new(callee),
                arguments,
            },
            SourceRange::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::build::*;

    #[test]
    fn call_children_are_callee_then_arguments() {
        let node = call(member(this(), ident("$$")), vec![string("'.a'"), ident("b")]);
        let kinds: Vec<&str> = node.children().map(|c| c.kind_name()).collect();
        assert_eq!(kinds, vec!["member_expression", "literal", "identifier"]);
    }

    #[test]
    fn deep_member_chain_drops_without_recursing() {
        let mut node = ident("a");
        for _ in 0..100_000 {
            node = member(node, ident("b"));
        }
        assert_eq!(node.children().count(), 2);
        drop(node);
    }

    #[test]
    fn leaves_have_no_children() {
        assert_eq!(ident("x").children().count(), 0);
        assert_eq!(this().children().count(), 0);
    }
}
