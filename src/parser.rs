use crate::ast::{NodeKind, SyntaxNode};
use crate::diagnostics::{Position, SourceRange};
use crate::error::{LintError, LintResult};
use tree_sitter::{Language, Node, Parser, Tree};

fn javascript_language() -> Language {
    tree_sitter_javascript::language()
}

/// Parse JavaScript into a raw tree-sitter tree.
pub fn parse_tree(source: &str) -> LintResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(javascript_language())
        .map_err(|err| LintError::Grammar(err.to_string()))?;

    parser
        .parse(source, None)
        .ok_or_else(|| LintError::parse("JavaScript source"))
}

/// Parse a script block and lower it into an owned [`SyntaxNode`] tree.
///
/// `origin` is where the block starts inside its enclosing document; every
/// range in the returned tree is expressed in document coordinates.
/// Syntax errors do not fail the parse: recovered regions are lowered as
/// `Other { kind: "ERROR" }` nodes and their well-formed children are kept.
pub fn parse_script(source: &str, origin: Position) -> LintResult<SyntaxNode> {
    let tree = parse_tree(source)?;
    lower(tree.root_node(), source, origin).ok_or_else(|| LintError::parse("JavaScript source"))
}

fn slice<'a>(source: &'a str, node: Node) -> &'a str {
    source.get(node.start_byte()..node.end_byte()).unwrap_or("")
}

fn range_of(node: Node, origin: Position) -> SourceRange {
    SourceRange::new(node.start_position().into(), node.end_position().into()).offset_by(origin)
}

/// How a grammar node maps onto a [`NodeKind`] once its children are lowered.
#[derive(Clone, Copy)]
enum Shape {
    Program,
    Call,
    Member { computed: bool },
    Other,
}

enum Step<'t> {
    /// Lower this node (and, later, its children).
    Lower(Node<'t>),
    /// The top `arity` finished nodes are this node's children.
    Assemble(Node<'t>, Shape, usize),
}

enum Plan<'t> {
    Leaf(NodeKind),
    /// Lower another node in place of this one.
    Unwrap(Node<'t>),
    Branch(Shape, Vec<Node<'t>>),
}

/// Lower a tree-sitter subtree without recursing, so nesting depth is bounded
/// by the heap rather than the thread stack.
fn lower(root: Node, source: &str, origin: Position) -> Option<SyntaxNode> {
    let mut steps = vec![Step::Lower(root)];
    let mut finished: Vec<SyntaxNode> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Lower(node) => match plan(node, source) {
                Plan::Leaf(kind) => finished.push(SyntaxNode::new(kind, range_of(node, origin))),
                Plan::Unwrap(inner) => steps.push(Step::Lower(inner)),
                Plan::Branch(shape, children) => {
                    steps.push(Step::Assemble(node, shape, children.len()));
                    steps.extend(children.into_iter().rev().map(Step::Lower));
                }
            },
            Step::Assemble(node, shape, arity) => {
                let children = finished.split_off(finished.len().saturating_sub(arity));
                let kind = assemble(node, shape, children);
                finished.push(SyntaxNode::new(kind, range_of(node, origin)));
            }
        }
    }

    finished.pop()
}

fn plan<'t>(node: Node<'t>, source: &str) -> Plan<'t> {
    if node.is_missing() {
        return Plan::Leaf(NodeKind::Other {
            kind: "MISSING".to_string(),
            children: Vec::new(),
        });
    }

    match node.kind() {
        "program" => Plan::Branch(Shape::Program, named_children(node)),
        "call_expression" => plan_call(node),
        "member_expression" => plan_member(node, "property", false),
        "subscript_expression" => plan_member(node, "index", true),
        "identifier" | "property_identifier" | "shorthand_property_identifier" => {
            Plan::Leaf(NodeKind::Identifier {
                name: slice(source, node).to_string(),
            })
        }
        "this" => Plan::Leaf(NodeKind::This),
        "string" | "number" | "regex" | "true" | "false" | "null" | "undefined" => {
            Plan::Leaf(NodeKind::Literal {
                raw: slice(source, node).to_string(),
            })
        }
        // `(this).$$()` is the same call as `this.$$()`.
        "parenthesized_expression" if node.named_child_count() == 1 => match node.named_child(0) {
            Some(inner) => Plan::Unwrap(inner),
            None => Plan::Branch(Shape::Other, named_children(node)),
        },
        _ => Plan::Branch(Shape::Other, named_children(node)),
    }
}

fn plan_call(node: Node) -> Plan {
    let Some(callee) = node.child_by_field_name("function") else {
        return Plan::Branch(Shape::Other, named_children(node));
    };

    let mut children = vec![callee];
    match node.child_by_field_name("arguments") {
        Some(args) if args.kind() == "arguments" => children.extend(named_children(args)),
        // Tagged template: the template itself is the only argument.
        Some(template) => children.push(template),
        None => {}
    }
    Plan::Branch(Shape::Call, children)
}

fn plan_member<'t>(node: Node<'t>, property_field: &str, computed: bool) -> Plan<'t> {
    let object = node.child_by_field_name("object");
    let property = node.child_by_field_name(property_field);

    match (object, property) {
        (Some(object), Some(property)) => {
            Plan::Branch(Shape::Member { computed }, vec![object, property])
        }
        _ => Plan::Branch(Shape::Other, named_children(node)),
    }
}

fn assemble(node: Node, shape: Shape, children: Vec<SyntaxNode>) -> NodeKind {
    let fallback = |children: Vec<SyntaxNode>| NodeKind::Other {
        kind: node.kind().to_string(),
        children,
    };

    match shape {
        Shape::Program => NodeKind::Program { body: children },
        Shape::Other => fallback(children),
        Shape::Call => {
            let mut children = children.into_iter();
            match children.next() {
                Some(callee) => NodeKind::Call {
                    callee: Box::new(callee),
                    arguments: children.collect(),
                },
                None => fallback(Vec::new()),
            }
        }
        Shape::Member { computed } => {
            let mut children = children.into_iter();
            match (children.next(), children.next()) {
                (Some(object), Some(property)) => NodeKind::Member {
                    object: Box::new(object),
                    property: Box::new(property),
                    computed,
                },
                (object, property) => fallback(object.into_iter().chain(property).collect()),
            }
        }
    }
}

fn named_children(node: Node) -> Vec<Node> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}
