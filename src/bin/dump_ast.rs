//! Prints the lowered syntax tree of a JavaScript file, for writing matchers.

use polymer_lint::ast::{NodeKind, SyntaxNode};
use polymer_lint::diagnostics::Position;
use polymer_lint::parser::parse_script;
use std::env;
use std::fs;

fn print_tree(root: &SyntaxNode) {
    let mut stack = vec![(root, 0usize)];
    while let Some((node, indent)) = stack.pop() {
        print_node(node, indent);
        stack.extend(node.children().rev().map(|child| (child, indent + 1)));
    }
}

fn print_node(node: &SyntaxNode, indent: usize) {
    let indent_str = "  ".repeat(indent);
    let start = node.range.start;

    let detail = match &node.kind {
        NodeKind::Identifier { name } => format!(" {name}"),
        NodeKind::Literal { raw } => {
            let raw = raw.replace('\n', "\\n");
            match raw.char_indices().nth(50) {
                Some((cut, _)) => format!(" {}...", &raw[..cut]),
                None => format!(" {raw}"),
            }
        }
        NodeKind::Member { computed: true, .. } => " [computed]".to_string(),
        _ => String::new(),
    };

    println!(
        "{}{} @{}:{}{}",
        indent_str,
        node.kind_name(),
        start.line + 1,
        start.column + 1,
        detail
    );
}

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: dump_ast <file.js>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let source = fs::read_to_string(file_path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", file_path, e);
        std::process::exit(1);
    });

    let root = parse_script(&source, Position::default()).unwrap_or_else(|e| {
        eprintln!("Failed to parse {}: {}", file_path, e);
        std::process::exit(1);
    });

    println!("AST for {}:", file_path);
    println!("================");
    print_tree(&root);
}
