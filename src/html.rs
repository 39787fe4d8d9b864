//! Inline `<script>` extraction for element files.

use crate::diagnostics::Position;
use crate::error::{LintError, LintResult};
use tree_sitter::{Node, Parser, Tree};

/// `type` values that mark a script element as JavaScript. A missing `type`
/// attribute counts as JavaScript too.
const SCRIPT_TYPES: &[&str] = &["", "text/javascript", "application/javascript", "module"];

/// Body of one inline script element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptBlock<'s> {
    pub source: &'s str,
    /// Where `source` starts in the markup.
    pub start: Position,
}

fn parse_markup(markup: &str) -> LintResult<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(tree_sitter_html::language())
        .map_err(|err| LintError::Grammar(err.to_string()))?;

    parser
        .parse(markup, None)
        .ok_or_else(|| LintError::parse("HTML source"))
}

/// Inline JavaScript blocks of `markup`, in document order.
///
/// External scripts (`<script src=..>`) have no body and are skipped, as are
/// script elements whose `type` is not JavaScript (templates, JSON data).
pub fn inline_scripts(markup: &str) -> LintResult<Vec<ScriptBlock<'_>>> {
    let tree = parse_markup(markup)?;
    let mut blocks = Vec::new();

    let mut stack = vec![tree.root_node()];
    while let Some(node) = stack.pop() {
        if node.kind() == "script_element" {
            if let Some(block) = script_block(node, markup) {
                blocks.push(block);
            }
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }

    Ok(blocks)
}

fn script_block<'s>(element: Node, markup: &'s str) -> Option<ScriptBlock<'s>> {
    let mut cursor = element.walk();
    let children: Vec<Node> = element.named_children(&mut cursor).collect();

    let start_tag = children.iter().find(|c| c.kind() == "start_tag")?;
    let script_type = attribute(*start_tag, "type", markup).unwrap_or("");
    if !SCRIPT_TYPES.contains(&script_type.trim().to_ascii_lowercase().as_str()) {
        tracing::debug!(script_type, "skipping non-JavaScript script element");
        return None;
    }

    let body = children.iter().find(|c| c.kind() == "raw_text")?;
    Some(ScriptBlock {
        source: markup.get(body.start_byte()..body.end_byte())?,
        start: body.start_position().into(),
    })
}

/// Value of attribute `name` on `start_tag`, without quotes.
fn attribute<'s>(start_tag: Node, name: &str, markup: &'s str) -> Option<&'s str> {
    let mut cursor = start_tag.walk();
    let attributes: Vec<Node> = start_tag
        .named_children(&mut cursor)
        .filter(|c| c.kind() == "attribute")
        .collect();

    for attr in attributes {
        let mut cursor = attr.walk();
        let parts: Vec<Node> = attr.named_children(&mut cursor).collect();
        let Some(attr_name) = parts.iter().find(|p| p.kind() == "attribute_name") else {
            continue;
        };
        let attr_name = markup.get(attr_name.start_byte()..attr_name.end_byte())?;
        if !attr_name.eq_ignore_ascii_case(name) {
            continue;
        }

        let value = parts.iter().find_map(|p| match p.kind() {
            "attribute_value" => Some(*p),
            "quoted_attribute_value" => p.named_child(0),
            _ => None,
        });
        return Some(match value {
            Some(value) => markup.get(value.start_byte()..value.end_byte())?,
            // `type=""` or a bare attribute.
            None => "",
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_inline_scripts_with_positions() {
        let markup = "<dom-module id=\"x-a\">\n  <script>a();</script>\n</dom-module>\n<script>\nb();\n</script>\n";
        let blocks = inline_scripts(markup).expect("parse");
        assert_eq!(
            blocks,
            vec![
                ScriptBlock {
                    source: "a();",
                    start: Position::new(1, 10),
                },
                ScriptBlock {
                    source: "\nb();\n",
                    start: Position::new(3, 8),
                },
            ]
        );
    }

    #[test]
    fn skips_external_and_non_javascript_scripts() {
        let markup = concat!(
            "<script src=\"polymer.js\"></script>\n",
            "<script type=\"text/x-template\">this.$$('.x');</script>\n",
            "<script type='application/json'>{}</script>\n",
            "<script type=\"module\">c();</script>\n",
        );
        let blocks = inline_scripts(markup).expect("parse");
        let sources: Vec<_> = blocks.iter().map(|b| b.source).collect();
        assert_eq!(sources, vec!["c();"]);
    }

    #[test]
    fn markup_without_scripts_has_no_blocks() {
        let blocks = inline_scripts("<template><div></div></template>").expect("parse");
        assert!(blocks.is_empty());
    }
}
