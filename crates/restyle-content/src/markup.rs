//! Markup rendering
//!
//! HTML found in the target is parsed into a tree and mapped onto content
//! blocks element by element, so it is restyled like any other content.
//! Only the structure survives: source attributes other than a safe `href`
//! and a list `start` are dropped, which removes event handlers, and
//! script-like elements are skipped together with their content.

use restyle_dom::{Category, DomTree, NodeData, NodeId};
use restyle_html::{HtmlParser, Parser};

use crate::ContentBlock;
use crate::renderer::{BlockBuilder, is_safe_href};

/// Elements skipped with everything inside them
const DROPPED_ELEMENTS: &[&str] = &[
    "head", "script", "style", "template", "noscript", "iframe", "object", "embed", "svg",
    "math", "textarea", "select", "title",
];

/// Elements whose children are rendered in place
const UNWRAPPED_ELEMENTS: &[&str] = &["html", "body", "span"];

enum Step {
    Enter(NodeId),
    Exit,
}

/// Render an HTML fragment into `builder`
pub(crate) fn render_into(html: &str, builder: &mut BlockBuilder) {
    let tree = match HtmlParser::keeping_whitespace().parse(html) {
        Ok(tree) => tree,
        Err(error) => {
            tracing::debug!(%error, "rendering unparsable markup as text");
            builder.text(html.trim());
            return;
        }
    };

    let mut stack: Vec<Step> = Vec::new();
    push_children(&tree, tree.root(), &mut stack);

    while let Some(step) = stack.pop() {
        let id = match step {
            Step::Enter(id) => id,
            Step::Exit => {
                builder.close();
                continue;
            }
        };
        let Some(node) = tree.get(id) else {
            continue;
        };

        match &node.data {
            NodeData::Text(text) => {
                if builder.inside(Category::Pre) {
                    builder.text(&text.content);
                    continue;
                }
                let text = collapse_whitespace(&text.content);
                if builder.depth() > 0 || !text.trim().is_empty() {
                    builder.text(&text);
                }
            }
            NodeData::Element(_) => {
                let tag = tree.tag_name(id).unwrap_or_default();
                if DROPPED_ELEMENTS.contains(&tag) {
                    tracing::trace!(tag, "dropping element from markup");
                    continue;
                }
                if let Some(block) = element_block(&tree, id, tag).filter(|_| !builder.is_full()) {
                    if block.category.is_void() {
                        builder.leaf(block);
                        continue;
                    }
                    builder.open(block);
                    stack.push(Step::Exit);
                }
                push_children(&tree, id, &mut stack);
            }
            _ => {}
        }
    }
}

/// Whether an inline HTML tag is a line break
pub(crate) fn is_line_break(tag: &str) -> bool {
    tag.strip_prefix('<')
        .and_then(|rest| rest.split(|c: char| !c.is_ascii_alphanumeric()).next())
        .is_some_and(|name| name.eq_ignore_ascii_case("br"))
}

fn push_children(tree: &DomTree, id: NodeId, stack: &mut Vec<Step>) {
    let start = stack.len();
    stack.extend(tree.children(id).map(|(child, _)| Step::Enter(child)));
    stack[start..].reverse();
}

/// Block for an element, or `None` to render its children in place
fn element_block(tree: &DomTree, id: NodeId, tag: &str) -> Option<ContentBlock> {
    if UNWRAPPED_ELEMENTS.contains(&tag) {
        return None;
    }
    let category = Category::from_tag(tag)?;
    let mut block = ContentBlock::new(category, 0);

    match category {
        Category::Link => {
            if let Some(href) = tree.attribute(id, "href") {
                if !is_safe_href(href) {
                    tracing::debug!(href, "dropping unsafe link target");
                    return None;
                }
                block.attributes.push(("href".to_string(), href.to_string()));
            }
        }
        Category::OrderedList => {
            let start = tree
                .attribute(id, "start")
                .and_then(|start| start.trim().parse::<u64>().ok())
                .filter(|&start| start != 1);
            if let Some(start) = start {
                block.attributes.push(("start".to_string(), start.to_string()));
            }
        }
        _ => {}
    }
    Some(block)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(html: &str) -> Vec<ContentBlock> {
        let mut builder = BlockBuilder::new();
        render_into(html, &mut builder);
        builder.finish()
    }

    fn categories(blocks: &[ContentBlock]) -> Vec<Category> {
        blocks.iter().map(|b| b.category).collect()
    }

    #[test]
    fn test_block_elements() {
        let blocks = render("<h2>Title</h2>\n<p>Body   text</p>");
        assert_eq!(categories(&blocks), vec![Category::Heading(2), Category::Paragraph]);
        assert_eq!(blocks[0].text, "Title");
        assert_eq!(blocks[1].text, "Body text");
    }

    #[test]
    fn test_inline_elements_keep_spacing() {
        let blocks = render("<p>Some <b>bold</b> <em>text</em></p>");
        assert_eq!(
            categories(&blocks[0].children),
            vec![Category::Text, Category::Strong, Category::Text, Category::Emphasis]
        );
        assert_eq!(blocks[0].plain_text(), "Some bold text");
    }

    #[test]
    fn test_scripts_and_handlers_removed() {
        let blocks = render(
            "<p onclick=\"steal()\" style=\"color: red\">hi<script>alert(1)</script></p><style>p{}</style>",
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "hi");
        assert!(blocks[0].attributes.is_empty());
    }

    #[test]
    fn test_links_and_lists() {
        let blocks = render(
            "<ol start=\"4\"><li><a href=\"https://example.com\" onmouseover=\"x()\">ok</a></li>\
             <li><a href=\" javascript:alert(1)\">bad</a></li></ol>",
        );
        let list = &blocks[0];
        assert_eq!(list.category, Category::OrderedList);
        assert_eq!(list.attribute("start"), Some("4"));
        let link = &list.children[0].children[0];
        assert_eq!(link.category, Category::Link);
        assert_eq!(link.attributes, vec![("href".to_string(), "https://example.com".to_string())]);
        assert_eq!(list.children[1].children.len(), 0);
        assert_eq!(list.children[1].text, "bad");
    }

    #[test]
    fn test_loose_inline_content_gets_a_paragraph() {
        let blocks = render("just <i>text</i><br>more<hr>");
        assert_eq!(categories(&blocks), vec![Category::Paragraph, Category::Rule]);
        assert_eq!(
            categories(&blocks[0].children),
            vec![Category::Text, Category::Emphasis, Category::Break, Category::Text]
        );
    }

    #[test]
    fn test_pre_keeps_whitespace() {
        let blocks = render("<pre>a\n    b</pre>");
        assert_eq!(blocks[0].category, Category::Pre);
        assert_eq!(blocks[0].text, "a\n    b");
    }

    #[test]
    fn test_deep_markup_is_capped() {
        let html = "<div>".repeat(10_000) + "deep";
        let blocks = render(&html);
        let mut depth = 0;
        let mut block = &blocks[0];
        while let Some(child) = block.children.first() {
            block = child;
            depth += 1;
        }
        assert!(depth < crate::renderer::MAX_NESTING);
        assert!(blocks[0].plain_text().ends_with("deep"));
    }

    #[test]
    fn test_line_break_tags() {
        assert!(is_line_break("<br>"));
        assert!(is_line_break("<BR/>"));
        assert!(is_line_break("<br class=\"x\">"));
        assert!(!is_line_break("<b>"));
        assert!(!is_line_break("</br>"));
    }
}
