//! HTML output
//!
//! Writes a tree back out as markup. Void elements get no end tag and the
//! bodies of `style`/`script` are written verbatim. Pretty printing breaks
//! lines around block-level elements only, so inline markup stays inside
//! its line of text.

use restyle_dom::{DomTree, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements that sit inside a line of text; pretty printing never breaks
/// the line around them
const INLINE_ELEMENTS: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "br", "button", "cite", "code", "data", "del", "dfn", "em",
    "i", "img", "input", "ins", "kbd", "label", "mark", "q", "s", "samp", "select", "small",
    "span", "strong", "sub", "sup", "textarea", "time", "u", "var", "wbr",
];

const INDENT: &str = "  ";

/// Tree to markup
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer {
    /// Put each block-level element on its own indented line
    pub pretty_print: bool,
}

impl HtmlSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty_print: true }
    }

    /// Markup of the children of `node_id`
    pub fn serialize_inner(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut writer = Writer::new(tree, self.pretty_print);
        writer.push_children(node_id, 0);
        writer.run()
    }

    /// Markup of `node_id` itself
    pub fn serialize_outer(&self, tree: &DomTree, node_id: NodeId) -> String {
        let mut writer = Writer::new(tree, self.pretty_print);
        writer.stack.push(Step::Open(node_id, 0));
        writer.run()
    }
}

enum Step {
    Open(NodeId, usize),
    Close(NodeId, usize),
}

/// Walks with an explicit stack so output depth is not bounded by the call stack
struct Writer<'t> {
    tree: &'t DomTree,
    pretty: bool,
    stack: Vec<Step>,
    out: String,
}

impl<'t> Writer<'t> {
    fn new(tree: &'t DomTree, pretty: bool) -> Self {
        Self {
            tree,
            pretty,
            stack: Vec::new(),
            out: String::new(),
        }
    }

    fn push_children(&mut self, id: NodeId, depth: usize) {
        let start = self.stack.len();
        self.stack
            .extend(self.tree.children(id).map(|(child, _)| Step::Open(child, depth)));
        self.stack[start..].reverse();
    }

    fn run(mut self) -> String {
        while let Some(step) = self.stack.pop() {
            match step {
                Step::Open(id, depth) => self.open(id, depth),
                Step::Close(id, depth) => self.close(id, depth),
            }
        }
        self.out
    }

    fn open(&mut self, id: NodeId, depth: usize) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => self.push_children(id, depth),
            NodeData::Element(element) => {
                let tag = self.tree.resolve(element.name);
                if is_block(tag) && !self.out.is_empty() {
                    self.newline(depth);
                }
                self.out.push('<');
                self.out.push_str(tag);
                for attr in element.attrs.iter() {
                    self.out.push(' ');
                    self.out.push_str(self.tree.resolve(attr.name));
                    if !attr.value.is_empty() {
                        self.out.push_str("=\"");
                        escape_attribute(&attr.value, &mut self.out);
                        self.out.push('"');
                    }
                }
                self.out.push('>');
                if VOID_ELEMENTS.contains(&tag) {
                    return;
                }

                self.stack.push(Step::Close(id, depth));
                if matches!(tag, "style" | "script") {
                    self.out.push_str(&self.tree.text_content(id));
                } else {
                    self.push_children(id, depth + 1);
                }
            }
            NodeData::Text(text) => escape_text(&text.content, &mut self.out),
            NodeData::Comment(comment) => {
                self.out.push_str("<!--");
                self.out.push_str(comment);
                self.out.push_str("-->");
            }
            NodeData::Doctype { name } => {
                self.out.push_str("<!DOCTYPE ");
                self.out.push_str(name);
                self.out.push('>');
            }
        }
    }

    fn close(&mut self, id: NodeId, depth: usize) {
        let Some(tag) = self.tree.tag_name(id) else {
            return;
        };
        let has_block_child = self
            .tree
            .children(id)
            .any(|(child, _)| self.tree.tag_name(child).is_some_and(is_block));
        if has_block_child {
            self.newline(depth);
        }
        self.out.push_str("</");
        self.out.push_str(tag);
        self.out.push('>');
    }

    fn newline(&mut self, depth: usize) {
        if self.pretty {
            self.out.push('\n');
            self.out.push_str(&INDENT.repeat(depth));
        }
    }
}

fn is_block(tag: &str) -> bool {
    !INLINE_ELEMENTS.contains(&tag)
}

/// Escape `&`, `<` and `>` in text content
pub fn escape_text(text: &str, out: &mut String) {
    escape(text, false, out);
}

/// Escape text for a double-quoted attribute value
pub fn escape_attribute(text: &str, out: &mut String) {
    escape(text, true, out);
}

fn escape(text: &str, quoted: bool, out: &mut String) {
    let mut rest = text;
    while let Some(at) = rest.find(|c: char| matches!(c, '&' | '<' | '>') || (quoted && c == '"')) {
        out.push_str(&rest[..at]);
        out.push_str(match rest.as_bytes()[at] {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            _ => "&quot;",
        });
        rest = &rest[at + 1..];
    }
    out.push_str(rest);
}
