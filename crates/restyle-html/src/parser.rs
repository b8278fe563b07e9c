//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to our tree format.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};
use restyle_dom::{DomTree, NodeId};

use crate::{ParseError, Parser};

/// Characters inspected when deciding whether input is text
const SAMPLE_CHARS: usize = 4096;

/// Share of control characters (in percent) above which input is rejected
const MAX_CONTROL_PERCENT: usize = 30;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser {
    keep_whitespace: bool,
}

impl HtmlParser {
    /// Create a new HTML parser; whitespace-only text is dropped
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser that keeps whitespace-only text, for content where the space
    /// between inline elements matters
    pub fn keeping_whitespace() -> Self {
        Self {
            keep_whitespace: true,
        }
    }

    /// Parse raw bytes, rejecting input that is not UTF-8
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<DomTree, ParseError> {
        let html = std::str::from_utf8(bytes)?;
        self.parse(html)
    }

    /// Convert an RcDom into our tree
    ///
    /// Walks with an explicit stack so deeply nested input cannot exhaust
    /// the call stack.
    fn convert(&self, document: &Handle, tree: &mut DomTree) -> Result<(), ParseError> {
        let mut stack: Vec<(Handle, NodeId)> = document
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), NodeId::ROOT))
            .collect();

        while let Some((handle, parent)) = stack.pop() {
            let id = match &handle.data {
                RcNodeData::Document => parent,
                RcNodeData::Doctype { name, .. } => tree.create_doctype(name),
                RcNodeData::Text { contents } => {
                    let text = contents.borrow();
                    if !self.keep_whitespace && text.trim().is_empty() {
                        continue;
                    }
                    tree.create_text(&text)
                }
                RcNodeData::Comment { contents } => tree.create_comment(contents),
                RcNodeData::Element { name, attrs, .. } => {
                    let id = tree.create_element(&name.local);
                    for attr in attrs.borrow().iter() {
                        tree.set_attribute(id, &attr.name.local, &attr.value)?;
                    }
                    id
                }
                RcNodeData::ProcessingInstruction { .. } => continue,
            };

            if id != parent {
                tree.append_child(parent, id)?;
            }

            for child in handle.children.borrow().iter().rev() {
                stack.push((child.clone(), id));
            }
        }

        Ok(())
    }
}

impl Parser for HtmlParser {
    fn parse(&self, html: &str) -> Result<DomTree, ParseError> {
        check_text(html)?;

        tracing::debug!(bytes = html.len(), "parsing HTML document");

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut tree = DomTree::new();
        self.convert(&dom.document, &mut tree)?;

        tracing::debug!("parsed {} nodes", tree.len());
        Ok(tree)
    }
}

/// Reject input dominated by control characters
fn check_text(html: &str) -> Result<(), ParseError> {
    let mut sampled = 0;
    let mut control = 0;
    for c in html.chars().take(SAMPLE_CHARS) {
        sampled += 1;
        let is_binary = (c.is_control() && !matches!(c, '\t' | '\n' | '\r' | '\x0c'))
            || c == char::REPLACEMENT_CHARACTER;
        if is_binary {
            control += 1;
        }
    }

    if sampled > 0 && control * 100 > sampled * MAX_CONTROL_PERCENT {
        tracing::debug!(control, sampled, "rejecting non-text input");
        return Err(ParseError::BinaryInput { control, sampled });
    }
    Ok(())
}
