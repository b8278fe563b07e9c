//! Content Renderer
//!
//! Turns classified target text into semantic blocks. Markdown goes through
//! pulldown-cmark; every `Start` event opens a frame and every `End` closes
//! one. Constructs without a mapping, and anything nested deeper than
//! [`MAX_NESTING`] blocks, become pass-through frames whose text lands in the
//! enclosing block. Raw HTML blocks are rendered by the markup module.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use restyle_dom::Category;

use crate::{ContentType, markup};

/// Deepest block nesting kept in the output
pub const MAX_NESTING: usize = 64;

/// Link schemes that are never emitted as `href`
const UNSAFE_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

/// Semantic unit of rendered content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBlock {
    pub category: Category,
    /// Text content when the block holds a single text run
    pub text: String,
    /// Number of enclosing blocks
    pub depth: usize,
    pub children: Vec<ContentBlock>,
    pub attributes: Vec<(String, String)>,
}

impl ContentBlock {
    pub fn new(category: Category, depth: usize) -> Self {
        Self {
            category,
            text: String::new(),
            depth,
            children: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Text of this block and all descendants
    pub fn plain_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.plain_text());
        }
        out
    }

    fn push_text(&mut self, text: &str) {
        if let Some(last) = self.children.last_mut() {
            if last.category == Category::Text {
                last.text.push_str(text);
                return;
            }
        }
        let depth = self.depth + 1;
        self.children.push(ContentBlock::new(Category::Text, depth).with_text(text));
    }

    /// Drop trailing newlines and fold a lone text child into `text`
    fn finish(mut self) -> Self {
        if let Some(run) = self.children.last_mut() {
            let trimmed = run.text.trim_end_matches('\n').len();
            run.text.truncate(trimmed);
        }
        if !self.category.is_inline() && self.category != Category::Pre {
            self.tidy_whitespace();
        }
        if self.children.len() == 1 && self.children[0].category == Category::Text {
            if let Some(run) = self.children.pop() {
                self.text = run.text;
            }
        }
        self
    }

    /// Drop whitespace runs that only separate blocks and trim the edges
    fn tidy_whitespace(&mut self) {
        let children = std::mem::take(&mut self.children);
        let inline = |i: Option<usize>| {
            i.and_then(|i| children.get(i))
                .is_some_and(|child| child.category.is_inline())
        };
        let keep: Vec<bool> = children
            .iter()
            .enumerate()
            .map(|(i, child)| {
                child.category != Category::Text
                    || !child.text.trim().is_empty()
                    || (inline(i.checked_sub(1)) && inline(Some(i + 1)))
            })
            .collect();
        self.children = children
            .into_iter()
            .zip(keep)
            .filter_map(|(child, keep)| keep.then_some(child))
            .collect();

        if let Some(first) = self.children.first_mut().filter(|c| c.category == Category::Text) {
            first.text = first.text.trim_start().to_string();
        }
        if let Some(last) = self.children.last_mut().filter(|c| c.category == Category::Text) {
            last.text.truncate(last.text.trim_end().len());
        }
        self.children
            .retain(|child| child.category != Category::Text || !child.text.is_empty());
    }
}

/// Collects blocks as constructs open and close
///
/// Inline content arriving with nothing open is wrapped in a paragraph that
/// stays open until the next block-level construct.
pub(crate) struct BlockBuilder {
    top: Vec<ContentBlock>,
    open: Vec<ContentBlock>,
    /// `open[0]` is a paragraph opened for loose inline content
    implicit: bool,
}

impl BlockBuilder {
    pub(crate) fn new() -> Self {
        Self {
            top: Vec::new(),
            open: Vec::new(),
            implicit: false,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.open.len()
    }

    /// No further nesting is kept once this holds
    pub(crate) fn is_full(&self) -> bool {
        self.open.len() >= MAX_NESTING
    }

    pub(crate) fn inside(&self, category: Category) -> bool {
        self.open.iter().any(|block| block.category == category)
    }

    pub(crate) fn open(&mut self, mut block: ContentBlock) {
        self.settle(block.category);
        block.depth = self.open.len();
        self.open.push(block);
    }

    /// Block without content of its own (break, rule, code span)
    pub(crate) fn leaf(&mut self, block: ContentBlock) {
        self.open(block);
        self.close();
    }

    pub(crate) fn close(&mut self) {
        let Some(block) = self.open.pop() else {
            return;
        };
        if self.open.is_empty() {
            self.implicit = false;
        }
        let block = block.finish();
        match self.open.last_mut() {
            Some(parent) => parent.children.push(block),
            None => self.top.push(block),
        }
    }

    pub(crate) fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.settle(Category::Text);
        if let Some(block) = self.open.last_mut() {
            block.push_text(text);
        }
    }

    pub(crate) fn finish(mut self) -> Vec<ContentBlock> {
        while !self.open.is_empty() {
            self.close();
        }
        self.top
    }

    fn settle(&mut self, incoming: Category) {
        if incoming.is_inline() {
            if self.open.is_empty() {
                self.open.push(ContentBlock::new(Category::Paragraph, 0));
                self.implicit = true;
            }
        } else if self.implicit && self.open.len() == 1 {
            self.close();
        }
    }
}

/// Content renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRenderer;

impl ContentRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render text with the given strategy; never returns zero blocks
    pub fn render(&self, text: &str, content_type: ContentType) -> Vec<ContentBlock> {
        let mut blocks = match content_type {
            ContentType::Markdown => self.render_markdown(text),
            ContentType::PlainText => self.render_plain(text),
            ContentType::Empty => Vec::new(),
        };
        if blocks.is_empty() {
            blocks.push(ContentBlock::new(Category::Paragraph, 0));
        }
        blocks
    }

    /// Paragraphs split on blank lines; the remaining newlines are kept as
    /// line breaks since plain text has no other way to express them
    fn render_plain(&self, text: &str) -> Vec<ContentBlock> {
        let text = text.replace("\r\n", "\n");
        let mut builder = BlockBuilder::new();
        let mut lines: Vec<&str> = Vec::new();

        for line in text.split('\n').chain(std::iter::once("")) {
            let line = line.trim();
            if !line.is_empty() {
                lines.push(line);
                continue;
            }
            if lines.is_empty() {
                continue;
            }

            builder.open(ContentBlock::new(Category::Paragraph, 0));
            for (i, line) in lines.drain(..).enumerate() {
                if i > 0 {
                    builder.leaf(ContentBlock::new(Category::Break, 0));
                }
                builder.text(line);
            }
            builder.close();
        }
        builder.finish()
    }

    fn render_markdown(&self, text: &str) -> Vec<ContentBlock> {
        let mut builder = BlockBuilder::new();
        // one entry per open `Start`: whether it opened a block
        let mut frames: Vec<bool> = Vec::new();
        let mut html: Option<String> = None;

        for event in Parser::new_ext(text, Options::ENABLE_STRIKETHROUGH) {
            match event {
                Event::Start(Tag::HtmlBlock) => {
                    frames.push(false);
                    html = Some(String::new());
                }
                Event::End(TagEnd::HtmlBlock) => {
                    frames.pop();
                    if let Some(fragment) = html.take() {
                        markup::render_into(&fragment, &mut builder);
                    }
                }
                Event::Start(tag) => {
                    let opened = if builder.is_full() {
                        tracing::trace!(?tag, "flattening construct nested too deeply");
                        false
                    } else {
                        match open_block(&tag) {
                            Some(block) => {
                                builder.open(block);
                                true
                            }
                            None if builder.depth() == 0 && is_block_level(&tag) => {
                                // unsupported block at top level keeps its text in a paragraph
                                builder.open(ContentBlock::new(Category::Paragraph, 0));
                                true
                            }
                            None => {
                                tracing::trace!(?tag, "rendering unsupported construct as text");
                                false
                            }
                        }
                    };
                    frames.push(opened);
                }
                Event::End(_) => {
                    if frames.pop() == Some(true) {
                        builder.close();
                    }
                }
                Event::Html(text) => match html.as_mut() {
                    Some(fragment) => fragment.push_str(&text),
                    None => builder.text(&text),
                },
                Event::InlineHtml(tag) => {
                    if markup::is_line_break(&tag) {
                        builder.leaf(ContentBlock::new(Category::Break, 0));
                    } else {
                        tracing::trace!(tag = &*tag, "dropping inline tag");
                    }
                }
                Event::Text(text) => builder.text(&text),
                Event::Code(code) => {
                    builder.leaf(ContentBlock::new(Category::Code, 0).with_text(&*code));
                }
                Event::SoftBreak => builder.text(" "),
                Event::HardBreak => builder.leaf(ContentBlock::new(Category::Break, 0)),
                Event::Rule => builder.leaf(ContentBlock::new(Category::Rule, 0)),
                other => {
                    tracing::trace!(event = ?other, "ignoring markdown event");
                }
            }
        }

        let blocks = builder.finish();
        tracing::debug!(blocks = blocks.len(), "rendered markdown");
        blocks
    }
}

/// Block for a supported markdown construct
fn open_block(tag: &Tag<'_>) -> Option<ContentBlock> {
    let block = match tag {
        Tag::Paragraph => ContentBlock::new(Category::Paragraph, 0),
        Tag::Heading { level, .. } => ContentBlock::new(Category::heading(*level as u8), 0),
        Tag::BlockQuote { .. } => ContentBlock::new(Category::Blockquote, 0),
        Tag::CodeBlock(kind) => {
            let mut block = ContentBlock::new(Category::Pre, 0);
            if let CodeBlockKind::Fenced(lang) = kind {
                if let Some(lang) = lang.split_whitespace().next() {
                    block.attributes.push(("data-lang".to_string(), lang.to_string()));
                }
            }
            block
        }
        Tag::List(None) => ContentBlock::new(Category::UnorderedList, 0),
        Tag::List(Some(start)) => {
            let mut block = ContentBlock::new(Category::OrderedList, 0);
            if *start != 1 {
                block.attributes.push(("start".to_string(), start.to_string()));
            }
            block
        }
        Tag::Item => ContentBlock::new(Category::ListItem, 0),
        Tag::Emphasis => ContentBlock::new(Category::Emphasis, 0),
        Tag::Strong => ContentBlock::new(Category::Strong, 0),
        Tag::Link { dest_url, .. } => {
            if !is_safe_href(dest_url) {
                tracing::debug!(href = %dest_url, "dropping unsafe link target");
                return None;
            }
            let mut block = ContentBlock::new(Category::Link, 0);
            block.attributes.push(("href".to_string(), dest_url.to_string()));
            block
        }
        _ => return None,
    };
    Some(block)
}

fn is_block_level(tag: &Tag<'_>) -> bool {
    !matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

pub(crate) fn is_safe_href(href: &str) -> bool {
    let normalized: String = href
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    !UNSAFE_SCHEMES.iter().any(|scheme| normalized.starts_with(scheme))
}
