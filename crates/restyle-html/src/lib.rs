//! restyle HTML Parser
//!
//! HTML5 parsing built on html5ever, plus the serializer used to emit the
//! styled output. The engine only depends on the [`Parser`] trait, so any
//! parser that can produce a [`DomTree`] can be plugged in.

mod parser;
mod serializer;

pub use parser::HtmlParser;
pub use serializer::{HtmlSerializer, escape_attribute, escape_text};

pub use restyle_dom::{DomError, DomTree};

/// Capability to turn HTML text into an element tree
///
/// Implementations must repair malformed markup rather than reject it and
/// fail only on input that is not text at all.
pub trait Parser: Send + Sync {
    /// Parse an HTML string into a tree
    fn parse(&self, html: &str) -> Result<DomTree, ParseError>;
}

/// Parse an HTML string with the default parser
pub fn parse(html: &str) -> Result<DomTree, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Input is not text: {control} of {sampled} sampled characters are control characters")]
    BinaryInput { control: usize, sampled: usize },

    #[error("Input is not valid UTF-8: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    #[error("Tree construction failed: {0}")]
    Tree(#[from] DomError),
}
