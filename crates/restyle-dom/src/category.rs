//! Element categories
//!
//! A category is the semantic role of an element. Styles are aggregated per
//! category on the source side and looked up per category on the target side,
//! so `<b>` and `<strong>` share one profile entry.

use std::fmt;

/// Semantic role of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Generic container (div, span, section, body, ...)
    Container,
    Paragraph,
    /// Heading level 1..=6
    Heading(u8),
    UnorderedList,
    OrderedList,
    ListItem,
    Link,
    Strong,
    Emphasis,
    Code,
    Pre,
    Blockquote,
    /// Thematic break (hr)
    Rule,
    /// Line break (br)
    Break,
    /// Bare text run inside a content block; never styled
    Text,
}

impl Category {
    /// Heading category, clamping the level into 1..=6
    pub fn heading(level: u8) -> Self {
        Self::Heading(level.clamp(1, 6))
    }

    /// Map an HTML tag name to its category
    ///
    /// Tags with no visual role (head, script, style, meta, ...) map to `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let category = match tag.to_ascii_lowercase().as_str() {
            "p" => Self::Paragraph,
            "h1" => Self::Heading(1),
            "h2" => Self::Heading(2),
            "h3" => Self::Heading(3),
            "h4" => Self::Heading(4),
            "h5" => Self::Heading(5),
            "h6" => Self::Heading(6),
            "ul" => Self::UnorderedList,
            "ol" => Self::OrderedList,
            "li" => Self::ListItem,
            "a" => Self::Link,
            "strong" | "b" => Self::Strong,
            "em" | "i" => Self::Emphasis,
            "code" | "kbd" | "samp" => Self::Code,
            "pre" => Self::Pre,
            "blockquote" => Self::Blockquote,
            "hr" => Self::Rule,
            "br" => Self::Break,
            "div" | "span" | "body" | "main" | "section" | "article" | "header"
            | "footer" | "nav" | "aside" | "figure" | "td" | "th" => Self::Container,
            _ => return None,
        };
        Some(category)
    }

    /// Tag used when rendering this category
    pub fn tag(self) -> &'static str {
        match self {
            Self::Container => "div",
            Self::Paragraph => "p",
            Self::Heading(1) => "h1",
            Self::Heading(2) => "h2",
            Self::Heading(3) => "h3",
            Self::Heading(4) => "h4",
            Self::Heading(5) => "h5",
            Self::Heading(_) => "h6",
            Self::UnorderedList => "ul",
            Self::OrderedList => "ol",
            Self::ListItem => "li",
            Self::Link => "a",
            Self::Strong => "strong",
            Self::Emphasis => "em",
            Self::Code => "code",
            Self::Pre => "pre",
            Self::Blockquote => "blockquote",
            Self::Rule => "hr",
            Self::Break => "br",
            Self::Text => "#text",
        }
    }

    /// Categories consulted, in order, when this one has no profile entry
    pub fn fallbacks(self) -> &'static [Category] {
        use Category::*;

        match self {
            Heading(6) => &[Heading(5), Heading(4), Heading(3), Heading(2), Heading(1)],
            Heading(5) => &[Heading(4), Heading(3), Heading(2), Heading(1)],
            Heading(4) => &[Heading(3), Heading(2), Heading(1)],
            Heading(3) => &[Heading(2), Heading(1)],
            Heading(2) => &[Heading(1)],
            // wrappers carry page layout, never a text default
            ListItem | Blockquote => &[Paragraph],
            Pre => &[Code],
            Code => &[Pre],
            UnorderedList => &[OrderedList],
            OrderedList => &[UnorderedList],
            _ => &[],
        }
    }

    /// Whether this category sits inside a line of text
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Self::Link | Self::Strong | Self::Emphasis | Self::Code | Self::Break | Self::Text
        )
    }

    /// Whether elements of this category are void (no end tag)
    pub fn is_void(self) -> bool {
        matches!(self, Self::Rule | Self::Break)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
