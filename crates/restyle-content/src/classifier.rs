//! Content Classifier
//!
//! Line-based marker density. A line counts once no matter how many markers
//! it carries, so the density is always within 0..=1.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum share of marked lines for text to count as markdown
pub const DEFAULT_THRESHOLD: f32 = 0.15;

static BLOCK_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s{0,3}(#{1,6}\s|[-*+]\s+\S|\d{1,9}[.)]\s+\S|```|~~~|>)")
        .expect("BLOCK_MARKER_RE: hardcoded regex is valid")
});

/// Block-level HTML tag opening a line; markdown passes such lines through as markup
static HTML_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s{0,3}</?(p|h[1-6]|ul|ol|li|blockquote|pre|div|hr|br|table|section|article|header|footer|main|nav|html|body|script|style)(\s|/?>|$)")
        .expect("HTML_BLOCK_RE: hardcoded regex is valid")
});

static INLINE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]\n]+\]\([^)\s]+\)|\*\*[^*\n]+\*\*|__[^_\n]+__|(^|[\s(])_[^_\s][^_\n]*_($|[\s.,;:!?)])")
        .expect("INLINE_MARKER_RE: hardcoded regex is valid")
});

/// Detected kind of target content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Markdown,
    PlainText,
    Empty,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::PlainText => "plain_text",
            Self::Empty => "empty",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier verdict
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub content_type: ContentType,
    /// Human-readable reason for the verdict
    pub rationale: String,
}

/// Content classifier
#[derive(Debug, Clone, Copy)]
pub struct ContentClassifier {
    threshold: f32,
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl ContentClassifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Classify target text; total over all inputs
    pub fn classify(&self, text: &str) -> Classification {
        if text.trim().is_empty() {
            return Classification {
                content_type: ContentType::Empty,
                rationale: "Content is empty or whitespace only".to_string(),
            };
        }

        let mut lines = 0usize;
        let mut marked = 0usize;
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            lines += 1;
            if has_marker(line) {
                marked += 1;
            }
        }

        let density = marked as f32 / lines as f32;
        let content_type = if marked > 0 && density >= self.threshold {
            ContentType::Markdown
        } else {
            ContentType::PlainText
        };
        tracing::debug!(lines, marked, density, %content_type, "classified content");

        Classification {
            content_type,
            rationale: format!(
                "{marked} of {lines} non-blank lines carry markdown markers (density {density:.2}, threshold {:.2})",
                self.threshold
            ),
        }
    }
}

fn has_marker(line: &str) -> bool {
    BLOCK_MARKER_RE.is_match(line) || HTML_BLOCK_RE.is_match(line) || INLINE_MARKER_RE.is_match(line)
}
