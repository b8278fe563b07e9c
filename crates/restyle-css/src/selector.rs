//! Simple selectors
//!
//! Only tag, class and id selectors are understood. Selectors are read from
//! the cssparser token stream; combinators end the current compound, so the
//! right-most compound (the subject) is what remains. Selectors that need
//! state or attributes to match (pseudo-classes, pseudo-elements, attribute
//! selectors, `*`) are not supported.

use cssparser::{Delimiter, ParseError, Parser, ParserInput, Token};
use restyle_dom::ElementData;

use crate::CssError;

/// Strongest component of a selector, used as its source weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Tag,
    Class,
    Id,
}

/// Compound selector: `tag.class#id`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Compound {
    pub tag: Option<String>,
    pub classes: Vec<String>,
    pub id: Option<String>,
}

impl Compound {
    pub fn is_empty(&self) -> bool {
        self.tag.is_none() && self.classes.is_empty() && self.id.is_none()
    }
}

/// CSS selector reduced to its subject compound
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// Selector as written
    pub text: String,
    pub subject: Compound,
}

impl Selector {
    /// Parse a single selector (no commas)
    pub fn parse(text: &str) -> Option<Self> {
        let mut input = ParserInput::new(text);
        let mut parser = Parser::new(&mut input);
        let subject = parser.parse_entirely(subject_compound).ok()?;
        Some(Self {
            text: text.trim().to_string(),
            subject,
        })
    }

    /// Supported selectors of a comma-separated list; the rest are skipped
    pub(crate) fn parse_list(input: &mut Parser<'_, '_>) -> Vec<Self> {
        let mut selectors = Vec::new();
        loop {
            let start = input.position();
            let subject = input.parse_until_before(Delimiter::Comma, subject_compound);
            let text = input.slice_from(start).trim();
            match subject {
                Ok(subject) => selectors.push(Self {
                    text: text.to_string(),
                    subject,
                }),
                Err(error) => {
                    tracing::trace!(selector = text, error = ?error.kind, "ignoring unsupported selector");
                }
            }
            if input.next().is_err() {
                break;
            }
        }
        selectors
    }

    /// Source weight class of this selector
    pub fn kind(&self) -> SelectorKind {
        if self.subject.id.is_some() {
            SelectorKind::Id
        } else if !self.subject.classes.is_empty() {
            SelectorKind::Class
        } else {
            SelectorKind::Tag
        }
    }

    /// Tag name when the selector is a bare type selector
    pub fn tag_only(&self) -> Option<&str> {
        match self.kind() {
            SelectorKind::Tag => self.subject.tag.as_deref(),
            _ => None,
        }
    }

    /// Check the subject compound against an element
    pub fn matches(&self, tag: &str, elem: &ElementData) -> bool {
        let subject = &self.subject;
        if let Some(expected) = &subject.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(id) = &subject.id {
            if elem.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        subject.classes.iter().all(|class| elem.has_class(class))
    }
}

/// Right-most compound of one complex selector
fn subject_compound<'i>(input: &mut Parser<'i, '_>) -> Result<Compound, ParseError<'i, CssError>> {
    let mut subject = Compound::default();
    // whitespace or a combinator was seen; the next component opens a compound
    let mut boundary = true;
    let mut dangling = false;

    loop {
        let token = match input.next_including_whitespace() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        match token {
            Token::WhiteSpace(_) => {
                boundary = true;
                continue;
            }
            Token::Delim('>' | '+' | '~') => {
                if subject.is_empty() {
                    return Err(input.new_custom_error(CssError::UnsupportedSelector));
                }
                boundary = true;
                dangling = true;
                continue;
            }
            _ => {}
        }

        if boundary {
            subject = Compound::default();
            boundary = false;
            dangling = false;
        } else if matches!(token, Token::Ident(_)) {
            // a type selector can only lead its compound
            return Err(input.new_custom_error(CssError::UnsupportedSelector));
        }

        match token {
            Token::Ident(name) => subject.tag = Some(name.to_ascii_lowercase()),
            Token::IDHash(id) => {
                if subject.id.replace(id.to_string()).is_some() {
                    return Err(input.new_custom_error(CssError::UnsupportedSelector));
                }
            }
            Token::Delim('.') => {
                let class = match input.next_including_whitespace() {
                    Ok(Token::Ident(class)) => Some(class.to_string()),
                    _ => None,
                };
                match class {
                    Some(class) => subject.classes.push(class),
                    None => return Err(input.new_custom_error(CssError::UnsupportedSelector)),
                }
            }
            _ => return Err(input.new_custom_error(CssError::UnsupportedSelector)),
        }
    }

    if dangling || subject.is_empty() {
        return Err(input.new_custom_error(CssError::EmptySelector));
    }
    Ok(subject)
}
