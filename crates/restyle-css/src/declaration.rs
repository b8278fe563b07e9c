//! CSS declarations
//!
//! `property: value` lists from `style` attributes and rule blocks, read with
//! cssparser's rule-body parser. A value is the source text between the colon
//! and the end of the declaration; only surrounding whitespace and a trailing
//! `!important` are removed.

use cssparser::{
    AtRuleParser, CowRcStr, DeclarationParser, ParseError, Parser, ParserInput, QualifiedRuleParser,
    RuleBodyItemParser, RuleBodyParser, Token, parse_important,
};

use crate::CssError;

/// CSS declaration (property: value)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Lower-case property name; custom properties keep their case
    pub property: String,
    /// Value as written
    pub value: String,
    pub important: bool,
}

/// Parse a declaration list, skipping malformed entries
pub fn parse_declarations(block: &str) -> Vec<Declaration> {
    let mut input = ParserInput::new(block);
    let mut parser = Parser::new(&mut input);
    declaration_list(&mut parser)
}

/// Declarations of a rule body or attribute, until the input is exhausted
pub(crate) fn declaration_list(input: &mut Parser<'_, '_>) -> Vec<Declaration> {
    let mut body = DeclarationBody;
    RuleBodyParser::new(input, &mut body)
        .filter_map(|item| match item {
            Ok(declaration) => Some(declaration),
            Err((error, text)) => {
                tracing::debug!(declaration = text.trim(), error = ?error.kind, "skipping malformed declaration");
                None
            }
        })
        .collect()
}

struct DeclarationBody;

impl<'i> DeclarationParser<'i> for DeclarationBody {
    type Declaration = Declaration;
    type Error = CssError;

    fn parse_value<'t>(
        &mut self,
        name: CowRcStr<'i>,
        input: &mut Parser<'i, 't>,
    ) -> Result<Declaration, ParseError<'i, CssError>> {
        let property = if name.starts_with("--") {
            name.to_string()
        } else {
            name.to_ascii_lowercase()
        };

        let start = input.position();
        let mut end = start;
        let mut important = false;
        while !input.is_exhausted() {
            if input.try_parse(parse_important).is_ok() {
                important = true;
                continue;
            }
            if important {
                return Err(input.new_custom_error(CssError::TrailingTokens));
            }
            let opens_block = matches!(
                input.next()?,
                Token::Function(_)
                    | Token::ParenthesisBlock
                    | Token::SquareBracketBlock
                    | Token::CurlyBracketBlock
            );
            if opens_block {
                input.parse_nested_block(|block| {
                    while block.next().is_ok() {}
                    Ok::<(), ParseError<'i, CssError>>(())
                })?;
            }
            end = input.position();
        }

        let value = input.slice(start..end).trim();
        if value.is_empty() {
            return Err(input.new_custom_error(CssError::EmptyValue));
        }
        Ok(Declaration {
            property,
            value: value.to_string(),
            important,
        })
    }
}

// Nested rules are not part of a declaration list.
impl<'i> AtRuleParser<'i> for DeclarationBody {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = CssError;
}

impl<'i> QualifiedRuleParser<'i> for DeclarationBody {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = CssError;
}

impl<'i> RuleBodyItemParser<'i, Declaration, CssError> for DeclarationBody {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}
