//! Embedded stylesheet parser
//!
//! Rules are read with cssparser's stylesheet parser, which follows CSS error
//! recovery: comments are skipped, at-rules are dropped together with their
//! blocks, and a malformed rule is dropped without affecting its neighbours.

use cssparser::{
    AtRuleParser, BasicParseErrorKind, ParseError, ParseErrorKind, Parser, ParserInput, ParserState,
    QualifiedRuleParser, StyleSheetParser,
};

use crate::declaration::declaration_list;
use crate::{CssError, Declaration, Selector};

/// Parsed stylesheet
#[derive(Debug, Default)]
pub struct Stylesheet {
    /// Rules in source order
    pub rules: Vec<Rule>,
    /// Rules skipped as malformed or unsupported
    pub skipped: usize,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of usable rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// CSS rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

/// CSS Parser
#[derive(Debug, Clone, Copy, Default)]
pub struct CssParser;

impl CssParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a stylesheet
    ///
    /// Never fails; anything that cannot be understood is counted in
    /// [`Stylesheet::skipped`].
    pub fn parse(&self, css: &str) -> Stylesheet {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);
        let mut rules = RuleParser;
        let mut sheet = Stylesheet::new();

        for item in StyleSheetParser::new(&mut parser, &mut rules) {
            match item {
                Ok(rule) => sheet.rules.push(rule),
                Err((error, text)) => {
                    sheet.skipped += 1;
                    match &error.kind {
                        ParseErrorKind::Basic(BasicParseErrorKind::AtRuleInvalid(name)) => {
                            tracing::trace!(at_rule = &**name, "skipping at-rule");
                        }
                        kind => {
                            tracing::debug!(rule = text.trim(), error = ?kind, "skipping rule");
                        }
                    }
                }
            }
        }

        tracing::debug!(rules = sheet.rules.len(), skipped = sheet.skipped, "parsed stylesheet");
        sheet
    }
}

struct RuleParser;

impl<'i> QualifiedRuleParser<'i> for RuleParser {
    type Prelude = Vec<Selector>;
    type QualifiedRule = Rule;
    type Error = CssError;

    fn parse_prelude<'t>(
        &mut self,
        input: &mut Parser<'i, 't>,
    ) -> Result<Vec<Selector>, ParseError<'i, CssError>> {
        let selectors = Selector::parse_list(input);
        if selectors.is_empty() {
            return Err(input.new_custom_error(CssError::NoSelectors));
        }
        Ok(selectors)
    }

    fn parse_block<'t>(
        &mut self,
        selectors: Vec<Selector>,
        _start: &ParserState,
        input: &mut Parser<'i, 't>,
    ) -> Result<Rule, ParseError<'i, CssError>> {
        let declarations = declaration_list(input);
        if declarations.is_empty() {
            return Err(input.new_custom_error(CssError::NoDeclarations));
        }
        Ok(Rule {
            selectors,
            declarations,
        })
    }
}

// Every at-rule is rejected, which skips it with its block.
impl<'i> AtRuleParser<'i> for RuleParser {
    type Prelude = ();
    type AtRule = Rule;
    type Error = CssError;
}
