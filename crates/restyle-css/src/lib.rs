//! restyle CSS - Style collection & dominant-style resolution
//!
//! Collects style declarations from a parsed source document (inline `style`
//! attributes and embedded `<style>` blocks) and ranks them per element
//! category by weighted frequency.
//!
//! This is deliberately not a cascade: there is no specificity ordering
//! beyond the coarse source weights in [`ScoringWeights`].

mod collector;
mod declaration;
mod parser;
mod profile;
mod resolver;
mod selector;

pub use collector::{DeclarationSource, SourceSummary, StyleCollector, StyleDeclaration};
pub use declaration::{Declaration, parse_declarations};
pub use parser::{CssParser, Rule, Stylesheet};
pub use profile::{StyleProfile, StyleProperty, inline_style};
pub use resolver::{DominantStyleResolver, ScoringWeights, WeightError};
pub use selector::{Compound, Selector, SelectorKind};

/// Parse an embedded stylesheet, skipping anything unsupported
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    CssParser::new().parse(css)
}

/// Why a rule, selector or declaration was skipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CssError {
    #[error("declaration has no value")]
    EmptyValue,
    #[error("tokens after !important")]
    TrailingTokens,
    #[error("selector component is not a tag, class or id")]
    UnsupportedSelector,
    #[error("empty selector")]
    EmptySelector,
    #[error("no supported selector in rule")]
    NoSelectors,
    #[error("rule has no declarations")]
    NoDeclarations,
}
