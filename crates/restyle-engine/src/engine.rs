//! Engine - Main entry point

use restyle_content::{Classification, ContentClassifier, ContentRenderer, ContentType, skeleton};
use restyle_css::{DominantStyleResolver, SourceSummary, StyleCollector, StyleProfile};
use restyle_dom::{DomError, DomTree};
use restyle_html::{HtmlParser, HtmlSerializer, ParseError, Parser};
use serde::Serialize;

use crate::{Config, StyleApplicator};

/// Outcome of one transform
#[derive(Debug, Clone, Serialize)]
pub struct TransformResult {
    /// Styled target HTML
    pub html: String,
    pub content_type: ContentType,
    /// Human-readable description of what was done
    pub strategy: String,
    /// What the source document carried
    pub summary: SourceSummary,
}

/// Transform error
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("Cannot parse source HTML: {0}")]
    Parse(#[from] ParseError),

    #[error("Cannot build output tree: {0}")]
    Tree(#[from] DomError),
}

/// The restyle engine
///
/// Holds configuration and the parser only; every call works on its own
/// trees, so one engine can serve many threads.
pub struct Engine {
    config: Config,
    parser: Box<dyn Parser>,
}

impl Engine {
    /// Create a new engine with the given configuration
    pub fn new(config: Config) -> Self {
        Self::with_parser(config, HtmlParser::new())
    }

    /// Create an engine with a custom HTML parser
    pub fn with_parser(config: Config, parser: impl Parser + 'static) -> Self {
        tracing::info!("restyle engine {} initialized ({} mode)", crate::VERSION, config.style_mode);
        Self {
            config,
            parser: Box::new(parser),
        }
    }

    /// Get engine configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve the dominant style profile of a source document
    pub fn extract_profile(&self, source_html: &str) -> Result<StyleProfile, TransformError> {
        let tree = self.parser.parse(source_html)?;
        Ok(self.profile_of(&tree))
    }

    /// Restyle target content with the dominant styles of `source_html`
    pub fn transform(&self, source_html: &str, target: &str) -> Result<TransformResult, TransformError> {
        let source = self.parser.parse(source_html)?;
        let profile = self.profile_of(&source);
        let summary = StyleCollector::new().summarize(&source);

        let (classification, mut tree) = self.render_target(target)?;
        let styled = StyleApplicator::new(&profile, self.config.style_mode).apply(&mut tree)?;
        let html = self.serializer().serialize_inner(&tree, tree.root());

        let strategy = format!(
            "Rendered {} content ({}). Applied dominant styles of {} element categories to {} elements in {} mode.",
            classification.content_type,
            classification.rationale,
            profile.len(),
            styled,
            self.config.style_mode,
        );
        tracing::info!(
            content_type = %classification.content_type,
            categories = profile.len(),
            styled,
            "transformed content"
        );

        Ok(TransformResult {
            html,
            content_type: classification.content_type,
            strategy,
            summary,
        })
    }

    /// Classify target text and render it as unstyled HTML
    pub fn classify_and_render(&self, text: &str) -> Result<(ContentType, String), TransformError> {
        let (classification, tree) = self.render_target(text)?;
        let html = self.serializer().serialize_inner(&tree, tree.root());
        Ok((classification.content_type, html))
    }

    fn profile_of(&self, source: &DomTree) -> StyleProfile {
        let declarations = StyleCollector::new().collect(source);
        DominantStyleResolver::new(self.config.weights).resolve(&declarations)
    }

    fn render_target(&self, text: &str) -> Result<(Classification, DomTree), TransformError> {
        let classification = ContentClassifier::new(self.config.markdown_threshold).classify(text);
        let blocks = ContentRenderer::new().render(text, classification.content_type);
        let tree = skeleton::build(&blocks)?;
        Ok((classification, tree))
    }

    fn serializer(&self) -> HtmlSerializer {
        if self.config.pretty_print {
            HtmlSerializer::pretty()
        } else {
            HtmlSerializer::new()
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
