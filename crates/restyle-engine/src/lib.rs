//! restyle Engine
//!
//! Extracts the dominant styling of a source HTML document and re-applies it
//! to new target content.
//!
//! # Example
//! ```rust
//! use restyle_engine::{Config, Engine};
//!
//! let engine = Engine::new(Config::default());
//! let result = engine
//!     .transform(r#"<p style="color: #333">Old</p>"#, "Hello")
//!     .unwrap();
//! assert_eq!(result.html, r#"<p style="color: #333;">Hello</p>"#);
//! ```

mod applicator;
mod config;
mod engine;

pub use applicator::StyleApplicator;
pub use config::{Config, ConfigError, StyleMode};
pub use engine::{Engine, TransformError, TransformResult};

// Re-export sub-crates for advanced usage
pub use restyle_content as content;
pub use restyle_css as css;
pub use restyle_dom as dom;
pub use restyle_html as html;

pub use restyle_content::ContentType;
pub use restyle_css::{SourceSummary, StyleProfile};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Transform with the default configuration
pub fn transform(source_html: &str, target: &str) -> Result<TransformResult, TransformError> {
    Engine::default().transform(source_html, target)
}

/// Classify target text and render it as unstyled HTML
pub fn classify_and_render(text: &str) -> Result<(ContentType, String), TransformError> {
    Engine::default().classify_and_render(text)
}
