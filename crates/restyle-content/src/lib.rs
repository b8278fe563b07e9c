//! restyle Content - Target content classification & rendering
//!
//! Decides whether target text is markdown, plain text or empty, and renders
//! it into unstyled semantic blocks (markup found in the target included) that the engine turns into a skeleton
//! tree.

mod classifier;
mod markup;
mod renderer;
pub mod skeleton;

pub use classifier::{Classification, ContentClassifier, ContentType, DEFAULT_THRESHOLD};
pub use renderer::{ContentBlock, ContentRenderer, MAX_NESTING};

/// Classify with the default threshold
pub fn classify(text: &str) -> Classification {
    ContentClassifier::default().classify(text)
}
