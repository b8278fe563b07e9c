//! Engine Configuration

use std::fmt;
use std::path::{Path, PathBuf};

use restyle_content::DEFAULT_THRESHOLD;
use restyle_css::{ScoringWeights, WeightError};
use serde::{Deserialize, Serialize};

/// How resolved styles are written into the output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    /// `style` attribute on every element
    #[default]
    Inline,
    /// One leading `<style>` block of category rules
    Stylesheet,
    /// Both of the above
    Both,
}

impl StyleMode {
    pub fn inline(self) -> bool {
        matches!(self, Self::Inline | Self::Both)
    }

    pub fn stylesheet(self) -> bool {
        matches!(self, Self::Stylesheet | Self::Both)
    }
}

impl fmt::Display for StyleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inline => "inline",
            Self::Stylesheet => "stylesheet",
            Self::Both => "both",
        })
    }
}

/// Engine configuration options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Source weights for dominant-style scoring
    pub weights: ScoringWeights,

    /// Marker density at which target text counts as markdown
    pub markdown_threshold: f32,

    pub style_mode: StyleMode,

    /// Indent the output HTML
    pub pretty_print: bool,

    /// User agent for source fetches; `None` uses the fetcher default
    pub user_agent: Option<String>,

    /// Source fetch timeout in seconds
    pub fetch_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            markdown_threshold: DEFAULT_THRESHOLD,
            style_mode: StyleMode::Inline,
            pretty_print: false,
            user_agent: None,
            fetch_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if !(0.0..=1.0).contains(&self.markdown_threshold) {
            return Err(ConfigError::Threshold(self.markdown_threshold));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::Timeout);
        }
        Ok(())
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Weights(#[from] WeightError),

    #[error("markdown_threshold must be within 0..=1, got {0}")]
    Threshold(f32),

    #[error("fetch_timeout_secs must be at least 1")]
    Timeout,
}
