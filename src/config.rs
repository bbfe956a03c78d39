use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "SpecSense";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name searched for by [`SpecSenseConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "specsense.toml";

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    if cfg!(debug_assertions) {
        "specsense=debug,specsense_lib=debug,warn"
    } else {
        "specsense=info,specsense_lib=info,warn"
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keyword classification and ranking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordConfig {
    /// Number of ranked terms to report.
    pub top_n: usize,
    /// Minimum weighted score for a category to be assigned.
    pub min_category_score: f64,
    /// Tokens shorter than this (in characters) are not ranked.
    pub min_term_length: usize,
    /// Texts longer than this (in characters) are rejected by the keyword stage.
    pub max_input_chars: usize,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            top_n: 5,
            min_category_score: 2.0,
            min_term_length: 3,
            max_input_chars: 200_000,
        }
    }
}

impl KeywordConfig {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn with_min_category_score(mut self, score: f64) -> Self {
        self.min_category_score = score;
        self
    }

    pub fn with_min_term_length(mut self, length: usize) -> Self {
        self.min_term_length = length;
        self
    }

    pub fn with_max_input_chars(mut self, max: usize) -> Self {
        self.max_input_chars = max;
        self
    }
}

/// Top-level configuration. Validation rules are fixed and not configurable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecSenseConfig {
    pub keywords: KeywordConfig,
}

impl SpecSenseConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Discover `specsense.toml` in the current directory or its parents.
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        let current = std::env::current_dir()?;
        Self::discover_from(&current)
    }

    pub fn discover_from(start: &Path) -> Result<Option<Self>, ConfigError> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                tracing::debug!(path = %candidate.display(), "Using discovered config");
                return Self::from_toml_file(candidate).map(Some);
            }
        }
        Ok(None)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keywords.min_term_length == 0 {
            return Err(ConfigError::Invalid(
                "keywords.min_term_length must be at least 1".into(),
            ));
        }
        if self.keywords.max_input_chars == 0 {
            return Err(ConfigError::Invalid(
                "keywords.max_input_chars must be at least 1".into(),
            ));
        }
        if !self.keywords.min_category_score.is_finite() || self.keywords.min_category_score < 0.0 {
            return Err(ConfigError::Invalid(
                "keywords.min_category_score must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}
