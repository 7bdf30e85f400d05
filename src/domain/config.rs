use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for scene inspection.
///
/// This struct holds settings that control how scene files are recognised
/// and segmented, and how reports are trimmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The extension a scene file must carry, without the leading dot.
    extension: String,

    /// Lines starting with this marker are comments.
    ///
    /// Comment lines belong to no record and contribute nothing to record
    /// sizes.
    comment_marker: String,

    /// Records below this share of the file (in percent) are left out of the
    /// usage diagnosis.
    pub min_percent: f64,

    /// The number of node types listed by default in type distributions.
    pub top_types: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            comment_marker: default_comment_marker(),
            min_percent: default_min_percent(),
            top_types: default_top_types(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the expected scene file extension.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the comment marker.
    #[must_use]
    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    /// Sets the expected scene file extension.
    ///
    /// A leading dot is ignored.
    pub fn set_extension(&mut self, extension: &str) {
        self.extension = extension.trim_start_matches('.').to_string();
    }
}

fn default_extension() -> String {
    "ma".to_string()
}

fn default_comment_marker() -> String {
    "//".to_string()
}

const fn default_min_percent() -> f64 {
    0.1
}

const fn default_top_types() -> usize {
    10
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_extension")]
        extension: String,

        #[serde(default = "default_comment_marker")]
        comment_marker: String,

        #[serde(default = "default_min_percent")]
        min_percent: f64,

        #[serde(default = "default_top_types")]
        top_types: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                extension,
                comment_marker,
                min_percent,
                top_types,
            } => Self {
                extension: extension.trim_start_matches('.').to_string(),
                comment_marker,
                min_percent,
                top_types,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            extension: config.extension,
            comment_marker: config.comment_marker,
            min_percent: config.min_percent,
            top_types: config.top_types,
        }
    }
}
