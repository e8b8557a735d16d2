//! Document configuration, persisted as TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::owl::OwlShowing;

/// Settings of a [`Document`](crate::document::Document).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AceConfig {
    /// Namespace stamped onto the snippets a document creates.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Maximum number of completion candidates; negative means unbounded.
    #[serde(default = "default_candidate_limit")]
    pub candidate_limit: i32,
    /// Entity IRIs kept out of the entity index, besides built-ins.
    #[serde(default = "OwlShowing::ace_helpers")]
    pub hidden_entities: Vec<String>,
    /// Hand text with undefined content words to the parser anyway.
    #[serde(default)]
    pub parse_with_undefined_tokens: bool,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_namespace() -> String {
    "http://attempto.ifi.uzh.ch/default".into()
}
fn default_candidate_limit() -> i32 {
    -1
}
fn default_log_filter() -> String {
    "info".into()
}

impl Default for AceConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            candidate_limit: default_candidate_limit(),
            hidden_entities: OwlShowing::ace_helpers(),
            parse_with_undefined_tokens: false,
            log_filter: default_log_filter(),
        }
    }
}

impl AceConfig {
    /// Parse from TOML text. Omitted keys take their defaults.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<string>".into(),
            message: e.to_string(),
        })
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })
    }

    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// The showable-entity predicate these settings describe.
    pub fn showing(&self) -> OwlShowing {
        OwlShowing::new(self.hidden_entities.iter().cloned())
    }
}
