//! Binder configuration
//!
//! Marker names and the alert delay. Every field has a default matching
//! the markup the inventory templates render, so an empty TOML document is
//! a valid configuration.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid binder config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Page binder configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BinderConfig {
    /// Delay before dismissible alerts are closed
    pub alert_dismiss_delay_ms: u64,
    pub alert_class: String,
    /// Alerts carrying this class are never auto-dismissed
    pub permanent_alert_class: String,
    pub validation_class: String,
    /// Added to a form after a submit attempt
    pub validated_class: String,
    /// Attribute naming the table a search box filters
    pub search_attribute: String,
    pub print_class: String,
    /// Attribute holding the confirmation question
    pub confirm_attribute: String,
    pub file_input_class: String,
    pub sortable_class: String,
    /// Present on a header while its column is sorted ascending
    pub sort_ascending_class: String,
    pub responsive_class: String,
    pub wrapper_class: String,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            alert_dismiss_delay_ms: 5000,
            alert_class: "alert".to_string(),
            permanent_alert_class: "alert-permanent".to_string(),
            validation_class: "needs-validation".to_string(),
            validated_class: "was-validated".to_string(),
            search_attribute: "data-search-table".to_string(),
            print_class: "print-button".to_string(),
            confirm_attribute: "data-confirm".to_string(),
            file_input_class: "custom-file-input".to_string(),
            sortable_class: "sortable".to_string(),
            sort_ascending_class: "asc".to_string(),
            responsive_class: "table-responsive".to_string(),
            wrapper_class: "table-wrapper".to_string(),
        }
    }
}

impl BinderConfig {
    /// Parse from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!("Loaded binder config from {}", path.display());
        Ok(config)
    }
}
