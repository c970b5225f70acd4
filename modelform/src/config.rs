//! Converter configuration using Figment.
//!
//! Sources are merged in precedence order (later sources override earlier ones):
//! 1. Default values
//! 2. An optional configuration file (`.yaml`/`.yml`, `.toml` or `.json`)
//! 3. Environment variables prefixed `MODELFORM_`, nested keys split on `__`
//!
//! Section names in environment variables are case-insensitive, field names
//! are not: `MODELFORM_LABELS__firstName` overrides the label of `firstName`.
//!
//! ```yaml
//! exclude: [password_hash]
//! required:
//!   nickname: true
//! labels:
//!   date_of_birth: Date of birth
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FormError, Result};
use crate::selector::SelectionCriteria;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "MODELFORM_";

/// Selection criteria and per-field overrides applied by `Converter::convert`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<BTreeSet<String>>,
    /// Field name to forced required flag.
    #[serde(default)]
    pub required: BTreeMap<String, bool>,
    /// Field name to label text.
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

impl ConverterConfig {
    /// Load configuration from defaults, `path` (if given) and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: ConverterConfig = Self::figment(path)?.extract()?;
        debug!(
            required_overrides = config.required.len(),
            label_overrides = config.labels.len(),
            "loaded converter configuration"
        );
        Ok(config)
    }

    /// Build the layered figment without extracting it.
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(ConverterConfig::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(FormError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            debug!(path = %path.display(), "merging configuration file");
            figment = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => figment.merge(Toml::file(path)),
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Yaml::file(path)),
            };
        }

        Ok(figment.merge(env_provider()))
    }

    pub fn selection(&self) -> SelectionCriteria {
        SelectionCriteria {
            only: self.only.clone(),
            exclude: self.exclude.clone(),
        }
    }

    pub fn required_for(&self, field: &str) -> Option<bool> {
        self.required.get(field).copied()
    }

    pub fn label_for(&self, field: &str) -> Option<&str> {
        self.labels.get(field).map(String::as_str)
    }
}

/// Environment layer that lowercases the section key only, so per-field
/// overrides keep the field name's case.
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .split("__")
        .lowercase(false)
        .map(|key| match key.as_str().split_once('.') {
            Some((section, field)) => {
                format!("{}.{}", section.to_ascii_lowercase(), field).into()
            }
            None => key.as_str().to_ascii_lowercase().into(),
        })
}
