//! Watcher settings and the loader that merges them from files and env vars.

use crate::error::{Result, WatchError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default prefix for metric instrument names.
pub const DEFAULT_METRICS_PREFIX: &str = "namespace_watch";

/// Tunables for an [`ExplicitNamespaces`](crate::core::ExplicitNamespaces) instance.
///
/// Every field has a default, so a settings file only needs the keys it
/// overrides.
///
/// ```yaml
/// warn_on_overwrite: false
/// metrics_prefix: my_loader
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchSettings {
    /// Log a warning when a registration replaces a different live owner.
    pub warn_on_overwrite: bool,
    /// Prefix of metric instrument names.
    pub metrics_prefix: String,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            warn_on_overwrite: true,
            metrics_prefix: DEFAULT_METRICS_PREFIX.to_string(),
        }
    }
}

/// Merges settings sources in order, later sources overriding earlier ones.
///
/// Files are detected by extension (YAML, TOML, JSON). Environment
/// variables, when configured, always come last.
#[derive(Debug, Default)]
pub(crate) struct SettingsLoader {
    files: Vec<PathBuf>,
    env: Option<(String, String)>,
}

impl SettingsLoader {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_file(&mut self, path: PathBuf) {
        self.files.push(path);
    }

    pub(crate) fn set_env(&mut self, prefix: String, separator: String) {
        self.env = Some((prefix, separator));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.files.is_empty() && self.env.is_none()
    }

    /// Load and merge every source on top of the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is missing or malformed, or the merged
    /// values do not deserialize into [`WatchSettings`].
    pub(crate) fn load(&self) -> Result<WatchSettings> {
        let mut builder = config::Config::builder();

        for path in &self.files {
            if !path.exists() {
                return Err(WatchError::LoadError(format!(
                    "Settings file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(config::File::from(path.as_path()));
        }

        if let Some((prefix, separator)) = &self.env {
            builder = builder.add_source(
                config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator(separator)
                    .try_parsing(true),
            );
        }

        let merged = builder
            .build()
            .map_err(|e| WatchError::LoadError(format!("Failed to build settings: {}", e)))?;

        let settings = merged.try_deserialize::<WatchSettings>().map_err(|e| {
            WatchError::DeserializationError(format!("Failed to deserialize settings: {}", e))
        })?;

        tracing::debug!(
            files = self.files.len(),
            env = self.env.is_some(),
            ?settings,
            "loaded watch settings"
        );

        Ok(settings)
    }
}
