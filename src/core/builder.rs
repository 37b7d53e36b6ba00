//! Builder for constructing ExplicitNamespaces instances.

use crate::core::settings::SettingsLoader;
use crate::core::{ExplicitNamespaces, Namespace, WatchSettings};
use crate::error::Result;
use std::path::PathBuf;

#[cfg(feature = "metrics")]
use crate::metrics::WatchMetrics;

/// Builder for constructing an [`ExplicitNamespaces`] watcher.
///
/// Settings come from, in increasing precedence: defaults, settings files
/// in the order given, then environment variables. Passing explicit
/// settings with [`with_settings`](Self::with_settings) skips loading.
///
/// # Examples
///
/// ```rust,no_run
/// use namespace_watch::prelude::*;
///
/// # fn example() -> Result<()> {
/// let watcher = ExplicitNamespaces::builder()
///     .with_settings_file("config/watch.yaml")
///     .with_env_overrides("NSWATCH", "__")
///     .build::<NamespaceDef>()?;
/// # Ok(())
/// # }
/// ```
pub struct ExplicitNamespacesBuilder {
    loader: SettingsLoader,
    settings: Option<WatchSettings>,
    #[cfg(feature = "metrics")]
    meter: Option<opentelemetry::metrics::Meter>,
}

impl ExplicitNamespacesBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            loader: SettingsLoader::new(),
            settings: None,
            #[cfg(feature = "metrics")]
            meter: None,
        }
    }

    /// Add a settings file. The format is detected from the extension
    /// (`.yaml`/`.yml`, `.toml`, `.json`).
    ///
    /// Later files override earlier ones.
    pub fn with_settings_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.loader.add_file(path.into());
        self
    }

    /// Read overrides from environment variables.
    ///
    /// # Arguments
    ///
    /// * `prefix` - Prefix for environment variables (e.g., "NSWATCH")
    /// * `separator` - Separator for nested keys (e.g., "__")
    ///
    /// `NSWATCH_WARN_ON_OVERWRITE=false` sets `warn_on_overwrite`.
    pub fn with_env_overrides(mut self, prefix: &str, separator: &str) -> Self {
        self.loader
            .set_env(prefix.to_string(), separator.to_string());
        self
    }

    /// Use these settings as-is instead of loading any source.
    pub fn with_settings(mut self, settings: WatchSettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Record registry and dispatch metrics on `meter`.
    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, meter: opentelemetry::metrics::Meter) -> Self {
        self.meter = Some(meter);
        self
    }

    /// Build the watcher.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings source cannot be loaded or
    /// deserialized.
    pub fn build<N>(self) -> Result<ExplicitNamespaces<N>>
    where
        N: Namespace + ?Sized,
    {
        let settings = match self.settings {
            Some(settings) => settings,
            None if self.loader.is_empty() => WatchSettings::default(),
            None => self.loader.load()?,
        };

        #[cfg(feature = "metrics")]
        let metrics = self
            .meter
            .map(|meter| WatchMetrics::new(meter, &settings.metrics_prefix));

        let watcher = ExplicitNamespaces::with_settings(settings);

        #[cfg(feature = "metrics")]
        let watcher = match metrics {
            Some(metrics) => watcher.with_metrics(metrics),
            None => watcher,
        };

        Ok(watcher)
    }
}

impl Default for ExplicitNamespacesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplicitNamespaces<dyn Namespace> {
    /// Create a new builder for constructing a watcher.
    pub fn builder() -> ExplicitNamespacesBuilder {
        ExplicitNamespacesBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::NamespaceDef;

    #[test]
    fn test_builder_defaults() {
        let watcher = ExplicitNamespacesBuilder::new()
            .build::<NamespaceDef>()
            .unwrap();
        assert_eq!(watcher.settings(), &WatchSettings::default());
        assert!(!watcher.is_active());
    }

    #[test]
    fn test_builder_accumulates_files() {
        let builder = ExplicitNamespacesBuilder::new()
            .with_settings_file("watch1.yaml")
            .with_settings_file("watch2.toml");

        assert!(!builder.loader.is_empty());
    }

    #[test]
    fn test_explicit_settings_skip_loading() {
        let settings = WatchSettings {
            warn_on_overwrite: false,
            metrics_prefix: "loader".to_string(),
        };

        // The missing file is never read.
        let watcher = ExplicitNamespaces::builder()
            .with_settings_file("/nonexistent/watch.yaml")
            .with_settings(settings.clone())
            .build::<NamespaceDef>()
            .unwrap();

        assert_eq!(watcher.settings(), &settings);
    }

    #[test]
    fn test_missing_file_fails_build() {
        let result = ExplicitNamespaces::builder()
            .with_settings_file("/nonexistent/watch.yaml")
            .build::<NamespaceDef>();
        assert!(result.is_err());
    }

    #[test]
    fn test_dyn_namespace_watcher() {
        let watcher = ExplicitNamespaces::builder()
            .build::<dyn Namespace>()
            .unwrap();
        watcher.on_namespace_created(&NamespaceDef::module("A").unwrap());
        assert!(watcher.is_empty());
    }
}
