//! The explicit-namespace watcher service.

use crate::core::registry::Registry;
use crate::core::{CaptureState, Namespace, NamespaceName, OwnerRef, WatchSettings};
use std::fmt;

#[cfg(feature = "metrics")]
use crate::metrics::WatchMetrics;

/// Watches for the creation of explicit namespaces and notifies their owners.
///
/// Loaders register the namespaces they expect application code to define,
/// and the loading system announces every namespace it creates through
/// [`on_namespace_created`](Self::on_namespace_created). The first
/// announcement of a watched name removes the entry and notifies its owner,
/// exactly once.
///
/// Observation is switched off whenever nothing is watched, so announcing
/// unrelated namespaces costs a single atomic load in that state.
///
/// # Caller contract
///
/// Each explicit namespace is assumed to be driven by exactly one owner. If
/// application code also defines a watched namespace through a path the
/// owner does not control, the outcome is unspecified. This is not checked.
///
/// # Examples
///
/// ```rust
/// use namespace_watch::prelude::*;
/// use std::sync::Arc;
///
/// struct Loader;
///
/// impl NamespaceOwner<NamespaceDef> for Loader {
///     fn on_namespace_loaded(&self, namespace: &NamespaceDef) {
///         // scan the directory backing `namespace` for more code
///     }
/// }
///
/// # fn example() -> Result<()> {
/// let watcher = Arc::new(ExplicitNamespaces::<NamespaceDef>::new());
/// let loader = Arc::new(Loader);
///
/// watcher.register("Admin::Users".parse()?, &loader);
/// assert!(watcher.is_active());
///
/// // Later, after the application defines `Admin::Users`:
/// watcher.on_namespace_created(&NamespaceDef::module("Admin::Users")?);
/// assert!(!watcher.is_active());
/// # Ok(())
/// # }
/// ```
pub struct ExplicitNamespaces<N: ?Sized = dyn Namespace> {
    registry: Registry<N>,
    settings: WatchSettings,
    #[cfg(feature = "metrics")]
    metrics: Option<WatchMetrics>,
}

impl<N: Namespace + ?Sized> ExplicitNamespaces<N> {
    /// Create an empty, inactive watcher with default settings.
    pub fn new() -> Self {
        Self::with_settings(WatchSettings::default())
    }

    /// Create an empty, inactive watcher with the given settings.
    pub fn with_settings(settings: WatchSettings) -> Self {
        Self {
            registry: Registry::new(),
            settings,
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    /// Attach a metrics collector.
    #[cfg(feature = "metrics")]
    pub(crate) fn with_metrics(mut self, metrics: WatchMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Watch `name` on behalf of `owner`.
    ///
    /// A later registration for the same name replaces the earlier one and
    /// the replaced owner is returned. Only a weak reference to `owner` is
    /// kept. Activates observation if it was off.
    pub fn register(
        &self,
        name: NamespaceName,
        owner: impl Into<OwnerRef<N>>,
    ) -> Option<OwnerRef<N>> {
        let owner = owner.into();
        tracing::debug!(namespace = %name, "watching explicit namespace");

        let warn_on_overwrite = self.settings.warn_on_overwrite;
        let previous = self.registry.register(name, owner, |name, previous, current| {
            if warn_on_overwrite && !previous.same_owner(current) && !previous.is_dropped() {
                tracing::warn!(
                    namespace = %name,
                    "explicit namespace re-registered by a different owner; last registration wins"
                );
            }
        });

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_registration(previous.is_some(), self.registry.len());
        }

        previous
    }

    /// Stop watching every namespace registered by `owner`.
    ///
    /// Used when a loader is torn down before all its namespaces appeared.
    /// The abandoned entries are dropped without notification. Returns how
    /// many entries were removed.
    pub fn unregister(&self, owner: impl Into<OwnerRef<N>>) -> usize {
        let owner = owner.into();
        let removed = self.registry.unregister(&owner);
        tracing::debug!(removed, "unregistered explicit namespace owner");

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_unregistered(removed, self.registry.len());
        }

        removed
    }

    /// Announce that `namespace` has just been created.
    ///
    /// The loading system calls this at every namespace-definition site,
    /// for watched and unrelated namespaces alike. When the name is being
    /// watched, the entry is removed and its owner notified synchronously
    /// on this thread with `namespace` itself. Singletons and anonymous
    /// namespaces are skipped.
    #[inline]
    pub fn on_namespace_created(&self, namespace: &N) {
        if !self.registry.is_active() {
            return;
        }
        self.capture(namespace);
    }

    fn capture(&self, namespace: &N) {
        if namespace.is_singleton() {
            return;
        }

        let Some(name) = namespace.name() else {
            return;
        };

        let Some(owner) = self.registry.take(name.as_str()) else {
            return;
        };

        // Runs after the owner returns, or unwinds.
        let _idle = IdleCheck(&self.registry);

        match owner.upgrade() {
            Some(owner) => {
                tracing::debug!(namespace = %name, "explicit namespace created, notifying owner");

                #[cfg(feature = "metrics")]
                if let Some(metrics) = &self.metrics {
                    metrics.record_dispatch(self.registry.len());
                }

                owner.on_namespace_loaded(namespace);
            }
            None => {
                tracing::debug!(namespace = %name, "owner dropped before namespace was created");

                #[cfg(feature = "metrics")]
                if let Some(metrics) = &self.metrics {
                    metrics.record_dropped_owner(self.registry.len());
                }
            }
        }
    }

    /// Drop every pending watch without notifying anyone.
    ///
    /// Returns how many entries were removed. Observation is off afterwards.
    pub fn clear(&self) -> usize {
        let removed = self.registry.clear();
        tracing::debug!(removed, "cleared explicit namespace watches");

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.record_unregistered(removed, 0);
        }

        removed
    }

    /// Whether `name` is currently being watched.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// The owner currently registered for `name`.
    pub fn owner_of(&self, name: &str) -> Option<OwnerRef<N>> {
        self.registry.owner_of(name)
    }

    /// Whether creation events are being observed.
    pub fn is_active(&self) -> bool {
        self.registry.is_active()
    }

    /// The observer state.
    pub fn capture_state(&self) -> CaptureState {
        self.registry.capture_state()
    }

    /// Number of pending watches.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Whether nothing is being watched.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted snapshot of the watched names.
    pub fn watched_names(&self) -> Vec<NamespaceName> {
        self.registry.names()
    }

    /// The settings this watcher was built with.
    pub fn settings(&self) -> &WatchSettings {
        &self.settings
    }
}

impl<N: Namespace + ?Sized> Default for ExplicitNamespaces<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: ?Sized> fmt::Debug for ExplicitNamespaces<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExplicitNamespaces")
            .field("watched", &self.registry.names())
            .field("state", &self.registry.capture_state())
            .field("settings", &self.settings)
            .finish()
    }
}

struct IdleCheck<'a, N: ?Sized>(&'a Registry<N>);

impl<N: ?Sized> Drop for IdleCheck<'_, N> {
    fn drop(&mut self) {
        self.0.deactivate_if_idle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NamespaceDef, NamespaceOwner};
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<String>>,
    }

    impl NamespaceOwner<NamespaceDef> for Recorder {
        fn on_namespace_loaded(&self, namespace: &NamespaceDef) {
            let name = namespace.name().map(|n| n.to_string()).unwrap_or_default();
            self.seen.lock().push(name);
        }
    }

    fn watcher() -> ExplicitNamespaces<NamespaceDef> {
        ExplicitNamespaces::new()
    }

    #[test]
    fn test_inactive_ignores_everything() {
        let watcher = watcher();
        watcher.on_namespace_created(&NamespaceDef::module("A").unwrap());
        assert!(!watcher.is_active());
        assert!(watcher.is_empty());
    }

    #[test]
    fn test_singleton_is_never_dispatched() {
        let watcher = watcher();
        let owner = Arc::new(Recorder::default());
        watcher.register("A::B".parse().unwrap(), &owner);

        watcher.on_namespace_created(&NamespaceDef::singleton_of("A::B".parse().unwrap()));

        assert!(owner.seen.lock().is_empty());
        assert!(watcher.is_registered("A::B"));
        assert!(watcher.is_active());
    }

    #[test]
    fn test_anonymous_is_skipped() {
        let watcher = watcher();
        let owner = Arc::new(Recorder::default());
        watcher.register("A::B".parse().unwrap(), &owner);

        watcher.on_namespace_created(&NamespaceDef::anonymous());

        assert!(owner.seen.lock().is_empty());
        assert_eq!(watcher.len(), 1);
    }

    #[test]
    fn test_dropped_owner_consumes_entry_silently() {
        let watcher = watcher();
        let owner = Arc::new(Recorder::default());
        watcher.register("A::B".parse().unwrap(), &owner);
        drop(owner);

        watcher.on_namespace_created(&NamespaceDef::module("A::B").unwrap());

        assert!(watcher.is_empty());
        assert!(!watcher.is_active());
    }

    #[test]
    fn test_panicking_owner_still_deactivates() {
        struct Panics;

        impl NamespaceOwner<NamespaceDef> for Panics {
            fn on_namespace_loaded(&self, _namespace: &NamespaceDef) {
                panic!("loader failed");
            }
        }

        let watcher = watcher();
        let owner = Arc::new(Panics);
        watcher.register("A".parse().unwrap(), &owner);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            watcher.on_namespace_created(&NamespaceDef::module("A").unwrap());
        }));

        assert!(result.is_err());
        assert!(watcher.is_empty());
        assert!(!watcher.is_active());
    }

    #[test]
    fn test_clear() {
        let watcher = watcher();
        let owner = Arc::new(Recorder::default());
        watcher.register("A".parse().unwrap(), &owner);
        watcher.register("B".parse().unwrap(), &owner);

        assert_eq!(watcher.clear(), 2);
        assert!(!watcher.is_active());

        watcher.on_namespace_created(&NamespaceDef::module("A").unwrap());
        assert!(owner.seen.lock().is_empty());
    }

    #[test]
    fn test_owner_of_and_settings() {
        let watcher = ExplicitNamespaces::<NamespaceDef>::with_settings(WatchSettings {
            warn_on_overwrite: false,
            ..WatchSettings::default()
        });
        let owner = Arc::new(Recorder::default());
        watcher.register("A".parse().unwrap(), &owner);

        assert!(watcher.owner_of("A").unwrap().same_owner(&OwnerRef::from(&owner)));
        assert!(watcher.owner_of("B").is_none());
        assert!(!watcher.settings().warn_on_overwrite);
    }

    #[test]
    fn test_debug_lists_watched_names() {
        let watcher = watcher();
        let owner = Arc::new(Recorder::default());
        watcher.register("A::B".parse().unwrap(), &owner);

        let debug = format!("{:?}", watcher);
        assert!(debug.contains("A::B"));
        assert!(debug.contains("Active"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_metrics_attached_by_builder() {
        let watcher = ExplicitNamespaces::builder()
            .with_metrics(opentelemetry::global::meter("test"))
            .build::<NamespaceDef>()
            .unwrap();
        assert!(watcher.metrics.is_some());

        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());

        assert!(watcher.register("A".parse().unwrap(), &first).is_none());
        assert!(watcher.register("A".parse().unwrap(), &second).is_some());
        watcher.register("B".parse().unwrap(), &second);
        assert_eq!(watcher.len(), 2);

        watcher.on_namespace_created(&NamespaceDef::module("A").unwrap());
        assert_eq!(*second.seen.lock(), vec!["A".to_string()]);

        let dropped = Arc::new(Recorder::default());
        watcher.register("C".parse().unwrap(), &dropped);
        drop(dropped);
        watcher.on_namespace_created(&NamespaceDef::module("C").unwrap());
        assert!(!watcher.is_registered("C"));

        assert_eq!(watcher.unregister(&second), 1);
        assert!(!watcher.is_active());

        watcher.register("D".parse().unwrap(), &first);
        assert_eq!(watcher.clear(), 1);
        assert!(!watcher.is_active());
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_metrics_absent_without_meter() {
        let watcher = ExplicitNamespaces::builder().build::<NamespaceDef>().unwrap();
        assert!(watcher.metrics.is_none());
    }
}
