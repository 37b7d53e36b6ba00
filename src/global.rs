//! Process-wide watcher slot.
//!
//! Loaders normally receive an `Arc<ExplicitNamespaces>` directly. Code that
//! announces namespaces from places where no handle can be threaded through
//! can instead use this slot, which is empty until [`install`] is called and
//! empty again after [`teardown`].
//!
//! Reads are lock-free, so [`namespace_created`] is cheap enough to call at
//! every namespace-definition site.
//!
//! # Examples
//!
//! ```rust
//! use namespace_watch::global;
//! use namespace_watch::prelude::*;
//! use std::sync::Arc;
//!
//! global::install(Arc::new(ExplicitNamespaces::new()));
//! global::namespace_created(&NamespaceDef::module("Admin").unwrap());
//! global::teardown();
//! ```

use crate::core::{ExplicitNamespaces, Namespace};
use arc_swap::ArcSwapOption;
use std::sync::{Arc, LazyLock};

static INSTALLED: LazyLock<ArcSwapOption<ExplicitNamespaces>> = LazyLock::new(ArcSwapOption::empty);

/// Install `watcher` as the process-wide instance, returning the one it replaced.
pub fn install(watcher: Arc<ExplicitNamespaces>) -> Option<Arc<ExplicitNamespaces>> {
    tracing::debug!("installing process-wide namespace watcher");
    INSTALLED.swap(Some(watcher))
}

/// The installed instance, if any.
pub fn current() -> Option<Arc<ExplicitNamespaces>> {
    INSTALLED.load_full()
}

/// Empty the slot, returning the instance that was installed.
///
/// Pending watches of the returned instance are left as they are; call
/// [`ExplicitNamespaces::clear`] to drop them.
pub fn teardown() -> Option<Arc<ExplicitNamespaces>> {
    tracing::debug!("tearing down process-wide namespace watcher");
    INSTALLED.swap(None)
}

/// Announce a created namespace to the installed instance.
///
/// Does nothing when no instance is installed.
pub fn namespace_created(namespace: &(dyn Namespace + 'static)) {
    let installed = INSTALLED.load();
    if let Some(watcher) = &*installed {
        watcher.on_namespace_created(namespace);
    }
}
