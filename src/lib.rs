//! # namespace-watch
//!
//! Notify the loader that owns an explicit namespace the moment that
//! namespace is created.
//!
//! ## Overview
//!
//! A code loader often knows that a namespace (say `Admin::Users`) is backed
//! by a directory, but also that application code, not the loader, is
//! expected to define it. Until the namespace exists the loader cannot
//! finish its work, such as wiring up the files nested under that directory.
//!
//! `namespace-watch` keeps the mapping from those watched names to their
//! owning loaders and, when the loading system announces that a namespace
//! was created, hands it to its owner exactly once:
//! - A single registry guarded by one lock, keyed by fully-qualified name
//! - Last registration for a name wins
//! - Observation switched off whenever nothing is watched
//! - Owners held by weak reference, never kept alive by the registry
//!
//! ## Quick Start
//!
//! ```rust
//! use namespace_watch::prelude::*;
//! use std::sync::Arc;
//!
//! struct DirectoryLoader;
//!
//! impl NamespaceOwner<NamespaceDef> for DirectoryLoader {
//!     fn on_namespace_loaded(&self, namespace: &NamespaceDef) {
//!         println!("{:?} exists, scanning its directory", namespace.name());
//!     }
//! }
//!
//! # fn example() -> Result<()> {
//! let watcher: Arc<ExplicitNamespaces<NamespaceDef>> = Arc::new(ExplicitNamespaces::new());
//! let loader = Arc::new(DirectoryLoader);
//!
//! watcher.register("Admin::Users".parse()?, &loader);
//!
//! // Called by the loading system wherever a namespace gets defined.
//! watcher.on_namespace_created(&NamespaceDef::module("Admin::Users")?);
//!
//! assert!(watcher.is_empty());
//! assert!(!watcher.is_active());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `metrics`: OpenTelemetry counters for registrations and dispatches

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod global;

#[cfg(feature = "metrics")]
pub mod metrics;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ExplicitNamespaces, ExplicitNamespacesBuilder, Namespace, NamespaceDef, NamespaceName,
        NamespaceOwner, OwnerRef, WatchSettings,
    };
    pub use crate::error::{Result, WatchError};
}
