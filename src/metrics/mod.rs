//! Built-in metrics for namespace watching.
//!
//! Provides OpenTelemetry metrics tracking:
//! - Registrations and owner overwrites
//! - Dispatched notifications
//! - Entries consumed after their owner was dropped
//! - Entries abandoned through unregistration
//! - Pending watches
//!
//! # Examples
//!
//! ```rust,no_run
//! use namespace_watch::prelude::*;
//! use opentelemetry::global;
//!
//! # fn example() -> Result<()> {
//! let meter = global::meter("my-loader");
//!
//! let watcher = ExplicitNamespaces::builder()
//!     .with_metrics(meter)
//!     .build::<NamespaceDef>()?;
//! # Ok(())
//! # }
//! ```

mod watch_metrics;

pub use watch_metrics::WatchMetrics;
