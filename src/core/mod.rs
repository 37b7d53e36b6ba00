//! Core watcher types: names, namespaces, owners, the registry and the service.

mod builder;
mod capture;
mod explicit;
mod name;
mod namespace;
mod owner;
mod registry;
mod settings;

pub use builder::ExplicitNamespacesBuilder;
pub use capture::CaptureState;
pub use explicit::ExplicitNamespaces;
pub use name::{NamespaceName, SEPARATOR};
pub use namespace::{Namespace, NamespaceDef, NamespaceKind};
pub use owner::{NamespaceOwner, OwnerRef};
pub use settings::{DEFAULT_METRICS_PREFIX, WatchSettings};
