//! Namespace objects announced by the loading system.

use crate::core::NamespaceName;

/// A namespace object that has just been created.
///
/// The loading system announces every namespace it defines through
/// [`ExplicitNamespaces::on_namespace_created`](crate::core::ExplicitNamespaces::on_namespace_created).
/// Owners receive the object itself, so implementors are free to expose
/// whatever a loader needs to keep introspecting it.
pub trait Namespace: Send + Sync {
    /// The fully-qualified name, or `None` while the namespace is anonymous.
    ///
    /// Anonymous namespaces can never match a registration.
    fn name(&self) -> Option<&NamespaceName>;

    /// Whether this is a synthetic singleton construct rather than a
    /// user-addressable namespace.
    ///
    /// Checked before anything else on every event, so keep it cheap.
    fn is_singleton(&self) -> bool {
        false
    }
}

/// The kind of container a [`NamespaceDef`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamespaceKind {
    /// A module-like container.
    Module,
    /// A class-like container that can also hold nested definitions.
    Class,
    /// A per-object singleton container. Never watched.
    Singleton,
}

/// A plain namespace value for loaders that have no richer type of their own.
///
/// # Examples
///
/// ```rust
/// use namespace_watch::core::{Namespace, NamespaceDef};
///
/// let admin = NamespaceDef::module("Admin").unwrap();
/// assert_eq!(admin.name().unwrap().as_str(), "Admin");
/// assert!(NamespaceDef::anonymous().name().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDef {
    name: Option<NamespaceName>,
    kind: NamespaceKind,
}

impl NamespaceDef {
    /// Describe a named namespace of the given kind.
    pub fn new(name: NamespaceName, kind: NamespaceKind) -> Self {
        Self {
            name: Some(name),
            kind,
        }
    }

    /// Describe a named module.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid fully-qualified name.
    pub fn module(name: &str) -> crate::error::Result<Self> {
        Ok(Self::new(name.parse()?, NamespaceKind::Module))
    }

    /// Describe a named class.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is not a valid fully-qualified name.
    pub fn class(name: &str) -> crate::error::Result<Self> {
        Ok(Self::new(name.parse()?, NamespaceKind::Class))
    }

    /// Describe a module that has not been given a name yet.
    pub fn anonymous() -> Self {
        Self {
            name: None,
            kind: NamespaceKind::Module,
        }
    }

    /// Describe the singleton container attached to a named namespace.
    ///
    /// It carries the name of the namespace it belongs to, but is never
    /// dispatched.
    pub fn singleton_of(name: NamespaceName) -> Self {
        Self::new(name, NamespaceKind::Singleton)
    }

    /// Assign a name to a previously anonymous namespace.
    pub fn with_name(mut self, name: NamespaceName) -> Self {
        self.name = Some(name);
        self
    }

    /// The kind of container.
    pub fn kind(&self) -> NamespaceKind {
        self.kind
    }
}

impl Namespace for NamespaceDef {
    fn name(&self) -> Option<&NamespaceName> {
        self.name.as_ref()
    }

    fn is_singleton(&self) -> bool {
        self.kind == NamespaceKind::Singleton
    }
}
