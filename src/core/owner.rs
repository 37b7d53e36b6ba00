//! The notification capability loaders implement.

use crate::core::Namespace;
use std::fmt;
use std::sync::{Arc, Weak};

/// A loader responsible for finishing the load of explicit namespaces.
///
/// `on_namespace_loaded` runs synchronously on whatever thread announced
/// the namespace, at any point after registration. No registry lock is
/// held during the call, so the owner may register further namespaces
/// from inside it. It must not block on unrelated I/O.
///
/// # Examples
///
/// ```rust
/// use namespace_watch::core::{NamespaceDef, NamespaceOwner};
/// use namespace_watch::core::Namespace;
///
/// struct Loader;
///
/// impl NamespaceOwner<NamespaceDef> for Loader {
///     fn on_namespace_loaded(&self, namespace: &NamespaceDef) {
///         println!("scan the directory for {:?}", namespace.name());
///     }
/// }
/// ```
pub trait NamespaceOwner<N: ?Sized = dyn Namespace>: Send + Sync {
    /// The watched namespace now exists.
    fn on_namespace_loaded(&self, namespace: &N);
}

/// A non-owning reference to a registered [`NamespaceOwner`].
///
/// The registry never keeps a loader alive. Two references are the same
/// owner when they point at the same allocation.
pub struct OwnerRef<N: ?Sized = dyn Namespace> {
    inner: Weak<dyn NamespaceOwner<N>>,
}

impl<N: ?Sized> OwnerRef<N> {
    /// Upgrade to a strong reference if the owner is still alive.
    pub fn upgrade(&self) -> Option<Arc<dyn NamespaceOwner<N>>> {
        self.inner.upgrade()
    }

    /// Whether the owner has been dropped.
    pub fn is_dropped(&self) -> bool {
        self.inner.strong_count() == 0
    }

    /// Whether both references point at the same owner.
    pub fn same_owner(&self, other: &OwnerRef<N>) -> bool {
        std::ptr::addr_eq(self.inner.as_ptr(), other.inner.as_ptr())
    }
}

impl<N, O> From<&Arc<O>> for OwnerRef<N>
where
    N: ?Sized,
    O: NamespaceOwner<N> + 'static,
{
    fn from(owner: &Arc<O>) -> Self {
        let weak: Weak<O> = Arc::downgrade(owner);
        Self { inner: weak }
    }
}

impl<N: ?Sized> Clone for OwnerRef<N> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<N: ?Sized> fmt::Debug for OwnerRef<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnerRef")
            .field("ptr", &self.inner.as_ptr().cast::<()>())
            .field("dropped", &self.is_dropped())
            .finish()
    }
}
