//! Watched-name → owner mappings.

use crate::core::capture::{CaptureState, EventCapture};
use crate::core::{NamespaceName, OwnerRef};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Exclusive mapping from watched namespace name to its owner.
///
/// One lock serializes both the map and the capture transitions, so after
/// any call returns the capture is active if and only if the map is
/// non-empty.
pub(crate) struct Registry<N: ?Sized> {
    watched: Mutex<HashMap<NamespaceName, OwnerRef<N>>>,
    capture: EventCapture,
}

impl<N: ?Sized> Registry<N> {
    pub(crate) fn new() -> Self {
        Self {
            watched: Mutex::new(HashMap::new()),
            capture: EventCapture::new(),
        }
    }

    /// Insert or overwrite, returning the owner that was replaced.
    ///
    /// `on_replace` sees the key, the replaced owner and the new one, and
    /// runs under the lock only when an entry is overwritten.
    pub(crate) fn register<F>(
        &self,
        name: NamespaceName,
        owner: OwnerRef<N>,
        on_replace: F,
    ) -> Option<OwnerRef<N>>
    where
        F: FnOnce(&NamespaceName, &OwnerRef<N>, &OwnerRef<N>),
    {
        let mut watched = self.watched.lock();
        let previous = match watched.entry(name) {
            Entry::Occupied(mut entry) => {
                let previous = entry.insert(owner);
                on_replace(entry.key(), &previous, entry.get());
                Some(previous)
            }
            Entry::Vacant(entry) => {
                entry.insert(owner);
                None
            }
        };
        self.capture.enable();
        previous
    }

    /// Remove every entry owned by `owner`, returning how many went.
    pub(crate) fn unregister(&self, owner: &OwnerRef<N>) -> usize {
        let mut watched = self.watched.lock();
        let before = watched.len();
        watched.retain(|_, entry| !entry.same_owner(owner));
        let removed = before - watched.len();
        if watched.is_empty() {
            self.capture.disable();
        }
        removed
    }

    /// Remove and return the owner of `name`, if watched.
    ///
    /// Leaves the capture alone; callers follow up with
    /// [`deactivate_if_idle`](Self::deactivate_if_idle) once the owner has
    /// been notified.
    pub(crate) fn take(&self, name: &str) -> Option<OwnerRef<N>> {
        self.watched.lock().remove(name)
    }

    /// Disable the capture if nothing is watched. Idempotent.
    pub(crate) fn deactivate_if_idle(&self) {
        let watched = self.watched.lock();
        if watched.is_empty() {
            self.capture.disable();
        }
    }

    /// Drop every entry without notifying anyone.
    pub(crate) fn clear(&self) -> usize {
        let mut watched = self.watched.lock();
        let removed = watched.len();
        watched.clear();
        self.capture.disable();
        removed
    }

    #[inline]
    pub(crate) fn is_active(&self) -> bool {
        self.capture.is_enabled()
    }

    pub(crate) fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.watched.lock().contains_key(name)
    }

    pub(crate) fn owner_of(&self, name: &str) -> Option<OwnerRef<N>> {
        self.watched.lock().get(name).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.watched.lock().len()
    }

    pub(crate) fn names(&self) -> Vec<NamespaceName> {
        let mut names: Vec<_> = self.watched.lock().keys().cloned().collect();
        names.sort();
        names
    }
}
