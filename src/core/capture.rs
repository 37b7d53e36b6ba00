//! Activation state of the namespace-creation observer.

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether creation events are currently being observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    /// Events are ignored before any lookup happens.
    Inactive,
    /// Events are filtered and dispatched.
    Active,
}

/// The observer switch.
///
/// Reads are lock-free so the hot path can bail out without touching the
/// registry lock. Transitions only happen while the registry lock is held,
/// which keeps the flag in step with registry emptiness.
#[derive(Debug)]
pub(crate) struct EventCapture {
    enabled: AtomicBool,
}

impl EventCapture {
    pub(crate) const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
        }
    }

    #[inline]
    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub(crate) fn state(&self) -> CaptureState {
        if self.is_enabled() {
            CaptureState::Active
        } else {
            CaptureState::Inactive
        }
    }

    /// Returns `true` if this call performed the transition.
    pub(crate) fn enable(&self) -> bool {
        let changed = !self.enabled.swap(true, Ordering::AcqRel);
        if changed {
            tracing::trace!("namespace creation capture enabled");
        }
        changed
    }

    /// Returns `true` if this call performed the transition.
    pub(crate) fn disable(&self) -> bool {
        let changed = self.enabled.swap(false, Ordering::AcqRel);
        if changed {
            tracing::trace!("namespace creation capture disabled");
        }
        changed
    }
}
