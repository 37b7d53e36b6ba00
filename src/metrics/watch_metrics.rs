//! Namespace watch metrics using OpenTelemetry.

use opentelemetry::metrics::{Counter, Gauge, Meter};

/// Metrics collector for registry and dispatch activity.
///
/// # Examples
///
/// ```rust,no_run
/// use namespace_watch::metrics::WatchMetrics;
/// use opentelemetry::global;
///
/// let metrics = WatchMetrics::new(global::meter("namespace-watch"), "namespace_watch");
/// metrics.record_registration(false, 1);
/// metrics.record_dispatch(0);
/// ```
#[derive(Clone)]
pub struct WatchMetrics {
    registrations: Counter<u64>,
    overwrites: Counter<u64>,
    dispatches: Counter<u64>,
    dropped_owners: Counter<u64>,
    unregistered: Counter<u64>,
    pending: Gauge<i64>,
}

impl WatchMetrics {
    /// Create a collector whose instrument names start with `prefix`.
    pub fn new(meter: Meter, prefix: &str) -> Self {
        let registrations = meter
            .u64_counter(format!("{prefix}.registrations"))
            .with_description("Total number of explicit namespace registrations")
            .build();

        let overwrites = meter
            .u64_counter(format!("{prefix}.overwrites"))
            .with_description("Registrations that replaced an existing owner")
            .build();

        let dispatches = meter
            .u64_counter(format!("{prefix}.dispatches"))
            .with_description("Owners notified that their namespace was created")
            .build();

        let dropped_owners = meter
            .u64_counter(format!("{prefix}.dropped_owners"))
            .with_description("Matched entries whose owner had already been dropped")
            .build();

        let unregistered = meter
            .u64_counter(format!("{prefix}.unregistered"))
            .with_description("Entries removed before their namespace was created")
            .build();

        let pending = meter
            .i64_gauge(format!("{prefix}.pending"))
            .with_description("Namespaces currently being watched")
            .build();

        Self {
            registrations,
            overwrites,
            dispatches,
            dropped_owners,
            unregistered,
            pending,
        }
    }

    /// Record a registration and the resulting number of pending watches.
    pub fn record_registration(&self, overwrote: bool, pending: usize) {
        self.registrations.add(1, &[]);
        if overwrote {
            self.overwrites.add(1, &[]);
        }
        self.record_pending(pending);
    }

    /// Record a successful notification.
    pub fn record_dispatch(&self, pending: usize) {
        self.dispatches.add(1, &[]);
        self.record_pending(pending);
    }

    /// Record a matched entry whose owner no longer exists.
    pub fn record_dropped_owner(&self, pending: usize) {
        self.dropped_owners.add(1, &[]);
        self.record_pending(pending);
    }

    /// Record entries removed by unregistration or teardown.
    pub fn record_unregistered(&self, removed: usize, pending: usize) {
        self.unregistered.add(removed as u64, &[]);
        self.record_pending(pending);
    }

    fn record_pending(&self, pending: usize) {
        self.pending.record(pending as i64, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::global;

    #[test]
    fn test_metrics_creation() {
        let metrics = WatchMetrics::new(global::meter("test"), "namespace_watch");

        // Test basic operations don't panic
        metrics.record_registration(false, 1);
        metrics.record_registration(true, 1);
        metrics.record_dispatch(0);
        metrics.record_dropped_owner(0);
        metrics.record_unregistered(3, 0);
    }

    #[test]
    fn test_metrics_clone() {
        let metrics = WatchMetrics::new(global::meter("test"), "custom");
        let metrics2 = metrics.clone();

        metrics.record_registration(false, 1);
        metrics2.record_dispatch(0);
    }
}
