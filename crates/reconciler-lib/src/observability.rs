//! Prometheus metrics for reconciliation outcomes

use prometheus::{
    register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec,
};
use std::sync::OnceLock;

use crate::sync::SyncReport;

/// Global metrics instance (registered once)
static GLOBAL_METRICS: OnceLock<ReconcilerMetricsInner> = OnceLock::new();

/// Inner metrics structure that holds the actual Prometheus metrics
struct ReconcilerMetricsInner {
    reconciliations: IntCounter,
    reconcile_errors: IntCounterVec,
    metric_entries_updated: IntCounterVec,
    malformed_metric_entries: IntCounter,
}

impl ReconcilerMetricsInner {
    fn new() -> Self {
        Self {
            reconciliations: register_int_counter!(
                "hpa_reconciler_reconciliations_total",
                "Total number of recommendation sets applied"
            )
            .expect("Failed to register reconciliations_total"),

            reconcile_errors: register_int_counter_vec!(
                "hpa_reconciler_errors_total",
                "Total number of failed reconciliations by error kind",
                &["kind"]
            )
            .expect("Failed to register errors_total"),

            metric_entries_updated: register_int_counter_vec!(
                "hpa_reconciler_metric_entries_updated_total",
                "Total number of metric entries overwritten by pass",
                &["pass"]
            )
            .expect("Failed to register metric_entries_updated_total"),

            malformed_metric_entries: register_int_counter!(
                "hpa_reconciler_malformed_metric_entries_total",
                "Total number of metric entries skipped as malformed"
            )
            .expect("Failed to register malformed_metric_entries_total"),
        }
    }
}

/// Reconciler metrics for Prometheus exposition
///
/// This is a lightweight handle to the global metrics instance.
/// Multiple clones share the same underlying metrics.
#[derive(Clone)]
pub struct ReconcilerMetrics {
    _private: (),
}

impl Default for ReconcilerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconcilerMetrics {
    /// Create a new metrics handle (initializes global metrics if needed)
    pub fn new() -> Self {
        GLOBAL_METRICS.get_or_init(ReconcilerMetricsInner::new);
        Self { _private: () }
    }

    fn inner(&self) -> &ReconcilerMetricsInner {
        GLOBAL_METRICS.get().expect("Metrics not initialized")
    }

    /// Record a completed reconciliation and its per-pass update counts
    pub fn observe_report(&self, report: &SyncReport) {
        self.inner().reconciliations.inc();
        self.inner()
            .metric_entries_updated
            .with_label_values(&["container_resource"])
            .inc_by(report.container_metrics_updated as u64);
        self.inner()
            .metric_entries_updated
            .with_label_values(&["external"])
            .inc_by(report.external_metrics_updated as u64);
        self.inner()
            .malformed_metric_entries
            .inc_by(report.anomalies.len() as u64);
    }

    /// Record a failed reconciliation by error kind
    pub fn inc_reconcile_errors(&self, kind: &str) {
        self.inner()
            .reconcile_errors
            .with_label_values(&[kind])
            .inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::Anomaly;

    #[test]
    fn test_metrics_observation() {
        let metrics = ReconcilerMetrics::new();

        let report = SyncReport {
            container_metrics_updated: 2,
            external_metrics_updated: 1,
            anomalies: vec![Anomaly::ExternalMissingName { index: 0 }],
            min_replicas: 3,
            max_replicas: 12,
        };
        metrics.observe_report(&report);
        metrics.inc_reconcile_errors("no_active_window");
    }
}
