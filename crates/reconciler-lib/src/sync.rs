//! Metric synchronization and per-recommendation orchestration
//!
//! A recommended `(container, resource, target)` triple is fanned out
//! across the two representations of the same scaling metric: the
//! container-resource entry carrying a utilization percentage, and the
//! external entry named `prefix + container` carrying a raw quantity.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::annotations::{
    CPU_EXTERNAL_METRIC_PREFIX_ANNOTATION, MEMORY_EXTERNAL_METRIC_PREFIX_ANNOTATION,
};
use crate::error::ReconcileError;
use crate::models::{MetricSource, Recommendations, ResourceKind, TargetSpec};
use crate::window::select_value;

/// A metric entry that was skipped because it is missing a required
/// sub-field for its declared variant
///
/// Anomalies indicate upstream data corruption. They never abort the
/// call; the entry is left untouched and processing continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// Container-resource entry with an empty container name
    ContainerResourceMissingContainer { index: usize },
    /// External entry with an empty metric name
    ExternalMissingName { index: usize },
}

/// Result of a single `apply_target` call
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncOutcome {
    pub container_metrics_updated: usize,
    pub external_metrics_updated: usize,
    pub anomalies: Vec<Anomaly>,
}

/// Aggregate result of one orchestration run
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub container_metrics_updated: usize,
    pub external_metrics_updated: usize,
    pub anomalies: Vec<Anomaly>,
    pub min_replicas: i32,
    pub max_replicas: i32,
}

/// Overwrite every metric entry in `spec` that refers to
/// `(container_name, resource)` with `target_value`.
///
/// Two passes over `spec.metrics`, independent and order-insensitive:
/// container-resource entries matching container and resource whose
/// utilization target is present get the percentage; external entries
/// whose name equals the annotation-derived `prefix + container_name`
/// get the raw quantity. No entries are added or removed, and the call
/// is idempotent.
///
/// A resource kind outside {cpu, memory} fails with
/// `UnsupportedResourceKind` after the container-resource pass; the
/// mutations already applied stand and the caller must not persist.
pub fn apply_target(
    spec: &mut TargetSpec,
    container_name: &str,
    resource: ResourceKind,
    target_value: i32,
) -> Result<SyncOutcome, ReconcileError> {
    let mut outcome = SyncOutcome::default();

    for (index, metric) in spec.metrics.iter_mut().enumerate() {
        let entry = match metric {
            MetricSource::ContainerResource(m) => m,
            _ => continue,
        };
        if entry.container.is_empty() {
            warn!(
                name = %spec.name,
                namespace = %spec.namespace,
                index,
                "container resource metric without a container name"
            );
            outcome
                .anomalies
                .push(Anomaly::ContainerResourceMissingContainer { index });
            continue;
        }
        if entry.container != container_name
            || entry.resource != resource
            || entry.target.average_utilization.is_none()
        {
            continue;
        }
        entry.target.average_utilization = Some(target_value);
        outcome.container_metrics_updated += 1;
    }

    let prefix_key = match resource {
        ResourceKind::Cpu => CPU_EXTERNAL_METRIC_PREFIX_ANNOTATION,
        ResourceKind::Memory => MEMORY_EXTERNAL_METRIC_PREFIX_ANNOTATION,
        other => return Err(ReconcileError::UnsupportedResourceKind(other)),
    };
    // Missing annotation means an empty prefix; the external pass then
    // matches only metrics named exactly like the container.
    let prefix = spec
        .annotations
        .get(prefix_key)
        .map(String::as_str)
        .unwrap_or("");
    let external_metric_name = format!("{}{}", prefix, container_name);

    for (index, metric) in spec.metrics.iter_mut().enumerate() {
        let entry = match metric {
            MetricSource::External(m) => m,
            _ => continue,
        };
        if entry.name.is_empty() {
            warn!(
                name = %spec.name,
                namespace = %spec.namespace,
                index,
                "external metric without a name"
            );
            outcome.anomalies.push(Anomaly::ExternalMissingName { index });
            continue;
        }
        if entry.name != external_metric_name {
            continue;
        }
        entry.target.value = Some(i64::from(target_value));
        outcome.external_metrics_updated += 1;
    }

    Ok(outcome)
}

/// Apply a full recommendation set to `spec` as of `now`.
///
/// Every per-container utilization entry is fanned out via
/// [`apply_target`]; the replica bounds are resolved from their
/// recommendation windows. The first error aborts the call. Mutations
/// already applied to `spec` are not rolled back; the caller must not
/// persist the specification when an error is returned.
pub fn update_from_recommendations(
    spec: &mut TargetSpec,
    recommendations: &Recommendations,
    now: DateTime<Utc>,
) -> Result<SyncReport, ReconcileError> {
    let mut report = SyncReport::default();

    for recommendation in &recommendations.target_utilizations {
        for (resource, value) in &recommendation.target_utilization {
            let outcome =
                apply_target(spec, &recommendation.container_name, *resource, *value)?;
            report.container_metrics_updated += outcome.container_metrics_updated;
            report.external_metrics_updated += outcome.external_metrics_updated;
            report.anomalies.extend(outcome.anomalies);
        }
    }

    let min = select_value(&recommendations.min_replicas, now)?;
    let max = select_value(&recommendations.max_replicas, now)?;
    spec.min_replicas = Some(min);
    spec.max_replicas = max;
    report.min_replicas = min;
    report.max_replicas = max;

    Ok(report)
}
