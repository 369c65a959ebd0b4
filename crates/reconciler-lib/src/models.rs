//! Core data models for the reconciler

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource kinds a metric entry can refer to
///
/// Only `Cpu` and `Memory` are supported for synchronization; the other
/// kinds can still appear in a target specification fetched from the store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ResourceKind {
    #[serde(rename = "cpu")]
    Cpu,
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "storage")]
    Storage,
    #[serde(rename = "ephemeral-storage")]
    EphemeralStorage,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Cpu => "cpu",
            ResourceKind::Memory => "memory",
            ResourceKind::Storage => "storage",
            ResourceKind::EphemeralStorage => "ephemeral-storage",
        };
        f.write_str(name)
    }
}

/// A recommended replica count valid inside a half-open time range
///
/// `from` is inclusive, `to` is exclusive. Sequences of windows for one
/// dimension are expected to be non-overlapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicasRecommendation {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub value: i32,
}

/// Per-container utilization targets keyed by resource kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationRecommendation {
    pub container_name: String,
    pub target_utilization: BTreeMap<ResourceKind, i32>,
}

/// Full recommendation set consumed by the orchestration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    #[serde(default)]
    pub target_utilizations: Vec<UtilizationRecommendation>,
    #[serde(default)]
    pub min_replicas: Vec<ReplicasRecommendation>,
    #[serde(default)]
    pub max_replicas: Vec<ReplicasRecommendation>,
}

/// Target value carried by a metric source
///
/// `average_utilization` is a percentage, `value` a raw quantity. Either
/// field may be absent on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricTarget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_utilization: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
}

/// Metric tied to a specific container and resource kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerResourceMetricSource {
    pub container: String,
    pub resource: ResourceKind,
    #[serde(default)]
    pub target: MetricTarget,
}

/// Pod-wide resource metric, not scoped to a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetricSource {
    pub resource: ResourceKind,
    #[serde(default)]
    pub target: MetricTarget,
}

/// Metric identified by name, sourced outside the workload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMetricSource {
    pub name: String,
    #[serde(default)]
    pub target: MetricTarget,
}

/// One entry describing how the autoscaler measures load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetricSource {
    ContainerResource(ContainerResourceMetricSource),
    Resource(ResourceMetricSource),
    External(ExternalMetricSource),
}

/// The autoscaler specification being reconciled
///
/// Owned by the caller; the core mutates `metrics` and the replica bounds
/// in place and never adds or removes entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSpec {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,
    #[serde(default)]
    pub min_replicas: Option<i32>,
    pub max_replicas: i32,
    #[serde(default)]
    pub metrics: Vec<MetricSource>,
}
