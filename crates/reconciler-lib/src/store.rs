//! Target store collaborator and the client bracketing the core
//!
//! The core itself performs no I/O; fetching and persisting the target
//! specification is a capability plugged in through [`TargetStore`].

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::{Recommendations, TargetSpec};
use crate::observability::ReconcilerMetrics;
use crate::sync::{update_from_recommendations, SyncReport};

/// Get/update capability for target specifications
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Fetch the target specification by identity
    async fn fetch(&self, namespace: &str, name: &str) -> Result<TargetSpec>;

    /// Persist a mutated target specification
    async fn persist(&self, spec: &TargetSpec) -> Result<()>;
}

/// Applies recommendation sets to stored target specifications
pub struct ReconcileClient {
    store: Arc<dyn TargetStore>,
    metrics: ReconcilerMetrics,
}

impl ReconcileClient {
    pub fn new(store: Arc<dyn TargetStore>) -> Self {
        Self {
            store,
            metrics: ReconcilerMetrics::new(),
        }
    }

    /// Fetch the target specification without modifying it
    pub async fn get_target(&self, namespace: &str, name: &str) -> Result<TargetSpec> {
        self.store
            .fetch(namespace, name)
            .await
            .with_context(|| format!("get target {}/{}", namespace, name))
    }

    /// Fetch the target, apply the recommendation set as of `now`, and
    /// persist the result.
    ///
    /// Nothing is persisted when any step fails; store failures are
    /// passed through wrapped with the operation and target identity.
    pub async fn update_target(
        &self,
        namespace: &str,
        name: &str,
        recommendations: &Recommendations,
        now: DateTime<Utc>,
    ) -> Result<(TargetSpec, SyncReport)> {
        let mut spec = self
            .store
            .fetch(namespace, name)
            .await
            .with_context(|| format!("get target {}/{}", namespace, name))?;

        let report = match update_from_recommendations(&mut spec, recommendations, now) {
            Ok(report) => report,
            Err(e) => {
                self.metrics.inc_reconcile_errors(e.kind());
                return Err(e.into());
            }
        };

        self.store
            .persist(&spec)
            .await
            .with_context(|| format!("update target {}/{}", namespace, name))?;

        self.metrics.observe_report(&report);
        info!(
            namespace = %namespace,
            name = %name,
            container_metrics_updated = report.container_metrics_updated,
            external_metrics_updated = report.external_metrics_updated,
            anomalies = report.anomalies.len(),
            min_replicas = report.min_replicas,
            max_replicas = report.max_replicas,
            "Applied recommendation set"
        );

        Ok((spec, report))
    }
}
