//! CLI command implementations

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tabled::{settings::Style, Table, Tabled};

use reconciler_lib::{
    update_from_recommendations, MetricSource, ReconcileClient, Recommendations, SyncReport,
    TargetSpec,
};

use crate::output::{print_success, print_warning, OutputFormat};
use crate::store::FileStore;

/// Row for the metric entry table
#[derive(Tabled)]
struct MetricRow {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Container")]
    container: String,
    #[tabled(rename = "Resource / Name")]
    identity: String,
    #[tabled(rename = "Utilization")]
    utilization: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn metric_rows(spec: &TargetSpec) -> Vec<MetricRow> {
    spec.metrics
        .iter()
        .map(|metric| match metric {
            MetricSource::ContainerResource(m) => MetricRow {
                kind: "container_resource".to_string(),
                container: m.container.clone(),
                identity: m.resource.to_string(),
                utilization: format_option(m.target.average_utilization),
                value: format_option(m.target.value),
            },
            MetricSource::Resource(m) => MetricRow {
                kind: "resource".to_string(),
                container: "-".to_string(),
                identity: m.resource.to_string(),
                utilization: format_option(m.target.average_utilization),
                value: format_option(m.target.value),
            },
            MetricSource::External(m) => MetricRow {
                kind: "external".to_string(),
                container: "-".to_string(),
                identity: m.name.clone(),
                utilization: format_option(m.target.average_utilization),
                value: format_option(m.target.value),
            },
        })
        .collect()
}

fn format_option<T: std::fmt::Display>(value: Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_string(),
    }
}

fn print_spec(spec: &TargetSpec, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(spec)?);
        }
        OutputFormat::Table => {
            let table = Table::new(metric_rows(spec))
                .with(Style::rounded())
                .to_string();
            println!("{}", table);
            println!(
                "\nReplicas: min={} max={}",
                format_option(spec.min_replicas),
                spec.max_replicas
            );
        }
    }
    Ok(())
}

fn print_applied(spec: &TargetSpec, report: &SyncReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rendered = serde_json::json!({ "spec": spec, "report": report });
            println!("{}", serde_json::to_string_pretty(&rendered)?);
        }
        OutputFormat::Table => {
            print_spec(spec, format)?;
            println!(
                "Updated entries: {} container-resource, {} external",
                report.container_metrics_updated, report.external_metrics_updated
            );
            for anomaly in &report.anomalies {
                print_warning(&format!("skipped malformed metric entry: {:?}", anomaly));
            }
        }
    }
    Ok(())
}

async fn load_recommendations(path: &Path) -> Result<Recommendations> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read recommendation set from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("parse recommendation set in {}", path.display()))
}

/// Apply a recommendation set to a stored target specification
pub async fn apply(
    store_dir: &Path,
    namespace: &str,
    name: &str,
    recommendations_path: &Path,
    now: DateTime<Utc>,
    dry_run: bool,
    format: OutputFormat,
) -> Result<()> {
    let recommendations = load_recommendations(recommendations_path).await?;
    let store = Arc::new(FileStore::new(store_dir));
    let client = ReconcileClient::new(store);

    if dry_run {
        let mut spec = client.get_target(namespace, name).await?;
        let report = update_from_recommendations(&mut spec, &recommendations, now)?;
        print_applied(&spec, &report, format)?;
        print_warning("Dry run: nothing persisted");
        return Ok(());
    }

    let (spec, report) = client
        .update_target(namespace, name, &recommendations, now)
        .await?;
    print_applied(&spec, &report, format)?;
    print_success(&format!("Updated {}/{}", namespace, name));
    Ok(())
}

/// Show the metric entries of a stored target specification
pub async fn inspect(
    store_dir: &Path,
    namespace: &str,
    name: &str,
    format: OutputFormat,
) -> Result<()> {
    let store = Arc::new(FileStore::new(store_dir));
    let client = ReconcileClient::new(store);
    let spec = client.get_target(namespace, name).await?;
    print_spec(&spec, format)
}
