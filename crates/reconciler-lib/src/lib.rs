//! Core library for the HPA recommendation reconciler
//!
//! This crate provides the core functionality for:
//! - Selecting the replica recommendation valid at a given instant
//! - Synchronizing utilization targets across container-resource and
//!   external metric entries of an autoscaler specification
//! - Bracketing the update with a pluggable fetch/persist store
//! - Prometheus metrics for reconciliation outcomes

pub mod annotations;
pub mod error;
pub mod models;
pub mod observability;
pub mod store;
pub mod sync;
pub mod window;

pub use error::ReconcileError;
pub use models::*;
pub use observability::ReconcilerMetrics;
pub use store::{ReconcileClient, TargetStore};
pub use sync::{apply_target, update_from_recommendations, Anomaly, SyncOutcome, SyncReport};
pub use window::select_value;
