//! Typed errors for the reconciliation core

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::ResourceKind;

/// Errors surfaced by the reconciliation core
///
/// Both variants abort the current orchestration call. Retrying is the
/// caller's decision; the core performs none.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// No recommendation window covers the query instant. Indicates a
    /// coverage gap in the recommendation data (clock skew, missing slot
    /// generation, or recommendations not yet computed).
    #[error("no recommendation window covers {at}")]
    NoActiveWindow { at: DateTime<Utc> },

    /// A resource kind outside {cpu, memory} was requested.
    #[error("unsupported resource kind: {0}")]
    UnsupportedResourceKind(ResourceKind),
}

impl ReconcileError {
    /// Stable label for metrics and log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ReconcileError::NoActiveWindow { .. } => "no_active_window",
            ReconcileError::UnsupportedResourceKind(_) => "unsupported_resource_kind",
        }
    }
}
