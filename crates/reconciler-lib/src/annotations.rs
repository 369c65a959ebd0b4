//! Annotation keys and naming conventions shared with the metrics adapter

/// Annotation holding the name prefix for CPU-derived external metrics
pub const CPU_EXTERNAL_METRIC_PREFIX_ANNOTATION: &str =
    "hpa.reconciler.dev/cpu-external-metric-prefix";

/// Annotation holding the name prefix for memory-derived external metrics
pub const MEMORY_EXTERNAL_METRIC_PREFIX_ANNOTATION: &str =
    "hpa.reconciler.dev/memory-external-metric-prefix";

/// Name prefix for HPAs this system manages on behalf of an owner object
pub const MANAGED_HPA_NAME_PREFIX: &str = "reconciler-hpa-";

/// Deterministic name of the managed HPA for an owner object
pub fn managed_hpa_name(owner_name: &str) -> String {
    format!("{}{}", MANAGED_HPA_NAME_PREFIX, owner_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_managed_hpa_name() {
        assert_eq!(managed_hpa_name("payments"), "reconciler-hpa-payments");
    }
}
