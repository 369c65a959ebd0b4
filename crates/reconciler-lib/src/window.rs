//! Window selection over time-ranged replica recommendations

use chrono::{DateTime, Utc};

use crate::error::ReconcileError;
use crate::models::ReplicasRecommendation;

/// Return the value of the first window containing `now`.
///
/// Windows are scanned in the order given; no sorting is imposed or
/// assumed. A window contains `now` when `now >= from && now < to`
/// (`from` inclusive, `to` exclusive).
pub fn select_value(
    windows: &[ReplicasRecommendation],
    now: DateTime<Utc>,
) -> Result<i32, ReconcileError> {
    for window in windows {
        if now >= window.from && now < window.to {
            return Ok(window.value);
        }
    }
    Err(ReconcileError::NoActiveWindow { at: now })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn window(from_secs: i64, to_secs: i64, value: i32) -> ReplicasRecommendation {
        ReplicasRecommendation {
            from: Utc.timestamp_opt(from_secs, 0).unwrap(),
            to: Utc.timestamp_opt(to_secs, 0).unwrap(),
            value,
        }
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_covered_instant_returns_window_value() {
        let windows = vec![window(0, 10, 2), window(10, 20, 5)];
        assert_eq!(select_value(&windows, at(12)).unwrap(), 5);
        assert_eq!(select_value(&windows, at(3)).unwrap(), 2);
    }

    #[test]
    fn test_uncovered_instant_is_no_active_window() {
        let windows = vec![window(0, 10, 2), window(10, 20, 5)];
        let err = select_value(&windows, at(25)).unwrap_err();
        assert!(matches!(err, ReconcileError::NoActiveWindow { .. }));
    }

    #[test]
    fn test_range_is_half_open() {
        let windows = vec![window(0, 10, 2), window(10, 20, 5)];
        // `from` inclusive
        assert_eq!(select_value(&windows, at(10)).unwrap(), 5);
        // `to` of the last window exclusive
        assert!(select_value(&windows, at(20)).is_err());
    }

    #[test]
    fn test_empty_set_is_no_active_window() {
        let err = select_value(&[], at(0)).unwrap_err();
        assert!(matches!(err, ReconcileError::NoActiveWindow { .. }));
    }

    #[test]
    fn test_first_match_wins_in_given_order() {
        // Overlap is the caller's data problem; selection stays linear.
        let windows = vec![window(0, 30, 7), window(10, 20, 5)];
        assert_eq!(select_value(&windows, at(12)).unwrap(), 7);
    }

    #[test]
    fn test_order_is_not_assumed_sorted() {
        let windows = vec![window(20, 30, 9), window(0, 10, 2)];
        assert_eq!(select_value(&windows, at(5)).unwrap(), 2);
    }
}
