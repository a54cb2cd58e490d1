//! Wall-clock access and elapsed-time arithmetic.
//!
//! Only rank and wait-time computation read the clock; model construction and
//! equality never do. All arithmetic is in whole seconds, matching the
//! granularity of the rank formulas.

use chrono::{DateTime, Utc};

/// Current wall-clock time in UTC.
#[must_use]
pub fn wall_clock_now() -> DateTime<Utc> {
    Utc::now()
}

/// Whole seconds elapsed from `since` to `reference`, clamped to zero.
///
/// A reference earlier than `since` (clock skew, caller-supplied reference
/// times) yields 0, never a negative duration.
#[must_use]
pub fn elapsed_secs(since: DateTime<Utc>, reference: DateTime<Utc>) -> i64 {
    (reference - since).num_seconds().max(0)
}

/// True when `ts` is strictly later than `now`.
///
/// Used by admission to reject future submission timestamps; equality with
/// the current instant is allowed.
#[must_use]
pub fn is_future(ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    ts > now
}

#[cfg(test)]
mod tests {
    use super::{elapsed_secs, is_future, wall_clock_now};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn elapsed_counts_whole_seconds() {
        let t0 = Utc.with_ymd_and_hms(2017, 7, 28, 12, 0, 0).single().expect("valid ts");
        let t1 = Utc.with_ymd_and_hms(2017, 7, 28, 12, 0, 20).single().expect("valid ts");
        assert_eq!(elapsed_secs(t0, t1), 20);
        assert_eq!(elapsed_secs(t0, t0), 0);
    }

    #[test]
    fn elapsed_clamps_reversed_order() {
        let t0 = Utc.with_ymd_and_hms(2017, 7, 28, 12, 0, 0).single().expect("valid ts");
        let t1 = Utc.with_ymd_and_hms(2017, 7, 28, 12, 0, 20).single().expect("valid ts");
        assert_eq!(elapsed_secs(t1, t0), 0);
    }

    #[test]
    fn future_detection_is_strict() {
        let now = wall_clock_now();
        assert!(!is_future(now, now));
        assert!(is_future(now + Duration::seconds(1), now));
        assert!(!is_future(now - Duration::seconds(1), now));
    }
}
