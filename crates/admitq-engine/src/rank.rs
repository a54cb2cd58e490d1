//! Time-decay rank formulas.
//!
//! Rank is a pure function of an item's class and its elapsed wait in whole
//! seconds. It is evaluated fresh whenever ordering is needed and never
//! cached: a queue that looks one way now may look different a second later,
//! which is inherent to continuously time-decayed priority.

use admitq_core::{ItemClass, WorkItem};
use chrono::{DateTime, Utc};

/// Minimum rank for `Priority` items.
pub const PRIORITY_FLOOR: f64 = 3.0;
/// Minimum rank for `Vip` items.
pub const VIP_FLOOR: f64 = 4.0;
/// `Vip` items accrue rank at twice the `Priority` rate.
pub const VIP_SCALE: f64 = 2.0;

/// Rank for a class after `waited_secs` whole seconds in the queue.
///
/// Higher rank dequeues sooner. Formulas:
///
/// - `ManagementOverride`, `Normal`: `t`
/// - `Priority`: `max(3, t·ln t)`
/// - `Vip`: `max(4, 2·t·ln t)`
///
/// For `t <= 1` the log term is non-positive (undefined at `t = 0`), so the
/// floored classes return their floor directly. The result is always finite
/// and never NaN.
#[must_use]
pub fn rank(class: ItemClass, waited_secs: i64) -> f64 {
    #[allow(clippy::cast_precision_loss)] // queue waits never approach 2^52 seconds
    let t = waited_secs.max(0) as f64;

    match class {
        ItemClass::ManagementOverride | ItemClass::Normal => t,
        ItemClass::Priority => decayed(t, PRIORITY_FLOOR, 1.0),
        ItemClass::Vip => decayed(t, VIP_FLOOR, VIP_SCALE),
    }
}

/// Rank of an item as of `reference`.
#[must_use]
pub fn rank_at(item: &WorkItem, reference: DateTime<Utc>) -> f64 {
    rank(item.class(), item.waited_secs(reference))
}

fn decayed(t: f64, floor: f64, scale: f64) -> f64 {
    // ln is non-positive on (0, 1] and undefined at 0; the floor covers the
    // whole region without evaluating it.
    if t <= 1.0 {
        floor
    } else {
        (scale * t * t.ln()).max(floor)
    }
}

#[cfg(test)]
mod tests {
    use super::{PRIORITY_FLOOR, VIP_FLOOR, rank};
    use admitq_core::ItemClass;

    #[test]
    fn linear_classes_rank_by_elapsed_seconds() {
        assert!((rank(ItemClass::Normal, 0) - 0.0).abs() < f64::EPSILON);
        assert!((rank(ItemClass::Normal, 42) - 42.0).abs() < f64::EPSILON);
        assert!((rank(ItemClass::ManagementOverride, 42) - 42.0).abs() < f64::EPSILON);
    }

    #[test]
    fn floors_apply_at_and_below_one_second() {
        for t in [0, 1] {
            assert!((rank(ItemClass::Priority, t) - PRIORITY_FLOOR).abs() < f64::EPSILON);
            assert!((rank(ItemClass::Vip, t) - VIP_FLOOR).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn floors_hold_until_the_log_term_overtakes() {
        // 2·ln 2 ≈ 1.39 < 3, so the floor still wins at t = 2.
        assert!((rank(ItemClass::Priority, 2) - PRIORITY_FLOOR).abs() < f64::EPSILON);
        // 3·ln 3 ≈ 3.30 > 3.
        assert!(rank(ItemClass::Priority, 3) > PRIORITY_FLOOR);
        // 2·2·ln 2 ≈ 2.77 < 4 at t = 2; 2·3·ln 3 ≈ 6.59 > 4 at t = 3.
        assert!((rank(ItemClass::Vip, 2) - VIP_FLOOR).abs() < f64::EPSILON);
        assert!(rank(ItemClass::Vip, 3) > VIP_FLOOR);
    }

    #[test]
    fn vip_outranks_priority_outranks_normal_at_equal_wait() {
        for t in [10, 100, 10_000] {
            let normal = rank(ItemClass::Normal, t);
            let priority = rank(ItemClass::Priority, t);
            let vip = rank(ItemClass::Vip, t);
            assert!(vip > priority, "t={t}");
            assert!(priority > normal, "t={t}");
        }
    }

    #[test]
    fn negative_elapsed_is_treated_as_zero() {
        assert!((rank(ItemClass::Normal, -5) - 0.0).abs() < f64::EPSILON);
        assert!((rank(ItemClass::Priority, -5) - PRIORITY_FLOOR).abs() < f64::EPSILON);
    }

    #[test]
    fn rank_is_always_finite() {
        for class in [
            ItemClass::Normal,
            ItemClass::Priority,
            ItemClass::Vip,
            ItemClass::ManagementOverride,
        ] {
            for t in [0, 1, 2, 1_000_000_000] {
                assert!(rank(class, t).is_finite(), "class={class} t={t}");
            }
        }
    }
}
