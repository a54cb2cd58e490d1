//! Two-lane ranked queue service.
//!
//! Items live in one of two lanes: an override lane holding only
//! `ManagementOverride` items and a general lane holding everything else.
//! Every externally observed ordering places the whole override lane ahead of
//! the whole general lane, irrespective of numeric rank. Within a lane,
//! ordering is by descending rank with ties broken by insertion order.
//!
//! Ranks are recomputed against the wall clock at every comparison, so a
//! position observed now is a snapshot, not a stable reference: a `dequeue`
//! issued a moment after a `position` call may see a different ordering. Each
//! individual snapshot is internally consistent because all ranks within it
//! are evaluated at one captured instant.

use admitq_core::{QueueError, WorkItem, clock};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::rank::rank_at;

/// Concurrency-safe work-admission queue ordered by time-decaying rank.
///
/// Each lane is protected by its own mutex. Operations that need a combined
/// view of both lanes acquire the override lock before the general lock;
/// every call site uses that order, so no deadlock is possible.
#[derive(Debug, Default)]
pub struct RankedQueue {
    override_lane: Mutex<Vec<WorkItem>>,
    general_lane: Mutex<Vec<WorkItem>>,
}

impl RankedQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a work item.
    ///
    /// The item is classified from `id` and routed to the matching lane. It
    /// becomes visible to every other operation as soon as this call returns.
    ///
    /// # Errors
    ///
    /// - [`QueueError::FutureTimestamp`] if `submitted_at` is strictly later
    ///   than the current wall clock. Future timestamps are rejected, not
    ///   clamped.
    /// - [`QueueError::DuplicateItem`] if the id is already queued. Only the
    ///   target lane is checked: classification is deterministic per id, so an
    ///   id can never occupy the other lane.
    pub fn enqueue(&self, id: i64, submitted_at: DateTime<Utc>) -> Result<(), QueueError> {
        let now = clock::wall_clock_now();
        if clock::is_future(submitted_at, now) {
            return Err(QueueError::FutureTimestamp { submitted_at, now });
        }

        let item = WorkItem::new(id, submitted_at);
        let lane = if item.class().is_override() {
            &self.override_lane
        } else {
            &self.general_lane
        };

        // Duplicate check and insert form one critical section.
        let mut lane = lock_lane(lane);
        if lane.iter().any(|queued| queued.id() == id) {
            return Err(QueueError::DuplicateItem(id));
        }
        debug!(id, class = %item.class(), "enqueued work item");
        lane.push(item);
        Ok(())
    }

    /// Remove and return the highest-ranked item.
    ///
    /// The override lane is drained before the general lane is considered.
    /// `None` means the queue is empty, a valid terminal result rather than
    /// an error.
    pub fn dequeue(&self) -> Option<WorkItem> {
        let now = clock::wall_clock_now();

        {
            let mut lane = lock_lane(&self.override_lane);
            if let Some(item) = take_top(&mut lane, now) {
                debug!(id = item.id(), "dequeued override item");
                return Some(item);
            }
        }

        let mut lane = lock_lane(&self.general_lane);
        let item = take_top(&mut lane, now);
        if let Some(ref item) = item {
            debug!(id = item.id(), "dequeued general item");
        }
        item
    }

    /// Zero-based position of `id` in the combined ordering, or `None` if the
    /// id is not queued.
    ///
    /// Override items come first, each lane sorted by descending rank. The
    /// returned position is a snapshot: ranks decay with the clock, so it is
    /// not guaranteed to match a later `dequeue`.
    #[must_use]
    pub fn position(&self, id: i64) -> Option<usize> {
        let now = clock::wall_clock_now();
        // Fixed lock order: override before general.
        let override_lane = lock_lane(&self.override_lane);
        let general_lane = lock_lane(&self.general_lane);

        if let Some(index) = sorted_ids(&override_lane, now).iter().position(|&q| q == id) {
            return Some(index);
        }
        sorted_ids(&general_lane, now)
            .iter()
            .position(|&q| q == id)
            .map(|index| override_lane.len() + index)
    }

    /// Remove the item with `id`, reporting whether it was found.
    ///
    /// Each lane's lock is acquired, used, and released within its own block;
    /// neither branch shares release responsibility with the other.
    pub fn remove(&self, id: i64) -> bool {
        {
            let mut lane = lock_lane(&self.override_lane);
            if let Some(index) = lane.iter().position(|queued| queued.id() == id) {
                lane.remove(index);
                debug!(id, "removed override item");
                return true;
            }
        }

        {
            let mut lane = lock_lane(&self.general_lane);
            if let Some(index) = lane.iter().position(|queued| queued.id() == id) {
                lane.remove(index);
                debug!(id, "removed general item");
                return true;
            }
        }

        false
    }

    /// Ids of all queued items in combined snapshot order: override lane
    /// first, each lane by descending rank.
    #[must_use]
    pub fn ids(&self) -> Vec<i64> {
        let now = clock::wall_clock_now();
        let override_lane = lock_lane(&self.override_lane);
        let general_lane = lock_lane(&self.general_lane);

        let mut ids = sorted_ids(&override_lane, now);
        ids.extend(sorted_ids(&general_lane, now));
        ids
    }

    /// Arithmetic mean of queued items' wait times relative to `reference`,
    /// in seconds.
    ///
    /// Returns `None` when the queue is empty; the caller must treat that as
    /// an explicit "no data" outcome rather than receive a silent NaN.
    #[must_use]
    pub fn average_wait_secs(&self, reference: DateTime<Utc>) -> Option<f64> {
        let override_lane = lock_lane(&self.override_lane);
        let general_lane = lock_lane(&self.general_lane);

        let count = override_lane.len() + general_lane.len();
        if count == 0 {
            return None;
        }

        let total: i64 = override_lane
            .iter()
            .chain(general_lane.iter())
            .map(|item| item.waited_secs(reference))
            .sum();

        #[allow(clippy::cast_precision_loss)]
        let mean = total as f64 / count as f64;
        Some(mean)
    }

    /// Number of queued items across both lanes.
    #[must_use]
    pub fn len(&self) -> usize {
        let override_lane = lock_lane(&self.override_lane);
        let general_lane = lock_lane(&self.general_lane);
        override_lane.len() + general_lane.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard every queued item.
    ///
    /// Lanes are cleared one at a time; a concurrent snapshot read may
    /// observe either the pre- or post-clear state of each lane.
    pub fn clear(&self) {
        {
            let mut lane = lock_lane(&self.override_lane);
            lane.clear();
        }
        {
            let mut lane = lock_lane(&self.general_lane);
            lane.clear();
        }
        debug!("cleared all lanes");
    }
}

/// Lock a lane, recovering from poisoning. Lane contents are plain data and
/// remain valid even if a holder panicked mid-operation.
fn lock_lane(lane: &Mutex<Vec<WorkItem>>) -> MutexGuard<'_, Vec<WorkItem>> {
    lane.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Remove and return the highest-ranked item, evaluating every rank at `now`.
///
/// Among equal ranks the earliest-inserted item wins, matching the tie-break
/// of the stable sort in [`sorted_ids`]. `Vec::remove` keeps the insertion
/// order of the remaining items intact.
fn take_top(lane: &mut Vec<WorkItem>, now: DateTime<Utc>) -> Option<WorkItem> {
    let mut top: Option<(usize, f64)> = None;
    for (index, item) in lane.iter().enumerate() {
        let rank = rank_at(item, now);
        if top.is_none_or(|(_, best)| rank > best) {
            top = Some((index, rank));
        }
    }
    top.map(|(index, _)| lane.remove(index))
}

/// Lane ids sorted by descending rank at `now`. The sort is stable, so equal
/// ranks keep their insertion order.
fn sorted_ids(lane: &[WorkItem], now: DateTime<Utc>) -> Vec<i64> {
    let mut ranked: Vec<(f64, i64)> = lane
        .iter()
        .map(|item| (rank_at(item, now), item.id()))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().map(|(_, id)| id).collect()
}
