use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::clock;

/// The four work-item priority classes.
///
/// Classes are derived from the item id alone (see [`ItemClass::of`]) and are
/// fixed for the lifetime of the item. `ManagementOverride` items are routed
/// to a dedicated lane that precedes all others regardless of numeric rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemClass {
    Normal,
    Priority,
    Vip,
    ManagementOverride,
}

impl ItemClass {
    /// Classify an id. Pure and deterministic: the same id always yields the
    /// same class.
    ///
    /// - divisible by 3 and 5 → `ManagementOverride`
    /// - divisible by 3 only → `Priority`
    /// - divisible by 5 only → `Vip`
    /// - otherwise → `Normal`
    #[must_use]
    pub const fn of(id: i64) -> Self {
        match (id % 3 == 0, id % 5 == 0) {
            (true, true) => Self::ManagementOverride,
            (true, false) => Self::Priority,
            (false, true) => Self::Vip,
            (false, false) => Self::Normal,
        }
    }

    /// True for the class routed to the override lane.
    #[must_use]
    pub const fn is_override(self) -> bool {
        matches!(self, Self::ManagementOverride)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Priority => "priority",
            Self::Vip => "vip",
            Self::ManagementOverride => "management_override",
        }
    }
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A queued unit of work.
///
/// Immutable after construction: the id, the class derived from it, and the
/// submission timestamp never change. Priority rank is always computed from
/// elapsed time on demand, never stored on the item.
#[derive(Debug, Clone, Serialize)]
pub struct WorkItem {
    id: i64,
    class: ItemClass,
    submitted_at: DateTime<Utc>,
}

/// Deserialization re-derives the class from the id, so an encoded `class`
/// field can never contradict the classification function.
impl<'de> Deserialize<'de> for WorkItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Encoded {
            id: i64,
            submitted_at: DateTime<Utc>,
        }

        let encoded = Encoded::deserialize(deserializer)?;
        Ok(Self::new(encoded.id, encoded.submitted_at))
    }
}

impl WorkItem {
    /// Build an item, deriving its class from `id`.
    ///
    /// Construction performs no clock reads; validation against the current
    /// time is the queue service's concern.
    #[must_use]
    pub fn new(id: i64, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id,
            class: ItemClass::of(id),
            submitted_at,
        }
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub const fn class(&self) -> ItemClass {
        self.class
    }

    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Whole seconds this item has waited as of `reference`, clamped to zero;
    /// never negative, even for a reference earlier than the submission time.
    #[must_use]
    pub fn waited_secs(&self, reference: DateTime<Utc>) -> i64 {
        clock::elapsed_secs(self.submitted_at, reference)
    }

    /// Whole seconds waited as of the current wall clock.
    #[must_use]
    pub fn waited_secs_now(&self) -> i64 {
        self.waited_secs(clock::wall_clock_now())
    }
}

/// Item identity is the id alone; class and timestamp do not participate.
impl PartialEq for WorkItem {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WorkItem {}

impl Hash for WorkItem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
