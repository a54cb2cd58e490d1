use chrono::{DateTime, Utc};
use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    FutureTimestamp,
    DuplicateItem,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FutureTimestamp => "E1001",
            Self::DuplicateItem => "E1002",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::FutureTimestamp => "Submission time is in the future",
            Self::DuplicateItem => "Item already queued",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::FutureTimestamp => {
                Some("Submit with the current or a past UTC timestamp; future times are rejected, not clamped.")
            }
            Self::DuplicateItem => Some("Dequeue or remove the existing item before re-submitting its id."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures surfaced by queue operations.
///
/// Absence results are not errors: an empty dequeue, a `None` position, and a
/// `false` remove are valid terminal outcomes signalled through the return
/// type, not through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// The submission timestamp is strictly later than the wall clock at
    /// admission time.
    #[error("submission time {submitted_at} is later than current time {now}")]
    FutureTimestamp {
        submitted_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    /// An item with this id is already queued and has not been dequeued or
    /// removed.
    #[error("item {0} is already queued")]
    DuplicateItem(i64),
}

impl QueueError {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::FutureTimestamp { .. } => ErrorCode::FutureTimestamp,
            Self::DuplicateItem(_) => ErrorCode::DuplicateItem,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}
