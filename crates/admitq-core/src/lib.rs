#![forbid(unsafe_code)]
//! admitq-core library.
//!
//! Work-item model, classification, clock utilities, and the error taxonomy
//! shared by the admitq workspace.
//!
//! # Conventions
//!
//! - **Errors**: typed `QueueError` values with machine-readable codes.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod clock;
pub mod error;
pub mod item;

pub use error::{ErrorCode, QueueError};
pub use item::{ItemClass, WorkItem};
