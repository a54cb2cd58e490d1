#![forbid(unsafe_code)]
//! admitq-engine library.
//!
//! Time-decay rank formulas and the concurrency-safe two-lane ranked queue.
//!
//! # Conventions
//!
//! - **Errors**: typed [`admitq_core::QueueError`] values; absence is a
//!   sentinel (`None` / `false`), never an error.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod queue;
pub mod rank;

pub use queue::RankedQueue;
