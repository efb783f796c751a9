//! # offer-revive
//!
//! Rate-limited offer revival for offer-based cluster schedulers.
//!
//! A scheduler with nothing to do declines offers for a very long time. When
//! new work appears it has to ask for offers again. [`revive::ReviveManager`]
//! decides when: it tracks which pending work has already been revived for,
//! and revives only when new work appears and the rate limiter allows.

pub mod candidates;
pub mod config;
pub mod driver;
pub mod engine;
pub mod error;
pub mod limiter;
pub mod model;
pub mod revive;
pub mod telemetry;
