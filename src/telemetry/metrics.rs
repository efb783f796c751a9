//! Metric instrument factories for offer-revive.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! All instruments are created lazily from the `"offer-revive"` meter.

use opentelemetry::metrics::{Counter, Meter};

/// Returns the shared meter for offer-revive instruments.
fn meter() -> Meter {
    opentelemetry::global::meter("offer-revive")
}

/// Counter: revive cycles evaluated.
/// Labels: `outcome` ("no_change" | "revived" | "throttled").
pub fn revive_cycles() -> Counter<u64> {
    meter()
        .u64_counter("revive.cycles")
        .with_description("Number of revive cycles evaluated")
        .build()
}

/// Counter: successful revive calls to the scheduler driver.
pub fn offers_revived() -> Counter<u64> {
    meter()
        .u64_counter("revive.offers_revived")
        .with_description("Number of times offers were revived")
        .build()
}

/// Counter: revive attempts denied by the rate limiter.
pub fn revives_throttled() -> Counter<u64> {
    meter()
        .u64_counter("revive.throttled")
        .with_description("Revive attempts deferred by the rate limiter")
        .build()
}

/// Counter: control loop cycles that failed (step source or driver error).
/// Labels: `stage` ("source" | "revive").
pub fn cycle_errors() -> Counter<u64> {
    meter()
        .u64_counter("revive.cycle_errors")
        .with_description("Control loop cycles that ended in an error")
        .build()
}
