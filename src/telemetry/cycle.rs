//! Revive cycle span helpers.

use tracing::Span;

/// Start a span for one control loop cycle.
///
/// The `revive.outcome` field is declared empty and filled in via
/// [`record_outcome`].
pub fn start_cycle_span(cycle: u64, source: &str) -> Span {
    tracing::info_span!(
        "revive.cycle",
        "revive.cycle" = cycle,
        "revive.source" = source,
        "revive.outcome" = tracing::field::Empty,
    )
}

/// Record the cycle's outcome on its span.
pub fn record_outcome(span: &Span, outcome: &str) {
    span.record("revive.outcome", outcome);
}
