//! Decides whether offers should be revived based on changes to pending work.
//!
//! Instead of suppressing offers when all work is done, the scheduler declines
//! every offer with a very long refusal. When *new* work shows up, offers that
//! were declined may be useful to it, so offers are revived. Revives are
//! throttled by a [`RateLimiter`].
//!
//! The committed baseline has always had revive called for it at least once
//! (the empty startup baseline counts as revived). A snapshot only becomes
//! the baseline after a successful revive, so throttled work is seen as new
//! again on the next cycle rather than absorbed silently. This must work:
//!
//! ```text
//! kafka-0-broker fails    @ 10:30  new work, revive
//! kafka-0-broker recovers @ 10:35  gone from baseline
//! kafka-0-broker fails    @ 11:00  new work again, revive
//! ```

use tracing::{info, warn};

use crate::candidates::{self, CandidateSet};
use crate::driver::SchedulerDriver;
use crate::error::Result;
use crate::limiter::RateLimiter;
use crate::model::Step;
use crate::telemetry::metrics;

/// What one revive cycle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviveOutcome {
    /// Nothing new since the last revive.
    NoChange,
    /// New work found and offers revived.
    Revived,
    /// New work found but the limiter said no. Retried next cycle.
    Throttled,
}

impl ReviveOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ReviveOutcome::NoChange => "no_change",
            ReviveOutcome::Revived => "revived",
            ReviveOutcome::Throttled => "throttled",
        }
    }
}

impl std::fmt::Display for ReviveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the manager owes a revive from an earlier cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    /// New work was seen but not yet revived for.
    PendingRetry,
}

/// Tracks the revived baseline and gates revive calls.
///
/// Not safe to drive from several callers at once: a cycle reads, diffs and
/// conditionally writes the baseline. Share it behind a mutex held for the
/// whole [`revive`](Self::revive) call.
pub struct ReviveManager<D, L> {
    driver: D,
    limiter: L,
    candidates: CandidateSet,
    state: EngineState,
}

impl<D: SchedulerDriver, L: RateLimiter> ReviveManager<D, L> {
    /// Start in the freshly revived state with an empty baseline.
    pub fn new(driver: D, limiter: L) -> Self {
        Self {
            driver,
            limiter,
            candidates: CandidateSet::new(),
            state: EngineState::Idle,
        }
    }

    /// Run one cycle against the current steps.
    ///
    /// Revives at most once. A driver error is returned as is and leaves
    /// the baseline uncommitted.
    pub fn revive<'a, S, I>(&mut self, steps: I) -> Result<ReviveOutcome>
    where
        S: Step + 'a,
        I: IntoIterator<Item = &'a S>,
    {
        let current = candidates::extract(steps);
        let new = current.new_since(&self.candidates);

        info!(
            old = %self.candidates,
            current = %current,
            new = %new,
            "candidates"
        );

        if new.is_empty() {
            // `current` is a subset of the baseline here, so narrowing to it
            // only forgets work that went away.
            self.candidates = current;
            self.state = EngineState::Idle;
            return Ok(self.finish(ReviveOutcome::NoChange));
        }

        if !self.limiter.try_acquire() {
            warn!(new_count = new.len(), "revive attempt has been throttled");
            self.state = EngineState::PendingRetry;
            return Ok(self.finish(ReviveOutcome::Throttled));
        }

        info!("reviving offers");
        if let Err(e) = self.driver.revive_offers() {
            self.state = EngineState::PendingRetry;
            return Err(e);
        }
        metrics::offers_revived().add(1, &[]);

        self.candidates = current;
        self.state = EngineState::Idle;
        Ok(self.finish(ReviveOutcome::Revived))
    }

    /// The committed baseline.
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn limiter(&self) -> &L {
        &self.limiter
    }

    fn finish(&self, outcome: ReviveOutcome) -> ReviveOutcome {
        metrics::revive_cycles().add(
            1,
            &[opentelemetry::KeyValue::new("outcome", outcome.as_str())],
        );
        if outcome == ReviveOutcome::Throttled {
            metrics::revives_throttled().add(1, &[]);
        }
        outcome
    }
}
