//! Control loop: poll the step source, run revive cycles until shutdown.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify};
use tokio::time::MissedTickBehavior;
use tracing::{Instrument, error, info};

use super::source::StepSource;
use crate::driver::SchedulerDriver;
use crate::error::Result;
use crate::limiter::RateLimiter;
use crate::revive::{ReviveManager, ReviveOutcome};
use crate::telemetry::cycle::{record_outcome, start_cycle_span};
use crate::telemetry::metrics;

/// Configuration for the control loop.
#[derive(Debug, Clone)]
pub struct ControlConfig {
    /// Time between revive cycles.
    pub poll_interval: Duration,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Drives a [`ReviveManager`] once per tick.
///
/// The manager sits behind a mutex held for a whole cycle, so clones of the
/// control plane may inspect it or run cycles without racing the loop.
pub struct ControlPlane<S, D, L> {
    source: Arc<S>,
    manager: Arc<Mutex<ReviveManager<D, L>>>,
    config: ControlConfig,
    shutdown: Arc<Notify>,
    cycles: Arc<AtomicU64>,
}

impl<S, D, L> Clone for ControlPlane<S, D, L> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            manager: Arc::clone(&self.manager),
            config: self.config.clone(),
            shutdown: Arc::clone(&self.shutdown),
            cycles: Arc::clone(&self.cycles),
        }
    }
}

impl<S, D, L> ControlPlane<S, D, L>
where
    S: StepSource + Send + Sync,
    D: SchedulerDriver + Send,
    L: RateLimiter + Send,
{
    pub fn new(source: S, manager: ReviveManager<D, L>, config: ControlConfig) -> Self {
        Self {
            source: Arc::new(source),
            manager: Arc::new(Mutex::new(manager)),
            config,
            shutdown: Arc::new(Notify::new()),
            cycles: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Signal the loop to stop after the current cycle.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }

    /// The shared revive manager.
    pub fn manager(&self) -> &Arc<Mutex<ReviveManager<D, L>>> {
        &self.manager
    }

    /// Cycles run so far, including failed ones.
    pub fn cycles(&self) -> u64 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Run the loop until shutdown. The first cycle runs immediately.
    ///
    /// Cycle errors are logged and the loop keeps going; the next cycle
    /// recomputes everything from scratch.
    pub async fn run(&self) -> Result<()> {
        let mut ticker = tokio::time::interval(self.config.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            source = self.source.name(),
            poll_interval_ms = self.config.poll_interval.as_millis() as u64,
            "revive control loop started"
        );

        loop {
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("revive control loop shutting down");
                    return Ok(());
                }
                _ = ticker.tick() => {}
            }

            if let Err(e) = self.run_cycle().await {
                error!("revive cycle error: {e}");
            }
        }
    }

    /// Fetch the current steps and run one revive cycle.
    pub async fn run_cycle(&self) -> Result<ReviveOutcome> {
        let cycle = self.cycles.fetch_add(1, Ordering::Relaxed) + 1;
        let span = start_cycle_span(cycle, self.source.name());

        async {
            let steps = match self.source.steps().await {
                Ok(steps) => steps,
                Err(e) => {
                    metrics::cycle_errors()
                        .add(1, &[opentelemetry::KeyValue::new("stage", "source")]);
                    return Err(e);
                }
            };

            let result = self.manager.lock().await.revive(&steps);
            match result {
                Ok(outcome) => {
                    record_outcome(&span, outcome.as_str());
                    Ok(outcome)
                }
                Err(e) => {
                    record_outcome(&span, "error");
                    metrics::cycle_errors()
                        .add(1, &[opentelemetry::KeyValue::new("stage", "revive")]);
                    Err(e)
                }
            }
        }
        .instrument(span.clone())
        .await
    }
}
