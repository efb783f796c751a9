//! The scheduler driver seam.
//!
//! Talking to the resource manager is someone else's job. The revive manager
//! only needs a way to say "send me offers again".

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

use crate::error::Result;

/// The resource-manager client, reduced to the one call revival needs.
pub trait SchedulerDriver {
    /// Ask the resource manager to resume sending offers.
    ///
    /// Must be safe to call repeatedly. Errors are returned to the revive
    /// manager's caller untouched.
    fn revive_offers(&self) -> Result<()>;
}

impl<D: SchedulerDriver + ?Sized> SchedulerDriver for &D {
    fn revive_offers(&self) -> Result<()> {
        (**self).revive_offers()
    }
}

impl<D: SchedulerDriver + ?Sized> SchedulerDriver for std::sync::Arc<D> {
    fn revive_offers(&self) -> Result<()> {
        (**self).revive_offers()
    }
}

/// Driver that logs each revive instead of contacting a resource manager.
///
/// Used for dry runs of the control loop against a plan file.
#[derive(Debug, Default)]
pub struct LogDriver {
    revives: AtomicU64,
}

impl LogDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of revive calls seen so far.
    pub fn revives(&self) -> u64 {
        self.revives.load(Ordering::Relaxed)
    }
}

impl SchedulerDriver for LogDriver {
    fn revive_offers(&self) -> Result<()> {
        let n = self.revives.fetch_add(1, Ordering::Relaxed) + 1;
        info!(revive_count = n, "dry run: revive offers");
        Ok(())
    }
}
