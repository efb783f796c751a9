//! Step sources: where the control loop gets the current plan steps.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{Step, StepInfo};

/// Supplies the plan's current steps, once per cycle.
pub trait StepSource {
    type Item: Step + Send + Sync;

    /// Short label for logs and spans.
    fn name(&self) -> &str;

    /// Snapshot of every step, in any status.
    fn steps(&self) -> impl Future<Output = Result<Vec<Self::Item>>> + Send;
}

/// Top-level TOML wrapper.
#[derive(Debug, Deserialize)]
struct PlanDoc {
    #[serde(default, rename = "step")]
    steps: Vec<StepInfo>,
}

/// A TOML plan file, re-read on every cycle.
///
/// ```toml
/// [[step]]
/// name = "kafka-0-broker"
/// status = "pending"
/// recovery = { pod_instance = "kafka-0", recovery_type = "transient" }
/// ```
#[derive(Debug, Clone)]
pub struct PlanFile {
    path: PathBuf,
    label: String,
}

impl PlanFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self { path, label }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the plan file.
    pub async fn load(&self) -> Result<Vec<StepInfo>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_plan(&content).map_err(|reason| Error::Plan {
            path: self.label.clone(),
            reason,
        })
    }
}

impl StepSource for PlanFile {
    type Item = StepInfo;

    fn name(&self) -> &str {
        &self.label
    }

    async fn steps(&self) -> Result<Vec<StepInfo>> {
        self.load().await
    }
}

/// Parse plan TOML into steps.
pub fn parse_plan(content: &str) -> std::result::Result<Vec<StepInfo>, String> {
    let doc: PlanDoc = toml::from_str(content).map_err(|e| e.to_string())?;
    Ok(doc.steps)
}
