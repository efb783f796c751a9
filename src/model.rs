//! Core data model.
//!
//! A step is a unit of plan work reported by the scheduler's plan tracker.
//! A work item is the revival-relevant identity of a step: its name, status
//! and recovery hint, nothing else.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a plan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Blocked on an external condition.
    Waiting,
    /// Ready to be offered resources.
    Pending,
    /// Offers evaluated, awaiting launch.
    Prepared,
    /// Tasks launched, not yet running.
    Starting,
    /// Tasks running.
    Started,
    /// Work underway in a child phase.
    InProgress,
    /// Done. Terminal.
    Complete,
    /// Failed without recovery. Terminal.
    Error,
}

impl Status {
    /// Does a step in this status still need offers?
    pub fn is_actionable(self) -> bool {
        matches!(self, Status::Pending | Status::Prepared)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Waiting => "WAITING",
            Status::Pending => "PENDING",
            Status::Prepared => "PREPARED",
            Status::Starting => "STARTING",
            Status::Started => "STARTED",
            Status::InProgress => "IN_PROGRESS",
            Status::Complete => "COMPLETE",
            Status::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Recovery
// ---------------------------------------------------------------------------

/// How a failed pod instance is being recovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryType {
    None,
    /// Relaunch in place, reusing reserved resources.
    Transient,
    /// Replace on new resources.
    Permanent,
}

impl std::fmt::Display for RecoveryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RecoveryType::None => "NONE",
            RecoveryType::Transient => "TRANSIENT",
            RecoveryType::Permanent => "PERMANENT",
        };
        write!(f, "{s}")
    }
}

/// Present on a step only when it is tied to a recovery operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecoveryHint {
    /// Pod instance being recovered (e.g. "kafka-0").
    pub pod_instance: String,
    pub recovery_type: RecoveryType,
    /// Tasks the recovery relaunches. Order matters for identity.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<String>,
}

impl RecoveryHint {
    pub fn new(pod_instance: impl Into<String>, recovery_type: RecoveryType) -> Self {
        Self {
            pod_instance: pod_instance.into(),
            recovery_type,
            tasks: Vec::new(),
        }
    }

    pub fn tasks<I, T>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tasks = tasks.into_iter().map(Into::into).collect();
        self
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// A work descriptor from the plan tracker.
///
/// Only the three accessors the revival decision needs are required.
pub trait Step {
    fn name(&self) -> &str;
    fn status(&self) -> Status;
    fn recovery_hint(&self) -> Option<&RecoveryHint>;
}

/// A plain step descriptor, as read from a plan file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepInfo {
    pub name: String,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery: Option<RecoveryHint>,
}

impl StepInfo {
    pub fn new(name: impl Into<String>, status: Status) -> Self {
        Self {
            name: name.into(),
            status,
            recovery: None,
        }
    }

    pub fn recovery(mut self, hint: RecoveryHint) -> Self {
        self.recovery = Some(hint);
        self
    }
}

impl Step for StepInfo {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn recovery_hint(&self) -> Option<&RecoveryHint> {
        self.recovery.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Work Item
// ---------------------------------------------------------------------------

/// Revival identity of one step. Equal iff name, status and hint are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct WorkItem {
    pub name: String,
    pub status: Status,
    pub recovery: Option<RecoveryHint>,
}

impl WorkItem {
    pub fn from_step<S: Step + ?Sized>(step: &S) -> Self {
        Self {
            name: step.name().to_string(),
            status: step.status(),
            recovery: step.recovery_hint().cloned(),
        }
    }
}

impl std::fmt::Display for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.recovery {
            Some(hint) => write!(f, "{} [{}][{}]", self.name, self.status, hint.recovery_type),
            None => write!(f, "{} [{}][N/A]", self.name, self.status),
        }
    }
}
