//! Control loop engine: step sources and the periodic revive loop.

pub mod control;
pub mod source;

pub use control::{ControlConfig, ControlPlane};
pub use source::{PlanFile, StepSource};
