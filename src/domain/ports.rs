use std::fmt;

use async_trait::async_trait;

use crate::domain::errors::StepError;
use crate::domain::state::{ParticleState, StepPayload};

/// Execution strategy behind a stepper instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepperMode {
    Local,
    Worker,
}

impl StepperMode {
    pub fn as_str(self) -> &'static str {
        match self {
            StepperMode::Local => "local",
            StepperMode::Worker => "worker",
        }
    }
}

impl fmt::Display for StepperMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Port implemented by both the local and the worker-backed stepper.
#[async_trait]
pub trait SimulationStepper: Send + Sync {
    /// Advances one particle state by one time step, or fails with a
    /// typed error. Exactly one state transition per invocation.
    async fn step(&self, payload: StepPayload) -> Result<ParticleState, StepError>;

    /// Rejects pending work and releases any execution resources. The
    /// instance must not be reused afterward.
    async fn terminate(&self);

    fn mode(&self) -> StepperMode;
}
