// Domain-level errors for step execution.

use std::fmt;
use std::time::Duration;

/// Everything a step can fail with, across both execution modes. None of
/// these are retried internally; retry policy belongs to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum StepError {
    NonFiniteState,
    NonFiniteAcceleration,
    InvalidTimeStep,
    // Integration ran but produced a corrupt state.
    NonFiniteResult,
    // The worker answered this request with an error message.
    Remote(String),
    // No reply arrived within the per-request deadline.
    Timeout(Duration),
    // Dispatching the request message itself failed.
    SendFailed(String),
    // Worker-level failure carrying no correlation id.
    Fault(String),
    Terminated,
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::NonFiniteState => write!(f, "non-finite particle state"),
            StepError::NonFiniteAcceleration => write!(f, "acceleration must be finite"),
            StepError::InvalidTimeStep => write!(f, "dt must be finite and > 0"),
            StepError::NonFiniteResult => write!(f, "integration produced a non-finite state"),
            StepError::Remote(message) => write!(f, "worker error: {message}"),
            StepError::Timeout(bound) => {
                write!(f, "step timeout after {}ms", bound.as_millis())
            }
            StepError::SendFailed(reason) => write!(f, "failed to send step request: {reason}"),
            StepError::Fault(reason) => write!(f, "worker fault: {reason}"),
            StepError::Terminated => write!(f, "simulation stepper terminated"),
        }
    }
}

impl std::error::Error for StepError {}
