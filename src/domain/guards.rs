// Numeric invariant checks shared by every execution path.

use crate::domain::errors::StepError;
use crate::domain::state::{ParticleState, StepPayload};

/// Fails iff any of the six scalar components of the state is NaN or
/// infinite. Used as both a precondition and a postcondition check.
pub fn validate_finite_state(state: &ParticleState) -> Result<(), StepError> {
    if !state.position.is_finite() || !state.velocity.is_finite() {
        return Err(StepError::NonFiniteState);
    }
    Ok(())
}

/// Single validation path run before local execution, before worker
/// dispatch, and again on the worker side of the wire.
pub fn validate_step_payload(payload: &StepPayload) -> Result<(), StepError> {
    validate_finite_state(&payload.state)?;

    if !payload.acceleration.is_finite() {
        return Err(StepError::NonFiniteAcceleration);
    }
    if !payload.dt.is_finite() || payload.dt <= 0.0 {
        return Err(StepError::InvalidTimeStep);
    }
    Ok(())
}
