// Local stepper: synchronous controller execution behind the async
// stepper interface, so callers see one contract in both modes.

use async_trait::async_trait;

use crate::domain::errors::StepError;
use crate::domain::guards::validate_step_payload;
use crate::domain::ports::{SimulationStepper, StepperMode};
use crate::domain::state::{ParticleState, StepPayload};
use crate::use_cases::controller::SimController;

pub struct LocalStepper {
    controller: SimController,
}

impl LocalStepper {
    pub fn new() -> Self {
        Self {
            controller: SimController::new(),
        }
    }
}

impl Default for LocalStepper {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SimulationStepper for LocalStepper {
    async fn step(&self, payload: StepPayload) -> Result<ParticleState, StepError> {
        validate_step_payload(&payload)?;
        self.controller
            .tick(payload.state, payload.acceleration, payload.dt)
    }

    async fn terminate(&self) {
        // No resources to free in local mode.
    }

    fn mode(&self) -> StepperMode {
        StepperMode::Local
    }
}
