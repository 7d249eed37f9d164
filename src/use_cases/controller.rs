// Guarded single-step advancement of a particle state.

use crate::domain::errors::StepError;
use crate::domain::guards::validate_finite_state;
use crate::domain::integrator::semi_implicit_euler_step;
use crate::domain::state::{ParticleState, Vector3};

/// Pure step function driven by the controller; injectable so tests can
/// observe how the guards react to a misbehaving integrator.
pub type StepFunction = fn(ParticleState, Vector3, f64) -> ParticleState;

/// Wraps a step function with finite-state checks on both sides. A guard
/// failure is fatal to that invocation; nothing is retried or sanitized.
pub struct SimController {
    step: StepFunction,
}

impl SimController {
    pub fn new() -> Self {
        Self {
            step: semi_implicit_euler_step,
        }
    }

    pub fn with_step(step: StepFunction) -> Self {
        Self { step }
    }

    pub fn tick(
        &self,
        state: ParticleState,
        acceleration: Vector3,
        dt: f64,
    ) -> Result<ParticleState, StepError> {
        // Fail fast on corrupt input so a caller cannot accumulate NaNs
        // across frames unnoticed.
        validate_finite_state(&state)?;
        let next = (self.step)(state, acceleration, dt);
        validate_finite_state(&next).map_err(|_| StepError::NonFiniteResult)?;
        Ok(next)
    }
}

impl Default for SimController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_velocity_state() -> ParticleState {
        ParticleState {
            position: Vector3::ZERO,
            velocity: Vector3::new(1.0, 0.0, 0.0),
        }
    }

    #[test]
    fn when_inputs_are_finite_then_tick_returns_the_integrated_state() {
        let controller = SimController::new();

        let next = controller
            .tick(unit_velocity_state(), Vector3::new(1.0, 0.0, 0.0), 1.0)
            .expect("expected finite inputs to step");

        assert_eq!(next.velocity.x, 2.0);
        assert_eq!(next.position.x, 2.0);
    }

    #[test]
    fn when_input_state_is_corrupt_then_tick_rejects_before_integrating() {
        let controller = SimController::new();
        let state = ParticleState {
            position: Vector3::new(f64::NAN, 0.0, 0.0),
            velocity: Vector3::ZERO,
        };

        let result = controller.tick(state, Vector3::ZERO, 0.1);

        assert_eq!(result, Err(StepError::NonFiniteState));
    }

    #[test]
    fn when_integration_overflows_then_tick_reports_a_non_finite_result() {
        let controller = SimController::new();
        // All inputs are finite but v + a*dt overflows to infinity.
        let state = ParticleState {
            position: Vector3::ZERO,
            velocity: Vector3::new(f64::MAX, 0.0, 0.0),
        };

        let result = controller.tick(state, Vector3::new(f64::MAX, 0.0, 0.0), 2.0);

        assert_eq!(result, Err(StepError::NonFiniteResult));
    }

    #[test]
    fn when_step_function_misbehaves_then_postcondition_catches_it() {
        fn poisoned(_: ParticleState, _: Vector3, _: f64) -> ParticleState {
            ParticleState {
                position: Vector3::new(f64::NAN, 0.0, 0.0),
                velocity: Vector3::ZERO,
            }
        }
        let controller = SimController::with_step(poisoned);

        let result = controller.tick(unit_velocity_state(), Vector3::ZERO, 0.1);

        assert_eq!(result, Err(StepError::NonFiniteResult));
    }

    #[test]
    fn finite_inputs_always_produce_six_finite_components() {
        let controller = SimController::new();
        let mut state = unit_velocity_state();

        for i in 0..500 {
            let swirl = Vector3::new((i as f64 * 0.1).sin(), (i as f64 * 0.1).cos(), 0.5);
            state = controller
                .tick(state, swirl, 0.01)
                .expect("expected every tick to stay finite");
        }

        assert!(state.position.is_finite());
        assert!(state.velocity.is_finite());
    }
}
