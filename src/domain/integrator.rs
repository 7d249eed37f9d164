// Semi-implicit (symplectic) Euler integration for a single particle.

use crate::domain::state::{ParticleState, Vector3};

/// Advances one particle state by one time step.
///
/// Velocity updates first and the *updated* velocity advances the
/// position. Using the pre-update velocity would be explicit Euler, which
/// pumps energy into orbit-like motion over many steps.
pub fn semi_implicit_euler_step(
    state: ParticleState,
    acceleration: Vector3,
    dt: f64,
) -> ParticleState {
    let velocity = state.velocity.add(acceleration.scale(dt));

    ParticleState {
        position: state.position.add(velocity.scale(dt)),
        velocity,
    }
}
