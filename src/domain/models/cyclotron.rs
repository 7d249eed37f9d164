// Cyclotron demo physics: Lorentz acceleration with an RF-style electric
// boost applied only inside the dee gap.

use std::f64::consts::PI;

use crate::domain::state::{ParticleState, Vector3};

#[derive(Debug, Clone, Copy)]
pub struct CyclotronConfig {
    pub charge_c: f64,
    pub mass_kg: f64,
    /// Uniform field along +z.
    pub magnetic_field_t: f64,
    /// Accelerating field magnitude across the dee gap.
    pub electric_field_v_per_m: f64,
    /// Half-width of the gap, centered on x = 0.
    pub gap_half_width_m: f64,
}

/// Readings displayed next to the running trajectory.
#[derive(Debug, Clone, Copy)]
pub struct CyclotronReadings {
    pub speed: f64,
    pub period_s: f64,
    pub radius_m: f64,
    pub kinetic_energy_j: f64,
}

/// Acceleration for the current state: q/m · (v × B) with B = (0, 0, B),
/// plus the gap boost aligned with the crossing direction so the particle
/// gains energy on every pass.
pub fn cyclotron_acceleration(state: &ParticleState, config: &CyclotronConfig) -> Vector3 {
    let q_over_m = config.charge_c / config.mass_kg;
    let b = config.magnetic_field_t;
    let gap_half_width = config.gap_half_width_m.max(0.0);

    let in_gap = state.position.x.abs() <= gap_half_width;
    let crossing_direction = if state.velocity.x == 0.0 {
        0.0
    } else {
        state.velocity.x.signum()
    };
    let electric_field_x = if in_gap {
        crossing_direction * config.electric_field_v_per_m
    } else {
        0.0
    };

    Vector3 {
        x: q_over_m * (state.velocity.y * b + electric_field_x),
        y: q_over_m * (-state.velocity.x * b),
        z: 0.0,
    }
}

/// Launch state on the gap center line, offset so the guiding center of
/// the first orbit sits at the origin.
///
/// Guiding center = (x0 + vy/w, y0 - vx/w) with w = qB/m. With vy = 0,
/// y0 = vx/w = r0 puts the center at the origin.
pub fn derive_launch_state(config: &CyclotronConfig, launch_speed_mps: f64) -> ParticleState {
    let speed = launch_speed_mps.abs().max(1.0);
    let orientation = config.charge_c * config.magnetic_field_t;
    let launch_vx = if orientation < 0.0 { -speed } else { speed };

    let q_abs = config.charge_c.abs();
    let b_abs = config.magnetic_field_t.abs();
    let r0 = if b_abs > 0.0 {
        (config.mass_kg * speed) / (q_abs * b_abs)
    } else {
        0.0
    };

    ParticleState {
        position: Vector3::new(0.0, r0, 0.0),
        velocity: Vector3::new(launch_vx, 0.0, 0.0),
    }
}

pub fn derive_readings(state: &ParticleState, config: &CyclotronConfig) -> CyclotronReadings {
    let speed = state.velocity.length();
    let q_abs = config.charge_c.abs();
    let b_abs = config.magnetic_field_t.abs();
    let denominator = q_abs * b_abs;

    CyclotronReadings {
        speed,
        period_s: if denominator == 0.0 {
            f64::INFINITY
        } else {
            (2.0 * PI * config.mass_kg) / denominator
        },
        radius_m: if denominator == 0.0 {
            f64::INFINITY
        } else {
            (config.mass_kg * speed) / denominator
        },
        kinetic_energy_j: 0.5 * config.mass_kg * speed * speed,
    }
}
