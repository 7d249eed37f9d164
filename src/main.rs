// Headless demo driver: selects a stepper, advances a cyclotron
// trajectory through it, and reports readings for the other demos.

use std::time::Instant;

use particle_sim::domain::models::cyclotron::{
    CyclotronConfig, cyclotron_acceleration, derive_launch_state, derive_readings,
};
use particle_sim::domain::models::mhd::{self, MhdConfig};
use particle_sim::domain::models::oersted::{self, OerstedNeedleConfig, PlanarVector};
use particle_sim::frameworks::config;
use particle_sim::{SimulationStepper, StepPayload, create_default_stepper};
use tracing::{error, info};

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

#[tokio::main]
async fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let stepper = create_default_stepper(None);
    info!(mode = %stepper.mode(), "simulation stepper ready");

    // Proton in a 1.2 T field with an RF boost across a 0.2 mm gap.
    let cyclotron = CyclotronConfig {
        charge_c: 1.6e-19,
        mass_kg: 1.67e-27,
        magnetic_field_t: 1.2,
        electric_field_v_per_m: 8.0e4,
        gap_half_width_m: 1.0e-4,
    };
    let mut state = derive_launch_state(&cyclotron, 2.4e4);
    let dt = derive_readings(&state, &cyclotron).period_s / 720.0;

    let steps = config::demo_step_count();
    let started = Instant::now();
    let mut completed = 0usize;
    for _ in 0..steps {
        let acceleration = cyclotron_acceleration(&state, &cyclotron);
        match stepper
            .step(StepPayload {
                state,
                acceleration,
                dt,
            })
            .await
        {
            Ok(next) => {
                state = next;
                completed += 1;
            }
            Err(e) => {
                error!(error = %e, completed, "step failed; stopping the run");
                break;
            }
        }
    }

    let readings = derive_readings(&state, &cyclotron);
    info!(
        completed,
        elapsed_ms = started.elapsed().as_millis() as u64,
        speed = readings.speed,
        radius_m = readings.radius_m,
        kinetic_energy_j = readings.kinetic_energy_j,
        "cyclotron trajectory finished"
    );

    let generator = mhd::derive_readings(&MhdConfig {
        magnetic_field_t: 1.5,
        plasma_velocity_mps: 2000.0,
        electrode_gap_m: 0.4,
        conductivity_s_per_m: 18.0,
        channel_area_m2: None,
    });
    info!(
        output_voltage_v = generator.output_voltage_v,
        output_current_a = generator.output_current_a,
        output_power_w = generator.output_power_w,
        "mhd generator readings"
    );

    let needle = oersted::derive_needle_state(&OerstedNeedleConfig {
        current_a: 6.0,
        needle_position_m: PlanarVector { x: 0.08, z: 0.0 },
        initial_heading_deg: 0.0,
        earth_field_micro_t: None,
        min_radius_m: None,
        wire_height_m: None,
        wire_half_length_m: None,
        wire_direction: None,
    });
    info!(
        wire_field_micro_t = needle.wire_field_micro_t,
        deflection_deg = needle.deflection_deg,
        discovery_level = ?needle.discovery_level,
        "oersted needle readings"
    );

    stepper.terminate().await;
}
