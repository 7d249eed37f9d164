// MHD generator demo physics: readings derived from v x B across the
// electrode gap, plus the slow charge-separation response shown in the
// channel view.

const DEFAULT_CHANNEL_AREA_M2: f64 = 0.08;
const DEFAULT_RESPONSE_TIME_S: f64 = 0.8;
const DEFAULT_SATURATION_FIELD_V_PER_M: f64 = 6000.0;

#[derive(Debug, Clone, Copy)]
pub struct MhdConfig {
    pub magnetic_field_t: f64,
    pub plasma_velocity_mps: f64,
    pub electrode_gap_m: f64,
    pub conductivity_s_per_m: f64,
    pub channel_area_m2: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct MhdReadings {
    pub induced_electric_field_v_per_m: f64,
    pub output_voltage_v: f64,
    pub current_density_apm2: f64,
    pub output_current_a: f64,
    pub power_density_wpm3: f64,
    pub output_power_w: f64,
}

/// One relaxation step of the charge-separation indicator.
#[derive(Debug, Clone, Copy)]
pub struct ChargeSeparationStep {
    pub previous: f64,
    pub delta_s: f64,
    pub running: bool,
    pub response_time_s: Option<f64>,
    pub target_when_running: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct PolarizationTargetConfig {
    pub magnetic_field_t: f64,
    pub plasma_velocity_mps: f64,
    pub saturation_induced_field_v_per_m: Option<f64>,
}

pub fn derive_readings(config: &MhdConfig) -> MhdReadings {
    let area = config.channel_area_m2.unwrap_or(DEFAULT_CHANNEL_AREA_M2);

    let induced_electric_field_v_per_m = config.plasma_velocity_mps * config.magnetic_field_t;
    let output_voltage_v = induced_electric_field_v_per_m * config.electrode_gap_m;
    let current_density_apm2 = config.conductivity_s_per_m * induced_electric_field_v_per_m;
    let output_current_a = current_density_apm2 * area;
    let power_density_wpm3 = current_density_apm2 * induced_electric_field_v_per_m;
    let output_power_w = output_voltage_v * output_current_a;

    MhdReadings {
        induced_electric_field_v_per_m,
        output_voltage_v,
        current_density_apm2,
        output_current_a,
        power_density_wpm3,
        output_power_w,
    }
}

/// First-order relaxation toward full separation while running, back to
/// zero when the channel is switched off. Result stays in [0, 1].
pub fn derive_charge_separation(step: &ChargeSeparationStep) -> f64 {
    let time_constant = step.response_time_s.unwrap_or(DEFAULT_RESPONSE_TIME_S).max(0.05);
    let gain = (step.delta_s / time_constant).clamp(0.0, 1.0);
    let target_when_running = step.target_when_running.unwrap_or(1.0).clamp(0.0, 1.0);
    let target = if step.running { target_when_running } else { 0.0 };
    let next = step.previous + (target - step.previous) * gain;
    next.clamp(0.0, 1.0)
}

/// Electrode polarization level: induced field against a saturation bound.
pub fn derive_polarization_target(config: &PolarizationTargetConfig) -> f64 {
    let induced_field_v_per_m = config.magnetic_field_t * config.plasma_velocity_mps;
    let saturation = config
        .saturation_induced_field_v_per_m
        .unwrap_or(DEFAULT_SATURATION_FIELD_V_PER_M)
        .max(1.0);
    (induced_field_v_per_m / saturation).clamp(0.0, 1.0)
}
