// Oersted demo physics: compass needle response to a current-carrying
// wire, with the wire field integrated numerically over a finite segment.

use std::f64::consts::PI;

use crate::domain::state::Vector3;

const MU0: f64 = 4.0 * PI * 1e-7;
const DEFAULT_EARTH_FIELD_MICRO_T: f64 = 45.0;
const DEFAULT_MIN_RADIUS_M: f64 = 0.02;
const DEFAULT_WIRE_HEIGHT_M: f64 = 0.03;
const DEFAULT_WIRE_HALF_LENGTH_M: f64 = 0.18;
const NUMERIC_BIOT_SEGMENTS: usize = 120;

/// How easy the current's magnetic effect is to observe from the needle's
/// starting pose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryLevel {
    Low,
    Medium,
    High,
}

/// Horizontal-plane vector; the needle swings in the table plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarVector {
    pub x: f64,
    pub z: f64,
}

impl PlanarVector {
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.z)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OerstedNeedleConfig {
    pub current_a: f64,
    pub needle_position_m: PlanarVector,
    pub initial_heading_deg: f64,
    pub earth_field_micro_t: Option<f64>,
    pub min_radius_m: Option<f64>,
    pub wire_height_m: Option<f64>,
    pub wire_half_length_m: Option<f64>,
    pub wire_direction: Option<Vector3>,
}

#[derive(Debug, Clone, Copy)]
pub struct OerstedNeedleState {
    pub radius_m: f64,
    pub wire_field_micro_t: f64,
    pub wire_field_vector_micro_t: PlanarVector,
    pub earth_field_vector_micro_t: PlanarVector,
    pub net_field_vector_micro_t: PlanarVector,
    pub target_heading_deg: f64,
    pub deflection_deg: f64,
    pub observed_swing_deg: f64,
    pub discovery_level: DiscoveryLevel,
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

fn normalize_angle_deg(value: f64) -> f64 {
    value.rem_euclid(360.0)
}

fn shortest_signed_angle_deg(from_deg: f64, to_deg: f64) -> f64 {
    (to_deg - from_deg + 540.0).rem_euclid(360.0) - 180.0
}

fn derive_discovery_level(observed_swing_deg: f64) -> DiscoveryLevel {
    let amplitude = observed_swing_deg.abs();
    if amplitude < 6.0 {
        return DiscoveryLevel::Low;
    }
    if amplitude < 16.0 {
        return DiscoveryLevel::Medium;
    }
    DiscoveryLevel::High
}

/// Computes where the needle settles: the wire field from a Biot-Savart
/// sum over the finite wire, added to the Earth field, read as a compass
/// heading (0° = geographic north = +z, 90° = east = +x).
pub fn derive_needle_state(config: &OerstedNeedleConfig) -> OerstedNeedleState {
    let earth_field_micro_t = config
        .earth_field_micro_t
        .unwrap_or(DEFAULT_EARTH_FIELD_MICRO_T);
    let min_radius_m = config.min_radius_m.unwrap_or(DEFAULT_MIN_RADIUS_M);
    let wire_height_m = config.wire_height_m.unwrap_or(DEFAULT_WIRE_HEIGHT_M).max(0.005);
    let wire_half_length_m = config
        .wire_half_length_m
        .unwrap_or(DEFAULT_WIRE_HALF_LENGTH_M)
        .max(0.05);
    let wire_direction = config
        .wire_direction
        .unwrap_or(Vector3::new(0.0, 0.0, 1.0))
        .normalize();
    let wire_center = Vector3::new(0.0, wire_height_m, 0.0);
    let sample_point = Vector3::new(config.needle_position_m.x, 0.0, config.needle_position_m.z);

    let projection_length = sample_point.sub(wire_center).dot(wire_direction);
    let nearest_on_infinite = wire_center.add(wire_direction.scale(projection_length));
    let perpendicular = sample_point.sub(nearest_on_infinite);
    let radius_m = perpendicular.length().max(min_radius_m);

    let start_point = wire_center.add(wire_direction.scale(-wire_half_length_m));
    let segment_length_m = (wire_half_length_m * 2.0) / NUMERIC_BIOT_SEGMENTS as f64;
    let dl = wire_direction.scale(segment_length_m);
    let mut wire_field_t = Vector3::ZERO;

    for i in 0..NUMERIC_BIOT_SEGMENTS {
        let center_offset = segment_length_m * (i as f64 + 0.5);
        let element_center = start_point.add(wire_direction.scale(center_offset));
        let r = sample_point.sub(element_center);
        let r_norm = r.length();
        if r_norm < 1e-9 {
            continue;
        }
        let db = dl
            .cross(r)
            .scale((MU0 * config.current_a) / (4.0 * PI * r_norm.powi(3)));
        wire_field_t = wire_field_t.add(db);
    }

    let wire_field_vector_micro_t = PlanarVector {
        x: wire_field_t.x * 1e6,
        z: wire_field_t.z * 1e6,
    };
    let earth_field_vector_micro_t = PlanarVector {
        x: 0.0,
        z: earth_field_micro_t,
    };
    let net_field_vector_micro_t = PlanarVector {
        x: earth_field_vector_micro_t.x + wire_field_vector_micro_t.x,
        z: earth_field_vector_micro_t.z + wire_field_vector_micro_t.z,
    };

    let target_heading_deg = normalize_angle_deg(to_degrees(
        net_field_vector_micro_t.x.atan2(net_field_vector_micro_t.z),
    ));
    let deflection_deg = shortest_signed_angle_deg(0.0, target_heading_deg);
    let observed_swing_deg =
        shortest_signed_angle_deg(config.initial_heading_deg, target_heading_deg);

    OerstedNeedleState {
        radius_m,
        wire_field_micro_t: wire_field_vector_micro_t.magnitude(),
        wire_field_vector_micro_t,
        earth_field_vector_micro_t,
        net_field_vector_micro_t,
        target_heading_deg,
        deflection_deg,
        observed_swing_deg,
        discovery_level: derive_discovery_level(observed_swing_deg),
    }
}

/// Relaxes the current heading toward the target with an exponential
/// response; larger `response_hz` settles faster.
pub fn step_needle_heading(
    current_heading_deg: f64,
    target_heading_deg: f64,
    delta_s: f64,
    response_hz: f64,
) -> f64 {
    let safe_delta_s = delta_s.max(0.0);
    let gain = 1.0 - (-response_hz.max(0.0) * safe_delta_s).exp();
    let delta_deg = shortest_signed_angle_deg(current_heading_deg, target_heading_deg);
    normalize_angle_deg(current_heading_deg + delta_deg * gain)
}
