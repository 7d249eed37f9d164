// Wire protocol DTOs and conversions for simulation worker messages.
// Messages cross the worker boundary as JSON text; domain types never
// carry serde derives themselves.

use serde::{Deserialize, Serialize};

use crate::domain::state::{ParticleState, StepPayload, Vector3};

/// Messages exchanged across the worker boundary, discriminated by `kind`.
/// `requestId` is the correlation key: caller-issued on `step`, echoed
/// back unchanged on replies. No other kinds exist; unrecognized messages
/// are ignored by both sides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum SimulationMessage {
    Step {
        #[serde(rename = "requestId")]
        request_id: String,
        payload: StepPayloadDto,
    },
    StepResult {
        #[serde(rename = "requestId")]
        request_id: String,
        payload: StepResultPayloadDto,
    },
    Error {
        #[serde(rename = "requestId")]
        request_id: String,
        payload: ErrorPayloadDto,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vector3Dto {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleStateDto {
    pub position: Vector3Dto,
    pub velocity: Vector3Dto,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StepPayloadDto {
    pub state: ParticleStateDto,
    pub acceleration: Vector3Dto,
    pub dt: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StepResultPayloadDto {
    pub state: ParticleStateDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayloadDto {
    pub message: String,
}

impl From<Vector3> for Vector3Dto {
    fn from(v: Vector3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vector3Dto> for Vector3 {
    fn from(v: Vector3Dto) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<ParticleState> for ParticleStateDto {
    fn from(state: ParticleState) -> Self {
        Self {
            position: state.position.into(),
            velocity: state.velocity.into(),
        }
    }
}

impl From<ParticleStateDto> for ParticleState {
    fn from(state: ParticleStateDto) -> Self {
        Self {
            position: state.position.into(),
            velocity: state.velocity.into(),
        }
    }
}

impl From<StepPayload> for StepPayloadDto {
    fn from(payload: StepPayload) -> Self {
        Self {
            state: payload.state.into(),
            acceleration: payload.acceleration.into(),
            dt: payload.dt,
        }
    }
}

impl From<StepPayloadDto> for StepPayload {
    fn from(payload: StepPayloadDto) -> Self {
        Self {
            state: payload.state.into(),
            acceleration: payload.acceleration.into(),
            dt: payload.dt,
        }
    }
}
