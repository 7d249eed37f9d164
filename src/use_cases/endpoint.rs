// Worker-side step loop: receives requests, runs the guarded controller,
// and replies with a result or an error echoing the same request id.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::errors::StepError;
use crate::domain::guards::validate_step_payload;
use crate::domain::state::{ParticleState, StepPayload};
use crate::interface_adapters::protocol::{
    ErrorPayloadDto, SimulationMessage, StepResultPayloadDto,
};
use crate::use_cases::controller::SimController;

/// Runs until either channel closes. Undecodable request text and
/// non-request kinds are ignored; every `step` message gets exactly one
/// reply.
pub async fn simulation_worker_task(
    mut request_rx: mpsc::Receiver<String>,
    reply_tx: mpsc::Sender<String>,
) {
    let controller = SimController::new();

    while let Some(text) = request_rx.recv().await {
        let message = match serde_json::from_str::<SimulationMessage>(&text) {
            Ok(message) => message,
            Err(e) => {
                warn!(error = %e, "undecodable step request ignored");
                continue;
            }
        };

        let SimulationMessage::Step {
            request_id,
            payload,
        } = message
        else {
            debug!("non-request message ignored");
            continue;
        };

        let reply = match run_step(&controller, payload.into()) {
            Ok(state) => SimulationMessage::StepResult {
                request_id,
                payload: StepResultPayloadDto {
                    state: state.into(),
                },
            },
            Err(error) => SimulationMessage::Error {
                request_id,
                payload: ErrorPayloadDto {
                    message: error.to_string(),
                },
            },
        };

        let text = match serde_json::to_string(&reply) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "failed to serialize step reply");
                continue;
            }
        };

        if reply_tx.send(text).await.is_err() {
            // Caller side is gone; nothing left to serve.
            break;
        }
    }
}

fn run_step(
    controller: &SimController,
    payload: StepPayload,
) -> Result<ParticleState, StepError> {
    // Re-validate on this side of the wire; the caller's check does not
    // vouch for whatever produced the bytes.
    validate_step_payload(&payload)?;
    controller.tick(payload.state, payload.acceleration, payload.dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::Vector3;
    use crate::interface_adapters::protocol::StepPayloadDto;

    fn spawn_endpoint() -> (mpsc::Sender<String>, mpsc::Receiver<String>) {
        let (request_tx, request_rx) = mpsc::channel(8);
        let (reply_tx, reply_rx) = mpsc::channel(8);
        tokio::spawn(simulation_worker_task(request_rx, reply_tx));
        (request_tx, reply_rx)
    }

    fn step_request(request_id: &str, dt: f64) -> String {
        let payload = StepPayload {
            state: ParticleState {
                position: Vector3::ZERO,
                velocity: Vector3::new(1.0, 0.0, 0.0),
            },
            acceleration: Vector3::new(2.0, 0.0, 0.0),
            dt,
        };
        let message = SimulationMessage::Step {
            request_id: request_id.to_string(),
            payload: StepPayloadDto::from(payload),
        };
        serde_json::to_string(&message).expect("request should serialize")
    }

    #[tokio::test]
    async fn replies_with_the_integrated_state_and_echoes_the_request_id() {
        let (request_tx, mut reply_rx) = spawn_endpoint();

        request_tx
            .send(step_request("req-42", 0.5))
            .await
            .expect("endpoint should accept requests");

        let reply = reply_rx.recv().await.expect("expected one reply");
        match serde_json::from_str::<SimulationMessage>(&reply) {
            Ok(SimulationMessage::StepResult {
                request_id,
                payload,
            }) => {
                assert_eq!(request_id, "req-42");
                let state = ParticleState::from(payload.state);
                assert_eq!(state.velocity.x, 2.0);
                assert_eq!(state.position.x, 1.0);
            }
            other => panic!("expected a step-result reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn replies_with_an_error_for_an_invalid_payload() {
        let (request_tx, mut reply_rx) = spawn_endpoint();

        request_tx
            .send(step_request("req-7", 0.0))
            .await
            .expect("endpoint should accept requests");

        let reply = reply_rx.recv().await.expect("expected one reply");
        match serde_json::from_str::<SimulationMessage>(&reply) {
            Ok(SimulationMessage::Error {
                request_id,
                payload,
            }) => {
                assert_eq!(request_id, "req-7");
                assert_eq!(payload.message, "dt must be finite and > 0");
            }
            other => panic!("expected an error reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn ignores_undecodable_and_non_request_messages() {
        let (request_tx, mut reply_rx) = spawn_endpoint();

        request_tx
            .send("garbage".to_string())
            .await
            .expect("endpoint should accept text");
        request_tx
            .send(
                r#"{"kind":"step-result","requestId":"req-1","payload":{"state":{"position":{"x":0.0,"y":0.0,"z":0.0},"velocity":{"x":0.0,"y":0.0,"z":0.0}}}}"#
                    .to_string(),
            )
            .await
            .expect("endpoint should accept text");
        request_tx
            .send(step_request("req-2", 0.5))
            .await
            .expect("endpoint should accept requests");

        // Only the real request earns a reply, in spite of the noise
        // queued ahead of it.
        let reply = reply_rx.recv().await.expect("expected one reply");
        match serde_json::from_str::<SimulationMessage>(&reply) {
            Ok(SimulationMessage::StepResult { request_id, .. }) => {
                assert_eq!(request_id, "req-2");
            }
            other => panic!("expected a step-result reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn exits_when_the_request_channel_closes() {
        let (request_tx, request_rx) = mpsc::channel::<String>(8);
        let (reply_tx, _reply_rx) = mpsc::channel(8);
        let endpoint = tokio::spawn(simulation_worker_task(request_rx, reply_tx));

        drop(request_tx);

        endpoint
            .await
            .expect("endpoint should exit cleanly when requests stop");
    }
}
