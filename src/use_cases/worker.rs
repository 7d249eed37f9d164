// Worker-backed stepper: dispatches step requests to a background worker
// task, correlates replies by request id, and enforces a per-request
// deadline. The pending table is owned by this instance alone.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::domain::errors::StepError;
use crate::domain::guards::{validate_finite_state, validate_step_payload};
use crate::domain::ports::{SimulationStepper, StepperMode};
use crate::domain::state::{ParticleState, StepPayload};
use crate::interface_adapters::protocol::SimulationMessage;

type PendingTable = Arc<Mutex<HashMap<String, oneshot::Sender<Result<ParticleState, StepError>>>>>;

/// Channel endpoints wired to a running worker. `worker` holds the task
/// handle when the worker runs in-process so terminate can release it.
pub struct WorkerChannels {
    pub request_tx: mpsc::Sender<String>,
    pub reply_rx: mpsc::Receiver<String>,
    pub worker: Option<JoinHandle<()>>,
}

#[derive(Debug, Clone)]
pub struct StepperSettings {
    /// Deadline applied independently to every dispatched request.
    pub step_timeout: Duration,
}

pub struct WorkerStepper {
    request_tx: mpsc::Sender<String>,
    pending: PendingTable,
    request_seq: AtomicU64,
    step_timeout: Duration,
    terminated: AtomicBool,
    dispatch: JoinHandle<()>,
    worker: Option<JoinHandle<()>>,
}

impl WorkerStepper {
    pub fn new(channels: WorkerChannels, settings: StepperSettings) -> Self {
        let pending: PendingTable = Arc::new(Mutex::new(HashMap::new()));
        let dispatch = tokio::spawn(dispatch_replies(channels.reply_rx, pending.clone()));

        Self {
            request_tx: channels.request_tx,
            pending,
            request_seq: AtomicU64::new(0),
            step_timeout: settings.step_timeout,
            terminated: AtomicBool::new(false),
            dispatch,
            worker: channels.worker,
        }
    }

    fn next_request_id(&self) -> String {
        // Uniqueness within this instance's lifetime is all that response
        // correlation needs; ordering carries no meaning.
        format!("req-{}", self.request_seq.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn release_tasks(&self) {
        self.dispatch.abort();
        if let Some(worker) = &self.worker {
            worker.abort();
        }
    }
}

#[async_trait]
impl SimulationStepper for WorkerStepper {
    async fn step(&self, payload: StepPayload) -> Result<ParticleState, StepError> {
        if self.terminated.load(Ordering::SeqCst) {
            return Err(StepError::Terminated);
        }
        // Same rule the local stepper applies; a bad payload never
        // reaches the worker.
        validate_step_payload(&payload)?;

        let request_id = self.next_request_id();
        let message = SimulationMessage::Step {
            request_id: request_id.clone(),
            payload: payload.into(),
        };
        let text =
            serde_json::to_string(&message).map_err(|e| StepError::SendFailed(e.to_string()))?;

        let (completion_tx, completion_rx) = oneshot::channel();
        self.pending
            .lock()
            .await
            .insert(request_id.clone(), completion_tx);

        if let Err(e) = self.request_tx.send(text).await {
            self.pending.lock().await.remove(&request_id);
            return Err(StepError::SendFailed(e.to_string()));
        }

        match timeout(self.step_timeout, completion_rx).await {
            Ok(Ok(result)) => result,
            // Completion sender dropped without a reply: the table was
            // torn down under us.
            Ok(Err(_)) => Err(StepError::Terminated),
            Err(_) => {
                // Deregister so a late reply for this id is dropped on
                // arrival. Sibling requests are unaffected.
                self.pending.lock().await.remove(&request_id);
                Err(StepError::Timeout(self.step_timeout))
            }
        }
    }

    async fn terminate(&self) {
        if self.terminated.swap(true, Ordering::SeqCst) {
            return;
        }
        fail_all_pending(&self.pending, StepError::Terminated).await;
        self.release_tasks();
    }

    fn mode(&self) -> StepperMode {
        StepperMode::Worker
    }
}

impl Drop for WorkerStepper {
    fn drop(&mut self) {
        // Dropping the table wakes any remaining callers with a
        // terminated error via their closed completion channels.
        self.release_tasks();
    }
}

async fn dispatch_replies(mut reply_rx: mpsc::Receiver<String>, pending: PendingTable) {
    while let Some(text) = reply_rx.recv().await {
        // Reply text that is not JSON at all carries no recoverable
        // correlation id, so the whole outstanding batch fails.
        let value: serde_json::Value = match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "undecodable worker reply");
                fail_all_pending(&pending, StepError::Fault(format!("undecodable reply: {e}")))
                    .await;
                continue;
            }
        };

        let message = match serde_json::from_value::<SimulationMessage>(value) {
            Ok(message) => message,
            Err(_) => {
                debug!("ignoring worker message of unknown shape");
                continue;
            }
        };

        match message {
            SimulationMessage::StepResult {
                request_id,
                payload,
            } => {
                let state = ParticleState::from(payload.state);
                let result = match validate_finite_state(&state) {
                    Ok(()) => Ok(state),
                    Err(_) => Err(StepError::NonFiniteResult),
                };
                complete_request(&pending, &request_id, result).await;
            }
            SimulationMessage::Error {
                request_id,
                payload,
            } => {
                complete_request(&pending, &request_id, Err(StepError::Remote(payload.message)))
                    .await;
            }
            SimulationMessage::Step { .. } => {
                // Request-kind traffic flows the other way; ignore echoes.
            }
        }
    }

    // Reply channel closed outside terminate(): the worker is gone and
    // nothing outstanding can ever complete.
    fail_all_pending(&pending, StepError::Fault("worker channel closed".to_string())).await;
}

async fn complete_request(
    pending: &PendingTable,
    request_id: &str,
    result: Result<ParticleState, StepError>,
) {
    let completion = pending.lock().await.remove(request_id);
    match completion {
        // The caller may have timed out between removal and delivery;
        // the failed send is harmless.
        Some(completion) => {
            let _ = completion.send(result);
        }
        None => {
            debug!(request_id, "reply for unknown or settled request ignored");
        }
    }
}

async fn fail_all_pending(pending: &PendingTable, error: StepError) {
    let drained: Vec<_> = pending.lock().await.drain().collect();
    for (request_id, completion) in drained {
        debug!(request_id = %request_id, error = %error, "failing pending step request");
        let _ = completion.send(Err(error.clone()));
    }
}
