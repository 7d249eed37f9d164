// Capability probe choosing worker-backed or local execution. Selection
// happens once per consumer lifecycle; there is no re-probing or
// hot-swapping mid-session.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::domain::ports::SimulationStepper;
use crate::frameworks::config;
use crate::use_cases::endpoint::simulation_worker_task;
use crate::use_cases::local::LocalStepper;
use crate::use_cases::worker::{StepperSettings, WorkerChannels, WorkerStepper};

/// Builds the channels and background task backing a worker stepper.
/// Injectable so tests can substitute a failing or scripted factory.
pub trait WorkerFactory: Send + Sync {
    fn spawn_worker(&self) -> Result<WorkerChannels, String>;
}

/// Spawns the in-process worker task on the current tokio runtime.
pub struct TokioWorkerFactory;

impl WorkerFactory for TokioWorkerFactory {
    fn spawn_worker(&self) -> Result<WorkerChannels, String> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| format!("no async runtime for the worker task: {e}"))?;

        let (request_tx, request_rx) = mpsc::channel(config::REQUEST_CHANNEL_CAPACITY);
        let (reply_tx, reply_rx) = mpsc::channel(config::REPLY_CHANNEL_CAPACITY);
        let worker = runtime.spawn(simulation_worker_task(request_rx, reply_tx));

        Ok(WorkerChannels {
            request_tx,
            reply_rx,
            worker: Some(worker),
        })
    }
}

/// Prefers worker execution; any construction failure falls back to the
/// local stepper so a step is always available.
pub fn create_default_stepper(factory: Option<&dyn WorkerFactory>) -> Box<dyn SimulationStepper> {
    let default_factory = TokioWorkerFactory;
    let factory = factory.unwrap_or(&default_factory);

    match factory.spawn_worker() {
        Ok(channels) => {
            info!("worker stepper selected");
            Box::new(WorkerStepper::new(
                channels,
                StepperSettings {
                    step_timeout: config::step_timeout(),
                },
            ))
        }
        Err(reason) => {
            warn!(reason = %reason, "worker unavailable; using local stepper");
            Box::new(LocalStepper::new())
        }
    }
}
