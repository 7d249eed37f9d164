pub mod controller;
pub mod endpoint;
pub mod local;
pub mod selector;
pub mod worker;

pub use controller::SimController;
pub use local::LocalStepper;
pub use selector::{TokioWorkerFactory, WorkerFactory, create_default_stepper};
pub use worker::{StepperSettings, WorkerChannels, WorkerStepper};
