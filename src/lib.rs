pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use domain::errors::StepError;
pub use domain::ports::{SimulationStepper, StepperMode};
pub use domain::state::{ParticleState, StepPayload, Vector3};
pub use use_cases::selector::{WorkerFactory, create_default_stepper};
