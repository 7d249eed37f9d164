pub mod errors;
pub mod guards;
pub mod integrator;
pub mod models;
pub mod ports;
pub mod state;

pub use errors::StepError;
pub use ports::{SimulationStepper, StepperMode};
pub use state::{ParticleState, StepPayload, Vector3};
