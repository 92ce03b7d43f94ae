pub mod engine;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod simulator;

pub use error::{ExecutionError, Stage};
pub use executor::{ExecutionClient, ExecutionMode, Judge};
pub use simulator::SimulatedJudge;
