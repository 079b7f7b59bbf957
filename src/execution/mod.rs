// Polling/execution loop driving the signal generator and portfolio
pub mod engine;

pub use engine::{CycleOutcome, Engine, EngineParams};
