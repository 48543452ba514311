//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns every session and the tick loop.

mod simulation;

pub use simulation::{Command, SimulationWorker};
