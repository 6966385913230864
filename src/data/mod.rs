pub mod simulation;

pub use simulation::{DayRecord, SimulationData, Town};
