pub mod tick;

pub use tick::{RunSummary, Simulation, TickReport};
