pub mod config;
pub mod error;
pub mod types;

pub use config::SimulationConfig;
pub use error::{FissionError, Result};
pub use types::{AtomId, NeutronId, Rect, Tick, Vec2};
