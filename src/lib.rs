//! Fission Chain - Discrete-time neutron chain reaction simulation

pub mod core;
pub mod render;
pub mod scheduler;
pub mod simulation;
pub mod spatial;
