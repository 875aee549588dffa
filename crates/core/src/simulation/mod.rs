//! Configuration and stepping loops

pub mod config;
pub mod runner;

pub use config::{EulerianConfig, LagrangianConfig, MIN_GRID_NODES};
pub use runner::{run, run_checked};
