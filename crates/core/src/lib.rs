//! Meridional Circulation Transport Core
//!
//! Advection of a scalar quantity and of passive particles through an analytic
//! single-cell meridional circulation (latitude -90°..90°, altitude 0..30 km).
//!
//! ## Two Representations, One Model
//!
//! - [`EulerianSimulator`]: a scalar field on a fixed lattice, advected with
//!   centered finite differences and forward-Euler time stepping, heated by a
//!   Gaussian source and closed by a fixed boundary policy
//! - [`LagrangianSimulator`]: particles moved by explicit Euler steps and
//!   clamped to the domain
//!
//! Both consume the same [`WindModel`] and expose their state as an explicit
//! value passed through [`Simulator::step`]. Rendering and animation are left
//! to the caller.

// Core types and utilities
pub mod core_types;
pub mod error;

// Wind field, solvers and drivers
pub mod simulation;
pub mod solver;
pub mod wind;

// Re-export core types
pub use core_types::{CoordinateMesh, Domain, ScalarField, Vec2};
pub use error::SimulationError;

// Re-export simulators
pub use simulation::{run, run_checked, EulerianConfig, LagrangianConfig};
pub use solver::{
    EulerianSimulator, EulerianState, GaussianSource, LagrangianSimulator, LagrangianState,
    Simulator,
};
pub use wind::{sample_mesh, sample_wind, wind_field, HadleyCell, WindModel, WindSample};
