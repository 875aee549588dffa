//! Simulation core: the grid and particle representations of the circulation
//!
//! Both simulators consume the same [`crate::wind::WindModel`] and implement
//! the [`Simulator`] trait, so an external loop can drive either.
//!
//! # Example
//!
//! ```rust
//! use circulation_core::solver::{EulerianSimulator, Simulator};
//! use circulation_core::simulation::EulerianConfig;
//!
//! let sim = EulerianSimulator::new(EulerianConfig::default()).unwrap();
//! let mut state = sim.initial_state();
//! for _ in 0..10 {
//!     state = sim.step(state);
//! }
//! assert!(state.field.is_finite());
//! ```

pub mod boundary;
mod eulerian;
pub mod gradient;
mod lagrangian;
pub mod source;
pub mod stability;
#[allow(clippy::module_name_repetitions)]
mod r#trait;

// Re-exports
pub use boundary::{apply_boundaries, boundary_violation};
pub use eulerian::{EulerianSimulator, EulerianState};
pub use gradient::{gradient_alt, gradient_lat};
pub use lagrangian::{LagrangianSimulator, LagrangianState};
pub use r#trait::Simulator;
pub use source::GaussianSource;
pub use stability::{check_bounded, check_courant, courant_number};
