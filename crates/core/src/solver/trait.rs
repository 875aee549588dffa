//! Simulator trait definition
//!
//! Both the grid and the particle simulators implement [`Simulator`], so an
//! external stepping loop (a renderer, a headless validator, a test) can drive
//! either one without knowing which representation it holds.

use crate::error::SimulationError;

/// Step-driven simulation with an explicit state value
///
/// The simulator holds only fixed parameters. All mutable data lives in
/// `State`, which the caller passes in and gets back from every step, so two
/// states never share storage and stopping after any step is safe.
pub trait Simulator {
    /// Complete mutable state of one run
    type State;

    /// Fresh state for a new run
    fn initial_state(&self) -> Self::State;

    /// Advance `state` by one timestep and hand it back
    fn step(&self, state: Self::State) -> Self::State;

    /// Timestep applied by [`Simulator::step`]
    fn dt(&self) -> f64;

    /// Check the invariants every post-step state must satisfy
    ///
    /// # Errors
    ///
    /// Returns `InvariantViolated` (or `Unbounded`) describing the first failure.
    fn check_invariants(&self, state: &Self::State) -> Result<(), SimulationError>;
}
