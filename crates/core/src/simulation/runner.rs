//! Stepping loops for driving a [`Simulator`] without a renderer

use crate::error::SimulationError;
use crate::solver::Simulator;
use tracing::{info, warn};

/// Run `steps` steps, handing every post-step state to `observe`
///
/// `observe` receives the 1-based step number. This is the loop a renderer
/// would own; here it is a plain function so tests and headless drivers can
/// use it.
pub fn run<S, F>(simulator: &S, mut state: S::State, steps: u64, mut observe: F) -> S::State
where
    S: Simulator,
    F: FnMut(u64, &S::State),
{
    for n in 1..=steps {
        state = simulator.step(state);
        observe(n, &state);
    }
    state
}

/// Run `steps` steps, checking invariants after each one
///
/// Stops at the first violation. The initial state is not checked since it
/// has not been through the boundary policy yet.
///
/// # Errors
///
/// Returns the first error from [`Simulator::check_invariants`].
pub fn run_checked<S, F>(
    simulator: &S,
    mut state: S::State,
    steps: u64,
    mut observe: F,
) -> Result<S::State, SimulationError>
where
    S: Simulator,
    F: FnMut(u64, &S::State),
{
    for n in 1..=steps {
        state = simulator.step(state);
        if let Err(e) = simulator.check_invariants(&state) {
            warn!("Invariant check failed after step {}: {}", n, e);
            return Err(e);
        }
        observe(n, &state);
    }
    info!("Completed {} checked steps (dt={})", steps, simulator.dt());
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{EulerianConfig, LagrangianConfig};
    use crate::solver::{EulerianSimulator, LagrangianSimulator};

    #[test]
    fn test_run_visits_every_step() {
        let sim = EulerianSimulator::new(EulerianConfig {
            n_lat: 8,
            n_alt: 6,
            ..Default::default()
        })
        .unwrap();

        let mut seen = Vec::new();
        let state = run(&sim, sim.initialize(), 4, |n, s| seen.push((n, s.step)));
        assert_eq!(seen, vec![(1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(state.step, 4);
    }

    #[test]
    fn test_zero_steps_returns_input() {
        let sim = LagrangianSimulator::new(LagrangianConfig {
            n_particles: 10,
            dt: 0.1,
            seed: Some(3),
        })
        .unwrap();
        let initial = sim.initialize();
        let state = run_checked(&sim, initial.clone(), 0, |_, _| {}).unwrap();
        assert_eq!(state, initial);
    }

    #[test]
    fn test_run_checked_stops_on_violation() {
        // A start that breaks the pole copy is repaired by the first step,
        // so the checked run succeeds.
        let sim = EulerianSimulator::new(EulerianConfig {
            n_lat: 5,
            n_alt: 5,
            ..Default::default()
        })
        .unwrap();
        let mut field = crate::core_types::ScalarField::zeros(5, 5);
        field.set(2, 0, 3.0);
        let start = sim.initialize_with(field).unwrap();
        assert!(sim.check_invariants(&start).is_err());
        assert!(run_checked(&sim, start, 3, |_, _| {}).is_ok());

        // A wind model that produces NaN poisons the field on the first step
        struct NanWind;
        impl crate::wind::WindModel for NanWind {
            fn velocity_at(&self, _lat: f64, _alt: f64) -> crate::core_types::Vec2 {
                crate::core_types::Vec2::new(f64::NAN, 0.0)
            }
        }
        let config = EulerianConfig {
            n_lat: 5,
            n_alt: 5,
            ..Default::default()
        };
        let sim = EulerianSimulator::with_wind(config, NanWind).unwrap();
        let mut steps_observed = 0;
        let result = run_checked(&sim, sim.initialize(), 10, |_, _| steps_observed += 1);
        assert!(matches!(
            result,
            Err(SimulationError::InvariantViolated { step: 1, .. })
        ));
        assert_eq!(steps_observed, 0);
    }
}
