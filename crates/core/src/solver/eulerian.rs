//! Eulerian grid simulator
//!
//! Tracks a scalar (moisture, temperature, tracer) on a fixed latitude/altitude
//! lattice and advects it with the sampled wind.
//!
//! # Update Rule
//!
//! Each step, for every node:
//!
//! ```text
//! f ← f - dt · (v_lat · ∂f/∂lat + v_alt · ∂f/∂alt)
//! f ← f + dt · S
//! ```
//!
//! followed by the boundary policy in [`super::boundary`]. Gradients are taken
//! with the centered scheme in [`super::gradient`] on the pre-step field.
//!
//! # Stability
//!
//! Explicit forward-Euler advection has no stability guarantee. A `dt` that is
//! large relative to the grid spacing makes the field grow without bound. That
//! is observable through [`ScalarField::is_bounded`] and the Courant number,
//! never as an error from `step`.

use super::boundary::{apply_boundaries, boundary_violation};
use super::gradient::{gradient_alt, gradient_lat};
use super::r#trait::Simulator;
use super::stability::{check_courant, courant_number};
use crate::core_types::{CoordinateMesh, Domain, ScalarField};
use crate::error::SimulationError;
use crate::simulation::EulerianConfig;
use crate::wind::{sample_mesh, HadleyCell, WindModel, WindSample};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// State of one grid run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EulerianState {
    /// Scalar values, shape `(n_alt, n_lat)`
    pub field: ScalarField,
    /// Number of steps taken
    pub step: u64,
    /// Simulated time (`step · dt`, accumulated)
    pub time: f64,
}

/// Finite-difference advection of a scalar field on a fixed grid
///
/// The wind and the source term do not change over time, so both are sampled
/// once at construction and reused by every step.
pub struct EulerianSimulator<W: WindModel = HadleyCell> {
    config: EulerianConfig,
    model: W,
    mesh: CoordinateMesh,
    wind: WindSample,
    source: Option<ScalarField>,
    courant: f64,
}

impl EulerianSimulator<HadleyCell> {
    /// Create a grid simulator driven by the default circulation cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an unusable configuration and
    /// `CourantLimitExceeded` when `config.max_courant` is set and exceeded.
    pub fn new(config: EulerianConfig) -> Result<Self, SimulationError> {
        Self::with_wind(config, HadleyCell::default())
    }
}

impl<W: WindModel> EulerianSimulator<W> {
    /// Create a grid simulator driven by an arbitrary wind model
    ///
    /// # Errors
    ///
    /// Same as [`EulerianSimulator::new`].
    pub fn with_wind(config: EulerianConfig, model: W) -> Result<Self, SimulationError> {
        config.validate()?;

        let mesh = CoordinateMesh::new(&Domain::MERIDIONAL, config.n_alt, config.n_lat);
        let wind = sample_mesh(&model, &mesh);
        let source = config.source.map(|s| s.sample_mesh(&mesh));
        let courant = courant_number(&wind, config.dt);

        if let Some(limit) = config.max_courant {
            check_courant(courant, limit)?;
        }
        if courant > 1.0 {
            warn!(
                "Courant number {:.3} > 1 for dt={}: explicit advection may grow without bound",
                courant, config.dt
            );
        }

        info!(
            "Eulerian simulator initialized: {}x{} grid (alt x lat), dt={}, courant={:.4}, source={}",
            config.n_alt,
            config.n_lat,
            config.dt,
            courant,
            if source.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            config,
            model,
            mesh,
            wind,
            source,
            courant,
        })
    }

    /// All-zero initial state
    pub fn initialize(&self) -> EulerianState {
        EulerianState {
            field: ScalarField::zeros(self.config.n_alt, self.config.n_lat),
            step: 0,
            time: 0.0,
        }
    }

    /// Start from a caller-supplied field
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `field` does not match the grid shape.
    pub fn initialize_with(&self, field: ScalarField) -> Result<EulerianState, SimulationError> {
        let state = EulerianState {
            field,
            step: 0,
            time: 0.0,
        };
        self.check_shape(&state)?;
        Ok(state)
    }

    /// Reject a state whose field was not built for this grid
    fn check_shape(&self, state: &EulerianState) -> Result<(), SimulationError> {
        let expected = (self.config.n_alt, self.config.n_lat);
        let actual = state.field.shape();
        if actual != expected || state.field.as_slice().len() != expected.0 * expected.1 {
            return Err(SimulationError::ShapeMismatch { expected, actual });
        }
        Ok(())
    }

    /// Advance a state of unknown origin by one step
    ///
    /// Use this for states decoded from storage or built by hand.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the field does not match this grid. The
    /// state is left untouched in that case.
    pub fn try_step(&self, mut state: EulerianState) -> Result<EulerianState, SimulationError> {
        self.check_shape(&state)?;
        self.step_in_place(&mut state);
        Ok(state)
    }

    /// Advance `state` by one step without moving it
    ///
    /// # Panics
    ///
    /// Panics if the field shape differs from the configured grid, i.e. the
    /// state came from a different simulator. See [`EulerianSimulator::try_step`].
    pub fn step_in_place(&self, state: &mut EulerianState) {
        if let Err(e) = self.check_shape(state) {
            panic!("state does not belong to this simulator: {e}");
        }
        let dt = self.config.dt;
        let n_lat = self.config.n_lat;

        let d_lat = gradient_lat(&state.field);
        let d_alt = gradient_alt(&state.field);
        let v_lat = self.wind.v_lat.as_slice();
        let v_alt = self.wind.v_alt.as_slice();
        let source = self.source.as_ref().map(ScalarField::as_slice);

        state
            .field
            .as_mut_slice()
            .par_chunks_mut(n_lat)
            .enumerate()
            .for_each(|(a, row)| {
                let offset = a * n_lat;
                for (l, value) in row.iter_mut().enumerate() {
                    let idx = offset + l;
                    let advection =
                        v_lat[idx] * d_lat.as_slice()[idx] + v_alt[idx] * d_alt.as_slice()[idx];
                    *value -= dt * advection;
                    if let Some(source) = source {
                        *value += dt * source[idx];
                    }
                }
            });

        apply_boundaries(&mut state.field);

        state.step += 1;
        state.time += dt;

        debug!(
            "Eulerian step {}: t={:.3}, max|f|={:.6}",
            state.step,
            state.time,
            state.field.max_abs()
        );
    }

    /// Wind sampled at every grid node, for drawing the vector field
    pub fn wind(&self) -> &WindSample {
        &self.wind
    }

    /// Wind model driving this simulator
    pub fn wind_model(&self) -> &W {
        &self.model
    }

    /// Latitude/altitude of every node
    pub fn mesh(&self) -> &CoordinateMesh {
        &self.mesh
    }

    /// Source rate at every node, if the source is enabled
    pub fn source_field(&self) -> Option<&ScalarField> {
        self.source.as_ref()
    }

    /// Courant number of the configured `dt` on this grid
    pub fn courant_number(&self) -> f64 {
        self.courant
    }

    /// Configuration this simulator was built from
    pub fn config(&self) -> &EulerianConfig {
        &self.config
    }
}

impl<W: WindModel> Simulator for EulerianSimulator<W> {
    type State = EulerianState;

    fn initial_state(&self) -> EulerianState {
        self.initialize()
    }

    fn step(&self, mut state: EulerianState) -> EulerianState {
        self.step_in_place(&mut state);
        state
    }

    fn dt(&self) -> f64 {
        self.config.dt
    }

    fn check_invariants(&self, state: &EulerianState) -> Result<(), SimulationError> {
        let expected = (self.config.n_alt, self.config.n_lat);
        let violation = if state.field.shape() == expected {
            if state.field.is_finite() {
                boundary_violation(&state.field)
            } else {
                Some("field contains non-finite values".to_string())
            }
        } else {
            Some(format!(
                "grid shape changed from {:?} to {:?}",
                expected,
                state.field.shape()
            ))
        };

        match violation {
            Some(reason) => Err(SimulationError::InvariantViolated {
                step: state.step,
                reason,
            }),
            None => Ok(()),
        }
    }
}
