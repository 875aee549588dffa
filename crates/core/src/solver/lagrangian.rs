//! Lagrangian particle simulator
//!
//! Tracks a fixed set of passive particles in the meridional plane. Each step
//! samples the wind at a particle's current position, moves it one explicit
//! Euler step, and clamps it back into the domain. Particles are independent,
//! so the update runs in parallel with no ordering dependence.

use super::r#trait::Simulator;
use crate::core_types::{Domain, Vec2};
use crate::error::SimulationError;
use crate::simulation::LagrangianConfig;
use crate::wind::{sample_wind, HadleyCell, WindModel};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// State of one particle run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagrangianState {
    /// Particle positions (`x` = latitude, `y` = altitude)
    pub particles: Vec<Vec2>,
    /// Number of steps taken
    pub step: u64,
    /// Simulated time (`step · dt`, accumulated)
    pub time: f64,
}

impl LagrangianState {
    /// Mean position of all particles
    pub fn centroid(&self) -> Vec2 {
        if self.particles.is_empty() {
            return Vec2::zeros();
        }
        let sum: Vec2 = self.particles.iter().sum();
        sum / self.particles.len() as f64
    }

    /// Number of particles sitting exactly on any domain edge
    pub fn count_on_edges(&self, domain: &Domain) -> usize {
        self.particles
            .iter()
            .filter(|p| {
                p.x == domain.lat_min
                    || p.x == domain.lat_max
                    || p.y == domain.alt_min
                    || p.y == domain.alt_max
            })
            .count()
    }
}

/// Explicit particle advection through the wind field
pub struct LagrangianSimulator<W: WindModel = HadleyCell> {
    config: LagrangianConfig,
    domain: Domain,
    model: W,
}

impl LagrangianSimulator<HadleyCell> {
    /// Create a particle simulator driven by the default circulation cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an unusable configuration.
    pub fn new(config: LagrangianConfig) -> Result<Self, SimulationError> {
        Self::with_wind(config, HadleyCell::default())
    }
}

impl<W: WindModel> LagrangianSimulator<W> {
    /// Create a particle simulator driven by an arbitrary wind model
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for an unusable configuration.
    pub fn with_wind(config: LagrangianConfig, model: W) -> Result<Self, SimulationError> {
        config.validate()?;
        info!(
            "Lagrangian simulator initialized: {} particles, dt={}, seed={:?}",
            config.n_particles, config.dt, config.seed
        );
        Ok(Self {
            config,
            domain: Domain::MERIDIONAL,
            model,
        })
    }

    /// Draw particle positions uniformly over the domain
    ///
    /// Each particle takes a latitude in `[lat_min, lat_max)` then an altitude
    /// in `[alt_min, alt_max)`. A configured seed makes the draw reproducible.
    pub fn initialize(&self) -> LagrangianState {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let d = self.domain;
        let particles = (0..self.config.n_particles)
            .map(|_| {
                let lat = rng.random_range(d.lat_min..d.lat_max);
                let alt = rng.random_range(d.alt_min..d.alt_max);
                Vec2::new(lat, alt)
            })
            .collect();

        LagrangianState {
            particles,
            step: 0,
            time: 0.0,
        }
    }

    /// Start from caller-supplied positions, clamped into the domain
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the number of positions differs from
    /// `config.n_particles`.
    pub fn initialize_with(&self, positions: Vec<Vec2>) -> Result<LagrangianState, SimulationError> {
        if positions.len() != self.config.n_particles {
            return Err(SimulationError::ShapeMismatch {
                expected: (self.config.n_particles, 1),
                actual: (positions.len(), 1),
            });
        }
        let particles = positions.into_iter().map(|p| self.domain.clamp(p)).collect();
        Ok(LagrangianState {
            particles,
            step: 0,
            time: 0.0,
        })
    }

    /// Advance `state` by one step without moving it
    pub fn step_in_place(&self, state: &mut LagrangianState) {
        let dt = self.config.dt;
        let domain = self.domain;
        let model = &self.model;

        state.particles.par_iter_mut().for_each(|p| {
            let v = model.velocity_at(p.x, p.y);
            *p = domain.clamp(*p + v * dt);
        });

        state.step += 1;
        state.time += dt;

        debug!(
            "Lagrangian step {}: t={:.3}, {} particles",
            state.step,
            state.time,
            state.particles.len()
        );
    }

    /// Wind at arbitrary positions, for drawing the vector field
    pub fn sample_wind(&self, positions: &[Vec2]) -> Vec<Vec2> {
        sample_wind(&self.model, positions)
    }

    /// Domain the particles are clamped to
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Configuration this simulator was built from
    pub fn config(&self) -> &LagrangianConfig {
        &self.config
    }
}

impl<W: WindModel> Simulator for LagrangianSimulator<W> {
    type State = LagrangianState;

    fn initial_state(&self) -> LagrangianState {
        self.initialize()
    }

    fn step(&self, mut state: LagrangianState) -> LagrangianState {
        self.step_in_place(&mut state);
        state
    }

    fn dt(&self) -> f64 {
        self.config.dt
    }

    fn check_invariants(&self, state: &LagrangianState) -> Result<(), SimulationError> {
        if state.particles.len() != self.config.n_particles {
            return Err(SimulationError::InvariantViolated {
                step: state.step,
                reason: format!(
                    "particle count changed from {} to {}",
                    self.config.n_particles,
                    state.particles.len()
                ),
            });
        }
        if let Some((i, p)) = state
            .particles
            .iter()
            .enumerate()
            .find(|(_, p)| !self.domain.contains(**p))
        {
            return Err(SimulationError::InvariantViolated {
                step: state.step,
                reason: format!("particle {i} left the domain at ({}, {})", p.x, p.y),
            });
        }
        Ok(())
    }
}
