//! Simulator configuration
//!
//! Defaults reproduce the reference runs: a 50 x 30 grid and 1000 particles,
//! both stepped with `dt = 0.1`.

use crate::error::SimulationError;
use crate::solver::GaussianSource;
use serde::{Deserialize, Serialize};

/// Minimum nodes per grid axis
///
/// With fewer than three rows the surface copy and the zero top row cannot
/// both hold after a step.
pub const MIN_GRID_NODES: usize = 3;

fn check_dt(dt: f64) -> Result<(), SimulationError> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(SimulationError::InvalidConfig {
            field: "dt",
            reason: format!("must be finite and non-negative, got {dt}"),
        });
    }
    Ok(())
}

/// Configuration for the Eulerian grid simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EulerianConfig {
    /// Grid nodes along latitude (columns)
    pub n_lat: usize,
    /// Grid nodes along altitude (rows)
    pub n_alt: usize,
    /// Timestep
    pub dt: f64,
    /// Heating term added each step; `None` disables it
    pub source: Option<GaussianSource>,
    /// Reject configurations whose Courant number exceeds this limit.
    /// `None` (the default) never rejects.
    pub max_courant: Option<f64>,
}

impl Default for EulerianConfig {
    fn default() -> Self {
        Self {
            n_lat: 50,
            n_alt: 30,
            dt: 0.1,
            source: Some(GaussianSource::equatorial()),
            max_courant: None,
        }
    }
}

impl EulerianConfig {
    /// Check grid size, timestep and Courant limit
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.n_lat < MIN_GRID_NODES {
            return Err(SimulationError::InvalidConfig {
                field: "n_lat",
                reason: format!("needs at least {MIN_GRID_NODES} nodes, got {}", self.n_lat),
            });
        }
        if self.n_alt < MIN_GRID_NODES {
            return Err(SimulationError::InvalidConfig {
                field: "n_alt",
                reason: format!("needs at least {MIN_GRID_NODES} nodes, got {}", self.n_alt),
            });
        }
        check_dt(self.dt)?;
        if let Some(limit) = self.max_courant {
            if !(limit.is_finite() && limit > 0.0) {
                return Err(SimulationError::InvalidConfig {
                    field: "max_courant",
                    reason: format!("must be finite and positive, got {limit}"),
                });
            }
        }
        Ok(())
    }
}

/// Configuration for the Lagrangian particle simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LagrangianConfig {
    /// Number of particles, fixed for the run
    pub n_particles: usize,
    /// Timestep
    pub dt: f64,
    /// Seed for the initial positions; `None` draws one from the OS
    pub seed: Option<u64>,
}

impl Default for LagrangianConfig {
    fn default() -> Self {
        Self {
            n_particles: 1000,
            dt: 0.1,
            seed: None,
        }
    }
}

impl LagrangianConfig {
    /// Check particle count and timestep
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.n_particles == 0 {
            return Err(SimulationError::InvalidConfig {
                field: "n_particles",
                reason: "must be at least 1".to_string(),
            });
        }
        check_dt(self.dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EulerianConfig::default().validate().is_ok());
        assert!(LagrangianConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        let cfg = EulerianConfig {
            n_alt: 2,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SimulationError::InvalidConfig { field: "n_alt", .. })
        ));

        let cfg = EulerianConfig {
            n_lat: 1,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SimulationError::InvalidConfig { field: "n_lat", .. })
        ));
    }

    #[test]
    fn test_rejects_bad_dt() {
        for dt in [-0.1, f64::NAN, f64::INFINITY] {
            let cfg = EulerianConfig {
                dt,
                ..Default::default()
            };
            assert!(cfg.validate().is_err(), "dt={dt}");

            let cfg = LagrangianConfig {
                dt,
                ..Default::default()
            };
            assert!(cfg.validate().is_err(), "dt={dt}");
        }

        // Zero is a valid (frozen) timestep
        let cfg = EulerianConfig {
            dt: 0.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_particle_set() {
        let cfg = LagrangianConfig {
            n_particles: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(SimulationError::InvalidConfig {
                field: "n_particles",
                ..
            })
        ));
    }
}
