//! Wind field shared by the grid and particle simulators
//!
//! The wind is not stored state: it is a pure function of position. Both
//! simulators are generic over [`WindModel`] and evaluate it either node by
//! node ([`sample_mesh`]) or particle by particle ([`sample_wind`]).

pub mod hadley;

pub use hadley::{wind_field, HadleyCell, DEFAULT_CELL_TOP_KM};

use crate::core_types::{CoordinateMesh, ScalarField, Vec2};
use rayon::prelude::*;

/// Velocity field over the meridional plane
///
/// Implementations must be pure: the same position always yields the same
/// velocity, with no interior mutation. `Send + Sync` lets the simulators
/// evaluate it from rayon workers.
pub trait WindModel: Send + Sync {
    /// `(v_lat, v_alt)` at latitude `lat` (degrees) and altitude `alt` (km)
    fn velocity_at(&self, lat: f64, alt: f64) -> Vec2;
}

impl<W: WindModel + ?Sized> WindModel for &W {
    #[inline]
    fn velocity_at(&self, lat: f64, alt: f64) -> Vec2 {
        (**self).velocity_at(lat, alt)
    }
}

/// Wind sampled at every node of a grid
#[derive(Debug, Clone, PartialEq)]
pub struct WindSample {
    /// Lateral velocity at every node
    pub v_lat: ScalarField,
    /// Vertical velocity at every node
    pub v_alt: ScalarField,
}

impl WindSample {
    /// Largest `|v_lat| + |v_alt|` over all nodes
    pub fn max_speed_sum(&self) -> f64 {
        self.v_lat
            .as_slice()
            .iter()
            .zip(self.v_alt.as_slice())
            .map(|(u, w)| u.abs() + w.abs())
            .fold(0.0, f64::max)
    }
}

/// Evaluate `model` at a batch of positions (`x` = latitude, `y` = altitude)
///
/// Output order matches input order.
pub fn sample_wind<W: WindModel + ?Sized>(model: &W, positions: &[Vec2]) -> Vec<Vec2> {
    positions
        .par_iter()
        .map(|p| model.velocity_at(p.x, p.y))
        .collect()
}

/// Evaluate `model` at every node of `mesh`
pub fn sample_mesh<W: WindModel + ?Sized>(model: &W, mesh: &CoordinateMesh) -> WindSample {
    let (n_alt, n_lat) = mesh.shape();
    let velocities: Vec<Vec2> = mesh
        .lat
        .as_slice()
        .par_iter()
        .zip(mesh.alt.as_slice().par_iter())
        .map(|(&lat, &alt)| model.velocity_at(lat, alt))
        .collect();

    let v_lat = ScalarField::from_fn(n_alt, n_lat, |a, l| velocities[a * n_lat + l].x);
    let v_alt = ScalarField::from_fn(n_alt, n_lat, |a, l| velocities[a * n_lat + l].y);
    WindSample { v_lat, v_alt }
}
