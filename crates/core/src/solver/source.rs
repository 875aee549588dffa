//! Localized Gaussian heating for the grid simulator

use crate::core_types::{CoordinateMesh, ScalarField};
use serde::{Deserialize, Serialize};

/// Separable Gaussian source term
///
/// ```text
/// S(lat, alt) = A · exp(-((lat - lat₀) / σ_lat)²) · exp(-((alt - alt₀) / σ_alt)²)
/// ```
///
/// The simulator adds `dt · S` to every node once per step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GaussianSource {
    /// Peak rate at the centre (field units per time unit)
    pub amplitude: f64,
    /// Latitude of the centre (degrees)
    pub center_lat: f64,
    /// Altitude of the centre (km)
    pub center_alt: f64,
    /// Lateral e-folding scale (degrees)
    pub lat_scale: f64,
    /// Vertical e-folding scale (km)
    pub alt_scale: f64,
}

impl GaussianSource {
    /// Equatorial heating at mid-altitude: 0.1 peak, centred on (0°, 15 km),
    /// 15° wide and 5 km deep
    pub const fn equatorial() -> Self {
        Self {
            amplitude: 0.1,
            center_lat: 0.0,
            center_alt: 15.0,
            lat_scale: 15.0,
            alt_scale: 5.0,
        }
    }

    /// Source rate at one position
    #[inline]
    pub fn value_at(&self, lat: f64, alt: f64) -> f64 {
        let lat_term = (-((lat - self.center_lat) / self.lat_scale).powi(2)).exp();
        let alt_term = (-((alt - self.center_alt) / self.alt_scale).powi(2)).exp();
        self.amplitude * lat_term * alt_term
    }

    /// Source rate at every node of a mesh
    pub fn sample_mesh(&self, mesh: &CoordinateMesh) -> ScalarField {
        let (n_alt, n_lat) = mesh.shape();
        ScalarField::from_fn(n_alt, n_lat, |a, l| {
            self.value_at(mesh.lat.get(a, l), mesh.alt.get(a, l))
        })
    }
}

impl Default for GaussianSource {
    fn default() -> Self {
        Self::equatorial()
    }
}
