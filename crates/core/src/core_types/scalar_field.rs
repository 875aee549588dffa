//! Scalar field storage for the Eulerian grid
//!
//! Fields are stored as a flat `Vec<f64>` in row-major order, one row per
//! altitude level and one column per latitude: `index = alt * n_lat + lat`.

use super::domain::Domain;
use crate::error::SimulationError;
use serde::{Deserialize, Serialize};

/// 2D scalar field of shape `(n_alt, n_lat)`, indexed `[altitude][latitude]`
///
/// Deserialization goes through [`ScalarField::from_vec`], so a decoded field
/// always holds exactly `n_alt * n_lat` values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScalarField")]
pub struct ScalarField {
    data: Vec<f64>,
    n_alt: usize,
    n_lat: usize,
}

/// Unchecked wire form of [`ScalarField`]
#[derive(Deserialize)]
struct RawScalarField {
    data: Vec<f64>,
    n_alt: usize,
    n_lat: usize,
}

impl TryFrom<RawScalarField> for ScalarField {
    type Error = SimulationError;

    fn try_from(raw: RawScalarField) -> Result<Self, Self::Error> {
        ScalarField::from_vec(raw.n_alt, raw.n_lat, raw.data)
    }
}

impl ScalarField {
    /// Create a field of the given shape, initialized to zero
    #[must_use]
    pub fn zeros(n_alt: usize, n_lat: usize) -> Self {
        Self {
            data: vec![0.0; n_alt * n_lat],
            n_alt,
            n_lat,
        }
    }

    /// Create a field by evaluating `f(alt_index, lat_index)` at every node
    pub fn from_fn(n_alt: usize, n_lat: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(n_alt * n_lat);
        for a in 0..n_alt {
            for l in 0..n_lat {
                data.push(f(a, l));
            }
        }
        Self { data, n_alt, n_lat }
    }

    /// Wrap row-major data of the given shape
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if `data.len() != n_alt * n_lat`.
    pub fn from_vec(n_alt: usize, n_lat: usize, data: Vec<f64>) -> Result<Self, SimulationError> {
        if n_alt.checked_mul(n_lat) != Some(data.len()) {
            return Err(SimulationError::ShapeMismatch {
                expected: (n_alt, n_lat),
                actual: (data.len(), 1),
            });
        }
        Ok(Self { data, n_alt, n_lat })
    }

    /// Shape as `(n_alt, n_lat)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_alt, self.n_lat)
    }

    /// Number of altitude levels (rows)
    #[inline]
    pub fn n_alt(&self) -> usize {
        self.n_alt
    }

    /// Number of latitude columns
    #[inline]
    pub fn n_lat(&self) -> usize {
        self.n_lat
    }

    #[inline]
    fn index(&self, alt: usize, lat: usize) -> usize {
        alt * self.n_lat + lat
    }

    /// Value at `[alt][lat]`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[inline]
    pub fn get(&self, alt: usize, lat: usize) -> f64 {
        assert!(alt < self.n_alt && lat < self.n_lat, "grid index out of range");
        self.data[self.index(alt, lat)]
    }

    /// Overwrite the value at `[alt][lat]`
    #[inline]
    pub fn set(&mut self, alt: usize, lat: usize, value: f64) {
        assert!(alt < self.n_alt && lat < self.n_lat, "grid index out of range");
        let idx = self.index(alt, lat);
        self.data[idx] = value;
    }

    /// One altitude level
    #[inline]
    pub fn row(&self, alt: usize) -> &[f64] {
        &self.data[alt * self.n_lat..(alt + 1) * self.n_lat]
    }

    /// One altitude level, mutable
    #[inline]
    pub fn row_mut(&mut self, alt: usize) -> &mut [f64] {
        let n_lat = self.n_lat;
        &mut self.data[alt * n_lat..(alt + 1) * n_lat]
    }

    /// Copy of one latitude column, bottom to top
    pub fn column(&self, lat: usize) -> Vec<f64> {
        (0..self.n_alt).map(|a| self.get(a, lat)).collect()
    }

    /// Raw row-major values
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Raw row-major values, mutable
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Largest absolute value in the field (`NaN` propagates as `NaN`)
    pub fn max_abs(&self) -> f64 {
        self.data.iter().fold(0.0_f64, |acc, v| {
            if v.is_nan() || acc.is_nan() {
                f64::NAN
            } else {
                acc.max(v.abs())
            }
        })
    }

    /// Whether every value is finite
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    /// Whether every value is finite and within `[-bound, bound]`
    pub fn is_bounded(&self, bound: f64) -> bool {
        self.data.iter().all(|v| v.is_finite() && v.abs() <= bound)
    }
}

/// Latitude/altitude coordinate of every grid node
///
/// Equivalent to a `meshgrid(latitudes, altitudes)`: `lat` varies along a
/// row, `alt` varies down a column. Built once and never changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMesh {
    /// Latitude (degrees) at every node
    pub lat: ScalarField,
    /// Altitude (km) at every node
    pub alt: ScalarField,
}

impl CoordinateMesh {
    /// Build the mesh for an `(n_alt, n_lat)` grid over `domain`
    pub fn new(domain: &Domain, n_alt: usize, n_lat: usize) -> Self {
        let lats = domain.latitudes(n_lat);
        let alts = domain.altitudes(n_alt);
        Self {
            lat: ScalarField::from_fn(n_alt, n_lat, |_, l| lats[l]),
            alt: ScalarField::from_fn(n_alt, n_lat, |a, _| alts[a]),
        }
    }

    /// Shape as `(n_alt, n_lat)`
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.lat.shape()
    }

    /// Index of the node closest to `(lat, alt)`
    ///
    /// Ties go to the lower index.
    pub fn nearest_node(&self, lat: f64, alt: f64) -> (usize, usize) {
        let a = nearest_index(self.alt.column(0).into_iter(), alt);
        let l = nearest_index(self.lat.row(0).iter().copied(), lat);
        (a, l)
    }
}

fn nearest_index(values: impl Iterator<Item = f64>, target: f64) -> usize {
    values
        .enumerate()
        .min_by(|(_, x), (_, y)| (x - target).abs().total_cmp(&(y - target).abs()))
        .map_or(0, |(i, _)| i)
}
