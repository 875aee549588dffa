//! Rectangular physical domain shared by the grid and particle simulators.

use super::vec2::Vec2;
use serde::{Deserialize, Serialize};

/// Latitude/altitude bounds of the meridional plane
///
/// Both simulators work on the same fixed box: latitude from pole to pole and
/// altitude from the surface to the top of the circulation cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Southern edge in degrees
    pub lat_min: f64,
    /// Northern edge in degrees
    pub lat_max: f64,
    /// Surface altitude in km
    pub alt_min: f64,
    /// Top of the domain in km
    pub alt_max: f64,
}

impl Domain {
    /// Pole-to-pole, 0-30 km meridional plane
    pub const MERIDIONAL: Domain = Domain {
        lat_min: -90.0,
        lat_max: 90.0,
        alt_min: 0.0,
        alt_max: 30.0,
    };

    /// Latitude extent in degrees
    #[inline]
    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    /// Altitude extent in km
    #[inline]
    pub fn alt_span(&self) -> f64 {
        self.alt_max - self.alt_min
    }

    /// Whether a position lies inside the closed domain box
    #[inline]
    pub fn contains(&self, position: Vec2) -> bool {
        (self.lat_min..=self.lat_max).contains(&position.x)
            && (self.alt_min..=self.alt_max).contains(&position.y)
    }

    /// Clamp a position onto the domain box
    ///
    /// This is a hard clamp: a particle pushed past an edge sits on that edge
    /// until the local wind carries it back inside. Nothing is reflected.
    #[inline]
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(self.lat_min, self.lat_max),
            position.y.clamp(self.alt_min, self.alt_max),
        )
    }

    /// `n` evenly spaced latitudes from `lat_min` to `lat_max` inclusive
    pub fn latitudes(&self, n: usize) -> Vec<f64> {
        linspace(self.lat_min, self.lat_max, n)
    }

    /// `n` evenly spaced altitudes from `alt_min` to `alt_max` inclusive
    pub fn altitudes(&self, n: usize) -> Vec<f64> {
        linspace(self.alt_min, self.alt_max, n)
    }
}

impl Default for Domain {
    fn default() -> Self {
        Self::MERIDIONAL
    }
}

/// Evenly spaced samples over `[start, stop]`, endpoints included
///
/// The last sample is pinned to `stop` exactly so the top row of a grid sits
/// on the domain edge without rounding drift.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            values[n - 1] = stop;
            values
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_endpoints() {
        let lats = Domain::MERIDIONAL.latitudes(10);
        assert_eq!(lats.len(), 10);
        assert_eq!(lats[0], -90.0);
        assert_eq!(lats[9], 90.0);
        assert!((lats[1] - (-70.0)).abs() < 1e-12);

        assert_eq!(linspace(0.0, 30.0, 1), vec![0.0]);
        assert!(linspace(0.0, 30.0, 0).is_empty());
    }

    #[test]
    fn test_clamp_is_hard_not_reflective() {
        let domain = Domain::MERIDIONAL;
        let clamped = domain.clamp(Vec2::new(95.0, -2.0));
        assert_eq!(clamped, Vec2::new(90.0, 0.0));

        let clamped = domain.clamp(Vec2::new(-120.0, 31.5));
        assert_eq!(clamped, Vec2::new(-90.0, 30.0));

        let inside = Vec2::new(12.5, 7.0);
        assert_eq!(domain.clamp(inside), inside);
    }

    #[test]
    fn test_contains_edges() {
        let domain = Domain::MERIDIONAL;
        assert!(domain.contains(Vec2::new(-90.0, 0.0)));
        assert!(domain.contains(Vec2::new(90.0, 30.0)));
        assert!(!domain.contains(Vec2::new(90.1, 10.0)));
        assert!(!domain.contains(Vec2::new(0.0, -0.001)));
    }
}
