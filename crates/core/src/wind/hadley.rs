//! Analytic single-cell meridional circulation
//!
//! ```text
//! v_lat =  sin(lat) · cos(π · alt / H)
//! v_alt = -cos(lat) · sin(π · alt / H)
//! ```
//!
//! with `lat` in radians and `H` the depth of the cell (30 km). Below `H/2`
//! the lateral flow points away from the equator, above `H/2` it points back
//! toward it. The vertical component vanishes at the surface and at `H` and is
//! negative everywhere inside the cell between the poles.

use super::WindModel;
use crate::core_types::Vec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Default depth of the circulation cell (km)
pub const DEFAULT_CELL_TOP_KM: f64 = 30.0;

/// Single convective cell spanning the full meridional plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HadleyCell {
    /// Altitude (km) at which the vertical phase completes half a period
    pub top_km: f64,
}

impl HadleyCell {
    /// Cell with the given vertical depth
    pub const fn new(top_km: f64) -> Self {
        Self { top_km }
    }
}

impl Default for HadleyCell {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_TOP_KM)
    }
}

impl WindModel for HadleyCell {
    #[inline]
    fn velocity_at(&self, lat: f64, alt: f64) -> Vec2 {
        let phi = lat.to_radians();
        let phase = PI * alt / self.top_km;
        Vec2::new(phi.sin() * phase.cos(), -phi.cos() * phase.sin())
    }
}

/// Wind of the default 30 km cell at `(lat, alt)`
///
/// Total over all real inputs; positions outside the domain still return a
/// well-defined (if meaningless) velocity.
#[inline]
pub fn wind_field(lat: f64, alt: f64) -> Vec2 {
    HadleyCell::default().velocity_at(lat, alt)
}
