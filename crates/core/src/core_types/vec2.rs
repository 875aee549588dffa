//! Vector type alias for meridional-plane positions and velocities.

use nalgebra::Vector2;

/// 2D vector in the meridional plane.
///
/// This is a simple alias for `nalgebra::Vector2<f64>`. For positions `x` is
/// latitude in degrees and `y` is altitude in kilometres; for wind vectors `x`
/// is the lateral velocity and `y` the vertical velocity.
pub type Vec2 = Vector2<f64>;
