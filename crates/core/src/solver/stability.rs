//! Stability diagnostics for the explicit grid scheme
//!
//! Forward-Euler time stepping with centered differences has no built-in
//! stability guarantee. With a large `dt` relative to the grid spacing the
//! field grows without bound. Nothing here changes the update; these helpers
//! only measure how close a run is to that regime.

use crate::core_types::ScalarField;
use crate::error::SimulationError;
use crate::wind::WindSample;

/// Courant number of the scheme for a sampled wind and timestep
///
/// Spacing is one grid index along each axis, matching the gradient, so this
/// is `dt · max(|v_lat| + |v_alt|)` over all nodes.
pub fn courant_number(wind: &WindSample, dt: f64) -> f64 {
    dt * wind.max_speed_sum()
}

/// Fail if `courant` exceeds `limit`
///
/// # Errors
///
/// Returns `CourantLimitExceeded` when `courant > limit`.
pub fn check_courant(courant: f64, limit: f64) -> Result<(), SimulationError> {
    if courant > limit {
        return Err(SimulationError::CourantLimitExceeded { courant, limit });
    }
    Ok(())
}

/// Fail if any value in `field` is non-finite or larger than `bound` in magnitude
///
/// # Errors
///
/// Returns `Unbounded` carrying the field's largest magnitude.
pub fn check_bounded(field: &ScalarField, bound: f64) -> Result<(), SimulationError> {
    if field.is_bounded(bound) {
        Ok(())
    } else {
        Err(SimulationError::Unbounded {
            max_abs: field.max_abs(),
            bound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courant_scales_with_dt() {
        let wind = WindSample {
            v_lat: ScalarField::from_fn(3, 3, |_, l| l as f64 * 0.5),
            v_alt: ScalarField::from_fn(3, 3, |a, _| -(a as f64) * 0.25),
        };
        // max |v_lat| + |v_alt| = 1.0 + 0.5
        assert_eq!(courant_number(&wind, 1.0), 1.5);
        assert_eq!(courant_number(&wind, 0.1), 0.1 * 1.5);
        assert_eq!(courant_number(&wind, 0.0), 0.0);
    }

    #[test]
    fn test_check_courant() {
        assert!(check_courant(0.5, 1.0).is_ok());
        assert!(check_courant(1.0, 1.0).is_ok());
        assert_eq!(
            check_courant(1.2, 1.0),
            Err(SimulationError::CourantLimitExceeded {
                courant: 1.2,
                limit: 1.0
            })
        );
    }

    #[test]
    fn test_check_bounded() {
        let mut field = ScalarField::zeros(3, 3);
        field.set(1, 1, 50.0);
        assert!(check_bounded(&field, 100.0).is_ok());
        assert!(matches!(
            check_bounded(&field, 10.0),
            Err(SimulationError::Unbounded { max_abs, .. }) if max_abs == 50.0
        ));

        field.set(0, 2, f64::INFINITY);
        assert!(check_bounded(&field, f64::MAX).is_err());
    }
}
