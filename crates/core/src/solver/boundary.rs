//! Boundary policy for the grid simulator
//!
//! Applied after every update, in a fixed order. Later writes win at the
//! corners, so the order matters:
//!
//! 1. South pole: column 0 takes the values of column 1
//! 2. North pole: last column takes the values of the second-to-last column
//! 3. Surface: row 0 takes the values of row 1
//! 4. Top: last row is forced to zero (Dirichlet)

use crate::core_types::ScalarField;

/// Apply the pole, surface and top conditions in place
pub fn apply_boundaries(field: &mut ScalarField) {
    let (n_alt, n_lat) = field.shape();

    for a in 0..n_alt {
        let row = field.row_mut(a);
        row[0] = row[1];
    }
    for a in 0..n_alt {
        let row = field.row_mut(a);
        row[n_lat - 1] = row[n_lat - 2];
    }

    let (surface, above) = field.as_mut_slice().split_at_mut(n_lat);
    surface.copy_from_slice(&above[..n_lat]);

    field.row_mut(n_alt - 1).fill(0.0);
}

/// Describe the first boundary condition `field` violates, if any
///
/// Comparisons are exact: the conditions are copies, not approximations.
pub fn boundary_violation(field: &ScalarField) -> Option<String> {
    let (n_alt, n_lat) = field.shape();

    for a in 0..n_alt {
        let row = field.row(a);
        if row[0] != row[1] {
            return Some(format!("south pole column differs at row {a}"));
        }
        if row[n_lat - 1] != row[n_lat - 2] {
            return Some(format!("north pole column differs at row {a}"));
        }
    }
    if field.row(0) != field.row(1) {
        return Some("surface row differs from row 1".to_string());
    }
    if field.row(n_alt - 1).iter().any(|&v| v != 0.0) {
        return Some("top row is not zero".to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_resolves_corners() {
        // Distinct value at every node
        let mut field = ScalarField::from_fn(4, 4, |a, l| (a * 4 + l) as f64 + 1.0);
        apply_boundaries(&mut field);

        // Row 1 after the pole copies: [6, 6, 7, 7]
        assert_eq!(field.row(1), &[6.0, 6.0, 7.0, 7.0]);
        // Surface copies the already-fixed row 1, so its corners follow the poles
        assert_eq!(field.row(0), &[6.0, 6.0, 7.0, 7.0]);
        assert_eq!(field.row(2), &[10.0, 10.0, 11.0, 11.0]);
        assert_eq!(field.row(3), &[0.0, 0.0, 0.0, 0.0]);
        assert!(boundary_violation(&field).is_none());
    }

    #[test]
    fn test_idempotent_once_applied() {
        let mut field = ScalarField::from_fn(5, 6, |a, l| ((a + 1) * (l + 3)) as f64 * 0.37);
        apply_boundaries(&mut field);
        let once = field.clone();
        apply_boundaries(&mut field);
        assert_eq!(field, once);
    }

    #[test]
    fn test_violation_detection() {
        let mut field = ScalarField::zeros(3, 3);
        assert!(boundary_violation(&field).is_none());

        field.row_mut(2).fill(1.0);
        assert_eq!(boundary_violation(&field).as_deref(), Some("top row is not zero"));

        let mut field = ScalarField::zeros(3, 3);
        field.set(1, 0, 2.0);
        assert!(boundary_violation(&field)
            .is_some_and(|reason| reason.starts_with("south pole")));
    }
}
