//! Finite-difference gradients of a scalar field
//!
//! Second-order centered differences in the interior and first-order one-sided
//! differences on the two edge nodes of each axis. Spacing is one grid index,
//! so the result is "change per node", not per degree or per km:
//!
//! ```text
//! interior: (f[i+1] - f[i-1]) / 2
//! first:     f[1] - f[0]
//! last:      f[n-1] - f[n-2]
//! ```
//!
//! Each axis needs at least two nodes.

use crate::core_types::ScalarField;
use rayon::prelude::*;

#[inline]
fn difference(prev: f64, next: f64, centered: bool) -> f64 {
    if centered {
        (next - prev) / 2.0
    } else {
        next - prev
    }
}

/// Gradient along the latitude axis (within each row)
pub fn gradient_lat(field: &ScalarField) -> ScalarField {
    let (n_alt, n_lat) = field.shape();
    debug_assert!(n_lat >= 2, "latitude gradient needs at least two columns");
    let mut out = ScalarField::zeros(n_alt, n_lat);

    out.as_mut_slice()
        .par_chunks_mut(n_lat)
        .zip(field.as_slice().par_chunks(n_lat))
        .for_each(|(out_row, row)| {
            out_row[0] = difference(row[0], row[1], false);
            for l in 1..n_lat - 1 {
                out_row[l] = difference(row[l - 1], row[l + 1], true);
            }
            out_row[n_lat - 1] = difference(row[n_lat - 2], row[n_lat - 1], false);
        });

    out
}

/// Gradient along the altitude axis (down each column)
pub fn gradient_alt(field: &ScalarField) -> ScalarField {
    let (n_alt, n_lat) = field.shape();
    debug_assert!(n_alt >= 2, "altitude gradient needs at least two rows");
    let mut out = ScalarField::zeros(n_alt, n_lat);

    out.as_mut_slice()
        .par_chunks_mut(n_lat)
        .enumerate()
        .for_each(|(a, out_row)| {
            let (below, above, centered) = if a == 0 {
                (field.row(0), field.row(1), false)
            } else if a == n_alt - 1 {
                (field.row(n_alt - 2), field.row(n_alt - 1), false)
            } else {
                (field.row(a - 1), field.row(a + 1), true)
            };
            for (l, value) in out_row.iter_mut().enumerate() {
                *value = difference(below[l], above[l], centered);
            }
        });

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_ramp_has_constant_gradient() {
        // f = 3*lat_index + 2*alt_index
        let field = ScalarField::from_fn(4, 5, |a, l| 3.0 * l as f64 + 2.0 * a as f64);
        let d_lat = gradient_lat(&field);
        let d_alt = gradient_alt(&field);
        assert!(d_lat.as_slice().iter().all(|&v| v == 3.0));
        assert!(d_alt.as_slice().iter().all(|&v| v == 2.0));
    }

    #[test]
    fn test_edges_use_one_sided_differences() {
        // Quadratic along latitude: 0, 1, 4, 9
        let field = ScalarField::from_fn(2, 4, |_, l| (l * l) as f64);
        let d_lat = gradient_lat(&field);
        assert_eq!(d_lat.row(0), &[1.0, 2.0, 4.0, 5.0]);
        assert_eq!(d_lat.row(1), &[1.0, 2.0, 4.0, 5.0]);

        let field = ScalarField::from_fn(3, 2, |a, _| (a * a) as f64);
        let d_alt = gradient_alt(&field);
        assert_eq!(d_alt.column(0), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_constant_field_has_zero_gradient() {
        let field = ScalarField::from_fn(5, 5, |_, _| 7.25);
        assert!(gradient_lat(&field).as_slice().iter().all(|&v| v == 0.0));
        assert!(gradient_alt(&field).as_slice().iter().all(|&v| v == 0.0));
    }
}
