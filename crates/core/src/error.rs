//! Error type shared by configuration, construction and invariant checks.
//!
//! Stepping itself never fails. These errors come from validating inputs up
//! front and from the optional checks a headless driver runs between steps.

/// Errors reported by the circulation simulators
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// A configuration value is outside its usable range
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
    /// Supplied data does not match the simulator's shape
    ShapeMismatch {
        /// Expected `(rows, columns)` or `(count, 1)`
        expected: (usize, usize),
        /// Shape that was actually supplied
        actual: (usize, usize),
    },
    /// The Courant number of the grid scheme is above the configured limit
    CourantLimitExceeded {
        /// Courant number for the configured `dt` and wind field
        courant: f64,
        /// Limit from `EulerianConfig::max_courant`
        limit: f64,
    },
    /// Field values grew past a sanity bound or became non-finite
    Unbounded {
        /// Largest absolute value found (`NaN` or infinite when non-finite)
        max_abs: f64,
        /// Bound that was checked against
        bound: f64,
    },
    /// A state invariant failed after a step
    InvariantViolated {
        /// Step counter of the offending state
        step: u64,
        /// What was violated
        reason: String,
    },
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidConfig { field, reason } => {
                write!(f, "Invalid configuration for `{field}`: {reason}")
            }
            SimulationError::ShapeMismatch { expected, actual } => write!(
                f,
                "Shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, actual.0, actual.1
            ),
            SimulationError::CourantLimitExceeded { courant, limit } => write!(
                f,
                "Courant number {courant:.3} exceeds configured limit {limit:.3}"
            ),
            SimulationError::Unbounded { max_abs, bound } => {
                write!(f, "Field magnitude {max_abs:e} exceeds sanity bound {bound:e}")
            }
            SimulationError::InvariantViolated { step, reason } => {
                write!(f, "Invariant violated at step {step}: {reason}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}
