//! Error types for input and configuration validation.
//!
//! Every error is a precondition violation: the computation is pure and
//! deterministic, so nothing here is retryable. Callers fix the input and
//! invoke again.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CarpoolError>;

/// Malformed node set or matrices.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// No nodes were supplied.
    EmptyNodeSet,
    /// A matrix does not have `expected × expected` entries.
    MatrixSizeMismatch {
        /// Which matrix (`"distance"` or `"time"`).
        matrix: &'static str,
        /// Node count the matrix must match.
        expected: usize,
        /// Side length actually supplied.
        actual: usize,
    },
    /// Node at position `index` carries id `id` instead of `index`.
    NodeIdMismatch {
        /// Position in the node list.
        index: usize,
        /// Id found at that position.
        id: usize,
    },
    /// A NaN or infinite value where a finite number is required.
    NonFiniteValue {
        /// Field or matrix name.
        what: &'static str,
        /// Node id or flat matrix index.
        index: usize,
    },
    /// A negative distance or time.
    NegativeValue {
        /// Field or matrix name.
        what: &'static str,
        /// Node id or flat matrix index.
        index: usize,
    },
    /// Entry `(row, col)` differs from `(col, row)`.
    Asymmetric {
        /// Which matrix.
        matrix: &'static str,
        /// Row of the offending entry.
        row: usize,
        /// Column of the offending entry.
        col: usize,
    },
    /// A diagonal entry is not zero.
    NonZeroDiagonal {
        /// Which matrix.
        matrix: &'static str,
        /// Node whose self-entry is non-zero.
        index: usize,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyNodeSet => write!(f, "node set is empty"),
            InputError::MatrixSizeMismatch {
                matrix,
                expected,
                actual,
            } => write!(
                f,
                "{matrix} matrix is {actual}x{actual}, expected {expected}x{expected}"
            ),
            InputError::NodeIdMismatch { index, id } => {
                write!(f, "node at position {index} has id {id}")
            }
            InputError::NonFiniteValue { what, index } => {
                write!(f, "{what} at index {index} is not finite")
            }
            InputError::NegativeValue { what, index } => {
                write!(f, "{what} at index {index} is negative")
            }
            InputError::Asymmetric { matrix, row, col } => {
                write!(f, "{matrix} matrix is not symmetric at ({row}, {col})")
            }
            InputError::NonZeroDiagonal { matrix, index } => {
                write!(f, "{matrix} matrix has a non-zero diagonal at {index}")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Rejected run or geometry configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `benefit_factor` is negative or not finite.
    NegativeBenefitFactor(f64),
    /// `max_stops` is negative.
    NegativeMaxStops(i32),
    /// Tortuosity must be finite and greater than one.
    InvalidTortuosity(f64),
    /// Average speed must be finite and positive.
    InvalidSpeed(f64),
    /// Destination coordinates must be finite.
    InvalidDestination,
    /// Configuration document could not be parsed.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NegativeBenefitFactor(v) => {
                write!(f, "benefit_factor must be a finite value >= 0, got {v}")
            }
            ConfigError::NegativeMaxStops(v) => write!(f, "max_stops must be >= 0, got {v}"),
            ConfigError::InvalidTortuosity(v) => {
                write!(f, "tortuosity must be a finite value > 1, got {v}")
            }
            ConfigError::InvalidSpeed(v) => {
                write!(f, "average speed must be a finite value > 0, got {v}")
            }
            ConfigError::InvalidDestination => write!(f, "destination coordinates are not finite"),
            ConfigError::Parse(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Top-level error returned by validated entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum CarpoolError {
    /// The node set or matrices are malformed.
    Input(InputError),
    /// The configuration is out of range.
    Config(ConfigError),
}

impl fmt::Display for CarpoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CarpoolError::Input(e) => write!(f, "input error: {e}"),
            CarpoolError::Config(e) => write!(f, "configuration error: {e}"),
        }
    }
}

impl std::error::Error for CarpoolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CarpoolError::Input(e) => Some(e),
            CarpoolError::Config(e) => Some(e),
        }
    }
}

impl From<InputError> for CarpoolError {
    fn from(e: InputError) -> Self {
        CarpoolError::Input(e)
    }
}

impl From<ConfigError> for CarpoolError {
    fn from(e: ConfigError) -> Self {
        CarpoolError::Config(e)
    }
}
