//! Dense distance and travel time matrices.

use crate::error::InputError;

/// Relative tolerance used by [`DistanceMatrix::validate`] for symmetry.
pub const SYMMETRY_TOLERANCE: f64 = 1e-9;

/// A dense n×n matrix stored in row-major order.
///
/// Used for both pairwise road distances (km) and travel times (minutes).
/// The diagonal is zero and never read by the scorer.
///
/// # Examples
///
/// ```
/// use u_carpool::distance::DistanceMatrix;
///
/// let dm = DistanceMatrix::from_data(2, vec![0.0, 5.0, 5.0, 0.0]).unwrap();
/// assert_eq!(dm.get(0, 1), 5.0);
/// assert_eq!(dm.size(), 2);
/// assert!(dm.is_symmetric(1e-10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix of the given size, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Creates a matrix from an explicit n×n grid in row-major order.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Creates a matrix from nested rows.
    ///
    /// Returns `None` unless every row has exactly `rows.len()` entries.
    pub fn from_rows(rows: &[Vec<f64>]) -> Option<Self> {
        let size = rows.len();
        if rows.iter().any(|r| r.len() != size) {
            return None;
        }
        Some(Self {
            data: rows.iter().flatten().copied().collect(),
            size,
        })
    }

    /// Returns the value from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the value from `from` to `to`.
    pub fn set(&mut self, from: usize, to: usize, value: f64) {
        self.data[from * self.size + to] = value;
    }

    /// Number of locations in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if the matrix is symmetric within the given tolerance.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                if (self.get(i, j) - self.get(j, i)).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Checks that the matrix is `expected × expected`, holds only finite,
    /// non-negative values, is symmetric, and is zero on the diagonal.
    ///
    /// Symmetry is checked relative to the larger magnitude of each pair
    /// (floor of one), so rounding noise in supplied data is tolerated.
    pub fn validate(&self, matrix: &'static str, expected: usize) -> Result<(), InputError> {
        if self.size != expected {
            return Err(InputError::MatrixSizeMismatch {
                matrix,
                expected,
                actual: self.size,
            });
        }
        for (index, &v) in self.data.iter().enumerate() {
            if !v.is_finite() {
                return Err(InputError::NonFiniteValue {
                    what: matrix,
                    index,
                });
            }
            if v < 0.0 {
                return Err(InputError::NegativeValue {
                    what: matrix,
                    index,
                });
            }
        }
        for i in 0..self.size {
            if self.get(i, i) != 0.0 {
                return Err(InputError::NonZeroDiagonal { matrix, index: i });
            }
            for j in (i + 1)..self.size {
                let (a, b) = (self.get(i, j), self.get(j, i));
                if (a - b).abs() > SYMMETRY_TOLERANCE * a.max(b).max(1.0) {
                    return Err(InputError::Asymmetric {
                        matrix,
                        row: i,
                        col: j,
                    });
                }
            }
        }
        Ok(())
    }
}

/// Paired pairwise distance (km) and time (minutes) matrices for one node set.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelMatrices {
    distance: DistanceMatrix,
    time: DistanceMatrix,
}

impl TravelMatrices {
    /// Pairs a distance matrix with a time matrix.
    ///
    /// Returns an error if their sizes differ.
    pub fn new(distance: DistanceMatrix, time: DistanceMatrix) -> Result<Self, InputError> {
        if distance.size() != time.size() {
            return Err(InputError::MatrixSizeMismatch {
                matrix: "time",
                expected: distance.size(),
                actual: time.size(),
            });
        }
        Ok(Self { distance, time })
    }

    /// Pairs matrices already known to share a size.
    pub(crate) fn from_parts(distance: DistanceMatrix, time: DistanceMatrix) -> Self {
        debug_assert_eq!(distance.size(), time.size());
        Self { distance, time }
    }

    /// Pairwise road distances.
    pub fn distance(&self) -> &DistanceMatrix {
        &self.distance
    }

    /// Pairwise travel times.
    pub fn time(&self) -> &DistanceMatrix {
        &self.time
    }

    /// Number of nodes covered.
    pub fn size(&self) -> usize {
        self.distance.size()
    }

    /// Validates both matrices against a node count.
    pub fn validate(&self, expected: usize) -> Result<(), InputError> {
        self.distance.validate("distance", expected)?;
        self.time.validate("time", expected)
    }
}
