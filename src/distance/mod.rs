//! Distance and travel time model.
//!
//! Derives per-node destination distance/time and the pairwise matrices
//! from coordinates, and memoizes the matrices per node set.

mod cache;
mod geometry;
mod matrix;
mod projection;

pub use cache::{MatrixCache, NodeSetKey};
pub use geometry::{GeometryModel, Origin};
pub use matrix::{DistanceMatrix, TravelMatrices, SYMMETRY_TOLERANCE};
pub use projection::{euclidean, Projection, EARTH_RADIUS_KM};
