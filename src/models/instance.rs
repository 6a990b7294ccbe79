//! Travel model trait and the validated commuting instance.

use std::sync::Arc;

use crate::distance::TravelMatrices;
use crate::error::InputError;

use super::Node;

/// Distances and times the scorer and evaluator read.
///
/// Index `i` refers to node id `i`. Implementations must return finite,
/// non-negative values for every `i, j < num_nodes()`.
///
/// # Examples
///
/// ```
/// use u_carpool::models::TravelModel;
///
/// struct Line;
///
/// impl TravelModel for Line {
///     fn num_nodes(&self) -> usize { 2 }
///     fn dist_to_dest(&self, i: usize) -> f64 { [2.0, 1.0][i] }
///     fn time_to_dest(&self, i: usize) -> f64 { [2.0, 1.0][i] }
///     fn distance(&self, i: usize, j: usize) -> f64 { if i == j { 0.0 } else { 1.0 } }
///     fn travel_time(&self, i: usize, j: usize) -> f64 { self.distance(i, j) }
/// }
///
/// assert_eq!(Line.num_nodes(), 2);
/// ```
pub trait TravelModel {
    /// Number of nodes.
    fn num_nodes(&self) -> usize;

    /// Road distance from node `i` to the destination.
    fn dist_to_dest(&self, i: usize) -> f64;

    /// Minutes from node `i` to the destination.
    fn time_to_dest(&self, i: usize) -> f64;

    /// Road distance between nodes `i` and `j`.
    fn distance(&self, i: usize, j: usize) -> f64;

    /// Minutes between nodes `i` and `j`.
    fn travel_time(&self, i: usize, j: usize) -> f64;
}

/// A node set paired with its travel matrices, checked for consistency.
///
/// Construction fails fast on an empty node set, non-dense ids, matrices of
/// the wrong size, non-finite or negative values, asymmetric matrices, and
/// non-zero diagonals.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_carpool::distance::{DistanceMatrix, TravelMatrices};
/// use u_carpool::models::{CommuteInstance, Node, TravelModel};
///
/// let nodes = vec![Node::new(0, 0.0, 2.0, 2.0, 2.4), Node::new(1, 0.0, 1.0, 1.0, 1.2)];
/// let d = DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let t = DistanceMatrix::from_data(2, vec![0.0, 1.2, 1.2, 0.0]).unwrap();
/// let matrices = Arc::new(TravelMatrices::new(d, t).unwrap());
///
/// let inst = CommuteInstance::new(nodes, matrices).unwrap();
/// assert_eq!(inst.num_nodes(), 2);
/// assert_eq!(inst.distance(0, 1), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct CommuteInstance {
    nodes: Vec<Node>,
    matrices: Arc<TravelMatrices>,
}

impl CommuteInstance {
    /// Validates and pairs nodes with matrices.
    pub fn new(nodes: Vec<Node>, matrices: Arc<TravelMatrices>) -> Result<Self, InputError> {
        if nodes.is_empty() {
            return Err(InputError::EmptyNodeSet);
        }
        for (index, node) in nodes.iter().enumerate() {
            if node.id() != index {
                return Err(InputError::NodeIdMismatch {
                    index,
                    id: node.id(),
                });
            }
            for (what, v) in [
                ("dist_to_dest", node.dist_to_dest()),
                ("time_to_dest", node.time_to_dest()),
            ] {
                if !v.is_finite() {
                    return Err(InputError::NonFiniteValue { what, index });
                }
                if v < 0.0 {
                    return Err(InputError::NegativeValue { what, index });
                }
            }
        }
        matrices.validate(nodes.len())?;
        Ok(Self { nodes, matrices })
    }

    /// Nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Shared travel matrices.
    pub fn matrices(&self) -> &Arc<TravelMatrices> {
        &self.matrices
    }
}

impl TravelModel for CommuteInstance {
    fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    fn dist_to_dest(&self, i: usize) -> f64 {
        self.nodes[i].dist_to_dest()
    }

    fn time_to_dest(&self, i: usize) -> f64 {
        self.nodes[i].time_to_dest()
    }

    fn distance(&self, i: usize, j: usize) -> f64 {
        self.matrices.distance().get(i, j)
    }

    fn travel_time(&self, i: usize, j: usize) -> f64 {
        self.matrices.time().get(i, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    fn matrices(n: usize) -> Arc<TravelMatrices> {
        Arc::new(
            TravelMatrices::new(DistanceMatrix::new(n), DistanceMatrix::new(n)).expect("same size"),
        )
    }

    fn nodes(n: usize) -> Vec<Node> {
        (0..n).map(|i| Node::new(i, 0.0, 0.0, 1.0, 1.0)).collect()
    }

    #[test]
    fn test_valid_instance() {
        let inst = CommuteInstance::new(nodes(3), matrices(3)).expect("valid");
        assert_eq!(inst.num_nodes(), 3);
        assert_eq!(inst.nodes().len(), 3);
        assert_eq!(inst.dist_to_dest(2), 1.0);
        assert_eq!(inst.travel_time(0, 1), 0.0);
    }

    #[test]
    fn test_empty_rejected() {
        let err = CommuteInstance::new(vec![], matrices(0));
        assert_eq!(err.err(), Some(InputError::EmptyNodeSet));
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let err = CommuteInstance::new(nodes(3), matrices(2));
        assert_eq!(
            err.err(),
            Some(InputError::MatrixSizeMismatch {
                matrix: "distance",
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn test_malformed_matrices_rejected() {
        let bad = DistanceMatrix::from_data(2, vec![7.0, 1.0, 50.0, 9.0]).expect("2x2");
        let good = DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0, 0.0]).expect("2x2");
        let m = TravelMatrices::new(bad, good.clone()).expect("same size");
        let err = CommuteInstance::new(nodes(2), Arc::new(m));
        assert_eq!(
            err.err(),
            Some(InputError::NonZeroDiagonal {
                matrix: "distance",
                index: 0
            })
        );

        let skew = DistanceMatrix::from_data(2, vec![0.0, 1.0, 50.0, 0.0]).expect("2x2");
        let m = TravelMatrices::new(good, skew).expect("same size");
        let err = CommuteInstance::new(nodes(2), Arc::new(m));
        assert_eq!(
            err.err(),
            Some(InputError::Asymmetric {
                matrix: "time",
                row: 0,
                col: 1
            })
        );
    }

    #[test]
    fn test_sparse_ids_rejected() {
        let ns = vec![
            Node::new(0, 0.0, 0.0, 1.0, 1.0),
            Node::new(5, 0.0, 0.0, 1.0, 1.0),
        ];
        let err = CommuteInstance::new(ns, matrices(2));
        assert_eq!(err.err(), Some(InputError::NodeIdMismatch { index: 1, id: 5 }));
    }

    #[test]
    fn test_negative_destination_distance_rejected() {
        let ns = vec![Node::new(0, 0.0, 0.0, -1.0, 1.0)];
        let err = CommuteInstance::new(ns, matrices(1));
        assert_eq!(
            err.err(),
            Some(InputError::NegativeValue {
                what: "dist_to_dest",
                index: 0
            })
        );
    }
}
