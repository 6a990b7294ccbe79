//! Road distance and travel time derived from coordinates.

use log::info;

use crate::config::GeometryConfig;
use crate::error::{ConfigError, InputError};
use crate::models::{Destination, Node, NodeLabel};

use super::matrix::{DistanceMatrix, TravelMatrices};
use super::projection::{euclidean, Projection};

/// Raw commuter origin before distances are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Origin {
    /// Longitude (or planar x).
    pub lon: f64,
    /// Latitude (or planar y).
    pub lat: f64,
    /// Optional identity carried onto the node.
    pub label: Option<NodeLabel>,
}

impl Origin {
    /// Creates an unlabelled origin.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            lon,
            lat,
            label: None,
        }
    }

    /// Attaches a label.
    pub fn with_label(mut self, label: NodeLabel) -> Self {
        self.label = Some(label);
        self
    }
}

/// Straight-line distance inflated by tortuosity, converted to minutes at a
/// constant average speed.
///
/// ```text
/// dist(a, b) = euclidean(a, b) × τ
/// time(a, b) = dist(a, b) / v × 60
/// ```
///
/// # Examples
///
/// ```
/// use u_carpool::config::GeometryConfig;
/// use u_carpool::distance::{GeometryModel, Origin, Projection};
/// use u_carpool::models::Destination;
///
/// let cfg = GeometryConfig::default()
///     .with_projection(Projection::Planar)
///     .with_destination(Destination::new(0.0, 0.0))
///     .with_tortuosity(1.5)
///     .with_avg_speed_kmh(60.0);
/// let model = GeometryModel::new(&cfg).unwrap();
///
/// let nodes = model.build_nodes(&[Origin::new(3.0, 4.0)]).unwrap();
/// assert!((nodes[0].dist_to_dest() - 7.5).abs() < 1e-10);
/// assert!((nodes[0].time_to_dest() - 7.5).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryModel {
    destination: Destination,
    tortuosity: f64,
    avg_speed_kmh: f64,
    projection: Projection,
}

impl GeometryModel {
    /// Creates a model from a validated geometry configuration.
    pub fn new(config: &GeometryConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            destination: config.destination(),
            tortuosity: config.tortuosity(),
            avg_speed_kmh: config.avg_speed_kmh(),
            projection: config.projection(),
        })
    }

    /// Shared destination.
    pub fn destination(&self) -> Destination {
        self.destination
    }

    /// Road-over-straight-line inflation factor.
    pub fn tortuosity(&self) -> f64 {
        self.tortuosity
    }

    /// Average driving speed in km/h.
    pub fn avg_speed_kmh(&self) -> f64 {
        self.avg_speed_kmh
    }

    /// Coordinate projection.
    pub fn projection(&self) -> Projection {
        self.projection
    }

    /// Projects a coordinate pair onto the plane centred on the destination.
    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        self.projection.project(lon, lat, &self.destination)
    }

    /// Road distance between two planar points.
    pub fn road_distance(&self, a: (f64, f64), b: (f64, f64)) -> f64 {
        euclidean(a, b) * self.tortuosity
    }

    /// Minutes needed to drive `distance` km.
    pub fn travel_time(&self, distance: f64) -> f64 {
        distance / self.avg_speed_kmh * 60.0
    }

    /// Turns origins into dense-id nodes with destination distance and time.
    ///
    /// Node `k` gets id `k`. Non-finite coordinates are rejected.
    pub fn build_nodes(&self, origins: &[Origin]) -> Result<Vec<Node>, InputError> {
        let dest = self.project(self.destination.lon(), self.destination.lat());
        origins
            .iter()
            .enumerate()
            .map(|(id, o)| {
                if !o.lon.is_finite() || !o.lat.is_finite() {
                    return Err(InputError::NonFiniteValue {
                        what: "coordinates",
                        index: id,
                    });
                }
                let dist = self.road_distance(self.project(o.lon, o.lat), dest);
                let node = Node::new(id, o.lon, o.lat, dist, self.travel_time(dist));
                Ok(match &o.label {
                    Some(label) => node.with_label(label.clone()),
                    None => node,
                })
            })
            .collect()
    }

    /// Computes the symmetric pairwise distance and time matrices.
    ///
    /// O(n²) in time and memory; memoize per node set with
    /// [`MatrixCache`](super::MatrixCache).
    pub fn travel_matrices(&self, nodes: &[Node]) -> TravelMatrices {
        let n = nodes.len();
        let points: Vec<(f64, f64)> = nodes
            .iter()
            .map(|p| self.project(p.lon(), p.lat()))
            .collect();
        let mut distance = DistanceMatrix::new(n);
        let mut time = DistanceMatrix::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = self.road_distance(points[i], points[j]);
                let t = self.travel_time(d);
                distance.set(i, j, d);
                distance.set(j, i, d);
                time.set(i, j, t);
                time.set(j, i, t);
            }
        }
        info!("geometry: matrices built nodes={n}");
        TravelMatrices::from_parts(distance, time)
    }
}
