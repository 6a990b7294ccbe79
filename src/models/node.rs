//! Commuter origin nodes and the shared destination.

use serde::{Deserialize, Serialize};

/// Human-readable identity of a node (e.g. a municipality code and name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeLabel {
    /// External code of the origin area.
    pub code: String,
    /// Display name of the origin area.
    pub name: String,
}

impl NodeLabel {
    /// Creates a label from a code and a name.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// The single destination every commuter converges on.
///
/// # Examples
///
/// ```
/// use u_carpool::models::Destination;
///
/// let d = Destination::new(-1.69, 48.11);
/// assert_eq!(d.lon(), -1.69);
/// assert_eq!(d.lat(), 48.11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    lon: f64,
    lat: f64,
}

impl Destination {
    /// Creates a destination at the given coordinates.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Longitude (or planar x).
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude (or planar y).
    pub fn lat(&self) -> f64 {
        self.lat
    }
}

impl Default for Destination {
    /// Rennes university hospital, the destination of the reference deployment.
    fn default() -> Self {
        Self::new(-1.694_897_3, 48.118_908_1)
    }
}

/// A commuter origin with precomputed distance and time to the destination.
///
/// Node ids are dense (`0..N`) and equal the row/column index of the node
/// in the travel matrices.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Node, NodeLabel};
///
/// let n = Node::new(0, 1.0, 2.0, 13.0, 15.6)
///     .with_label(NodeLabel::new("35238", "Rennes"));
/// assert_eq!(n.id(), 0);
/// assert_eq!(n.dist_to_dest(), 13.0);
/// assert_eq!(n.label().map(|l| l.name.as_str()), Some("Rennes"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    lon: f64,
    lat: f64,
    dist_to_dest: f64,
    time_to_dest: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<NodeLabel>,
}

impl Node {
    /// Creates a node.
    pub fn new(id: usize, lon: f64, lat: f64, dist_to_dest: f64, time_to_dest: f64) -> Self {
        Self {
            id,
            lon,
            lat,
            dist_to_dest,
            time_to_dest,
            label: None,
        }
    }

    /// Attaches a label.
    pub fn with_label(mut self, label: NodeLabel) -> Self {
        self.label = Some(label);
        self
    }

    /// Dense node id, equal to the matrix index.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Longitude (or planar x).
    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Latitude (or planar y).
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Road distance to the destination.
    pub fn dist_to_dest(&self) -> f64 {
        self.dist_to_dest
    }

    /// Travel time to the destination, in minutes.
    pub fn time_to_dest(&self) -> f64 {
        self.time_to_dest
    }

    /// Label, if one was attached.
    pub fn label(&self) -> Option<&NodeLabel> {
        self.label.as_ref()
    }
}
