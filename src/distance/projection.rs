//! Planar approximation of commuter coordinates.

use serde::{Deserialize, Serialize};

use crate::models::Destination;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// How node coordinates map onto a plane measured in kilometres.
///
/// Distances are straight lines on that plane. The error against a geodesic
/// is accepted at commuting scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Coordinates are already planar kilometres; `lon` is x and `lat` is y.
    Planar,
    /// Longitude/latitude in degrees, projected onto the tangent plane at
    /// the destination.
    #[default]
    LocalEquirectangular,
}

impl Projection {
    /// Projects `(lon, lat)` to planar kilometres relative to `origin`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_carpool::distance::Projection;
    /// use u_carpool::models::Destination;
    ///
    /// let origin = Destination::new(0.0, 0.0);
    /// let (x, y) = Projection::Planar.project(3.0, 4.0, &origin);
    /// assert_eq!((x, y), (3.0, 4.0));
    ///
    /// let (x, y) = Projection::LocalEquirectangular.project(0.0, 1.0, &origin);
    /// assert!(x.abs() < 1e-9);
    /// assert!((y - 111.19).abs() < 0.01);
    /// ```
    pub fn project(&self, lon: f64, lat: f64, origin: &Destination) -> (f64, f64) {
        match self {
            Projection::Planar => (lon, lat),
            Projection::LocalEquirectangular => {
                let cos_lat0 = origin.lat().to_radians().cos();
                let x = (lon - origin.lon()).to_radians() * cos_lat0 * EARTH_RADIUS_KM;
                let y = (lat - origin.lat()).to_radians() * EARTH_RADIUS_KM;
                (x, y)
            }
        }
    }
}

/// Straight-line distance between two planar points.
pub fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}
