//! Run and geometry configuration.
//!
//! [`CarpoolConfig`] drives the scorer and the consolidation pass and may
//! change between runs. [`GeometryConfig`] determines the travel matrices
//! and is fixed for a node set.

use serde::{Deserialize, Serialize};

use crate::distance::Projection;
use crate::error::ConfigError;
use crate::models::Destination;

/// Tunable parameters of one consolidation run.
///
/// # Examples
///
/// ```
/// use u_carpool::config::CarpoolConfig;
///
/// let cfg = CarpoolConfig::default().with_benefit_factor(2.5).with_max_stops(2);
/// assert_eq!(cfg.benefit_factor(), 2.5);
/// assert_eq!(cfg.max_stops(), 2);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarpoolConfig {
    benefit_factor: f64,
    max_stops: i32,
}

impl Default for CarpoolConfig {
    fn default() -> Self {
        Self {
            benefit_factor: 1.0,
            max_stops: 3,
        }
    }
}

impl CarpoolConfig {
    /// Creates a configuration; call [`validate`](Self::validate) before use.
    pub fn new(benefit_factor: f64, max_stops: i32) -> Self {
        Self {
            benefit_factor,
            max_stops,
        }
    }

    /// Sets the weight of the distance a passenger removes from the road.
    pub fn with_benefit_factor(mut self, benefit_factor: f64) -> Self {
        self.benefit_factor = benefit_factor;
        self
    }

    /// Sets the passenger cap per vehicle.
    pub fn with_max_stops(mut self, max_stops: i32) -> Self {
        self.max_stops = max_stops;
        self
    }

    /// Weight of the distance a passenger removes from the road.
    pub fn benefit_factor(&self) -> f64 {
        self.benefit_factor
    }

    /// Passenger cap per vehicle (driver excluded).
    pub fn max_stops(&self) -> i32 {
        self.max_stops
    }

    /// Rejects a negative or non-finite benefit factor and a negative cap.
    ///
    /// Returns the passenger cap as a count.
    pub fn validate(&self) -> Result<usize, ConfigError> {
        if !self.benefit_factor.is_finite() || self.benefit_factor < 0.0 {
            return Err(ConfigError::NegativeBenefitFactor(self.benefit_factor));
        }
        usize::try_from(self.max_stops)
            .map_err(|_| ConfigError::NegativeMaxStops(self.max_stops))
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    ///
    /// ```
    /// use u_carpool::config::CarpoolConfig;
    ///
    /// let cfg = CarpoolConfig::from_json_str(r#"{"benefit_factor": 4.0}"#).unwrap();
    /// assert_eq!(cfg.benefit_factor(), 4.0);
    /// assert_eq!(cfg.max_stops(), 3);
    /// ```
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

/// Parameters that turn coordinates into road distances and times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    destination: Destination,
    tortuosity: f64,
    avg_speed_kmh: f64,
    projection: Projection,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            destination: Destination::default(),
            tortuosity: 1.3,
            avg_speed_kmh: 50.0,
            projection: Projection::default(),
        }
    }
}

impl GeometryConfig {
    /// Sets the shared destination.
    pub fn with_destination(mut self, destination: Destination) -> Self {
        self.destination = destination;
        self
    }

    /// Sets the road-over-straight-line inflation factor.
    pub fn with_tortuosity(mut self, tortuosity: f64) -> Self {
        self.tortuosity = tortuosity;
        self
    }

    /// Sets the average driving speed in km/h.
    pub fn with_avg_speed_kmh(mut self, speed: f64) -> Self {
        self.avg_speed_kmh = speed;
        self
    }

    /// Sets the coordinate projection.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
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

    /// Requires tortuosity > 1, speed > 0, and a finite destination.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tortuosity.is_finite() || self.tortuosity <= 1.0 {
            return Err(ConfigError::InvalidTortuosity(self.tortuosity));
        }
        if !self.avg_speed_kmh.is_finite() || self.avg_speed_kmh <= 0.0 {
            return Err(ConfigError::InvalidSpeed(self.avg_speed_kmh));
        }
        if !self.destination.lon().is_finite() || !self.destination.lat().is_finite() {
            return Err(ConfigError::InvalidDestination);
        }
        Ok(())
    }

    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carpool_defaults() {
        let cfg = CarpoolConfig::default();
        assert_eq!(cfg.benefit_factor(), 1.0);
        assert_eq!(cfg.max_stops(), 3);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_carpool_rejects_negative() {
        assert_eq!(
            CarpoolConfig::new(-0.5, 3).validate(),
            Err(ConfigError::NegativeBenefitFactor(-0.5))
        );
        assert_eq!(
            CarpoolConfig::new(1.0, -1).validate(),
            Err(ConfigError::NegativeMaxStops(-1))
        );
        assert!(CarpoolConfig::new(f64::NAN, 3).validate().is_err());
        assert!(CarpoolConfig::new(0.0, 0).validate().is_ok());
    }

    #[test]
    fn test_carpool_validate_returns_cap() {
        assert_eq!(CarpoolConfig::new(1.0, 0).validate(), Ok(0));
        assert_eq!(CarpoolConfig::new(1.0, 4).validate(), Ok(4));
        assert_eq!(
            CarpoolConfig::new(1.0, i32::MIN).validate(),
            Err(ConfigError::NegativeMaxStops(i32::MIN))
        );
    }

    #[test]
    fn test_carpool_json() {
        let cfg = CarpoolConfig::from_json_str(r#"{"benefit_factor": 0.5, "max_stops": 1}"#)
            .expect("valid json");
        assert_eq!(cfg, CarpoolConfig::new(0.5, 1));

        let err = CarpoolConfig::from_json_str(r#"{"max_stops": -2}"#);
        assert_eq!(err, Err(ConfigError::NegativeMaxStops(-2)));

        assert!(matches!(
            CarpoolConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_geometry_defaults() {
        let cfg = GeometryConfig::default();
        assert_eq!(cfg.tortuosity(), 1.3);
        assert_eq!(cfg.avg_speed_kmh(), 50.0);
        assert_eq!(cfg.projection(), Projection::LocalEquirectangular);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_geometry_rejects() {
        let base = GeometryConfig::default();
        assert_eq!(
            base.with_tortuosity(1.0).validate(),
            Err(ConfigError::InvalidTortuosity(1.0))
        );
        assert_eq!(
            base.with_avg_speed_kmh(0.0).validate(),
            Err(ConfigError::InvalidSpeed(0.0))
        );
        assert_eq!(
            base.with_destination(Destination::new(f64::NAN, 0.0)).validate(),
            Err(ConfigError::InvalidDestination)
        );
    }

    #[test]
    fn test_geometry_json() {
        let json = r#"{
            "projection": "planar",
            "destination": {"lon": 0.0, "lat": 0.0},
            "tortuosity": 1.5
        }"#;
        let cfg = GeometryConfig::from_json_str(json).expect("valid json");
        assert_eq!(cfg.projection(), Projection::Planar);
        assert_eq!(cfg.destination(), Destination::new(0.0, 0.0));
        assert_eq!(cfg.tortuosity(), 1.5);
        assert_eq!(cfg.avg_speed_kmh(), 50.0);
    }
}
