//! # u-carpool
//!
//! Commuter carpool consolidation toward a single shared destination.
//! Solo trips are greedily chained into shared routes by a savings
//! heuristic that trades the distance a passenger removes from the road
//! against the detour imposed on the driver, under a passenger cap.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Node, Route, RoutePlan, TravelModel trait)
//! - [`distance`] — Geometry model, distance/time matrices, matrix cache
//! - [`savings`] — Savings scorer and ranked merge candidates
//! - [`constructive`] — Route consolidation engine
//! - [`evaluation`] — Driven distance, plan statistics, invariant checks
//! - [`config`] — Run and geometry configuration
//! - [`error`] — Input and configuration errors
//!
//! ## Example
//!
//! ```
//! use u_carpool::config::{CarpoolConfig, GeometryConfig};
//! use u_carpool::constructive::consolidate;
//! use u_carpool::distance::{GeometryModel, MatrixCache, Origin};
//! use u_carpool::evaluation::PlanEvaluator;
//! use u_carpool::models::CommuteInstance;
//!
//! let geometry = GeometryModel::new(&GeometryConfig::default()).unwrap();
//! let nodes = geometry
//!     .build_nodes(&[
//!         Origin::new(-1.95, 48.12),
//!         Origin::new(-1.82, 48.12),
//!         Origin::new(-1.60, 48.30),
//!     ])
//!     .unwrap();
//!
//! let mut cache = MatrixCache::new(8);
//! let matrices = cache.get_or_compute(&geometry, &nodes);
//! let instance = CommuteInstance::new(nodes, matrices).unwrap();
//!
//! let plan = consolidate(&instance, &CarpoolConfig::default()).unwrap();
//! let summary = PlanEvaluator::new(&instance).summary(&plan);
//! assert_eq!(plan.num_served(), 3);
//! assert!(summary.driven_distance <= summary.baseline_distance);
//! ```

pub mod config;
pub mod constructive;
pub mod distance;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod savings;
