//! Domain model types for commuter carpooling.
//!
//! Provides commuter origin nodes, the shared destination, carpool routes
//! and plans, and the travel model trait the algorithms read distances
//! through.

mod instance;
mod node;
mod route;

pub use instance::{CommuteInstance, TravelModel};
pub use node::{Destination, Node, NodeLabel};
pub use route::{Route, RoutePlan};
