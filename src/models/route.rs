//! Carpool route and plan types.

use serde::{Deserialize, Serialize};

/// A chain of pickups driven by the first node, ending at the destination.
///
/// `stops[0]` is the driver; every later stop is a passenger picked up in
/// order. `load` counts passengers, so `load == stops.len() - 1`. The
/// destination itself is implicit and not stored.
///
/// # Examples
///
/// ```
/// use u_carpool::models::Route;
///
/// let r = Route::singleton(4, 4);
/// assert_eq!(r.driver_node_id(), 4);
/// assert_eq!(r.stops(), &[4]);
/// assert_eq!(r.load(), 0);
/// assert!(r.is_solo());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    id: usize,
    driver_node_id: usize,
    stops: Vec<usize>,
    load: usize,
}

impl Route {
    /// Creates a solo route for a single node.
    pub fn singleton(id: usize, node: usize) -> Self {
        Self {
            id,
            driver_node_id: node,
            stops: vec![node],
            load: 0,
        }
    }

    /// Stable route id (the id of the node it was created for).
    pub fn id(&self) -> usize {
        self.id
    }

    /// The node that drives.
    pub fn driver_node_id(&self) -> usize {
        self.driver_node_id
    }

    /// Node ids in pickup order, driver first.
    pub fn stops(&self) -> &[usize] {
        &self.stops
    }

    /// Passenger count.
    pub fn load(&self) -> usize {
        self.load
    }

    /// Passenger node ids, in pickup order.
    pub fn passengers(&self) -> &[usize] {
        self.stops.get(1..).unwrap_or(&[])
    }

    /// Number of nodes travelling in this route (driver included).
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Routes always hold at least the driver.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Returns `true` if the driver travels alone.
    pub fn is_solo(&self) -> bool {
        self.load == 0
    }

    /// First stop (the driver).
    pub fn first_stop(&self) -> Option<usize> {
        self.stops.first().copied()
    }

    /// Last pickup before the destination.
    pub fn last_stop(&self) -> Option<usize> {
        self.stops.last().copied()
    }

    /// Appends `other` to the tail of this route.
    ///
    /// `other`'s driver becomes a passenger, so the load grows by
    /// `other.load + 1`. `other` is left with no stops.
    pub(crate) fn absorb(&mut self, other: &mut Route) {
        self.stops.append(&mut other.stops);
        self.load += other.load + 1;
        other.load = 0;
    }
}

/// The output of a consolidation run: every active route, in route-id order.
///
/// # Examples
///
/// ```
/// use u_carpool::models::{Route, RoutePlan};
///
/// let plan = RoutePlan::new(vec![Route::singleton(0, 0), Route::singleton(1, 1)], 0);
/// assert_eq!(plan.num_routes(), 2);
/// assert_eq!(plan.num_served(), 2);
/// assert_eq!(plan.merges(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoutePlan {
    routes: Vec<Route>,
    merges: usize,
}

impl RoutePlan {
    /// Creates a plan from active routes and the merge count that produced them.
    pub fn new(routes: Vec<Route>, merges: usize) -> Self {
        Self { routes, merges }
    }

    /// Active routes.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Consumes the plan, returning its routes.
    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }

    /// Number of vehicles on the road.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of nodes across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Route::len).sum()
    }

    /// Number of merges performed by the consolidation pass.
    pub fn merges(&self) -> usize {
        self.merges
    }

    /// Returns `true` if the plan has no routes.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Finds the route that carries `node`.
    pub fn route_of(&self, node: usize) -> Option<&Route> {
        self.routes.iter().find(|r| r.stops.contains(&node))
    }
}
