//! Plan evaluator computing driven distance, aggregate statistics, and
//! structural violations.

use serde::{Deserialize, Serialize};

use crate::models::{Route, RoutePlan, TravelModel};

/// A broken plan invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// A node appears on no route.
    MissingNode {
        /// Node absent from every route.
        node: usize,
    },
    /// A node appears more than once across routes.
    DuplicateNode {
        /// Node seen again.
        node: usize,
        /// Route where the repeat was found.
        route_id: usize,
    },
    /// A stop refers to a node id outside the model.
    UnknownNode {
        /// Offending id.
        node: usize,
        /// Route carrying it.
        route_id: usize,
    },
    /// More passengers than `max_stops`.
    CapacityExceeded {
        /// Route id.
        route_id: usize,
        /// Passenger count.
        load: usize,
        /// Allowed passengers.
        max_stops: usize,
    },
    /// `load != stops.len() - 1`.
    LoadMismatch {
        /// Route id.
        route_id: usize,
        /// Recorded load.
        load: usize,
        /// Number of stops.
        stops: usize,
    },
    /// `driver_node_id` is not the first stop, or the route is empty.
    DriverMismatch {
        /// Route id.
        route_id: usize,
    },
}

/// A constraint violation in a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Occupancy bucket of a route, as shown on the map legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PassengerBand {
    /// Driver alone.
    Solo,
    /// One passenger.
    One,
    /// Two passengers.
    Two,
    /// Three passengers or more.
    ThreeOrMore,
}

impl PassengerBand {
    /// Bucket for a passenger count.
    pub fn of(load: usize) -> Self {
        match load {
            0 => PassengerBand::Solo,
            1 => PassengerBand::One,
            2 => PassengerBand::Two,
            _ => PassengerBand::ThreeOrMore,
        }
    }
}

/// Aggregate statistics of a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Vehicles on the road.
    pub num_routes: usize,
    /// Routes with no passenger.
    pub num_solo: usize,
    /// Routes with at least one passenger.
    pub num_carpools: usize,
    /// Commuters riding as passengers.
    pub num_passengers: usize,
    /// Routes per [`PassengerBand`], indexed Solo, One, Two, ThreeOrMore.
    pub bands: [usize; 4],
    /// Distance if every node drove alone.
    pub baseline_distance: f64,
    /// Distance actually driven under the plan.
    pub driven_distance: f64,
    /// `baseline_distance - driven_distance`.
    pub saved_distance: f64,
}

/// Evaluates plans against a travel model.
///
/// # Examples
///
/// ```
/// use u_carpool::config::CarpoolConfig;
/// use u_carpool::constructive::consolidate;
/// use u_carpool::evaluation::PlanEvaluator;
/// use u_carpool::models::TravelModel;
///
/// struct Line;
/// impl TravelModel for Line {
///     fn num_nodes(&self) -> usize { 2 }
///     fn dist_to_dest(&self, i: usize) -> f64 { [2.0, 1.0][i] }
///     fn time_to_dest(&self, i: usize) -> f64 { [2.0, 1.0][i] }
///     fn distance(&self, i: usize, j: usize) -> f64 { if i == j { 0.0 } else { 1.0 } }
///     fn travel_time(&self, i: usize, j: usize) -> f64 { self.distance(i, j) }
/// }
///
/// let plan = consolidate(&Line, &CarpoolConfig::default()).unwrap();
/// let eval = PlanEvaluator::new(&Line);
/// let summary = eval.summary(&plan);
/// assert_eq!(summary.num_carpools, 1);
/// assert_eq!(summary.baseline_distance, 3.0);
/// assert_eq!(summary.driven_distance, 2.0);
/// assert!(eval.check(&plan, 3).is_empty());
/// ```
pub struct PlanEvaluator<'a, M: TravelModel + ?Sized> {
    model: &'a M,
}

impl<'a, M: TravelModel + ?Sized> PlanEvaluator<'a, M> {
    /// Creates an evaluator over a travel model.
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }

    /// Distance driven by one route: every hop between stops, then the
    /// last stop to the destination. Empty routes drive nothing.
    pub fn route_distance(&self, route: &Route) -> f64 {
        let stops = route.stops();
        let Some(&last) = stops.last() else {
            return 0.0;
        };
        let hops: f64 = stops
            .windows(2)
            .map(|w| self.model.distance(w[0], w[1]))
            .sum();
        hops + self.model.dist_to_dest(last)
    }

    /// Minutes the driver spends: every hop, then the last stop to the
    /// destination.
    pub fn route_duration(&self, route: &Route) -> f64 {
        let stops = route.stops();
        let Some(&last) = stops.last() else {
            return 0.0;
        };
        let hops: f64 = stops
            .windows(2)
            .map(|w| self.model.travel_time(w[0], w[1]))
            .sum();
        hops + self.model.time_to_dest(last)
    }

    /// Extra minutes the driver spends compared with driving alone.
    pub fn driver_detour(&self, route: &Route) -> f64 {
        match route.first_stop() {
            Some(driver) => self.route_duration(route) - self.model.time_to_dest(driver),
            None => 0.0,
        }
    }

    /// Distance if every node drove alone.
    pub fn baseline_distance(&self) -> f64 {
        (0..self.model.num_nodes())
            .map(|i| self.model.dist_to_dest(i))
            .sum()
    }

    /// Aggregate statistics.
    pub fn summary(&self, plan: &RoutePlan) -> PlanSummary {
        let mut bands = [0usize; 4];
        let mut num_passengers = 0;
        let mut driven_distance = 0.0;
        for route in plan.routes() {
            bands[PassengerBand::of(route.load()) as usize] += 1;
            num_passengers += route.load();
            driven_distance += self.route_distance(route);
        }
        let num_solo = bands[PassengerBand::Solo as usize];
        let baseline_distance = self.baseline_distance();
        PlanSummary {
            num_routes: plan.num_routes(),
            num_solo,
            num_carpools: plan.num_routes() - num_solo,
            num_passengers,
            bands,
            baseline_distance,
            driven_distance,
            saved_distance: baseline_distance - driven_distance,
        }
    }

    /// Checks partition, capacity, load, and driver invariants.
    ///
    /// Returns every violation found; an empty list means the plan is a
    /// valid partition of the model's nodes.
    pub fn check(&self, plan: &RoutePlan, max_stops: usize) -> Vec<Violation> {
        let n = self.model.num_nodes();
        let mut seen = vec![false; n];
        let mut violations = Vec::new();

        for route in plan.routes() {
            let route_id = route.id();
            if route.first_stop() != Some(route.driver_node_id()) {
                violations.push(Violation::new(ViolationType::DriverMismatch { route_id }));
            }
            if route.load() + 1 != route.len() {
                violations.push(Violation::new(ViolationType::LoadMismatch {
                    route_id,
                    load: route.load(),
                    stops: route.len(),
                }));
            }
            if route.load() > max_stops {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    route_id,
                    load: route.load(),
                    max_stops,
                }));
            }
            for &node in route.stops() {
                match seen.get_mut(node) {
                    None => violations.push(Violation::new(ViolationType::UnknownNode {
                        node,
                        route_id,
                    })),
                    Some(true) => violations.push(Violation::new(ViolationType::DuplicateNode {
                        node,
                        route_id,
                    })),
                    Some(flag) => *flag = true,
                }
            }
        }

        for (node, &covered) in seen.iter().enumerate() {
            if !covered {
                violations.push(Violation::new(ViolationType::MissingNode { node }));
            }
        }
        violations
    }
}
