//! Savings-based route consolidation.
//!
//! # Algorithm
//!
//! Every commuter starts as a solo driver (one singleton route per node).
//! Candidates from the [`SavingsScorer`] are visited once, best first. A
//! candidate `(i, j)` appends `j`'s whole route to the tail of `i`'s route
//! when:
//!
//! 1. `i` and `j` are on different active routes,
//! 2. `load(r_i) + load(r_j) + 1 <= max_stops` (`j`'s driver becomes a
//!    passenger),
//! 3. `i` is the last stop of its route and `j` the driver of its route.
//!
//! The absorbed route is tombstoned, never removed, so route ids stay
//! valid for the whole pass. Rejected candidates are not revisited.
//!
//! # Complexity
//!
//! O(n² log n) where n = number of nodes (dominated by sorting candidates).
//! Each merge is an append plus a reindex of the absorbed stops.

use log::{debug, info};

use crate::config::CarpoolConfig;
use crate::error::Result;
use crate::models::{Route, RoutePlan, TravelModel};
use crate::savings::{Candidate, SavingsScorer};

/// Result of offering one candidate to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The routes were chained.
    Merged,
    /// Both nodes already ride together.
    SameRoute,
    /// One side refers to a tombstoned route.
    Inactive,
    /// The merged route would exceed `max_stops` passengers.
    OverCapacity,
    /// `i` is not the last stop of its route, or `j` is not a driver.
    NotAdjacent,
}

/// Arena of routes mutated in place by merges.
///
/// Route `k` is created for node `k`. `node_to_route[n]` always names the
/// active route carrying node `n`.
///
/// # Examples
///
/// ```
/// use u_carpool::constructive::{MergeOutcome, RouteConsolidator};
///
/// let mut engine = RouteConsolidator::new(3);
/// assert_eq!(engine.try_merge(0, 1, 3), MergeOutcome::Merged);
/// // 0 is now the driver of [0, 1], not its last stop.
/// assert_eq!(engine.try_merge(0, 2, 3), MergeOutcome::NotAdjacent);
/// assert_eq!(engine.try_merge(1, 2, 3), MergeOutcome::Merged);
///
/// let plan = engine.into_plan();
/// assert_eq!(plan.num_routes(), 1);
/// assert_eq!(plan.routes()[0].stops(), &[0, 1, 2]);
/// assert_eq!(plan.routes()[0].load(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RouteConsolidator {
    routes: Vec<Route>,
    node_to_route: Vec<usize>,
    active: Vec<bool>,
    merges: usize,
}

impl RouteConsolidator {
    /// Creates one singleton route per node.
    pub fn new(num_nodes: usize) -> Self {
        Self {
            routes: (0..num_nodes).map(|n| Route::singleton(n, n)).collect(),
            node_to_route: (0..num_nodes).collect(),
            active: vec![true; num_nodes],
            merges: 0,
        }
    }

    /// Id of the active route carrying `node`.
    pub fn route_of(&self, node: usize) -> usize {
        self.node_to_route[node]
    }

    /// Route record by id (tombstoned routes have no stops).
    pub fn route(&self, id: usize) -> &Route {
        &self.routes[id]
    }

    /// Returns `false` once the route has been absorbed.
    pub fn is_active(&self, id: usize) -> bool {
        self.active[id]
    }

    /// Number of routes still active.
    pub fn num_active(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Merges performed so far.
    pub fn merges(&self) -> usize {
        self.merges
    }

    /// Offers candidate `(i, j)`: append `j`'s route to `i`'s route if the
    /// capacity and adjacency rules allow it.
    pub fn try_merge(&mut self, i: usize, j: usize, max_stops: usize) -> MergeOutcome {
        let ri = self.node_to_route[i];
        let rj = self.node_to_route[j];
        if ri == rj {
            return MergeOutcome::SameRoute;
        }
        if !self.active[ri] || !self.active[rj] {
            return MergeOutcome::Inactive;
        }
        if self.routes[ri].load() + self.routes[rj].load() + 1 > max_stops {
            return MergeOutcome::OverCapacity;
        }
        if self.routes[ri].last_stop() != Some(i) || self.routes[rj].first_stop() != Some(j) {
            return MergeOutcome::NotAdjacent;
        }

        let (target, absorbed) = pair_mut(&mut self.routes, ri, rj);
        let start = target.len();
        target.absorb(absorbed);
        for &node in &target.stops()[start..] {
            self.node_to_route[node] = ri;
        }
        self.active[rj] = false;
        self.merges += 1;
        MergeOutcome::Merged
    }

    /// Single pass over ranked candidates. Rejections are final.
    pub fn run(&mut self, candidates: &[Candidate], max_stops: usize) {
        for c in candidates {
            match self.try_merge(c.i, c.j, max_stops) {
                MergeOutcome::Merged => {
                    debug!(
                        "consolidate: merged i={} j={} score={:.4} route={}",
                        c.i, c.j, c.score, self.node_to_route[c.i]
                    );
                }
                outcome => {
                    debug!("consolidate: skip i={} j={} reason={outcome:?}", c.i, c.j);
                }
            }
        }
    }

    /// Active routes in ascending id order.
    pub fn into_plan(self) -> RoutePlan {
        let routes = self
            .routes
            .into_iter()
            .zip(self.active)
            .filter_map(|(route, active)| active.then_some(route))
            .collect();
        RoutePlan::new(routes, self.merges)
    }
}

/// Borrows two distinct routes mutably.
fn pair_mut(routes: &mut [Route], a: usize, b: usize) -> (&mut Route, &mut Route) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = routes.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = routes.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

/// Consolidates solo commutes into carpool routes.
///
/// Validates `config`, scores every ordered pair, and runs one greedy
/// merge pass. A model with no nodes yields an empty plan. Identical input
/// always yields an identical plan.
///
/// # Examples
///
/// ```
/// use u_carpool::config::{CarpoolConfig, GeometryConfig};
/// use u_carpool::constructive::consolidate;
/// use u_carpool::distance::{GeometryModel, Origin, Projection};
/// use u_carpool::models::{CommuteInstance, Destination};
///
/// let geometry = GeometryModel::new(
///     &GeometryConfig::default()
///         .with_projection(Projection::Planar)
///         .with_destination(Destination::new(0.0, 0.0)),
/// )
/// .unwrap();
/// let nodes = geometry
///     .build_nodes(&[Origin::new(10.0, 0.0), Origin::new(5.0, 0.0), Origin::new(0.0, 8.0)])
///     .unwrap();
/// let matrices = geometry.travel_matrices(&nodes);
/// let instance = CommuteInstance::new(nodes, matrices.into()).unwrap();
///
/// let plan = consolidate(&instance, &CarpoolConfig::default()).unwrap();
/// assert_eq!(plan.num_served(), 3);
/// assert_eq!(plan.routes()[0].stops(), &[0, 1]);
/// ```
pub fn consolidate<M: TravelModel + ?Sized>(
    model: &M,
    config: &CarpoolConfig,
) -> Result<RoutePlan> {
    let max_stops = config.validate()?;
    let n = model.num_nodes();

    let candidates = SavingsScorer::new(config.benefit_factor()).candidates(model);
    info!(
        "consolidate: start nodes={n} candidates={} max_stops={max_stops}",
        candidates.len()
    );

    let mut engine = RouteConsolidator::new(n);
    engine.run(&candidates, max_stops);
    let plan = engine.into_plan();
    info!(
        "consolidate: done routes={} merges={}",
        plan.num_routes(),
        plan.merges()
    );
    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CarpoolError, ConfigError};
    use crate::models::Node;

    /// Explicit travel model; times equal distances.
    struct Table {
        to_dest: Vec<f64>,
        pair: Vec<Vec<f64>>,
    }

    impl TravelModel for Table {
        fn num_nodes(&self) -> usize {
            self.to_dest.len()
        }
        fn dist_to_dest(&self, i: usize) -> f64 {
            self.to_dest[i]
        }
        fn time_to_dest(&self, i: usize) -> f64 {
            self.to_dest[i]
        }
        fn distance(&self, i: usize, j: usize) -> f64 {
            self.pair[i][j]
        }
        fn travel_time(&self, i: usize, j: usize) -> f64 {
            self.pair[i][j]
        }
    }

    /// Nodes on a ray from the destination at the given distances.
    fn ray(points: &[f64]) -> Table {
        Table {
            to_dest: points.to_vec(),
            pair: points
                .iter()
                .map(|a| points.iter().map(|b| (a - b).abs()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_empty_model() {
        let plan = consolidate(&ray(&[]), &CarpoolConfig::default()).expect("valid");
        assert!(plan.is_empty());
        assert_eq!(plan.merges(), 0);
    }

    #[test]
    fn test_single_node() {
        let plan = consolidate(&ray(&[7.0]), &CarpoolConfig::default()).expect("valid");
        assert_eq!(plan.num_routes(), 1);
        assert_eq!(plan.routes()[0].stops(), &[0]);
        assert_eq!(plan.routes()[0].load(), 0);
    }

    #[test]
    fn test_ray_chains_outside_in() {
        let plan = consolidate(&ray(&[3.0, 2.0, 1.0]), &CarpoolConfig::default()).expect("valid");
        assert_eq!(plan.num_routes(), 1);
        assert_eq!(plan.routes()[0].stops(), &[0, 1, 2]);
        assert_eq!(plan.routes()[0].driver_node_id(), 0);
        assert_eq!(plan.merges(), 2);
    }

    #[test]
    fn test_capacity_respected() {
        let cfg = CarpoolConfig::default().with_max_stops(1);
        let plan = consolidate(&ray(&[4.0, 3.0, 2.0, 1.0]), &cfg).expect("valid");
        assert_eq!(plan.num_routes(), 2);
        for r in plan.routes() {
            assert!(r.load() <= 1);
            assert_eq!(r.load(), r.len() - 1);
        }
    }

    #[test]
    fn test_zero_max_stops_keeps_everyone_solo() {
        let cfg = CarpoolConfig::default().with_max_stops(0);
        let plan = consolidate(&ray(&[3.0, 2.0, 1.0]), &cfg).expect("valid");
        assert_eq!(plan.num_routes(), 3);
        assert_eq!(plan.merges(), 0);
    }

    #[test]
    fn test_capacity_counts_absorbed_driver() {
        let mut engine = RouteConsolidator::new(4);
        assert_eq!(engine.try_merge(0, 1, 2), MergeOutcome::Merged);
        assert_eq!(engine.try_merge(2, 3, 2), MergeOutcome::Merged);
        // 1 + 1 + 1 = 3 > 2
        assert_eq!(engine.try_merge(1, 2, 2), MergeOutcome::OverCapacity);
        assert_eq!(engine.try_merge(1, 2, 3), MergeOutcome::Merged);
        assert_eq!(engine.route(0).stops(), &[0, 1, 2, 3]);
        assert_eq!(engine.route(0).load(), 3);
    }

    #[test]
    fn test_adjacency_rejects_mid_route_and_passenger() {
        let mut engine = RouteConsolidator::new(4);
        assert_eq!(engine.try_merge(0, 1, 5), MergeOutcome::Merged);
        // 0 leads [0, 1]; only its tail may pick up.
        assert_eq!(engine.try_merge(0, 2, 5), MergeOutcome::NotAdjacent);
        // 1 is a passenger, so nobody can append it.
        assert_eq!(engine.try_merge(2, 1, 5), MergeOutcome::NotAdjacent);
        // Same route.
        assert_eq!(engine.try_merge(1, 0, 5), MergeOutcome::SameRoute);
        // But [2] can pick up [0, 1] as a whole.
        assert_eq!(engine.try_merge(2, 0, 5), MergeOutcome::Merged);
        assert_eq!(engine.route(2).stops(), &[2, 0, 1]);
        assert_eq!(engine.route_of(1), 2);
        assert!(!engine.is_active(0));
        assert_eq!(engine.num_active(), 2);
    }

    #[test]
    fn test_tombstoned_routes_excluded() {
        let mut engine = RouteConsolidator::new(3);
        engine.try_merge(0, 1, 3);
        assert!(engine.route(1).is_empty());
        let plan = engine.into_plan();
        let ids: Vec<usize> = plan.routes().iter().map(Route::id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(plan.merges(), 1);
    }

    #[test]
    fn test_run_skips_over_capacity() {
        let cand = |i, j, score| Candidate { i, j, score };
        let candidates = [cand(0, 1, 3.0), cand(1, 2, 2.0), cand(3, 2, 1.0)];
        let mut engine = RouteConsolidator::new(4);
        engine.run(&candidates, 1);
        assert_eq!(engine.route(0).stops(), &[0, 1]);
        assert_eq!(engine.route(3).stops(), &[3, 2]);
        assert_eq!(engine.merges(), 2);
    }

    #[test]
    fn test_highest_score_rejected_when_not_tail() {
        // (0, 2) outranks everything but 0 already drives [0, 1].
        let mut engine = RouteConsolidator::new(3);
        engine.try_merge(0, 1, 3);
        let head = Candidate {
            i: 0,
            j: 2,
            score: 100.0,
        };
        engine.run(&[head], 3);
        assert_eq!(engine.route(0).stops(), &[0, 1]);
        assert_eq!(engine.route(2).stops(), &[2]);
        assert_eq!(engine.merges(), 1);
    }

    #[test]
    fn test_ranked_pair_rejected_when_not_tail() {
        // On the ray 3, 2, 1 the scorer ranks (0, 2) ahead of (1, 2), but
        // once (0, 1) merges node 0 drives [0, 1] and is no longer a tail.
        let model = ray(&[3.0, 2.0, 1.0]);
        let candidates = SavingsScorer::new(1.0).candidates(&model);
        let pos = |i, j| candidates.iter().position(|c| c.i == i && c.j == j);
        assert_eq!(pos(0, 1), Some(0));
        assert!(pos(0, 2) < pos(1, 2));

        let mut engine = RouteConsolidator::new(3);
        assert_eq!(engine.try_merge(0, 1, 3), MergeOutcome::Merged);
        assert_eq!(engine.try_merge(0, 2, 3), MergeOutcome::NotAdjacent);
        assert_eq!(engine.try_merge(1, 2, 3), MergeOutcome::Merged);

        let mut engine = RouteConsolidator::new(3);
        engine.run(&candidates, 3);
        assert_eq!(engine.merges(), 2);
        let plan = engine.into_plan();
        assert_eq!(plan.routes()[0].stops(), &[0, 1, 2]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = consolidate(&ray(&[1.0]), &CarpoolConfig::new(-1.0, 3));
        let expected = CarpoolError::Config(ConfigError::NegativeBenefitFactor(-1.0));
        assert_eq!(err, Err(expected));
        let err = consolidate(&ray(&[1.0]), &CarpoolConfig::new(1.0, -3));
        let expected = CarpoolError::Config(ConfigError::NegativeMaxStops(-3));
        assert_eq!(err, Err(expected));
    }

    #[test]
    fn test_works_through_instance() {
        use crate::distance::{DistanceMatrix, TravelMatrices};
        use crate::models::CommuteInstance;
        use std::sync::Arc;

        let nodes = vec![
            Node::new(0, 0.0, 2.0, 2.0, 2.0),
            Node::new(1, 0.0, 1.0, 1.0, 1.0),
        ];
        let d = DistanceMatrix::from_data(2, vec![0.0, 1.0, 1.0, 0.0]).expect("2x2");
        let m = TravelMatrices::new(d.clone(), d).expect("same size");
        let inst = CommuteInstance::new(nodes, Arc::new(m)).expect("valid");
        let plan = consolidate(&inst, &CarpoolConfig::default()).expect("valid");
        assert_eq!(plan.routes()[0].stops(), &[0, 1]);
    }
}
