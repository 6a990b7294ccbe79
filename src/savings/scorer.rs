//! Savings scorer.
//!
//! # Scoring
//!
//! For an ordered pair `(i, j)`, node `i`'s driver picks up `j`'s commuter
//! on the way to the destination. `j` no longer drives, removing
//! `dist_to_dest(j)` from the road; `i` pays the extra travel time:
//!
//! ```text
//! detour(i, j) = time(i, j) + time_to_dest(j) - time_to_dest(i)
//! score(i, j)  = dist_to_dest(j) × benefit_factor - detour(i, j)
//! ```
//!
//! Only pairs with a strictly positive score are merge candidates. They are
//! ranked by score descending, ties broken by `(i, j)` ascending, so the
//! order is the same on every platform.

use std::cmp::Ordering;

use log::debug;

use crate::models::TravelModel;

/// A scored ordered pair: `i`'s route would pick up `j`'s route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Node whose route is extended (must be that route's last stop).
    pub i: usize,
    /// Node whose route is appended (must be that route's driver).
    pub j: usize,
    /// Net benefit of the merge.
    pub score: f64,
}

impl Candidate {
    /// Ranking order: higher score first, then `(i, j)` ascending.
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then(self.i.cmp(&other.i))
            .then(self.j.cmp(&other.j))
    }
}

/// Computes savings scores under a fixed benefit factor.
///
/// # Examples
///
/// ```
/// use u_carpool::models::TravelModel;
/// use u_carpool::savings::SavingsScorer;
///
/// // Node 1 sits halfway between node 0 and the destination.
/// struct Line;
/// impl TravelModel for Line {
///     fn num_nodes(&self) -> usize { 2 }
///     fn dist_to_dest(&self, i: usize) -> f64 { [2.0, 1.0][i] }
///     fn time_to_dest(&self, i: usize) -> f64 { [2.0, 1.0][i] }
///     fn distance(&self, i: usize, j: usize) -> f64 { if i == j { 0.0 } else { 1.0 } }
///     fn travel_time(&self, i: usize, j: usize) -> f64 { self.distance(i, j) }
/// }
///
/// let scorer = SavingsScorer::new(1.0);
/// assert_eq!(scorer.detour(&Line, 0, 1), 0.0);
/// assert_eq!(scorer.score(&Line, 0, 1), 1.0);
///
/// let candidates = scorer.candidates(&Line);
/// assert_eq!(candidates.len(), 1);
/// assert_eq!((candidates[0].i, candidates[0].j), (0, 1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsScorer {
    benefit_factor: f64,
}

impl SavingsScorer {
    /// Creates a scorer. `benefit_factor` is expected to be validated (≥ 0).
    pub fn new(benefit_factor: f64) -> Self {
        Self { benefit_factor }
    }

    /// Weight applied to the distance a passenger removes from the road.
    pub fn benefit_factor(&self) -> f64 {
        self.benefit_factor
    }

    /// Extra minutes `i`'s driver spends to collect `j` on the way.
    pub fn detour<M: TravelModel + ?Sized>(&self, model: &M, i: usize, j: usize) -> f64 {
        model.travel_time(i, j) + model.time_to_dest(j) - model.time_to_dest(i)
    }

    /// Net benefit of `i` picking up `j`; `-∞` for `i == j`.
    pub fn score<M: TravelModel + ?Sized>(&self, model: &M, i: usize, j: usize) -> f64 {
        if i == j {
            return f64::NEG_INFINITY;
        }
        model.dist_to_dest(j) * self.benefit_factor - self.detour(model, i, j)
    }

    /// All ordered pairs with a strictly positive score, ranked.
    pub fn candidates<M: TravelModel + ?Sized>(&self, model: &M) -> Vec<Candidate> {
        let n = model.num_nodes();
        let mut candidates = Vec::new();
        for i in 0..n {
            for j in 0..n {
                let score = self.score(model, i, j);
                if score > 0.0 {
                    candidates.push(Candidate { i, j, score });
                }
            }
        }
        candidates.sort_unstable_by(Candidate::rank);
        debug!(
            "savings: scored nodes={n} candidates={} benefit_factor={}",
            candidates.len(),
            self.benefit_factor
        );
        candidates
    }
}
