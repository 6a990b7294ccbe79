//! Constructive heuristics for building carpool plans.
//!
//! - [`consolidate`] — Savings-based greedy chaining of solo commutes,
//!   O(n² log n)

mod consolidation;

pub use consolidation::{consolidate, MergeOutcome, RouteConsolidator};
