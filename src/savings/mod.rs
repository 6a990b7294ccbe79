//! Savings scoring for carpool merges.
//!
//! - [`SavingsScorer`] — per-ordered-pair benefit of one driver picking up
//!   another node's commuter, and the sorted candidate list, O(n² log n)

mod scorer;

pub use scorer::{Candidate, SavingsScorer};
