//! Plan evaluation: driven distance, aggregate statistics, and invariant
//! checking.

mod evaluator;

pub use evaluator::{PassengerBand, PlanEvaluator, PlanSummary, Violation, ViolationType};
