pub mod command;
pub mod cost;

pub use command::CommandEvaluator;
pub use cost::{cost_of, Candidate, CostMap, Evaluator};
