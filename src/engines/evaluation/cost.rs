use crate::error::{CellsizerError, Result};
use crate::types::ParameterSet;
use std::collections::HashMap;

/// Cost per candidate, keyed by [`Candidate::key`]
pub type CostMap = HashMap<String, f64>;

/// Anything that can be scored and looked up in a [`CostMap`]
pub trait Candidate {
    fn key(&self) -> &str;
}

impl Candidate for ParameterSet {
    fn key(&self) -> &str {
        ParameterSet::key(self)
    }
}

/// Scores a whole population at once.
///
/// Implementations must return exactly one entry per submitted candidate.
pub trait Evaluator<C> {
    fn evaluate(&mut self, population: &[C]) -> Result<CostMap>;
}

impl<C, F> Evaluator<C> for F
where
    F: FnMut(&[C]) -> Result<CostMap>,
{
    fn evaluate(&mut self, population: &[C]) -> Result<CostMap> {
        self(population)
    }
}

/// Look up the cost of `key`, failing if the evaluator left it out
pub fn cost_of(costs: &CostMap, key: &str) -> Result<f64> {
    costs
        .get(key)
        .copied()
        .ok_or_else(|| CellsizerError::MissingCost(key.to_string()))
}
