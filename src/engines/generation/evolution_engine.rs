use crate::config::SearchConfig;
use crate::engines::evaluation::{cost_of, Candidate, CostMap, Evaluator};
use crate::error::{CellsizerError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A population based search strategy
///
/// Every method that needs randomness takes the stream explicitly, so
/// strategies stay plain values and runs are reproducible from a seed.
pub trait CandidateGenerator {
    type Candidate: Candidate;

    fn initial_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Self::Candidate>>;

    fn next_population<R: Rng + ?Sized>(
        &self,
        current: &[Self::Candidate],
        costs: &CostMap,
        rng: &mut R,
    ) -> Result<Vec<Self::Candidate>>;
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, min_cost: f64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// Next generation to evaluate
    Running(usize),
    Done,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome<C> {
    /// Lowest cost of each evaluated generation
    pub min_cost_per_iteration: Vec<f64>,
    /// Cheapest candidate seen across all generations
    pub best: Option<(C, f64)>,
    /// Population produced after the last evaluation, never scored
    pub final_population: Vec<C>,
}

/// Generational search loop: evaluate, record, breed, until the iteration budget runs out
pub struct EvolutionEngine<G: CandidateGenerator, E> {
    generator: G,
    evaluator: E,
    rng: StdRng,
    max_iterations: usize,
    iteration: usize,
    min_cost_per_iteration: Vec<f64>,
    best: Option<(G::Candidate, f64)>,
}

impl<G, E> EvolutionEngine<G, E>
where
    G: CandidateGenerator,
    G::Candidate: Clone,
    E: Evaluator<G::Candidate>,
{
    pub fn new(generator: G, evaluator: E, max_iterations: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            generator,
            evaluator,
            rng,
            max_iterations,
            iteration: 0,
            min_cost_per_iteration: vec![0.0; max_iterations],
            best: None,
        }
    }

    pub fn from_config(generator: G, evaluator: E, config: &SearchConfig) -> Self {
        Self::new(generator, evaluator, config.max_iterations, config.seed)
    }

    pub fn state(&self) -> SearchState {
        if self.iteration >= self.max_iterations {
            SearchState::Done
        } else {
            SearchState::Running(self.iteration)
        }
    }

    pub fn initial_population(&mut self) -> Result<Vec<G::Candidate>> {
        self.generator.initial_population(&mut self.rng)
    }

    /// Evaluate `population`, record its minimum cost and breed the next one
    pub fn step(&mut self, population: &[G::Candidate]) -> Result<Vec<G::Candidate>> {
        let SearchState::Running(iteration) = self.state() else {
            return Err(CellsizerError::InternalConsistency(format!(
                "step called after all {} iterations ran",
                self.max_iterations
            )));
        };

        let costs = self.evaluator.evaluate(population)?;

        let mut cheapest: Option<(&G::Candidate, f64)> = None;
        for candidate in population {
            let cost = cost_of(&costs, candidate.key())?;
            if cheapest.map_or(true, |(_, c)| cost < c) {
                cheapest = Some((candidate, cost));
            }
        }
        let (cheapest, min_cost) = cheapest.ok_or_else(|| {
            CellsizerError::ShapeMismatch("cannot evaluate an empty population".to_string())
        })?;

        log::debug!("minimum cost of iteration {}: {}", iteration, min_cost);
        self.min_cost_per_iteration[iteration] = min_cost;
        if self.best.as_ref().map_or(true, |(_, c)| min_cost < *c) {
            self.best = Some((cheapest.clone(), min_cost));
        }

        self.iteration += 1;
        self.generator.next_population(population, &costs, &mut self.rng)
    }

    /// Run every remaining generation starting from a fresh initial population
    pub fn run<P: ProgressCallback>(&mut self, mut progress: P) -> Result<SearchOutcome<G::Candidate>> {
        let mut population = self.initial_population()?;

        while let SearchState::Running(generation) = self.state() {
            progress.on_generation_start(generation);
            population = self.step(&population)?;
            progress.on_generation_complete(generation, self.min_cost_per_iteration[generation]);
        }

        Ok(SearchOutcome {
            min_cost_per_iteration: self.min_cost_per_iteration.clone(),
            best: self.best.clone(),
            final_population: population,
        })
    }

    pub fn min_cost_per_iteration(&self) -> &[f64] {
        &self.min_cost_per_iteration
    }

    pub fn best(&self) -> Option<&(G::Candidate, f64)> {
        self.best.as_ref()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Point(String, f64);

    impl Candidate for Point {
        fn key(&self) -> &str {
            &self.0
        }
    }

    /// Random walk that halves the spread every generation
    struct Shrink;

    impl CandidateGenerator for Shrink {
        type Candidate = Point;

        fn initial_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Point>> {
            Ok((0..4).map(|i| Point(format!("p{}", i), rng.gen_range(1.0..100.0))).collect())
        }

        fn next_population<R: Rng + ?Sized>(
            &self,
            current: &[Point],
            _costs: &CostMap,
            _rng: &mut R,
        ) -> Result<Vec<Point>> {
            Ok(current.iter().map(|p| Point(p.0.clone(), p.1 / 2.0)).collect())
        }
    }

    fn value_cost(population: &[Point]) -> Result<CostMap> {
        Ok(population.iter().map(|p| (p.0.clone(), p.1)).collect())
    }

    #[derive(Default)]
    struct Recorder {
        started: Vec<usize>,
        completed: Vec<(usize, f64)>,
    }

    impl ProgressCallback for &mut Recorder {
        fn on_generation_start(&mut self, generation: usize) {
            self.started.push(generation);
        }

        fn on_generation_complete(&mut self, generation: usize, min_cost: f64) {
            self.completed.push((generation, min_cost));
        }
    }

    #[test]
    fn test_history_presized_and_filled() {
        let mut engine = EvolutionEngine::new(Shrink, value_cost, 3, Some(7));
        assert_eq!(engine.min_cost_per_iteration(), &[0.0, 0.0, 0.0]);
        assert_eq!(engine.state(), SearchState::Running(0));

        let mut recorder = Recorder::default();
        let outcome = engine.run(&mut recorder).unwrap();

        assert_eq!(engine.state(), SearchState::Done);
        assert_eq!(recorder.started, vec![0, 1, 2]);
        let history = outcome.min_cost_per_iteration;
        assert_eq!(history.len(), 3);
        assert_eq!(history[1], history[0] / 2.0);
        assert_eq!(history[2], history[0] / 4.0);
        assert_eq!(outcome.best.unwrap().1, history[2]);
        assert_eq!(recorder.completed[2].1, history[2]);
    }

    #[test]
    fn test_step_after_done_fails() {
        let mut engine = EvolutionEngine::new(Shrink, value_cost, 1, Some(1));
        let population = engine.initial_population().unwrap();
        let next = engine.step(&population).unwrap();
        assert!(matches!(
            engine.step(&next),
            Err(CellsizerError::InternalConsistency(_))
        ));
    }

    #[test]
    fn test_missing_cost_propagates() {
        let incomplete = |population: &[Point]| -> Result<CostMap> {
            Ok(population.iter().skip(1).map(|p| (p.0.clone(), p.1)).collect())
        };
        let mut engine = EvolutionEngine::new(Shrink, incomplete, 2, Some(1));
        let population = engine.initial_population().unwrap();
        assert!(matches!(
            engine.step(&population),
            Err(CellsizerError::MissingCost(k)) if k == "p0"
        ));
    }

    #[test]
    fn test_zero_iterations_is_done() {
        let mut engine = EvolutionEngine::new(Shrink, value_cost, 0, None);
        assert_eq!(engine.state(), SearchState::Done);
        let mut recorder = Recorder::default();
        let outcome = engine.run(&mut recorder).unwrap();
        assert!(outcome.min_cost_per_iteration.is_empty());
        assert!(outcome.best.is_none());
    }
}
