use crate::config::{ConfigSection, GeneticConfig, SearchSpaceConfig};
use crate::data::Persister;
use crate::engines::evaluation::{cost_of, CostMap};
use crate::engines::generation::{
    chromosome::{denormalize, normalize, Chromosome},
    evolution_engine::CandidateGenerator,
    operators::{arithmetic_crossover, gaussian_mutation, random_genes, select_parent_pair},
    quantize::Precision,
};
use crate::error::{CellsizerError, Result};
use crate::types::{Bounds, ParameterSet};
use rand::Rng;

/// Genetic search over device widths, lengths and finger counts.
///
/// Configuration is fixed at construction. The random stream is owned by the
/// caller and passed into every operation that draws from it, so two
/// generators with the same configuration fed the same stream and costs
/// produce the same populations.
pub struct GeneticCandidateGenerator {
    config: GeneticConfig,
    bounds: Bounds,
    precision: Precision,
    reference: ParameterSet,
    id_num_digits: usize,
    persister: Option<Box<dyn Persister>>,
}

impl GeneticCandidateGenerator {
    pub fn new(
        config: GeneticConfig,
        search_space: &SearchSpaceConfig,
        reference: ParameterSet,
    ) -> Result<Self> {
        config.validate()?;
        let bounds = search_space.bounds()?;
        reference.validate()?;
        if reference.num_devices() == 0 {
            return Err(CellsizerError::Configuration(format!(
                "Reference '{}' has no devices to size",
                reference.name()
            )));
        }

        if !config.apply_mutation_std_deviation && config.mutation_std_deviation != 1.0 {
            log::warn!(
                "mutation_std_deviation = {} is not applied; mutation noise uses unit standard deviation \
                 (set apply_mutation_std_deviation to use it)",
                config.mutation_std_deviation
            );
        }

        let id_num_digits = id_digits(config.num_individuals);

        Ok(Self {
            config,
            bounds,
            precision: search_space.precision,
            reference,
            id_num_digits,
            persister: None,
        })
    }

    pub fn with_persister<P: Persister + 'static>(mut self, persister: P) -> Self {
        self.persister = Some(Box::new(persister));
        self
    }

    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn reference(&self) -> &ParameterSet {
        &self.reference
    }

    /// `{reference}_{idx}`, zero padded to `ceil(log10(num_individuals))` digits
    pub fn candidate_name(&self, idx: usize) -> String {
        format!(
            "{}_{:0width$}",
            self.reference.name(),
            idx,
            width = self.id_num_digits
        )
    }

    pub fn encode(&self, parameter_set: &ParameterSet) -> Result<Chromosome> {
        normalize(parameter_set, self.precision)
    }

    /// Decode a chromosome (clipped to bounds) into the parameter set of slot `idx`
    pub fn materialize(&self, idx: usize, chromosome: &Chromosome) -> Result<ParameterSet> {
        let (widths, lengths, fingers) = denormalize(chromosome, self.precision, &self.bounds)?;
        self.reference
            .with_overrides(self.candidate_name(idx), widths, lengths, fingers)
    }

    fn random_chromosome<R: Rng + ?Sized>(&self, rng: &mut R) -> Chromosome {
        let n = self.reference.num_devices();
        let b = &self.bounds;

        let mut genes = random_genes(n, b.min_width, b.max_width, rng);
        genes.extend(random_genes(n, b.min_length, b.max_length, rng));
        genes.extend(random_genes(n, b.min_fingers, b.max_fingers, rng));
        Chromosome::new(genes)
    }

    /// Fitness is the inverse of cost, in population order
    fn fitness(&self, population: &[ParameterSet], costs: &CostMap) -> Result<Vec<f64>> {
        population
            .iter()
            .map(|candidate| {
                let cost = cost_of(costs, candidate.key())?;
                if !cost.is_finite() || cost <= 0.0 {
                    return Err(CellsizerError::InvalidCost {
                        key: candidate.key().to_string(),
                        cost,
                    });
                }
                Ok(1.0 / cost)
            })
            .collect()
    }

    fn persist_all(&self, population: &[ParameterSet]) -> Result<()> {
        if let Some(persister) = &self.persister {
            for parameter_set in population {
                persister.persist(parameter_set)?;
            }
        }
        Ok(())
    }
}

impl CandidateGenerator for GeneticCandidateGenerator {
    type Candidate = ParameterSet;

    fn initial_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<ParameterSet>> {
        let population = (0..self.config.num_individuals)
            .map(|idx| {
                let chromosome = self.random_chromosome(rng);
                self.materialize(idx, &chromosome)
            })
            .collect::<Result<Vec<_>>>()?;

        self.persist_all(&population)?;
        Ok(population)
    }

    fn next_population<R: Rng + ?Sized>(
        &self,
        current: &[ParameterSet],
        costs: &CostMap,
        rng: &mut R,
    ) -> Result<Vec<ParameterSet>> {
        let target = self.config.num_individuals;
        if current.len() != target {
            return Err(CellsizerError::ShapeMismatch(format!(
                "expected a population of {}, got {}",
                target,
                current.len()
            )));
        }

        // Candidates with lower cost have higher probability of being a parent
        let fitness = self.fitness(current, costs)?;
        let total: f64 = fitness.iter().sum();
        let probabilities: Vec<f64> = fitness.iter().map(|f| f / total).collect();

        let mating_pool = current
            .iter()
            .map(|c| self.encode(c))
            .collect::<Result<Vec<_>>>()?;

        let mut offspring: Vec<Chromosome> = Vec::with_capacity(target);

        // The elite takes slot 0 up front so no child can duplicate it
        if self.config.elitism {
            let best = fittest_index(&fitness);
            log::debug!("Elite '{}' kept at slot 0", current[best].key());
            offspring.push(mating_pool[best].clone());
        }

        let std_deviation = self.config.effective_mutation_std_deviation();
        let mut attempts = 0;
        while offspring.len() < target {
            if attempts >= self.config.max_attempts_per_generation {
                return Err(CellsizerError::PopulationExhausted {
                    accepted: offspring.len(),
                    required: target,
                    attempts,
                });
            }
            attempts += 1;

            let (a, b) = select_parent_pair(&probabilities, rng);
            let (mut child_a, mut child_b) = arithmetic_crossover(
                &mating_pool[a],
                &mating_pool[b],
                self.config.n_points,
                self.config.alpha,
                rng,
            );

            gaussian_mutation(&mut child_a, self.config.p_mutation, std_deviation, rng);
            gaussian_mutation(&mut child_b, self.config.p_mutation, std_deviation, rng);

            // Duplicates are judged on the genes `materialize` will decode
            for child in [child_a, child_b] {
                try_add_child(&mut offspring, child.clipped(&self.bounds)?, target);
            }
        }
        log::debug!(
            "Bred {} distinct children from {} parent draws",
            offspring.len(),
            attempts
        );

        let population = offspring
            .iter()
            .enumerate()
            .map(|(idx, chromosome)| {
                if chromosome.is_all_zero() {
                    return Err(CellsizerError::InternalConsistency(format!(
                        "offspring[{}] contained only zeros",
                        idx
                    )));
                }
                self.materialize(idx, chromosome)
            })
            .collect::<Result<Vec<_>>>()?;

        self.persist_all(&population)?;
        Ok(population)
    }
}

/// Adds `child` unless the population is full or an identical child exists.
/// Returns whether it was added.
fn try_add_child(offspring: &mut Vec<Chromosome>, child: Chromosome, target: usize) -> bool {
    if offspring.len() >= target || offspring.contains(&child) {
        return false;
    }
    offspring.push(child);
    true
}

/// Index of the highest fitness, the first one on ties
fn fittest_index(fitness: &[f64]) -> usize {
    let mut best = 0;
    for (i, f) in fitness.iter().enumerate() {
        if *f > fitness[best] {
            best = i;
        }
    }
    best
}

/// Smallest `d` with `10^d >= n`, i.e. `ceil(log10(n))`
fn id_digits(n: usize) -> usize {
    let mut digits = 0;
    let mut reach = 1usize;
    while reach < n {
        reach = reach.saturating_mul(10);
        digits += 1;
    }
    digits
}
