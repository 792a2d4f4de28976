use crate::engines::generation::chromosome::Chromosome;
use crate::engines::generation::quantize::{round_gene, Gene};
use rand::Rng;
use rand_distr::StandardNormal;

/// Roulette wheel selection: probability proportional to weight
///
/// `exclude` removes one index from the wheel, which is how two parents are
/// drawn without replacement. Weights must be non-negative and at least one
/// eligible weight must be positive.
pub fn roulette_selection<R: Rng + ?Sized>(
    weights: &[f64],
    exclude: Option<usize>,
    rng: &mut R,
) -> usize {
    let eligible = |i: usize| Some(i) != exclude;
    let total: f64 = weights
        .iter()
        .enumerate()
        .filter(|(i, _)| eligible(*i))
        .map(|(_, w)| *w)
        .sum();

    let mut spin = rng.gen::<f64>() * total;

    let mut last = 0;
    for (i, w) in weights.iter().enumerate() {
        if !eligible(i) {
            continue;
        }
        last = i;
        spin -= w;
        if spin < 0.0 {
            return i;
        }
    }

    // Float residue can leave the spin a hair above zero
    last
}

/// Draw two distinct parent indices, weighted by selection probability
pub fn select_parent_pair<R: Rng + ?Sized>(probabilities: &[f64], rng: &mut R) -> (usize, usize) {
    let first = roulette_selection(probabilities, None, rng);
    let second = roulette_selection(probabilities, Some(first), rng);
    (first, second)
}

/// N-point arithmetic crossover
///
/// `n_points` gene positions are drawn with replacement. At each drawn
/// position the children take `alpha`-weighted blends of both parents,
/// everywhere else they copy their own parent.
pub fn arithmetic_crossover<R: Rng + ?Sized>(
    parent_a: &Chromosome,
    parent_b: &Chromosome,
    n_points: usize,
    alpha: f64,
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    debug_assert_eq!(parent_a.len(), parent_b.len());

    let mut child_a = parent_a.clone();
    let mut child_b = parent_b.clone();
    if parent_a.is_empty() {
        return (child_a, child_b);
    }

    let mut mix = vec![false; parent_a.len()];
    for _ in 0..n_points {
        mix[rng.gen_range(0..parent_a.len())] = true;
    }

    let (a, b) = (parent_a.genes(), parent_b.genes());
    for (k, _) in mix.iter().enumerate().filter(|(_, m)| **m) {
        let (ga, gb) = (a[k] as f64, b[k] as f64);
        child_a.genes_mut()[k] = round_gene(alpha * ga + (1.0 - alpha) * gb);
        child_b.genes_mut()[k] = round_gene((1.0 - alpha) * ga + alpha * gb);
    }

    (child_a, child_b)
}

/// Additive gaussian mutation
///
/// The mask is drawn first (one draw per gene), then one normal sample per
/// gene, regardless of the mask.
pub fn gaussian_mutation<R: Rng + ?Sized>(
    individual: &mut Chromosome,
    p_mutation: f64,
    std_deviation: f64,
    rng: &mut R,
) {
    let mask: Vec<bool> = (0..individual.len())
        .map(|_| rng.gen::<f64>() < p_mutation)
        .collect();
    let noise: Vec<f64> = (0..individual.len())
        .map(|_| rng.sample::<f64, _>(StandardNormal))
        .collect();

    for ((gene, mutate), n) in individual.genes_mut().iter_mut().zip(mask).zip(noise) {
        if mutate {
            *gene = round_gene(*gene as f64 + n * std_deviation);
        }
    }
}

/// Uniform integer genes in `[min, max]`, inclusive
pub fn random_genes<R: Rng + ?Sized>(count: usize, min: Gene, max: Gene, rng: &mut R) -> Vec<Gene> {
    (0..count).map(|_| rng.gen_range(min..=max)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roulette_prefers_heavier_weights() {
        let mut rng = StdRng::seed_from_u64(42);
        let weights = vec![0.1, 0.6, 0.1, 0.2];

        let mut counts = [0usize; 4];
        for _ in 0..2000 {
            counts[roulette_selection(&weights, None, &mut rng)] += 1;
        }

        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| **c).unwrap().0;
        assert_eq!(max_idx, 1);
    }

    #[test]
    fn test_roulette_never_returns_excluded() {
        let mut rng = StdRng::seed_from_u64(7);
        let weights = vec![0.97, 0.01, 0.01, 0.01];
        for _ in 0..500 {
            assert_ne!(roulette_selection(&weights, Some(0), &mut rng), 0);
        }
    }

    #[test]
    fn test_parent_pair_is_distinct() {
        let mut rng = StdRng::seed_from_u64(1);
        let probabilities = vec![0.5, 0.5];
        for _ in 0..100 {
            let (a, b) = select_parent_pair(&probabilities, &mut rng);
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_crossover_blends_only_drawn_points() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = Chromosome::new(vec![100, 200, 300, 1]);
        let b = Chromosome::new(vec![300, 400, 500, 3]);

        let (child_a, child_b) = arithmetic_crossover(&a, &b, 1, 0.5, &mut rng);

        let changed: Vec<usize> = (0..4)
            .filter(|&k| child_a.genes()[k] != a.genes()[k])
            .collect();
        assert_eq!(changed.len(), 1);
        let k = changed[0];
        let midpoint = (a.genes()[k] + b.genes()[k]) / 2;
        assert_eq!(child_a.genes()[k], midpoint);
        assert_eq!(child_b.genes()[k], midpoint);
    }

    #[test]
    fn test_crossover_alpha_one_is_identity() {
        let mut rng = StdRng::seed_from_u64(9);
        let a = Chromosome::new(vec![10, 20, 30]);
        let b = Chromosome::new(vec![40, 50, 60]);

        let (child_a, child_b) = arithmetic_crossover(&a, &b, 3, 1.0, &mut rng);
        assert_eq!(child_a, a);
        assert_eq!(child_b, b);
    }

    #[test]
    fn test_crossover_does_not_clip() {
        let mut rng = StdRng::seed_from_u64(11);
        let a = Chromosome::new(vec![u16::MAX as Gene; 3]);
        let b = Chromosome::new(vec![u16::MAX as Gene; 3]);

        // Blending identical genes keeps the value, no wraparound
        let (child_a, _) = arithmetic_crossover(&a, &b, 3, 0.3, &mut rng);
        assert!(child_a.genes().iter().all(|&g| g == u16::MAX as Gene));
    }

    #[test]
    fn test_mutation_disabled_leaves_genes() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut individual = Chromosome::new(vec![5, 6, 7, 8]);
        gaussian_mutation(&mut individual, 0.0, 1.0, &mut rng);
        assert_eq!(individual.genes(), &[5, 6, 7, 8]);
    }

    #[test]
    fn test_mutation_always_applies_noise() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut individual = Chromosome::new(vec![0; 200]);
        gaussian_mutation(&mut individual, 1.0, 1000.0, &mut rng);
        // With a large scale almost every gene moves
        let moved = individual.genes().iter().filter(|&&g| g != 0).count();
        assert!(moved > 190);
    }

    #[test]
    fn test_random_genes_inclusive_range() {
        let mut rng = StdRng::seed_from_u64(2);
        let genes = random_genes(1000, 1, 3, &mut rng);
        assert!(genes.iter().all(|g| (1..=3).contains(g)));
        assert!(genes.contains(&1) && genes.contains(&3));
    }
}
