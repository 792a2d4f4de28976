use super::traits::ConfigSection;
use crate::error::CellsizerError;
use serde::{Deserialize, Serialize};

/// Population parameters of the genetic candidate generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Number of candidates in a population
    pub num_individuals: usize,
    /// Whether the best candidate is carried into the next generation
    pub elitism: bool,
    /// How many gene positions arithmetic crossover blends
    pub n_points: usize,
    /// Blending coefficient for arithmetic crossover
    pub alpha: f64,
    /// Probability a single gene is mutated
    pub p_mutation: f64,
    /// Standard deviation of the additive gaussian noise
    pub mutation_std_deviation: f64,
    /// Scale mutation noise by `mutation_std_deviation`. When false the noise
    /// has unit standard deviation in the fixed-point domain.
    pub apply_mutation_std_deviation: bool,
    /// Parent pairs drawn per generation before giving up on finding
    /// `num_individuals` distinct children
    pub max_attempts_per_generation: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            num_individuals: 20,
            elitism: true,
            n_points: 1,
            alpha: 0.5,
            p_mutation: 0.1,
            mutation_std_deviation: 1.0,
            apply_mutation_std_deviation: false,
            max_attempts_per_generation: 10_000,
        }
    }
}

impl GeneticConfig {
    /// Standard deviation actually applied to mutation noise
    pub fn effective_mutation_std_deviation(&self) -> f64 {
        if self.apply_mutation_std_deviation {
            self.mutation_std_deviation
        } else {
            1.0
        }
    }
}

impl ConfigSection for GeneticConfig {
    fn section_name() -> &'static str {
        "genetic"
    }

    fn validate(&self) -> Result<(), CellsizerError> {
        if self.num_individuals < 2 {
            return Err(CellsizerError::Configuration(
                "Population size must be at least 2".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(CellsizerError::Configuration(
                "Crossover alpha must be between 0 and 1".to_string()
            ));
        }
        if !(0.0..=1.0).contains(&self.p_mutation) {
            return Err(CellsizerError::Configuration(
                "Mutation probability must be between 0 and 1".to_string()
            ));
        }
        if !self.mutation_std_deviation.is_finite() || self.mutation_std_deviation < 0.0 {
            return Err(CellsizerError::Configuration(
                "Mutation standard deviation must be finite and non-negative".to_string()
            ));
        }
        if self.max_attempts_per_generation == 0 {
            return Err(CellsizerError::Configuration(
                "max_attempts_per_generation must be positive".to_string()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GeneticConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_population() {
        let config = GeneticConfig {
            num_individuals: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_rates() {
        let config = GeneticConfig {
            alpha: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GeneticConfig {
            p_mutation: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_mutation_scale_is_opt_in() {
        let mut config = GeneticConfig {
            mutation_std_deviation: 4.0,
            ..Default::default()
        };
        assert_eq!(config.effective_mutation_std_deviation(), 1.0);

        config.apply_mutation_std_deviation = true;
        assert_eq!(config.effective_mutation_std_deviation(), 4.0);
    }
}
