//! Genetic sizing of analog circuit devices.
//!
//! A [`GeneticCandidateGenerator`] encodes transistor widths, lengths and
//! finger counts as fixed-point chromosomes and breeds populations of sized
//! circuits. An [`EvolutionEngine`] drives it generation by generation,
//! asking an external [`Evaluator`] (usually a circuit simulator) for the cost
//! of every candidate.
//!
//! ```ignore
//! let generator = GeneticCandidateGenerator::new(config.genetic, &config.search_space, reference)?
//!     .with_persister(JsonFilePersister::new(&config.io.output_dir)?);
//! let mut engine = EvolutionEngine::from_config(generator, evaluator, &config.search);
//! let outcome = engine.run(LogProgressCallback::new(config.search.max_iterations))?;
//! ```

pub mod config;
pub mod data;
pub mod engines;
pub mod error;
pub mod types;

pub use config::{AppConfig, ConfigManager};
pub use data::{JsonFilePersister, Persister};
pub use engines::evaluation::{Candidate, CommandEvaluator, CostMap, Evaluator};
pub use engines::generation::{
    CandidateGenerator, EvolutionEngine, GeneticCandidateGenerator, LogProgressCallback,
    SearchOutcome, SearchState,
};
pub use error::{CellsizerError, Result};
pub use types::{Bounds, ParameterSet};
