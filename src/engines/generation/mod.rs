pub mod quantize;
pub mod chromosome;
pub mod operators;
pub mod candidate_generator;
pub mod evolution_engine;
pub mod progress;

pub use quantize::{quantize, scale, Gene, Precision, Rounding};
pub use chromosome::{denormalize, normalize, Chromosome};
pub use candidate_generator::GeneticCandidateGenerator;
pub use evolution_engine::{
    CandidateGenerator, EvolutionEngine, ProgressCallback, SearchOutcome, SearchState,
};
pub use progress::LogProgressCallback;
