use thiserror::Error;

#[derive(Error, Debug)]
pub enum CellsizerError {
    #[error("Invalid precision: {0} fractional digits")]
    InvalidPrecision(String),

    #[error("Cannot quantize non-finite value {0}")]
    NonFiniteValue(f64),

    #[error("Value {value} does not fit a gene at {digits} fractional digits")]
    QuantizeOverflow { value: f64, digits: u32 },

    #[error("Invalid {axis} bounds: min {min} > max {max}")]
    InvalidBounds { axis: &'static str, min: i64, max: i64 },

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid parameter set: {0}")]
    InvalidParameterSet(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cost map has no entry for '{0}'")]
    MissingCost(String),

    #[error("Invalid cost {cost} for '{key}': costs must be finite and positive")]
    InvalidCost { key: String, cost: f64 },

    #[error("Internal consistency error: {0}")]
    InternalConsistency(String),

    #[error("Population exhausted: accepted {accepted}/{required} distinct children after {attempts} parent draws")]
    PopulationExhausted {
        accepted: usize,
        required: usize,
        attempts: usize,
    },

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, CellsizerError>;
