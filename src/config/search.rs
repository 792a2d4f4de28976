use super::traits::ConfigSection;
use crate::error::CellsizerError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of generations evaluated before the search stops
    pub max_iterations: usize,
    /// Seed for the random stream; entropy when absent
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            seed: None,
        }
    }
}

impl ConfigSection for SearchConfig {
    fn section_name() -> &'static str {
        "search"
    }

    fn validate(&self) -> Result<(), CellsizerError> {
        if self.max_iterations == 0 {
            return Err(CellsizerError::Configuration(
                "max_iterations must be at least 1".to_string()
            ));
        }
        Ok(())
    }
}
