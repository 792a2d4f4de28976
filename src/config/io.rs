use super::traits::ConfigSection;
use crate::error::CellsizerError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the reference circuit comes from and where results go
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IoConfig {
    /// JSON file holding the reference parameter set
    pub reference_path: PathBuf,
    /// Directory receiving generated parameter sets and the cost history
    pub output_dir: PathBuf,
    /// Program that scores a population and prints a JSON cost map
    pub evaluator_command: String,
    /// Arguments passed before the candidate keys
    pub evaluator_args: Vec<String>,
    /// Working directory of the evaluator; `output_dir` when absent
    pub working_dir: Option<PathBuf>,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            reference_path: PathBuf::from("reference.json"),
            output_dir: PathBuf::from("cellsizer_out"),
            evaluator_command: "simulate".to_string(),
            evaluator_args: Vec::new(),
            working_dir: None,
        }
    }
}

impl ConfigSection for IoConfig {
    fn section_name() -> &'static str {
        "io"
    }

    fn validate(&self) -> Result<(), CellsizerError> {
        if self.evaluator_command.trim().is_empty() {
            return Err(CellsizerError::Configuration(
                "evaluator_command must not be empty".to_string()
            ));
        }
        Ok(())
    }
}
