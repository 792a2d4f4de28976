use super::cost::{Candidate, CostMap, Evaluator};
use crate::error::{CellsizerError, Result};
use std::path::PathBuf;
use std::process::Command;

/// Scores a population by running an external program.
///
/// The program runs in `working_dir` with `args` followed by one argument per
/// candidate key. It must exit successfully and print a JSON object mapping
/// every key to its cost on stdout.
#[derive(Debug, Clone)]
pub struct CommandEvaluator {
    program: String,
    args: Vec<String>,
    working_dir: PathBuf,
}

impl CommandEvaluator {
    pub fn new(program: impl Into<String>, args: Vec<String>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: working_dir.into(),
        }
    }
}

impl<C: Candidate> Evaluator<C> for CommandEvaluator {
    fn evaluate(&mut self, population: &[C]) -> Result<CostMap> {
        if !self.working_dir.is_dir() {
            return Err(CellsizerError::Evaluation(format!(
                "No directory found at {}",
                self.working_dir.display()
            )));
        }

        log::debug!(
            "Running '{}' on {} candidates in {}",
            self.program,
            population.len(),
            self.working_dir.display()
        );

        let output = Command::new(&self.program)
            .args(&self.args)
            .args(population.iter().map(|c| c.key()))
            .current_dir(&self.working_dir)
            .output()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => CellsizerError::Evaluation(format!(
                    "'{}' does not appear to be an executable",
                    self.program
                )),
                _ => CellsizerError::Io(e),
            })?;

        if !output.status.success() {
            return Err(CellsizerError::Evaluation(format!(
                "'{}' exited with {}: {}{}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let costs: CostMap = serde_json::from_slice(&output.stdout)?;
        if let Some(missing) = population.iter().find(|c| !costs.contains_key(c.key())) {
            return Err(CellsizerError::MissingCost(missing.key().to_string()));
        }

        Ok(costs)
    }
}
