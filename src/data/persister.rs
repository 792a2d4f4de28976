use crate::error::Result;
use crate::types::ParameterSet;
use std::path::{Path, PathBuf};

/// Durable sink for generated parameter sets, called once per population member
pub trait Persister {
    fn persist(&self, parameter_set: &ParameterSet) -> Result<()>;
}

impl<F> Persister for F
where
    F: Fn(&ParameterSet) -> Result<()>,
{
    fn persist(&self, parameter_set: &ParameterSet) -> Result<()> {
        self(parameter_set)
    }
}

/// Writes each parameter set to `{dir}/{name}.json`.
///
/// Names repeat across generations, so a later generation overwrites the
/// files of the previous one.
#[derive(Debug, Clone)]
pub struct JsonFilePersister {
    dir: PathBuf,
}

impl JsonFilePersister {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        std::fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    pub fn path_for(&self, parameter_set: &ParameterSet) -> PathBuf {
        self.dir.join(format!("{}.json", parameter_set.name()))
    }
}

impl Persister for JsonFilePersister {
    fn persist(&self, parameter_set: &ParameterSet) -> Result<()> {
        let path = self.path_for(parameter_set);
        let json = serde_json::to_string_pretty(parameter_set)?;
        std::fs::write(&path, json)?;
        log::trace!("Persisted {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let persister = JsonFilePersister::new(dir.path().join("netlists")).unwrap();

        let set = ParameterSet::new(
            "inv_3",
            vec!["mp".into(), "mn".into()],
            vec![2.5, 1.25],
            vec![1.0, 1.0],
            vec![2, 1],
        )
        .unwrap();
        persister.persist(&set).unwrap();

        let loaded = ParameterSet::from_json_file(persister.path_for(&set)).unwrap();
        assert_eq!(loaded, set);
    }
}
