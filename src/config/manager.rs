use super::{
    genetic::GeneticConfig,
    io::IoConfig,
    search::SearchConfig,
    search_space::SearchSpaceConfig,
    traits::ConfigSection,
};
use crate::error::CellsizerError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment variables with this prefix override file values,
/// e.g. `CELLSIZER__GENETIC__NUM_INDIVIDUALS=40`.
pub const ENV_PREFIX: &str = "CELLSIZER";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub genetic: GeneticConfig,
    pub search_space: SearchSpaceConfig,
    pub search: SearchConfig,
    pub io: IoConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), CellsizerError> {
        self.genetic.validate()?;
        self.search_space.validate()?;
        self.search.validate()?;
        self.io.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Load a TOML or JSON file (by extension), layered under environment overrides
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CellsizerError> {
        let config: AppConfig = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());

        *self.write_lock()? = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), CellsizerError> {
        let config = self.get()?;
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| CellsizerError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| CellsizerError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig, CellsizerError> {
        self.config
            .read()
            .map(|c| c.clone())
            .map_err(|_| CellsizerError::Configuration("Configuration lock poisoned".to_string()))
    }

    pub fn update<F>(&self, f: F) -> Result<(), CellsizerError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut updated = self.get()?;
        f(&mut updated);
        updated.validate()?;
        *self.write_lock()? = updated;
        Ok(())
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>, CellsizerError> {
        self.config
            .write()
            .map_err(|_| CellsizerError::Configuration("Configuration lock poisoned".to_string()))
    }
}
