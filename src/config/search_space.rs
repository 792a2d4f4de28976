use super::traits::ConfigSection;
use crate::engines::generation::quantize::Precision;
use crate::error::CellsizerError;
use crate::types::Bounds;
use serde::{Deserialize, Serialize};

/// Real-valued device limits and the fixed-point grid they are sampled on
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSpaceConfig {
    pub min_width: f64,
    pub max_width: f64,
    pub min_length: f64,
    pub max_length: f64,
    pub min_fingers: u32,
    pub max_fingers: u32,
    /// Fractional digits kept when quantizing widths and lengths, given as a
    /// digit count or a grid step such as `"0.01"`
    pub precision: Precision,
}

impl Default for SearchSpaceConfig {
    fn default() -> Self {
        Self {
            min_width: 1.0,
            max_width: 10.0,
            min_length: 1.0,
            max_length: 5.0,
            min_fingers: 1,
            max_fingers: 3,
            precision: Precision::default(),
        }
    }
}

impl SearchSpaceConfig {
    /// Quantized bounds of this search space
    pub fn bounds(&self) -> Result<Bounds, CellsizerError> {
        Bounds::quantized(
            self.min_width,
            self.max_width,
            self.min_length,
            self.max_length,
            self.min_fingers,
            self.max_fingers,
            self.precision,
        )
    }
}

impl ConfigSection for SearchSpaceConfig {
    fn section_name() -> &'static str {
        "search_space"
    }

    fn validate(&self) -> Result<(), CellsizerError> {
        self.bounds().map(|_| ())
    }
}
