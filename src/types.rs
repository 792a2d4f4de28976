use crate::engines::generation::quantize::{quantize, Gene, Precision, Rounding};
use crate::error::{CellsizerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sized circuit: per-device widths, lengths and finger counts
///
/// Values are never mutated in place; [`ParameterSet::with_overrides`]
/// builds a new set that keeps the structural template (device names) of
/// the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    name: String,
    device_names: Vec<String>,
    device_widths: Vec<f64>,
    device_lengths: Vec<f64>,
    device_fingers: Vec<u32>,
}

impl ParameterSet {
    pub fn new(
        name: impl Into<String>,
        device_names: Vec<String>,
        device_widths: Vec<f64>,
        device_lengths: Vec<f64>,
        device_fingers: Vec<u32>,
    ) -> Result<Self> {
        let set = Self {
            name: name.into(),
            device_names,
            device_widths,
            device_lengths,
            device_fingers,
        };
        set.validate()?;
        Ok(set)
    }

    /// Load a reference parameter set from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let set: ParameterSet = serde_json::from_str(&contents)?;
        set.validate()?;
        Ok(set)
    }

    pub fn validate(&self) -> Result<()> {
        let n = self.device_names.len();
        if self.device_widths.len() != n
            || self.device_lengths.len() != n
            || self.device_fingers.len() != n
        {
            return Err(CellsizerError::InvalidParameterSet(format!(
                "'{}' has {} devices but {} widths, {} lengths and {} finger counts",
                self.name,
                n,
                self.device_widths.len(),
                self.device_lengths.len(),
                self.device_fingers.len()
            )));
        }
        let positive = |v: &f64| v.is_finite() && *v > 0.0;
        if !self.device_widths.iter().all(positive) || !self.device_lengths.iter().all(positive) {
            return Err(CellsizerError::InvalidParameterSet(format!(
                "'{}' has a non-positive width or length",
                self.name
            )));
        }
        Ok(())
    }

    /// Copy this set with a new name and new device dimensions
    pub fn with_overrides(
        &self,
        name: impl Into<String>,
        device_widths: Vec<f64>,
        device_lengths: Vec<f64>,
        device_fingers: Vec<u32>,
    ) -> Result<Self> {
        Self::new(
            name,
            self.device_names.clone(),
            device_widths,
            device_lengths,
            device_fingers,
        )
    }

    /// Key used to index cost results
    pub fn key(&self) -> &str {
        &self.name
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_devices(&self) -> usize {
        self.device_names.len()
    }

    pub fn device_names(&self) -> &[String] {
        &self.device_names
    }

    pub fn device_widths(&self) -> &[f64] {
        &self.device_widths
    }

    pub fn device_lengths(&self) -> &[f64] {
        &self.device_lengths
    }

    pub fn device_fingers(&self) -> &[u32] {
        &self.device_fingers
    }
}

/// Search space limits in the fixed-point domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_width: Gene,
    pub max_width: Gene,
    pub min_length: Gene,
    pub max_length: Gene,
    pub min_fingers: Gene,
    pub max_fingers: Gene,
}

impl Bounds {
    /// Quantize real-valued limits with round-half-to-even.
    ///
    /// Widths and lengths must stay strictly positive after quantization,
    /// otherwise a decoded candidate could carry a zero-sized device.
    #[allow(clippy::too_many_arguments)]
    pub fn quantized(
        min_width: f64,
        max_width: f64,
        min_length: f64,
        max_length: f64,
        min_fingers: u32,
        max_fingers: u32,
        precision: Precision,
    ) -> Result<Self> {
        let q = |v: f64| quantize(v, precision, Rounding::HalfEven);
        let bounds = Self {
            min_width: q(min_width)?,
            max_width: q(max_width)?,
            min_length: q(min_length)?,
            max_length: q(max_length)?,
            min_fingers: Gene::from(min_fingers),
            max_fingers: Gene::from(max_fingers),
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        let axes = [
            ("width", self.min_width, self.max_width),
            ("length", self.min_length, self.max_length),
            ("fingers", self.min_fingers, self.max_fingers),
        ];
        for (axis, min, max) in axes {
            if min > max {
                return Err(CellsizerError::InvalidBounds { axis, min, max });
            }
        }
        if self.min_width < 1 || self.min_length < 1 {
            return Err(CellsizerError::Configuration(
                "Minimum width and length must be at least one grid step".to_string(),
            ));
        }
        if self.min_fingers < 0 {
            return Err(CellsizerError::Configuration(
                "Minimum fingers must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}
