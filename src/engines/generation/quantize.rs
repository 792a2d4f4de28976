/// Fixed-point conversion between real device dimensions and integer genes
///
/// A value is quantized by working on its shortest decimal representation,
/// the same digits `Display` prints for an `f64`. Values already on the
/// precision grid therefore convert exactly, without the representation error
/// that multiplying by a power of ten introduces (`2.675 * 100.0 != 267.5`).

use crate::error::{CellsizerError, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Integer gene in the fixed-point domain.
///
/// Signed and 64 bits wide so that crossover blends and gaussian noise can
/// overshoot the bounds without wrapping around before they are clipped.
pub type Gene = i64;

/// Largest number of fractional digits we accept.
pub const MAX_PRECISION_DIGITS: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rounding {
    /// Ties go to the even neighbour (banker's rounding)
    HalfEven,
    /// Ties go away from zero
    #[default]
    HalfAwayFromZero,
}

/// Number of fractional decimal digits kept in the fixed-point domain
///
/// Deserializes from a digit count (`2`) or a grid step (`"0.01"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub struct Precision(u32);

#[derive(Deserialize)]
#[serde(untagged)]
enum PrecisionRepr {
    Digits(u32),
    Step(String),
}

impl Precision {
    pub fn new(digits: u32) -> Result<Self> {
        if digits > MAX_PRECISION_DIGITS {
            return Err(CellsizerError::InvalidPrecision(format!(
                "{} (maximum is {})",
                digits, MAX_PRECISION_DIGITS
            )));
        }
        Ok(Self(digits))
    }

    pub fn digits(self) -> u32 {
        self.0
    }

    /// Size of one grid step expressed as an integer divisor
    pub fn factor(self) -> i64 {
        10_i64.pow(self.0)
    }
}

impl Default for Precision {
    /// Two fractional digits
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u32> for Precision {
    type Error = CellsizerError;

    fn try_from(digits: u32) -> Result<Self> {
        Self::new(digits)
    }
}

impl<'de> Deserialize<'de> for Precision {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match PrecisionRepr::deserialize(deserializer)? {
            PrecisionRepr::Digits(digits) => Self::new(digits),
            PrecisionRepr::Step(step) => step.parse(),
        }
        .map_err(de::Error::custom)
    }
}

impl From<Precision> for u32 {
    fn from(p: Precision) -> Self {
        p.0
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            write!(f, "1")
        } else {
            write!(f, "0.{}1", "0".repeat(self.0 as usize - 1))
        }
    }
}

/// Parses a grid step such as `"0.01"` (two digits) or `"1"` (zero digits)
impl FromStr for Precision {
    type Err = CellsizerError;

    fn from_str(s: &str) -> Result<Self> {
        let step = s.trim();
        if step == "1" {
            return Self::new(0);
        }
        let invalid = || CellsizerError::InvalidPrecision(format!("'{}' is not a decimal grid step", s));
        let frac = step.strip_prefix("0.").ok_or_else(invalid)?;
        match frac.strip_suffix('1') {
            Some(zeros) if zeros.chars().all(|c| c == '0') => {
                Self::new(frac.len() as u32)
            }
            _ => Err(invalid()),
        }
    }
}

/// Convert `value` to a fixed-point gene with `precision` fractional digits
pub fn quantize(value: f64, precision: Precision, rounding: Rounding) -> Result<Gene> {
    if !value.is_finite() {
        return Err(CellsizerError::NonFiniteValue(value));
    }

    let overflow = || CellsizerError::QuantizeOverflow {
        value,
        digits: precision.digits(),
    };

    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let digits = precision.digits() as usize;
    let kept_frac: String = frac_part
        .chars()
        .chain(std::iter::repeat('0'))
        .take(digits)
        .collect();
    let dropped = frac_part.get(digits..).unwrap_or("");

    let mut magnitude: i128 = format!("{}{}", int_part, kept_frac)
        .parse()
        .map_err(|_| overflow())?;

    let mut dropped_digits = dropped.bytes().map(|b| b - b'0');
    let first = dropped_digits.next().unwrap_or(0);
    let rest_nonzero = dropped_digits.any(|d| d != 0);

    let round_up = match rounding {
        Rounding::HalfAwayFromZero => first >= 5,
        Rounding::HalfEven => {
            first > 5 || (first == 5 && (rest_nonzero || magnitude % 2 == 1))
        }
    };
    if round_up {
        magnitude += 1;
    }

    let signed = if value.is_sign_negative() { -magnitude } else { magnitude };
    Gene::try_from(signed).map_err(|_| overflow())
}

/// Inverse of [`quantize`]: convert a fixed-point gene back to a real value
pub fn scale(value: Gene, precision: Precision) -> f64 {
    value as f64 / precision.factor() as f64
}

/// Round a real value in the gene domain to the nearest gene, ties away from zero
pub(crate) fn round_gene(value: f64) -> Gene {
    // `as` saturates at the i64 range, which only matters for absurd blends
    value.round() as Gene
}
