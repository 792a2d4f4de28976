use crate::engines::generation::quantize::{quantize, scale, Gene, Precision, Rounding};
use crate::error::{CellsizerError, Result};
use crate::types::{Bounds, ParameterSet};

/// Flat gene vector of a parameter set.
///
/// Layout is `[widths.., lengths.., fingers..]`, each segment one gene per
/// device. Genetic operators are not bounds-aware; out-of-range genes are
/// corrected by [`Chromosome::clipped`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chromosome(Vec<Gene>);

impl Chromosome {
    pub fn new(genes: Vec<Gene>) -> Self {
        Self(genes)
    }

    pub fn genes(&self) -> &[Gene] {
        &self.0
    }

    pub fn genes_mut(&mut self) -> &mut [Gene] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_all_zero(&self) -> bool {
        self.0.iter().all(|&g| g == 0)
    }

    pub fn into_genes(self) -> Vec<Gene> {
        self.0
    }

    /// Copy with every segment clamped to its axis of `bounds`
    pub fn clipped(&self, bounds: &Bounds) -> Result<Chromosome> {
        if self.len() % 3 != 0 {
            return Err(CellsizerError::ShapeMismatch(format!(
                "chromosome of length {} is not three equal segments",
                self.len()
            )));
        }

        let n = self.len() / 3;
        let genes = self
            .0
            .iter()
            .enumerate()
            .map(|(i, &g)| match i / n {
                0 => g.clamp(bounds.min_width, bounds.max_width),
                1 => g.clamp(bounds.min_length, bounds.max_length),
                _ => g.clamp(bounds.min_fingers, bounds.max_fingers),
            })
            .collect();
        Ok(Chromosome(genes))
    }
}

/// Decoded device dimensions: widths, lengths and finger counts
pub type DeviceDimensions = (Vec<f64>, Vec<f64>, Vec<u32>);

pub fn normalize(parameter_set: &ParameterSet, precision: Precision) -> Result<Chromosome> {
    let q = |v: &f64| quantize(*v, precision, Rounding::default());

    let mut genes = Vec::with_capacity(parameter_set.num_devices() * 3);
    for w in parameter_set.device_widths() {
        genes.push(q(w)?);
    }
    for l in parameter_set.device_lengths() {
        genes.push(q(l)?);
    }
    genes.extend(parameter_set.device_fingers().iter().map(|&f| Gene::from(f)));

    Ok(Chromosome(genes))
}

pub fn denormalize(
    chromosome: &Chromosome,
    precision: Precision,
    bounds: &Bounds,
) -> Result<DeviceDimensions> {
    let clipped = chromosome.clipped(bounds)?;
    let n = clipped.len() / 3;
    let genes = clipped.genes();

    let widths = genes[..n].iter().map(|&w| scale(w, precision)).collect();
    let lengths = genes[n..2 * n].iter().map(|&l| scale(l, precision)).collect();
    let fingers = genes[2 * n..]
        .iter()
        .map(|&f| {
            u32::try_from(f).map_err(|_| {
                CellsizerError::InternalConsistency(format!(
                    "finger count {} outside u32 after clipping",
                    f
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((widths, lengths, fingers))
}
