//! Per-level geometry of a pyramidal image.
//!
//! Level 0 is the full-resolution image; each higher level is a downsampled
//! copy. All positions handed to a decoder are expressed in level-0 pixels,
//! so the only per-level facts the viewport needs are each level's extent
//! and its downsample factor.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TesseraError};

/// Width and height of one pyramid level, in that level's pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDimensions {
    pub width: u64,
    pub height: u64,
}

impl LevelDimensions {
    pub fn new(width: u64, height: u64) -> Self {
        Self { width, height }
    }
}

/// Immutable description of a pyramid, built once per opened image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PyramidGeometry {
    level_dimensions: Vec<LevelDimensions>,
    level_downsamples: Vec<f64>,
}

impl PyramidGeometry {
    /// Validate and build a geometry.
    ///
    /// Fails with [`TesseraError::InvalidGeometry`] when there are no
    /// levels, the two lists disagree in length, a level has a zero side,
    /// or the downsample factors do not start at 1.0 and never decrease.
    pub fn new(level_dimensions: Vec<LevelDimensions>, level_downsamples: Vec<f64>) -> Result<Self> {
        if level_dimensions.is_empty() {
            return Err(TesseraError::InvalidGeometry(
                "pyramid must have at least one level".into(),
            ));
        }
        if level_dimensions.len() != level_downsamples.len() {
            return Err(TesseraError::InvalidGeometry(format!(
                "{} level dimensions but {} downsample factors",
                level_dimensions.len(),
                level_downsamples.len()
            )));
        }

        for (level, dims) in level_dimensions.iter().enumerate() {
            if dims.width == 0 || dims.height == 0 {
                return Err(TesseraError::InvalidGeometry(format!(
                    "level {level} has empty dimensions {}x{}",
                    dims.width, dims.height
                )));
            }
        }

        if level_downsamples[0] != 1.0 {
            return Err(TesseraError::InvalidGeometry(format!(
                "level 0 downsample must be 1.0, got {}",
                level_downsamples[0]
            )));
        }

        for (level, pair) in level_downsamples.windows(2).enumerate() {
            let (prev, next) = (pair[0], pair[1]);
            if !next.is_finite() || next < prev {
                return Err(TesseraError::InvalidGeometry(format!(
                    "downsample of level {} ({next}) is below level {level} ({prev})",
                    level + 1
                )));
            }
        }

        Ok(Self {
            level_dimensions,
            level_downsamples,
        })
    }

    /// Convenience constructor from `(width, height)` tuples.
    pub fn from_levels(dims: &[(u64, u64)], downsamples: &[f64]) -> Result<Self> {
        let level_dimensions = dims
            .iter()
            .map(|&(w, h)| LevelDimensions::new(w, h))
            .collect();
        Self::new(level_dimensions, downsamples.to_vec())
    }

    pub fn level_count(&self) -> usize {
        self.level_dimensions.len()
    }

    /// Index of the coarsest level.
    pub fn coarsest_level(&self) -> usize {
        self.level_count() - 1
    }

    /// Dimensions of `level`. Callers pass levels already clamped into range.
    pub fn dimensions(&self, level: usize) -> LevelDimensions {
        self.level_dimensions[level]
    }

    pub fn downsample(&self, level: usize) -> f64 {
        self.level_downsamples[level]
    }

    /// Full-resolution extent (level 0).
    pub fn base_dimensions(&self) -> LevelDimensions {
        self.level_dimensions[0]
    }

    pub fn level_dimensions(&self) -> &[LevelDimensions] {
        &self.level_dimensions
    }

    pub fn level_downsamples(&self) -> &[f64] {
        &self.level_downsamples
    }

    /// Clamp an arbitrary signed level index into `[0, level_count)`.
    pub fn clamp_level(&self, level: i64) -> usize {
        level.clamp(0, self.coarsest_level() as i64) as usize
    }

    /// Finest level whose downsample does not exceed `downsample`.
    pub fn best_level_for_downsample(&self, downsample: f64) -> usize {
        self.level_downsamples
            .iter()
            .rposition(|&d| d <= downsample)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_best_level_for_downsample() {
        let g = PyramidGeometry::from_levels(
            &[(4000, 3000), (2000, 1500), (1000, 750)],
            &[1.0, 2.0, 4.0],
        )
        .unwrap();
        assert_eq!(g.best_level_for_downsample(0.5), 0);
        assert_eq!(g.best_level_for_downsample(1.0), 0);
        assert_eq!(g.best_level_for_downsample(3.9), 1);
        assert_eq!(g.best_level_for_downsample(100.0), 2);
    }

    #[test]
    fn test_clamp_level() {
        let g = PyramidGeometry::from_levels(&[(10, 10), (5, 5)], &[1.0, 2.0]).unwrap();
        assert_eq!(g.clamp_level(-3), 0);
        assert_eq!(g.clamp_level(1), 1);
        assert_eq!(g.clamp_level(7), 1);
    }
}
