#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::NoiseError;

/// Fractal detail of a [`Noise`](crate::Noise) field.
///
/// Each octave doubles (for the default falloff of 0.5) the frequency of the
/// previous one and scales its amplitude by `falloff`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NoiseConfig {
    pub octaves: u32,
    pub falloff: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 1,
            falloff: 0.5,
        }
    }
}

impl NoiseConfig {
    pub fn new(octaves: u32, falloff: f64) -> Result<Self, NoiseError> {
        let config = Self { octaves, falloff };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), NoiseError> {
        if self.octaves == 0 {
            return Err(NoiseError::InvalidArgument(
                "octaves must be at least 1".to_string(),
            ));
        }
        if !self.falloff.is_finite() || self.falloff <= 0.0 {
            return Err(NoiseError::InvalidArgument(format!(
                "falloff must be positive and finite, got {}",
                self.falloff
            )));
        }
        if !self.max_value().is_finite() {
            return Err(NoiseError::InvalidArgument(format!(
                "{} octaves with falloff {} overflow the amplitude sum",
                self.octaves, self.falloff
            )));
        }
        Ok(())
    }

    /// Sum of the octave amplitudes, `Σ falloff^i` for `i < octaves`.
    pub fn max_value(&self) -> f64 {
        (0..self.octaves)
            .map(|i| self.falloff.powf(i as f64))
            .sum()
    }

    pub fn min_value(&self) -> f64 {
        -self.max_value()
    }
}
