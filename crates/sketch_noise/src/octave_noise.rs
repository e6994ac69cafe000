use sketch_random::{Generator, Seed, UniformSource};
use tracing::{debug, trace};

use crate::permutation::PermutationTable;
use crate::simplex_noise::{SimplexNoise2, SimplexNoise3, SimplexNoise4};
use crate::{NoiseConfig, NoiseError};

/// Fractal simplex noise over 2, 3 or 4 dimensions.
///
/// All randomness is consumed by the constructor; evaluation only reads the
/// precomputed tables, so a `Noise` can be shared freely between threads.
#[derive(Clone, Debug, PartialEq)]
pub struct Noise {
    noise2: SimplexNoise2,
    noise3: SimplexNoise3,
    noise4: SimplexNoise4,
    config: NoiseConfig,
    max_value: f64,
}

impl Noise {
    /// Builds the 2D, 3D and 4D tables, in that order, from `random`.
    pub fn new<T>(random: &mut T) -> Self
    where
        T: UniformSource + ?Sized,
    {
        let noise2 = SimplexNoise2::from_random(random);
        let noise3 = SimplexNoise3::from_random(random);
        let noise4 = SimplexNoise4::from_random(random);
        let config = NoiseConfig::default();
        debug!(
            octaves = config.octaves,
            falloff = config.falloff,
            "built simplex noise tables"
        );
        Self {
            noise2,
            noise3,
            noise4,
            max_value: config.max_value(),
            config,
        }
    }

    pub fn from_seed(seed: impl Into<Seed>) -> Result<Self, NoiseError> {
        let mut random = Generator::new(seed)?;
        Ok(Self::new(&mut random))
    }

    pub fn from_entropy() -> Self {
        Self::new(&mut Generator::from_entropy())
    }

    pub fn with_config(mut self, config: NoiseConfig) -> Result<Self, NoiseError> {
        self.set_config(config)?;
        Ok(self)
    }

    pub fn octaves(&self) -> u32 {
        self.config.octaves
    }

    pub fn falloff(&self) -> f64 {
        self.config.falloff
    }

    pub fn config(&self) -> NoiseConfig {
        self.config
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub fn min_value(&self) -> f64 {
        -self.max_value
    }

    pub fn set_config(&mut self, config: NoiseConfig) -> Result<(), NoiseError> {
        config.validate()?;
        self.config = config;
        self.max_value = config.max_value();
        debug!(
            octaves = config.octaves,
            falloff = config.falloff,
            max_value = self.max_value,
            "updated noise detail"
        );
        Ok(())
    }

    pub fn set_octaves(&mut self, octaves: u32) -> Result<(), NoiseError> {
        self.set_config(NoiseConfig {
            octaves,
            ..self.config
        })
    }

    pub fn set_falloff(&mut self, falloff: f64) -> Result<(), NoiseError> {
        self.set_config(NoiseConfig {
            falloff,
            ..self.config
        })
    }

    pub fn set_detail(&mut self, octaves: u32, falloff: f64) -> Result<(), NoiseError> {
        self.set_config(NoiseConfig { octaves, falloff })
    }

    /// The permutation table used for `dimensions`-dimensional noise.
    pub fn permutation(&self, dimensions: usize) -> Option<&PermutationTable> {
        match dimensions {
            2 => Some(self.noise2.permutation()),
            3 => Some(self.noise3.permutation()),
            4 => Some(self.noise4.permutation()),
            _ => None,
        }
    }

    /// Evaluates the field at `coords`, picking 2D, 3D or 4D noise from the
    /// number of coordinates. Coordinates past the fourth are ignored.
    pub fn noise(&self, coords: &[f64]) -> Result<f64, NoiseError> {
        match *coords {
            [x, y] => self.noise2(x, y),
            [x, y, z] => self.noise3(x, y, z),
            [x, y, z, w, ..] => self.noise4(x, y, z, w),
            _ => Err(NoiseError::InvalidArgument(format!(
                "noise needs at least 2 coordinates, got {}",
                coords.len()
            ))),
        }
    }

    pub fn noise2(&self, x: f64, y: f64) -> Result<f64, NoiseError> {
        check_finite(&[x, y])?;
        Ok(self.fractal(|f| self.noise2.sample(x * f, y * f)))
    }

    pub fn noise3(&self, x: f64, y: f64, z: f64) -> Result<f64, NoiseError> {
        check_finite(&[x, y, z])?;
        Ok(self.fractal(|f| self.noise3.sample(x * f, y * f, z * f)))
    }

    pub fn noise4(&self, x: f64, y: f64, z: f64, w: f64) -> Result<f64, NoiseError> {
        check_finite(&[x, y, z, w])?;
        Ok(self.fractal(|f| self.noise4.sample(x * f, y * f, z * f, w * f)))
    }

    #[inline]
    fn fractal(&self, sample: impl Fn(f64) -> f64) -> f64 {
        let mut value = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for _ in 0..self.config.octaves {
            // Past this point the scaled coordinates have overflowed, and so
            // would every higher octave
            let octave = sample(frequency);
            if !octave.is_finite() {
                break;
            }
            value += octave * amplitude;
            amplitude *= self.config.falloff;
            frequency *= 1.0 / self.config.falloff;
        }
        let value = (value / self.max_value).clamp(-1.0, 1.0);
        trace!(value, "sampled noise");
        value
    }
}

fn check_finite(coords: &[f64]) -> Result<(), NoiseError> {
    match coords.iter().find(|c| !c.is_finite()) {
        Some(c) => Err(NoiseError::InvalidArgument(format!(
            "noise coordinates must be finite, got {c}"
        ))),
        None => Ok(()),
    }
}
