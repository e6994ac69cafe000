pub mod seed;
pub mod xorshift;

#[cfg(feature = "serde")]
mod value;

use rand::RngExt;
use rand::rngs::ThreadRng;
use rand_core::{Rng, TryRng};
use std::convert::Infallible;
use thiserror::Error;

pub use crate::seed::Seed;
pub use crate::xorshift::{DEFAULT_CHARSET, Generator};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RandomError {
    #[error("invalid seed: {0}")]
    InvalidSeed(&'static str),
    #[error("invalid range: lower bound {a} is not below upper bound {b}")]
    InvalidRange { a: f64, b: f64 },
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// Anything that can hand out uniform draws in `[0, 1)`.
///
/// Noise tables and collaborator helpers (palette shuffling and the like) take
/// this instead of a concrete generator, so a [`Generator`], the system RNG or
/// a test double all work.
pub trait UniformSource {
    fn draw(&mut self) -> f64;
}

impl<T> UniformSource for &mut T
where
    T: UniformSource + ?Sized,
{
    #[inline]
    fn draw(&mut self) -> f64 {
        (**self).draw()
    }
}

/// Unseeded draws backed by the thread-local system RNG.
#[derive(Clone, Debug, Default)]
pub struct SystemRandom(ThreadRng);

impl SystemRandom {
    pub fn new() -> Self {
        Self(rand::rng())
    }
}

impl UniformSource for SystemRandom {
    #[inline]
    fn draw(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

impl TryRng for SystemRandom {
    type Error = Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Ok(self.0.next_u32())
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Ok(self.0.next_u64())
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Self::Error> {
        self.0.fill_bytes(dest);
        Ok(())
    }
}

/// A reproducible generator when the caller has a seed, system randomness
/// otherwise.
#[derive(Clone, Debug)]
pub enum RandomSource {
    Seeded(Generator),
    System(SystemRandom),
}

impl RandomSource {
    pub fn new(seed: Option<Seed>) -> Result<Self, RandomError> {
        match seed {
            Some(seed) => Ok(RandomSource::Seeded(Generator::new(seed)?)),
            None => Ok(RandomSource::System(SystemRandom::new())),
        }
    }

    pub fn is_seeded(&self) -> bool {
        match self {
            RandomSource::Seeded(_) => true,
            RandomSource::System(_) => false,
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        RandomSource::System(SystemRandom::new())
    }
}

impl From<Generator> for RandomSource {
    fn from(generator: Generator) -> Self {
        RandomSource::Seeded(generator)
    }
}

impl UniformSource for RandomSource {
    fn draw(&mut self) -> f64 {
        match self {
            RandomSource::Seeded(random) => random.draw(),
            RandomSource::System(random) => random.draw(),
        }
    }
}

impl TryRng for RandomSource {
    type Error = Infallible;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Ok(match self {
            RandomSource::Seeded(random) => random.next_u32(),
            RandomSource::System(random) => random.next_u32(),
        })
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Ok(match self {
            RandomSource::Seeded(random) => random.next_u64(),
            RandomSource::System(random) => random.next_u64(),
        })
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Self::Error> {
        match self {
            RandomSource::Seeded(random) => random.fill_bytes(dest),
            RandomSource::System(random) => random.fill_bytes(dest),
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::{Generator, RandomSource, Seed, SystemRandom, UniformSource};
    use rand::RngExt;
    use rand_core::Rng;

    fn draw_many(source: &mut impl UniformSource, count: usize) -> Vec<f64> {
        (0..count).map(|_| source.draw()).collect()
    }

    #[test]
    fn system_draws_stay_in_unit_interval() {
        let mut random = SystemRandom::new();
        for value in draw_many(&mut random, 1000) {
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn seeded_source_matches_generator() {
        let mut source = RandomSource::new(Some(Seed::Integer(42))).unwrap();
        let mut generator = Generator::new(42).unwrap();
        assert!(source.is_seeded());
        assert_eq!(draw_many(&mut source, 16), draw_many(&mut generator, 16));
    }

    #[test]
    fn unseeded_source_is_system() {
        let source = RandomSource::new(None).unwrap();
        assert!(!source.is_seeded());
        assert!(!RandomSource::default().is_seeded());
    }

    #[test]
    fn seeded_source_propagates_invalid_seed() {
        assert!(RandomSource::new(Some(Seed::Integer(0))).is_err());
    }

    #[test]
    fn seeded_source_rng_interop() {
        let mut source = RandomSource::from(Generator::new(8).unwrap());
        let mut generator = Generator::new(8).unwrap();
        assert_eq!(source.next_u32(), generator.next_u32());
        assert_eq!(source.next_u64(), generator.next_u64());

        let mut bytes = [0u8; 12];
        let mut expected = [0u8; 12];
        source.fill_bytes(&mut bytes);
        generator.fill_bytes(&mut expected);
        assert_eq!(bytes, expected);

        let value: u8 = source.random_range(10..20);
        assert!((10..20).contains(&value));
    }

    #[test]
    fn system_rng_interop() {
        let mut random = SystemRandom::new();
        let mut bytes = [0u8; 32];
        random.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|&b| b != 0));
        assert_ne!(random.next_u64(), random.next_u64());

        let mut source = RandomSource::default();
        let value: u32 = source.random_range(0..100);
        assert!(value < 100);
        source.fill_bytes(&mut bytes);
        assert!(bytes.iter().any(|&b| b != 0));
        let _ = source.next_u32();
    }

    #[test]
    fn mutable_reference_is_a_source() {
        fn first_draw(mut source: impl UniformSource) -> f64 {
            source.draw()
        }

        let mut generator = Generator::new(7).unwrap();
        let mut expected = generator.clone();
        assert_eq!(first_draw(&mut generator), expected.random());
        assert_eq!(generator, expected);
    }
}
