use rand_core::{Rng, SeedableRng, TryRng};
use rand_xorshift::XorShiftRng;
use std::convert::Infallible;

use crate::seed::Seed;
use crate::{RandomError, UniformSource};

/// `2^32 - 1`: raw words are normalised into `[0, 1]`, not `[0, 1)`.
const U32_SPAN: f64 = u32::MAX as f64;

/// Largest integer bound that survives the trip through `f64` exactly.
pub const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

pub const DEFAULT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Marsaglia xorshift128 generator.
///
/// Every draw advances the four-word state once; `t = x ^ (x << 11)`, the
/// words rotate, and `w = w ^ (w >> 19) ^ t ^ (t >> 8)` becomes the output.
/// Generators built from equal seeds compare equal and stay equal while
/// they are fed the same calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generator(XorShiftRng);

impl Generator {
    pub fn new(seed: impl Into<Seed>) -> Result<Self, RandomError> {
        let seed = seed.into();
        let kind = seed.kind();
        let state = seed.into_state()?;
        tracing::debug!(seed = kind, "seeded xorshift128 generator");
        Ok(Self::from_state(state))
    }

    /// Builds a generator from an explicit state of exactly four words.
    pub fn from_words(words: &[u32]) -> Result<Self, RandomError> {
        Self::new(Seed::try_from(words)?)
    }

    /// Like [`Generator::from_words`] for numeric input that has not been
    /// validated yet: every word must be a finite integer in `u32` range.
    pub fn from_f64_words(words: &[f64]) -> Result<Self, RandomError> {
        Self::new(Seed::try_from(words)?)
    }

    /// Seeds from the system RNG. Never fails: the expanded state cannot be
    /// all zero.
    pub fn from_entropy() -> Self {
        loop {
            if let Ok(generator) = Self::new(Seed::Entropy) {
                return generator;
            }
        }
    }

    fn from_state(state: [u32; 4]) -> Self {
        let mut bytes = [0u8; 16];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(state) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        Self(XorShiftRng::from_seed(bytes))
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f64 {
        let r = self.next_unit();
        if r >= 1.0 { 1.0f64.next_down() } else { r }
    }

    /// Uniform draw in `[0, a)`.
    pub fn random_below(&mut self, a: f64) -> Result<f64, RandomError> {
        self.random_range(0.0, a)
    }

    /// Uniform draw in `[a, b)`; `a` itself when the bounds are equal.
    pub fn random_range(&mut self, a: f64, b: f64) -> Result<f64, RandomError> {
        check_range(a, b)?;
        let value = a + self.next_unit() * (b - a);
        if value >= b && b > a {
            return Ok(b.next_down());
        }
        Ok(value)
    }

    /// A fair coin over `{0, 1}`.
    pub fn random_int(&mut self) -> i64 {
        // [0, 2) never fails
        self.random_int_range(0, 2).unwrap_or_default()
    }

    pub fn random_int_below(&mut self, a: i64) -> Result<i64, RandomError> {
        self.random_int_range(0, a)
    }

    /// Integer draw in `a..b`, the floor of [`Generator::random_range`].
    ///
    /// Both bounds must lie within `±MAX_SAFE_INTEGER`.
    pub fn random_int_range(&mut self, a: i64, b: i64) -> Result<i64, RandomError> {
        let safe = -MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER;
        if a > b || !safe.contains(&a) || !safe.contains(&b) {
            return Err(RandomError::InvalidRange {
                a: a as f64,
                b: b as f64,
            });
        }
        let value = self.random_range(a as f64, b as f64)?;
        Ok(value.floor() as i64)
    }

    pub fn random_bool(&mut self) -> bool {
        self.random() > 0.5
    }

    /// `length` characters drawn independently from `charset`.
    pub fn random_string(&mut self, length: usize, charset: &str) -> String {
        let chars: Vec<char> = charset.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        (0..length)
            .map(|_| chars[self.index_below(chars.len())])
            .collect()
    }

    pub fn random_string_default(&mut self, length: usize) -> String {
        self.random_string(length, DEFAULT_CHARSET)
    }

    /// Uniform draw in `[average - interval, average + interval)`.
    pub fn random_interval(&mut self, average: f64, interval: f64) -> Result<f64, RandomError> {
        self.random_range(average - interval, average + interval)
    }

    /// [`Generator::random_interval`] around `0.5` with a half-width of `0.5`.
    pub fn random_interval_default(&mut self) -> f64 {
        self.random_interval(0.5, 0.5).unwrap_or_default()
    }

    /// A uniformly drawn element, `None` when `items` is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.index_below(items.len()))
    }

    /// A uniformly drawn character, `None` when `text` is empty.
    pub fn pick_char(&mut self, text: &str) -> Option<char> {
        let count = text.chars().count();
        if count == 0 {
            return None;
        }
        text.chars().nth(self.index_below(count))
    }

    /// Returns a shuffled copy of `items`.
    ///
    /// Each element is tagged with one [`Generator::random`] draw, in input
    /// order, and the copy is stable-sorted by that tag. This is deliberately
    /// not a Fisher-Yates shuffle: the number and order of draws, and the
    /// resulting permutation, are part of the reproducible output.
    pub fn shuffle<T>(&mut self, items: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        let mut tagged: Vec<(f64, &T)> = items.iter().map(|item| (self.random(), item)).collect();
        tagged.sort_by(|a, b| a.0.total_cmp(&b.0));
        tagged.into_iter().map(|(_, item)| item.clone()).collect()
    }

    pub fn shuffle_str(&mut self, text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        self.shuffle(&chars).into_iter().collect()
    }

    /// Raw normalised word in `[0, 1]`.
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.0.next_u32() as f64 / U32_SPAN
    }

    fn index_below(&mut self, len: usize) -> usize {
        let value = self.random_range(0.0, len as f64).unwrap_or_default();
        (value.floor() as usize).min(len - 1)
    }
}

fn check_range(a: f64, b: f64) -> Result<(), RandomError> {
    if !a.is_finite() || !b.is_finite() || a > b || !(b - a).is_finite() {
        return Err(RandomError::InvalidRange { a, b });
    }
    Ok(())
}

impl UniformSource for Generator {
    #[inline]
    fn draw(&mut self) -> f64 {
        self.random()
    }
}

impl TryRng for Generator {
    type Error = Infallible;

    #[inline]
    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Ok(self.0.next_u32())
    }

    #[inline]
    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Ok(self.0.next_u64())
    }

    #[inline]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Self::Error> {
        self.0.fill_bytes(dest);
        Ok(())
    }
}
