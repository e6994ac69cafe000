//! Seed forms accepted by [`Generator`](crate::Generator) and their expansion
//! into the four xorshift state words.

use crate::RandomError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const GOLDEN_RATIO: u64 = 0x9e3779b97f4a7c15;
const MIX_1: u64 = 0xbf58476d1ce4e5b9;
const MIX_2: u64 = 0x94d049bb133111eb;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Seed {
    /// The four state words, used verbatim.
    State([u32; 4]),
    /// A positive integer, expanded with [`SplitMix`].
    Integer(i64),
    /// A string, hashed to 32 bits and then expanded like an integer.
    Text(String),
    /// Draw the seed from the system RNG.
    #[default]
    Entropy,
}

impl Seed {
    /// Resolves the seed into the generator's initial state.
    pub fn into_state(self) -> Result<[u32; 4], RandomError> {
        let state = match self {
            Seed::State(state) => state,
            Seed::Integer(seed) => {
                if seed <= 0 {
                    return Err(RandomError::InvalidSeed(
                        "integer seed must be a positive number",
                    ));
                }
                SplitMix::new(seed as u64).state_words()
            }
            Seed::Text(text) => SplitMix::new(string_hash(&text) as u64).state_words(),
            Seed::Entropy => SplitMix::new(rand::random::<u64>()).state_words(),
        };
        if state == [0; 4] {
            tracing::warn!("rejecting all-zero xorshift state");
            return Err(RandomError::InvalidSeed("state words must not all be zero"));
        }
        Ok(state)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Seed::State(_) => "state",
            Seed::Integer(_) => "integer",
            Seed::Text(_) => "text",
            Seed::Entropy => "entropy",
        }
    }
}

impl From<[u32; 4]> for Seed {
    fn from(state: [u32; 4]) -> Self {
        Seed::State(state)
    }
}

impl From<i64> for Seed {
    fn from(seed: i64) -> Self {
        Seed::Integer(seed)
    }
}

impl From<i32> for Seed {
    fn from(seed: i32) -> Self {
        Seed::Integer(seed as i64)
    }
}

impl From<u32> for Seed {
    fn from(seed: u32) -> Self {
        Seed::Integer(seed as i64)
    }
}

impl From<&str> for Seed {
    fn from(seed: &str) -> Self {
        Seed::Text(seed.to_owned())
    }
}

impl From<String> for Seed {
    fn from(seed: String) -> Self {
        Seed::Text(seed)
    }
}

impl<T> From<Option<T>> for Seed
where
    T: Into<Seed>,
{
    fn from(seed: Option<T>) -> Self {
        seed.map_or(Seed::Entropy, Into::into)
    }
}

impl TryFrom<&[u32]> for Seed {
    type Error = RandomError;

    fn try_from(words: &[u32]) -> Result<Self, Self::Error> {
        let state: [u32; 4] = words
            .try_into()
            .map_err(|_| RandomError::InvalidSeed("state must have exactly 4 words"))?;
        Ok(Seed::State(state))
    }
}

impl TryFrom<&[f64]> for Seed {
    type Error = RandomError;

    fn try_from(words: &[f64]) -> Result<Self, Self::Error> {
        if words.len() != 4 {
            return Err(RandomError::InvalidSeed("state must have exactly 4 words"));
        }
        let mut state = [0u32; 4];
        for (slot, &word) in state.iter_mut().zip(words) {
            if !word.is_finite() {
                return Err(RandomError::InvalidSeed("state words must be finite"));
            }
            if word.fract() != 0.0 || word < 0.0 || word > u32::MAX as f64 {
                return Err(RandomError::InvalidSeed(
                    "state words must be integers in 0..=4294967295",
                ));
            }
            *slot = word as u32;
        }
        Ok(Seed::State(state))
    }
}

/// 64-bit splitting generator used to spread a single seed over the four
/// xorshift words.
///
/// The shift sequence is 30, 30, 31. Changing any constant changes every
/// sequence derived from an integer or string seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SplitMix {
    state: u64,
}

impl SplitMix {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(GOLDEN_RATIO);
        let mut z = self.state;
        z = (z ^ z >> 30).wrapping_mul(MIX_1);
        z = (z ^ z >> 30).wrapping_mul(MIX_2);
        z ^ z >> 31
    }

    /// Two mixes, each split into its low and high halves.
    pub fn state_words(&mut self) -> [u32; 4] {
        let first = self.next_u64();
        let second = self.next_u64();
        [
            first as u32,
            (first >> 32) as u32,
            second as u32,
            (second >> 32) as u32,
        ]
    }
}

/// Polynomial rolling hash (`h = 31 * h + unit`) over UTF-16 code units.
pub fn string_hash(text: &str) -> u32 {
    text.encode_utf16()
        .fold(0u32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(unit as u32)
        })
}
