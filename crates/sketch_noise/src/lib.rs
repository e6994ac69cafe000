pub mod config;
pub mod octave_noise;
pub mod permutation;
pub mod simplex_noise;

use sketch_random::RandomError;
use thiserror::Error;

pub use crate::config::NoiseConfig;
pub use crate::octave_noise::Noise;
pub use crate::permutation::PermutationTable;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NoiseError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error(transparent)]
    Random(#[from] RandomError),
}
