//! # Sampling
//!
//! Train/test splitting of corpora.

pub mod split_sampler;

#[doc(inline)]
pub use split_sampler::{CorpusSplit, SplitOptions, SplitSampler, train_test_split};
