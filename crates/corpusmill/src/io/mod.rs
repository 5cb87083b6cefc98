//! # Persistent Formats
//!
//! * [`records`] - the versioned, length-prefixed record file layout.
//! * [`corpus_cache`] - corpus snapshots and cached values on top of it.

pub mod corpus_cache;
pub mod records;

#[doc(inline)]
pub use corpus_cache::{
    cache_or_build, load_corpus_path, read_corpus, save_corpus_path, write_corpus,
};
