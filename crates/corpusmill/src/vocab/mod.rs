//! # Vocabulary
//!
//! Online token -> id assignment for a pipeline run.
//!
//! Two strategies implement [`VocabAssigner`]:
//! * [`VocabBuilder`] - exact, dense ids in first-seen order.
//! * [`HashedVocabBuilder`] - feature hashing into a fixed number of buckets.

pub mod hashed_vocab;
pub mod vocab_builder;

#[doc(inline)]
pub use hashed_vocab::{HashedVocabBuilder, HashedVocabOptions};
#[doc(inline)]
pub use vocab_builder::VocabBuilder;

use crate::types::{TokenId, TokenLoc};

/// Common interface for online vocabulary builders.
pub trait VocabAssigner {
    /// Look up (allocating if needed) the id for a token.
    fn lookup(
        &mut self,
        token: &str,
    ) -> TokenId;

    /// Export the surface strings, indexed by id.
    fn tokens(&self) -> Vec<String>;

    /// The number of allocated ids.
    fn len(&self) -> usize;

    /// Returns true if no ids have been allocated.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert a sequence of string [`TokenLoc`]s to id [`TokenLoc`]s.
    ///
    /// Order and locations are preserved.
    fn convert(
        &mut self,
        tokens: &[TokenLoc<String>],
    ) -> Vec<TokenLoc<TokenId>> {
        tokens
            .iter()
            .map(|t| t.with_token(self.lookup(&t.token)))
            .collect()
    }
}
