//! # Feature-Hashed Vocabulary Builder
//!
//! Tokens are routed to one of `size` buckets by a fixed-seed hash,
//! and every bucket is a single token id. Distinct tokens that collide
//! share an id; at export time each bucket is represented by its most
//! frequently seen token.
//!
//! The hash is [`foldhash::fast::FixedState`], which carries no per-process
//! random state; so for a fixed `seed` the same token always lands in the
//! same bucket across runs. Ids are still assigned in first-seen bucket order.

use core::hash::BuildHasher;

use foldhash::fast::FixedState;

use crate::errors::{CMResult, CorpusError};
use crate::types::{CMHashMap, TokenId, hash_map_new};
use crate::vocab::VocabAssigner;

/// Default hash seed for [`HashedVocabOptions`].
pub const DEFAULT_HASH_SEED: u64 = 0;

/// Options for [`HashedVocabBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashedVocabOptions {
    /// The number of buckets; must be >= 1.
    pub size: usize,

    /// The seed for the bucket hash.
    pub seed: u64,
}

impl HashedVocabOptions {
    /// Create new options with the default seed.
    ///
    /// ## Arguments
    /// * `size` - the number of buckets.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            seed: DEFAULT_HASH_SEED,
        }
    }

    /// Sets the hash seed.
    pub fn with_seed(
        self,
        seed: u64,
    ) -> Self {
        Self { seed, ..self }
    }

    /// Initializes a [`HashedVocabBuilder`] from these options.
    ///
    /// ## Errors
    /// [`CorpusError::InvalidHashSize`] if `size` is 0.
    pub fn init(self) -> CMResult<HashedVocabBuilder> {
        HashedVocabBuilder::new(self)
    }
}

/// Vocabulary builder bounded to a fixed number of hash buckets.
#[derive(Debug, Clone)]
pub struct HashedVocabBuilder {
    options: HashedVocabOptions,

    hasher: FixedState,

    /// Map of ``{ bucket -> id }``.
    indices: CMHashMap<u64, TokenId>,

    /// Map of ``{ token -> (id, slot in bucket) }``.
    types: CMHashMap<String, (TokenId, usize)>,

    /// Per-bucket ``(token, count)`` lists, in first-recorded order.
    buckets: Vec<Vec<(String, u64)>>,
}

impl HashedVocabBuilder {
    /// Create an empty builder.
    ///
    /// ## Errors
    /// [`CorpusError::InvalidHashSize`] if `options.size` is 0.
    pub fn new(options: HashedVocabOptions) -> CMResult<Self> {
        if options.size == 0 {
            return Err(CorpusError::InvalidHashSize);
        }
        Ok(Self {
            options,
            hasher: FixedState::with_seed(options.seed),
            indices: hash_map_new(),
            types: hash_map_new(),
            buckets: Vec::new(),
        })
    }

    /// The configured bucket count.
    pub fn size(&self) -> usize {
        self.options.size
    }

    /// The bucket a token hashes to.
    pub fn bucket_of(
        &self,
        token: &str,
    ) -> u64 {
        self.hasher.hash_one(token) % self.options.size as u64
    }

    /// The recorded occurrence count of a token, or 0.
    pub fn count(
        &self,
        token: &str,
    ) -> u64 {
        match self.types.get(token) {
            Some(&(id, slot)) => self.buckets[id as usize][slot].1,
            None => 0,
        }
    }

    /// The ``(token, count)`` entries recorded for an id.
    pub fn bucket_entries(
        &self,
        id: TokenId,
    ) -> &[(String, u64)] {
        self.buckets
            .get(id as usize)
            .map(|b| b.as_slice())
            .unwrap_or_default()
    }
}

impl VocabAssigner for HashedVocabBuilder {
    fn lookup(
        &mut self,
        token: &str,
    ) -> TokenId {
        if let Some(&(id, slot)) = self.types.get(token) {
            self.buckets[id as usize][slot].1 += 1;
            return id;
        }

        let key = self.bucket_of(token);
        let id = match self.indices.get(&key) {
            Some(&id) => id,
            None => {
                let id = self.buckets.len() as TokenId;
                self.buckets.push(Vec::new());
                self.indices.insert(key, id);
                id
            }
        };

        let bucket = &mut self.buckets[id as usize];
        bucket.push((token.to_string(), 1));
        self.types.insert(token.to_string(), (id, bucket.len() - 1));
        id
    }

    /// Represent each bucket by its most frequent token.
    ///
    /// Ties go to the token first recorded in the bucket.
    fn tokens(&self) -> Vec<String> {
        self.buckets
            .iter()
            .map(|bucket| {
                let mut best: Option<&(String, u64)> = None;
                for entry in bucket {
                    if best.is_none_or(|b| entry.1 > b.1) {
                        best = Some(entry);
                    }
                }
                best.map(|(t, _)| t.clone()).unwrap_or_default()
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }
}
