//! # Common Types
//!
//! The plain record types which flow through a [`crate::pipeline::Pipeline`]:
//! * [`Text`] - raw named content, produced by an extractor.
//! * [`TokenLoc`] - a token and its byte range in the source data.
//! * [`Document`] - the unit of a [`crate::corpus::Corpus`].
use serde::{Deserialize, Serialize};

/// The integer id type of a vocabulary entry.
pub type TokenId = u32;

/// Free-form metadata attached to documents and corpora.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// Type Alias for hash maps in this crate.
        pub type CMHashMap<K, V> = foldhash::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> CMHashMap<K, V> {
            foldhash::HashMapExt::new()
        }

        /// Type Alias for hash sets in this crate.
        pub type CMHashSet<V> = foldhash::HashSet<V>;

        /// Create a new empty hash set.
        pub fn hash_set_new<V>() -> CMHashSet<V> {
            foldhash::HashSetExt::new()
        }

    } else {
        /// Type Alias for hash maps in this crate.
        pub type CMHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Create a new empty hash map.
        pub fn hash_map_new<K, V>() -> CMHashMap<K, V> {
            CMHashMap::new()
        }

        /// Type Alias for hash sets in this crate.
        pub type CMHashSet<V> = std::collections::HashSet<V>;

        /// Create a new empty hash set.
        pub fn hash_set_new<V>() -> CMHashSet<V> {
            CMHashSet::new()
        }
    }
}

/// One logical unit of raw content extracted from an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    /// The name of the text; used for labeling.
    pub name: String,

    /// The raw text data.
    pub data: String,
}

impl Text {
    /// Build a new [`Text`].
    pub fn new<N: Into<String>, D: Into<String>>(
        name: N,
        data: D,
    ) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// A token and its ``[start, end)`` byte range in the source data.
///
/// `T` is a surface string before vocabulary assignment,
/// and a [`TokenId`] after.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenLoc<T> {
    /// The token.
    pub token: T,

    /// The ``(start, end)`` byte offsets; `end` is exclusive.
    pub loc: (usize, usize),
}

impl<T> TokenLoc<T> {
    /// Build a new [`TokenLoc`].
    pub fn new(
        token: T,
        loc: (usize, usize),
    ) -> Self {
        Self { token, loc }
    }

    /// Replace the token, keeping the location.
    pub fn with_token<U>(
        &self,
        token: U,
    ) -> TokenLoc<U> {
        TokenLoc {
            token,
            loc: self.loc,
        }
    }
}

/// A tokenized, labeled document.
///
/// Tokens reference vocabulary ids, not strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The source text data.
    pub text: String,

    /// The vocabulary-indexed tokens.
    pub tokens: Vec<TokenLoc<TokenId>>,

    /// Per-document labels.
    pub metadata: Metadata,
}

impl Document {
    /// Build a new [`Document`].
    pub fn new(
        text: String,
        tokens: Vec<TokenLoc<TokenId>>,
        metadata: Metadata,
    ) -> Self {
        Self {
            text,
            tokens,
            metadata,
        }
    }

    /// Iterate over the token ids, in order.
    pub fn token_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.tokens.iter().map(|t| t.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_loc_with_token() {
        let tl = TokenLoc::new("apple".to_string(), (3, 8));
        let typed: TokenLoc<TokenId> = tl.with_token(7);
        assert_eq!(typed, TokenLoc::new(7, (3, 8)));
    }

    #[test]
    fn test_document_token_ids() {
        let doc = Document::new(
            "a b a".to_string(),
            vec![
                TokenLoc::new(0, (0, 1)),
                TokenLoc::new(1, (2, 3)),
                TokenLoc::new(0, (4, 5)),
            ],
            Metadata::new(),
        );
        assert_eq!(doc.token_ids().collect::<Vec<_>>(), vec![0, 1, 0]);
    }

    #[test]
    fn test_hash_aliases() {
        let mut map: CMHashMap<&str, usize> = hash_map_new();
        map.insert("a", 1);
        let mut set: CMHashSet<&str> = hash_set_new();
        set.insert("a");
        assert_eq!(map.len(), set.len());
    }
}
