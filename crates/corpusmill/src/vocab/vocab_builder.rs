//! # Exact ``{ String <-> TokenId }`` Vocabulary Builder

use crate::types::{CMHashMap, TokenId, hash_map_new};
use crate::vocab::VocabAssigner;

/// Bidirectional map of token strings to dense token ids.
///
/// Ids are assigned first-come-first-served: the first new token gets `0`,
/// the next `1`, and so on. The map only grows.
#[derive(Debug, Clone, Default)]
pub struct VocabBuilder {
    /// Surface strings, indexed by id.
    tokens: Vec<String>,

    /// Map of ``{ token -> id }``.
    types: CMHashMap<String, TokenId>,
}

impl VocabBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            types: hash_map_new(),
        }
    }

    /// Return the id for a token, if it has been seen.
    pub fn get(
        &self,
        token: &str,
    ) -> Option<TokenId> {
        self.types.get(token).copied()
    }
}

impl VocabAssigner for VocabBuilder {
    fn lookup(
        &mut self,
        token: &str,
    ) -> TokenId {
        if let Some(&id) = self.types.get(token) {
            return id;
        }
        let id = self.tokens.len() as TokenId;
        self.tokens.push(token.to_string());
        self.types.insert(token.to_string(), id);
        id
    }

    fn tokens(&self) -> Vec<String> {
        self.tokens.clone()
    }

    fn len(&self) -> usize {
        self.tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenLoc;

    #[test]
    fn test_first_seen_order() {
        let mut vocab = VocabBuilder::new();
        assert!(vocab.is_empty());

        assert_eq!(vocab.lookup("the"), 0);
        assert_eq!(vocab.lookup("cat"), 1);
        assert_eq!(vocab.lookup("the"), 0);
        assert_eq!(vocab.lookup("sat"), 2);
        assert_eq!(vocab.lookup("cat"), 1);

        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.tokens(), vec!["the", "cat", "sat"]);
        assert_eq!(vocab.get("sat"), Some(2));
        assert_eq!(vocab.get("dog"), None);
    }

    #[test]
    fn test_lookup_is_stable() {
        let words = ["b", "a", "c", "a", "b", "d", "c", "e"];
        let mut vocab = VocabBuilder::new();

        let first: Vec<TokenId> = words.iter().map(|w| vocab.lookup(w)).collect();
        let second: Vec<TokenId> = words.iter().map(|w| vocab.lookup(w)).collect();
        assert_eq!(first, second);

        // New tokens receive strictly increasing ids starting at 0.
        let mut next = 0;
        let mut seen = Vec::new();
        for (w, id) in words.iter().zip(first) {
            if !seen.contains(w) {
                assert_eq!(id, next);
                next += 1;
                seen.push(*w);
            }
        }
    }

    #[test]
    fn test_convert_preserves_locations() {
        let mut vocab = VocabBuilder::new();
        let tokens = vec![
            TokenLoc::new("red".to_string(), (0, 3)),
            TokenLoc::new("fish".to_string(), (4, 8)),
            TokenLoc::new("red".to_string(), (9, 12)),
        ];

        let converted = vocab.convert(&tokens);
        assert_eq!(
            converted,
            vec![
                TokenLoc::new(0, (0, 3)),
                TokenLoc::new(1, (4, 8)),
                TokenLoc::new(0, (9, 12)),
            ]
        );
    }
}
