//! # Filterers

use crate::pipeline::traits::Filterer;
use crate::types::Document;

/// Keeps every document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeepFilterer;

impl Filterer for KeepFilterer {
    fn keep(
        &self,
        _doc: &Document,
    ) -> bool {
        true
    }
}

/// Keeps documents with at least `threshold` tokens.
///
/// The default threshold of 1 drops empty documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthFilterer {
    threshold: usize,
}

impl Default for LengthFilterer {
    fn default() -> Self {
        Self::new(1)
    }
}

impl LengthFilterer {
    /// Build a new [`LengthFilterer`].
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }
}

impl Filterer for LengthFilterer {
    fn keep(
        &self,
        doc: &Document,
    ) -> bool {
        doc.tokens.len() >= self.threshold
    }
}
