//! # Docwords Matrices
//!
//! A docwords matrix is the sparse ``documents x vocabulary`` count matrix
//! of a [`Corpus`]; cell ``(d, v)`` counts occurrences of token `v` in
//! document `d`.
//!
//! Construction is two-phase: counts accumulate per row in hash maps,
//! then freeze into a [`CscMatrix`].

pub mod csc;

#[doc(inline)]
pub use csc::CscMatrix;

use crate::corpus::Corpus;
use crate::errors::{CMResult, CorpusError};
use crate::types::{CMHashMap, Document, hash_map_new};

/// Accumulates document rows of a docwords matrix.
#[derive(Debug, Clone)]
pub struct DocwordsBuilder {
    vocab_size: usize,
    rows: Vec<CMHashMap<usize, u32>>,
}

impl DocwordsBuilder {
    /// Build a new [`DocwordsBuilder`] with `vocab_size` columns.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            vocab_size,
            rows: Vec::new(),
        }
    }

    /// The number of columns.
    pub fn vocab_size(&self) -> usize {
        self.vocab_size
    }

    /// The number of rows added so far.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Count a document's tokens as the next row.
    ///
    /// A token id `>= vocab_size` is [`CorpusError::TokenOutOfRange`],
    /// and the row is not added.
    pub fn add_document(
        &mut self,
        doc: &Document,
    ) -> CMResult<()> {
        let mut row: CMHashMap<usize, u32> = hash_map_new();
        for token in doc.token_ids() {
            if token as usize >= self.vocab_size {
                return Err(CorpusError::TokenOutOfRange {
                    token,
                    vocab_size: self.vocab_size,
                });
            }
            *row.entry(token as usize).or_default() += 1;
        }
        self.rows.push(row);
        Ok(())
    }

    /// Freeze the rows into a [`CscMatrix`].
    pub fn build(self) -> CscMatrix {
        let rows: Vec<Vec<(usize, u32)>> = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();
        CscMatrix::from_rows(&rows, self.vocab_size)
    }

    /// Build the docwords matrix of a corpus.
    ///
    /// ## Arguments
    /// * `corpus` - the corpus; stream-backed documents are replayed once.
    /// * `vocab_size` - the column count; defaults to the vocabulary size,
    ///   and may be larger.
    pub fn from_corpus(
        corpus: &Corpus,
        vocab_size: Option<usize>,
    ) -> CMResult<CscMatrix> {
        let mut builder = Self::new(vocab_size.unwrap_or(corpus.vocab_size()));
        for doc in corpus.iter_documents()? {
            let doc = doc?;
            builder.add_document(&doc)?;
        }
        Ok(builder.build())
    }
}

/// Build the docwords matrix of a corpus.
///
/// See [`DocwordsBuilder::from_corpus`].
pub fn build_docwords(
    corpus: &Corpus,
    vocab_size: Option<usize>,
) -> CMResult<CscMatrix> {
    DocwordsBuilder::from_corpus(corpus, vocab_size)
}
