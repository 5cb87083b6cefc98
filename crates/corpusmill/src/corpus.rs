//! # Corpus

use crate::errors::CMResult;
use crate::storage::{DocumentStore, Documents};
use crate::types::{Document, Metadata};

/// The complete ingested dataset: documents, vocabulary, and metadata.
///
/// Every token id in any document is a valid index into `vocabulary`.
#[derive(Debug, Default)]
pub struct Corpus {
    /// The documents, in pipeline insertion order.
    pub documents: DocumentStore,

    /// Surface strings, indexed by token id.
    pub vocabulary: Vec<String>,

    /// Corpus-level metadata.
    pub metadata: Metadata,
}

impl Corpus {
    /// Build a new [`Corpus`].
    pub fn new<S: Into<DocumentStore>>(
        documents: S,
        vocabulary: Vec<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            documents: documents.into(),
            vocabulary,
            metadata,
        }
    }

    /// Build an in-memory corpus sharing this corpus' vocabulary and metadata.
    pub fn with_documents(
        &self,
        documents: Vec<Document>,
    ) -> Corpus {
        Corpus::new(documents, self.vocabulary.clone(), self.metadata.clone())
    }

    /// The number of documents.
    pub fn num_docs(&self) -> usize {
        self.documents.len()
    }

    /// The vocabulary size.
    pub fn vocab_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Iterate over the documents in order.
    pub fn iter_documents(&self) -> CMResult<Documents<'_>> {
        self.documents.iter()
    }

    /// Look up the surface string for a token id.
    pub fn token(
        &self,
        id: u32,
    ) -> Option<&str> {
        self.vocabulary.get(id as usize).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenLoc;

    #[test]
    fn test_with_documents_shares_vocab() {
        let mut metadata = Metadata::new();
        metadata.insert("source".to_string(), "unit".into());

        let docs = vec![Document::new(
            "hi".to_string(),
            vec![TokenLoc::new(0, (0, 2))],
            Metadata::new(),
        )];
        let corpus = Corpus::new(docs, vec!["hi".to_string()], metadata);
        assert_eq!(corpus.num_docs(), 1);
        assert_eq!(corpus.token(0), Some("hi"));
        assert_eq!(corpus.token(1), None);

        let sub = corpus.with_documents(Vec::new());
        assert_eq!(sub.num_docs(), 0);
        assert_eq!(sub.vocabulary, corpus.vocabulary);
        assert_eq!(sub.metadata, corpus.metadata);
    }
}
