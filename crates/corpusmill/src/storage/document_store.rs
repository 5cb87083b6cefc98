//! # Document Storage Kinds

use std::borrow::Cow;

use crate::errors::CMResult;
use crate::storage::document_stream::{DocumentStream, StreamIter};
use crate::types::Document;

/// Ordered document storage for a corpus.
///
/// The variant is fixed when the storage is built, and carries the
/// access capability: [`DocumentStore::Memory`] is randomly addressable,
/// [`DocumentStore::Stream`] can only be replayed in order.
#[derive(Debug)]
pub enum DocumentStore {
    /// In-memory, randomly addressable documents.
    Memory(Vec<Document>),

    /// Disk-backed, sequential-only documents.
    Stream(DocumentStream),
}

impl Default for DocumentStore {
    fn default() -> Self {
        DocumentStore::Memory(Vec::new())
    }
}

impl From<Vec<Document>> for DocumentStore {
    fn from(docs: Vec<Document>) -> Self {
        DocumentStore::Memory(docs)
    }
}

impl From<DocumentStream> for DocumentStore {
    fn from(stream: DocumentStream) -> Self {
        DocumentStore::Stream(stream)
    }
}

impl DocumentStore {
    /// Append a document.
    pub fn append(
        &mut self,
        doc: Document,
    ) -> CMResult<()> {
        match self {
            DocumentStore::Memory(docs) => {
                docs.push(doc);
                Ok(())
            }
            DocumentStore::Stream(stream) => stream.append(&doc),
        }
    }

    /// The number of documents.
    pub fn len(&self) -> usize {
        match self {
            DocumentStore::Memory(docs) => docs.len(),
            DocumentStore::Stream(stream) => stream.len(),
        }
    }

    /// Returns true if there are no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Does this storage support positional access?
    pub fn is_random_access(&self) -> bool {
        matches!(self, DocumentStore::Memory(_))
    }

    /// The documents as a slice, for random-access storage.
    pub fn as_slice(&self) -> Option<&[Document]> {
        match self {
            DocumentStore::Memory(docs) => Some(docs),
            DocumentStore::Stream(_) => None,
        }
    }

    /// Iterate over the documents in insertion order.
    ///
    /// For stream storage, this is a full re-scan of the backing file.
    pub fn iter(&self) -> CMResult<Documents<'_>> {
        Ok(match self {
            DocumentStore::Memory(docs) => Documents::Memory(docs.iter()),
            DocumentStore::Stream(stream) => Documents::Stream(stream.iter()?),
        })
    }

    /// Collect all documents into memory.
    pub fn to_vec(&self) -> CMResult<Vec<Document>> {
        self.iter()?.map(|d| d.map(Cow::into_owned)).collect()
    }
}

/// Iterator over the documents of a [`DocumentStore`].
///
/// In-memory documents are borrowed; streamed documents are owned.
pub enum Documents<'a> {
    /// Borrowing iterator over in-memory documents.
    Memory(std::slice::Iter<'a, Document>),

    /// Replay of a document stream.
    Stream(StreamIter),
}

impl<'a> Iterator for Documents<'a> {
    type Item = CMResult<Cow<'a, Document>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Documents::Memory(it) => it.next().map(|d| Ok(Cow::Borrowed(d))),
            Documents::Stream(it) => it.next().map(|d| d.map(Cow::Owned)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Documents::Memory(it) => it.size_hint(),
            Documents::Stream(it) => it.size_hint(),
        }
    }
}
