//! # Document Storage
//!
//! A corpus holds its documents in one of two storage kinds:
//! * in memory, as a plain `Vec<Document>`;
//! * on disk, as a [`DocumentStream`].
//!
//! The kind is carried by the [`DocumentStore`] tag.

pub mod document_store;
pub mod document_stream;

#[doc(inline)]
pub use document_store::{DocumentStore, Documents};
#[doc(inline)]
pub use document_stream::{DocumentStream, StreamIter, StreamSnapshot};
