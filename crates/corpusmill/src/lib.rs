//! # `corpusmill` Corpus Ingestion
//!
//! Staged import of raw text collections into vocabulary-indexed corpora,
//! for topic modeling and other bag-of-words consumers.
//!
//! See:
//! * [`pipeline`] to run an import.
//! * [`strategies`] for stock stage implementations.
//! * [`vocab`] for exact and feature-hashed vocabulary assignment.
//! * [`storage`] for in-memory and disk-backed document storage.
//! * [`docwords`] to build sparse document-term count matrices.
//! * [`sampling`] to split a corpus into train and test halves.
//! * [`io`] for the corpus cache file format.
//!
//! ## Importing a Corpus
//!
//! ```rust
//! use corpusmill::CMResult;
//! use corpusmill::pipeline::{InputSource, Pipeline, RunOptions};
//! use corpusmill::strategies::{
//!     LengthFilterer, LineExtractor, NumDocsInformer, TitleLabeler, default_tokenizer,
//! };
//!
//! fn inline_source() -> impl Iterator<Item = CMResult<InputSource>> {
//!     std::iter::once(Ok(InputSource::from_bytes(
//!         "inline",
//!         "d0 The quick fox\nd1 the lazy dog\n",
//!     )))
//! }
//!
//! let mut pipeline = Pipeline::new(
//!     inline_source,
//!     LineExtractor::default(),
//!     default_tokenizer(),
//!     TitleLabeler::default(),
//!     LengthFilterer::default(),
//! )
//! .with_informer(NumDocsInformer::default());
//!
//! let corpus = pipeline.run(&RunOptions::default())?;
//! assert_eq!(corpus.num_docs(), 2);
//! assert_eq!(corpus.vocabulary, vec!["the", "quick", "fox", "lazy", "dog"]);
//! assert_eq!(corpus.metadata["num_docs"], 2);
//! # Ok::<(), corpusmill::errors::CorpusError>(())
//! ```
//!
//! ## Crate Features
#![doc = document_features::document_features!()]
#![warn(missing_docs, unused)]

pub mod corpus;
pub mod docwords;
pub mod errors;
pub mod io;
pub mod pipeline;
pub mod sampling;
pub mod storage;
pub mod strategies;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use corpus::Corpus;
#[doc(inline)]
pub use errors::{CMResult, CorpusError};
#[doc(inline)]
pub use pipeline::{Pipeline, RunOptions};
#[doc(inline)]
pub use types::{Document, Metadata, Text, TokenId, TokenLoc};
