//! # Import Pipeline
//!
//! A [`Pipeline`] is six pluggable stages run in a fixed order to
//! build a [`crate::corpus::Corpus`]. See [`traits`] for the stage
//! interfaces, and [`crate::strategies`] for stock implementations.

pub mod runner;
pub mod traits;

#[doc(inline)]
pub use runner::{Pipeline, RunOptions};
#[doc(inline)]
pub use traits::{
    Extractor, Filterer, InputIter, InputSource, Informer, Inputer, Labeler, TextIter, Tokenizer,
};
