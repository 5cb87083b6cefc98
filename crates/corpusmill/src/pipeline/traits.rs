//! # Pipeline Stage Traits
//!
//! Each trait is one stage boundary of a [`crate::pipeline::Pipeline`].
//! Every trait has a blanket impl for the matching closure shape, so
//! ad-hoc strategies can be plain closures:
//!
//! | Stage       | Closure shape                                         |
//! | ----------- | ----------------------------------------------------- |
//! | [`Inputer`]   | ``Fn() -> impl Iterator<Item = CMResult<InputSource>>`` |
//! | [`Extractor`] | ``Fn(InputSource) -> impl Iterator<Item = CMResult<Text>>`` |
//! | [`Tokenizer`] | ``Fn(&str) -> Vec<TokenLoc<String>>``                   |
//! | [`Labeler`]   | ``FnMut(&str) -> CMResult<Metadata>``                   |
//! | [`Filterer`]  | ``Fn(&Document) -> bool``                               |
//! | [`Informer`]  | ``Fn(&Corpus) -> CMResult<Metadata>``                   |

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader, Cursor, Read},
    path::Path,
};

use crate::corpus::Corpus;
use crate::errors::CMResult;
use crate::types::{Document, Metadata, Text, TokenLoc};

/// A named, readable byte source produced by an [`Inputer`].
///
/// The source is closed when dropped.
pub struct InputSource {
    /// The source name; typically a file path.
    pub name: String,

    /// The byte reader.
    pub reader: Box<dyn BufRead>,
}

impl fmt::Debug for InputSource {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("InputSource")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl InputSource {
    /// Build a new [`InputSource`].
    pub fn new<N: Into<String>>(
        name: N,
        reader: Box<dyn BufRead>,
    ) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }

    /// Open a file as a source named by its path.
    pub fn open<P: AsRef<Path>>(path: P) -> CMResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Ok(Self::new(
            path.to_string_lossy(),
            Box::new(BufReader::new(file)),
        ))
    }

    /// Wrap in-memory bytes as a source.
    pub fn from_bytes<N: Into<String>, B: Into<Vec<u8>>>(
        name: N,
        bytes: B,
    ) -> Self {
        Self::new(name, Box::new(Cursor::new(bytes.into())))
    }

    /// Read the remaining bytes as a UTF-8 string.
    pub fn read_to_string(&mut self) -> CMResult<String> {
        let mut data = String::new();
        self.reader.read_to_string(&mut data)?;
        Ok(data)
    }
}

/// Boxed lazy sequence of input sources.
pub type InputIter<'a> = Box<dyn Iterator<Item = CMResult<InputSource>> + 'a>;

/// Boxed lazy sequence of texts.
pub type TextIter<'a> = Box<dyn Iterator<Item = CMResult<Text>> + 'a>;

/// Produces the byte sources a pipeline reads.
pub trait Inputer {
    /// Generate the input sources, lazily and in order.
    fn inputs(&self) -> CMResult<InputIter<'_>>;
}

impl<F, I> Inputer for F
where
    F: Fn() -> I,
    I: Iterator<Item = CMResult<InputSource>> + 'static,
{
    fn inputs(&self) -> CMResult<InputIter<'_>> {
        Ok(Box::new(self()))
    }
}

/// Splits a byte source into [`Text`]s.
pub trait Extractor {
    /// Extract texts from a source, lazily and in order.
    fn extract<'a>(
        &'a self,
        source: InputSource,
    ) -> CMResult<TextIter<'a>>;
}

impl<F, I> Extractor for F
where
    F: Fn(InputSource) -> I,
    I: Iterator<Item = CMResult<Text>> + 'static,
{
    fn extract<'a>(
        &'a self,
        source: InputSource,
    ) -> CMResult<TextIter<'a>> {
        Ok(Box::new(self(source)))
    }
}

/// Splits text data into string [`TokenLoc`]s.
pub trait Tokenizer {
    /// Tokenize the data.
    fn tokenize(
        &self,
        data: &str,
    ) -> Vec<TokenLoc<String>>;
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Vec<TokenLoc<String>>,
{
    fn tokenize(
        &self,
        data: &str,
    ) -> Vec<TokenLoc<String>> {
        self(data)
    }
}

/// Produces document metadata from a [`Text`] name.
///
/// Takes `&mut self`, as stream-backed labelers consume their source.
pub trait Labeler {
    /// Label the named text.
    fn label(
        &mut self,
        name: &str,
    ) -> CMResult<Metadata>;
}

impl<F> Labeler for F
where
    F: FnMut(&str) -> CMResult<Metadata>,
{
    fn label(
        &mut self,
        name: &str,
    ) -> CMResult<Metadata> {
        self(name)
    }
}

/// Inclusion predicate for documents.
pub trait Filterer {
    /// Should this document be kept?
    fn keep(
        &self,
        doc: &Document,
    ) -> bool;
}

impl<F> Filterer for F
where
    F: Fn(&Document) -> bool,
{
    fn keep(
        &self,
        doc: &Document,
    ) -> bool {
        self(doc)
    }
}

/// Computes corpus-level metadata from a finished [`Corpus`].
pub trait Informer {
    /// Compute metadata for the corpus.
    fn inform(
        &self,
        corpus: &Corpus,
    ) -> CMResult<Metadata>;
}

impl<F> Informer for F
where
    F: Fn(&Corpus) -> CMResult<Metadata>,
{
    fn inform(
        &self,
        corpus: &Corpus,
    ) -> CMResult<Metadata> {
        self(corpus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_source_from_bytes() {
        let mut source = InputSource::from_bytes("mem", "hello bytes");
        assert_eq!(source.name, "mem");
        assert_eq!(source.read_to_string().unwrap(), "hello bytes");
        assert!(format!("{source:?}").contains("mem"));
    }

    #[test]
    fn test_closure_strategies() {
        let tokenizer = |data: &str| vec![TokenLoc::new(data.to_string(), (0, data.len()))];
        assert_eq!(tokenizer.tokenize("ab")[0].token, "ab");

        let filterer = |doc: &Document| !doc.tokens.is_empty();
        let empty = Document::new(String::new(), Vec::new(), Metadata::new());
        assert!(!filterer.keep(&empty));

        let mut calls = 0;
        let mut labeler = |name: &str| -> CMResult<Metadata> {
            calls += 1;
            let mut m = Metadata::new();
            m.insert("name".to_string(), name.into());
            Ok(m)
        };
        assert_eq!(labeler.label("x").unwrap()["name"], "x");
        drop(labeler);
        assert_eq!(calls, 1);

        let inputer = || std::iter::once(CMResult::Ok(InputSource::from_bytes("a", "b")));
        let names: Vec<String> = inputer
            .inputs()
            .unwrap()
            .map(|s| s.unwrap().name)
            .collect();
        assert_eq!(names, vec!["a"]);
    }
}
