//! # Labelers
//!
//! Labelers map a [`crate::types::Text`] name to document metadata.
//!
//! The delimited-file labelers ([`string_labeler`], [`float_labeler`],
//! [`list_labeler`]) read `name<delim>value` lines lazily through a
//! [`StreamLabeler`], which costs no extra memory when labels are
//! requested in file order.

use std::io::BufRead;
use std::path::Path;

use serde_json::Value;

use crate::errors::{CMResult, CorpusError};
use crate::pipeline::traits::Labeler;
use crate::types::{CMHashMap, Metadata, hash_map_new};

/// Labels nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopLabeler;

impl Labeler for NoopLabeler {
    fn label(
        &mut self,
        _name: &str,
    ) -> CMResult<Metadata> {
        Ok(Metadata::new())
    }
}

fn single(
    attr: &str,
    value: Value,
) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(attr.to_string(), value);
    metadata
}

/// Labels each document with its own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLabeler {
    attr: String,
}

impl Default for TitleLabeler {
    fn default() -> Self {
        Self::new("title")
    }
}

impl TitleLabeler {
    /// Build a new [`TitleLabeler`] writing to `attr`.
    pub fn new<S: Into<String>>(attr: S) -> Self {
        Self { attr: attr.into() }
    }
}

impl Labeler for TitleLabeler {
    fn label(
        &mut self,
        name: &str,
    ) -> CMResult<Metadata> {
        Ok(single(&self.attr, name.into()))
    }
}

/// Labels each document with the directory part of its name.
///
/// A name with no directory gets `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirLabeler {
    attr: String,
}

impl Default for DirLabeler {
    fn default() -> Self {
        Self::new("dirname")
    }
}

impl DirLabeler {
    /// Build a new [`DirLabeler`] writing to `attr`.
    pub fn new<S: Into<String>>(attr: S) -> Self {
        Self { attr: attr.into() }
    }
}

impl Labeler for DirLabeler {
    fn label(
        &mut self,
        name: &str,
    ) -> CMResult<Metadata> {
        let dir = Path::new(name)
            .parent()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(single(&self.attr, dir.into()))
    }
}

/// A boxed stream of `(name, value)` label entries.
pub type LabelStream = Box<dyn Iterator<Item = CMResult<(String, Value)>>>;

/// Labels documents from an ordered stream of `(name, value)` entries.
///
/// Entries skipped over while searching for a name are cached until
/// requested. Each entry is handed out at most once; a name which is
/// neither cached nor found before the stream ends is
/// [`CorpusError::LabelNotFound`].
pub struct StreamLabeler<I = LabelStream> {
    stream: I,
    cache: CMHashMap<String, Value>,
    attr: String,
}

impl<I> StreamLabeler<I>
where
    I: Iterator<Item = CMResult<(String, Value)>>,
{
    /// Build a new [`StreamLabeler`] writing to `attr`.
    pub fn new<S: Into<String>>(
        stream: I,
        attr: S,
    ) -> Self {
        Self {
            stream,
            cache: hash_map_new(),
            attr: attr.into(),
        }
    }

    /// The number of entries read ahead and not yet requested.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    fn find(
        &mut self,
        name: &str,
    ) -> CMResult<Value> {
        if let Some(value) = self.cache.remove(name) {
            return Ok(value);
        }
        for entry in self.stream.by_ref() {
            let (key, value) = entry?;
            if key == name {
                return Ok(value);
            }
            self.cache.insert(key, value);
        }
        Err(CorpusError::LabelNotFound {
            name: name.to_string(),
        })
    }
}

impl<I> Labeler for StreamLabeler<I>
where
    I: Iterator<Item = CMResult<(String, Value)>>,
{
    fn label(
        &mut self,
        name: &str,
    ) -> CMResult<Metadata> {
        let value = self.find(name)?;
        Ok(single(&self.attr, value))
    }
}

/// Options for the delimited-file labelers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedLabelOptions {
    /// The metadata key to write.
    pub attr: String,

    /// Separates the name from the value on each line.
    pub delim: String,

    /// Separates list items, for [`list_labeler`].
    pub sep: String,
}

impl Default for DelimitedLabelOptions {
    fn default() -> Self {
        Self {
            attr: "label".to_string(),
            delim: "\t".to_string(),
            sep: ",".to_string(),
        }
    }
}

impl DelimitedLabelOptions {
    /// Set the metadata key.
    pub fn with_attr<S: Into<String>>(
        self,
        attr: S,
    ) -> Self {
        Self {
            attr: attr.into(),
            ..self
        }
    }

    /// Set the name/value delimiter.
    pub fn with_delim<S: Into<String>>(
        self,
        delim: S,
    ) -> Self {
        Self {
            delim: delim.into(),
            ..self
        }
    }

    /// Set the list item separator.
    pub fn with_sep<S: Into<String>>(
        self,
        sep: S,
    ) -> Self {
        Self {
            sep: sep.into(),
            ..self
        }
    }
}

/// Lazily split `name<delim>value` lines; blank lines are skipped.
fn delimited_entries<R, F>(
    reader: R,
    delim: String,
    parse: F,
) -> LabelStream
where
    R: BufRead + 'static,
    F: Fn(&str) -> CMResult<Value> + 'static,
{
    Box::new(reader.lines().filter_map(move |line| {
        let line = match line {
            Ok(line) => line,
            Err(err) => return Some(Err(err.into())),
        };
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return None;
        }
        Some(match line.split_once(&delim) {
            Some((key, value)) => parse(value).map(|v| (key.to_string(), v)),
            None => Err(CorpusError::ValueParse(format!(
                "label line {line:?} has no delimiter {delim:?}"
            ))),
        })
    }))
}

/// Label with string values.
pub fn string_labeler<R: BufRead + 'static>(
    reader: R,
    options: &DelimitedLabelOptions,
) -> StreamLabeler {
    let stream = delimited_entries(reader, options.delim.clone(), |v| Ok(v.into()));
    StreamLabeler::new(stream, options.attr.clone())
}

/// Label with float values.
///
/// A value which does not parse, or is not finite, is [`CorpusError::ValueParse`].
pub fn float_labeler<R: BufRead + 'static>(
    reader: R,
    options: &DelimitedLabelOptions,
) -> StreamLabeler {
    let stream = delimited_entries(reader, options.delim.clone(), |v| {
        let value: f64 = v
            .trim()
            .parse()
            .map_err(|e| CorpusError::ValueParse(format!("{v:?}: {e}")))?;
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .ok_or_else(|| CorpusError::ValueParse(format!("{v:?}: not a finite number")))
    });
    StreamLabeler::new(stream, options.attr.clone())
}

/// Label with string-list values, split on `options.sep`.
pub fn list_labeler<R: BufRead + 'static>(
    reader: R,
    options: &DelimitedLabelOptions,
) -> StreamLabeler {
    let sep = options.sep.clone();
    let stream = delimited_entries(reader, options.delim.clone(), move |v| {
        Ok(v.split(sep.as_str()).map(Value::from).collect())
    });
    StreamLabeler::new(stream, options.attr.clone())
}

/// Merges the output of several labelers; later keys win.
#[derive(Default)]
pub struct CompositeLabeler {
    labelers: Vec<Box<dyn Labeler>>,
}

impl CompositeLabeler {
    /// Build a new [`CompositeLabeler`].
    pub fn new(labelers: Vec<Box<dyn Labeler>>) -> Self {
        Self { labelers }
    }

    /// Append a labeler.
    pub fn with<L: Labeler + 'static>(
        mut self,
        labeler: L,
    ) -> Self {
        self.labelers.push(Box::new(labeler));
        self
    }
}

impl Labeler for CompositeLabeler {
    fn label(
        &mut self,
        name: &str,
    ) -> CMResult<Metadata> {
        let mut metadata = Metadata::new();
        for labeler in self.labelers.iter_mut() {
            metadata.extend(labeler.label(name)?);
        }
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_simple_labelers() {
        assert!(NoopLabeler.label("a/b").unwrap().is_empty());

        let title = TitleLabeler::default().label("a/b.txt").unwrap();
        assert_eq!(title["title"], "a/b.txt");

        let mut dir = DirLabeler::new("dir");
        assert_eq!(dir.label("a/b/c.txt").unwrap()["dir"], "a/b");
        assert_eq!(dir.label("c.txt").unwrap()["dir"], "");
    }

    #[test]
    fn test_stream_labeler_out_of_order() {
        let entries = vec![
            Ok(("a".to_string(), json!(1))),
            Ok(("b".to_string(), json!(2))),
            Ok(("c".to_string(), json!(3))),
        ];
        let mut labeler = StreamLabeler::new(entries.into_iter(), "label");

        assert_eq!(labeler.label("b").unwrap()["label"], 2);
        assert_eq!(labeler.cached(), 1);
        assert_eq!(labeler.label("a").unwrap()["label"], 1);
        assert_eq!(labeler.cached(), 0);
        assert_eq!(labeler.label("c").unwrap()["label"], 3);

        let err = labeler.label("a").unwrap_err();
        assert!(matches!(err, CorpusError::LabelNotFound { name } if name == "a"));
    }

    #[test]
    fn test_string_labeler() {
        let data = Cursor::new("d0\tsports\r\n\nd1\tnews\n");
        let mut labeler = string_labeler(data, &DelimitedLabelOptions::default());
        assert_eq!(labeler.label("d0").unwrap()["label"], "sports");
        assert_eq!(labeler.label("d1").unwrap()["label"], "news");
        assert!(labeler.label("d2").is_err());
    }

    #[test]
    fn test_float_labeler() {
        let options = DelimitedLabelOptions::default()
            .with_attr("score")
            .with_delim(",");
        let mut labeler = float_labeler(Cursor::new("d0,1.5\nd1,oops\n"), &options);
        assert_eq!(labeler.label("d0").unwrap()["score"], 1.5);
        assert!(matches!(
            labeler.label("d1"),
            Err(CorpusError::ValueParse(_))
        ));
    }

    #[test]
    fn test_float_labeler_rejects_non_finite() {
        let data = Cursor::new("d0\tnan\nd1\tinf\nd2\t-2e3\n");
        let mut labeler = float_labeler(data, &DelimitedLabelOptions::default());
        assert!(matches!(
            labeler.label("d0"),
            Err(CorpusError::ValueParse(_))
        ));
        assert!(matches!(
            labeler.label("d1"),
            Err(CorpusError::ValueParse(_))
        ));
        assert_eq!(labeler.label("d2").unwrap()["label"], -2000.0);
    }

    #[test]
    fn test_list_labeler() {
        let options = DelimitedLabelOptions::default().with_sep("|");
        let mut labeler = list_labeler(Cursor::new("d0\ta|b|c\n"), &options);
        assert_eq!(labeler.label("d0").unwrap()["label"], json!(["a", "b", "c"]));
    }

    #[test]
    fn test_composite_labeler() {
        let mut labeler = CompositeLabeler::default()
            .with(TitleLabeler::default())
            .with(DirLabeler::default())
            .with(TitleLabeler::new("dirname"));
        let metadata = labeler.label("x/y").unwrap();
        assert_eq!(metadata.len(), 2);
        assert_eq!(metadata["title"], "x/y");
        assert_eq!(metadata["dirname"], "x/y");
    }
}
