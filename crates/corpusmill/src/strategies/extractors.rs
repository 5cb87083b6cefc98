//! # Extractors

use std::io::BufRead;

use crate::errors::{CMResult, CorpusError};
use crate::pipeline::traits::{Extractor, InputSource, TextIter};
use crate::types::Text;

/// The default header delimiter of [`SkipExtractor`].
pub const DEFAULT_SKIP_DELIM: &str = "\n\n";

/// The default name delimiter of [`LineExtractor`].
pub const DEFAULT_LINE_DELIM: &str = " ";

/// Extracts the entire source as one [`Text`], named by the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WholeExtractor;

impl Extractor for WholeExtractor {
    fn extract<'a>(
        &'a self,
        mut source: InputSource,
    ) -> CMResult<TextIter<'a>> {
        let data = source.read_to_string()?;
        Ok(Box::new(std::iter::once(Ok(Text::new(source.name, data)))))
    }
}

/// Drops a header ending at the first delimiter, and extracts the rest as one [`Text`].
///
/// A source with no delimiter is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipExtractor {
    delim: String,
}

impl Default for SkipExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_DELIM)
    }
}

impl SkipExtractor {
    /// Build a new [`SkipExtractor`].
    pub fn new<D: Into<String>>(delim: D) -> Self {
        Self {
            delim: delim.into(),
        }
    }
}

impl Extractor for SkipExtractor {
    fn extract<'a>(
        &'a self,
        mut source: InputSource,
    ) -> CMResult<TextIter<'a>> {
        let data = source.read_to_string()?;
        let Some((_, body)) = data.split_once(&self.delim) else {
            return Err(CorpusError::Extract(format!(
                "{}: header delimiter {:?} not found",
                source.name, self.delim
            )));
        };
        let text = Text::new(source.name, body);
        Ok(Box::new(std::iter::once(Ok(text))))
    }
}

/// Extracts each line as a [`Text`].
///
/// Lines are trimmed, and blank lines skipped. The text before the first
/// delimiter is the name; the remainder is the data. A non-blank line
/// with no delimiter is an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineExtractor {
    delim: String,
}

impl Default for LineExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_LINE_DELIM)
    }
}

impl LineExtractor {
    /// Build a new [`LineExtractor`].
    pub fn new<D: Into<String>>(delim: D) -> Self {
        Self {
            delim: delim.into(),
        }
    }

    fn parse_line(
        &self,
        source: &str,
        line: &str,
    ) -> Option<CMResult<Text>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        Some(match line.split_once(&self.delim) {
            Some((name, data)) => Ok(Text::new(name, data)),
            None => Err(CorpusError::Extract(format!(
                "{source}: line {line:?} has no delimiter {:?}",
                self.delim
            ))),
        })
    }
}

impl Extractor for LineExtractor {
    fn extract<'a>(
        &'a self,
        source: InputSource,
    ) -> CMResult<TextIter<'a>> {
        let name = source.name;
        Ok(Box::new(source.reader.lines().filter_map(
            move |line| match line {
                Ok(line) => self.parse_line(&name, &line),
                Err(err) => Some(Err(err.into())),
            },
        )))
    }
}
