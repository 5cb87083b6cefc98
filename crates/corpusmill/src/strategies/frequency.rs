//! # Document-Frequency Filtering
//!
//! Builds a [`StopwordTokenizer`] from token document frequencies.
//!
//! The pre-pass reads every input through the pipeline's own inputer,
//! extractor, and tokenizer, so building may take as long as a full
//! import. The resulting tokenizer is immutable.

use crate::errors::CMResult;
use crate::pipeline::traits::{Extractor, Inputer, Tokenizer};
use crate::strategies::tokenizers::StopwordTokenizer;
use crate::types::{CMHashMap, CMHashSet, hash_map_new, hash_set_new};

/// Document-frequency thresholds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrequencyTokenizerOptions {
    /// Drop tokens appearing in fewer than this many documents.
    pub rare: Option<usize>,

    /// Drop tokens appearing in more than this many documents.
    pub common: Option<usize>,
}

impl FrequencyTokenizerOptions {
    /// Set the rare threshold.
    pub fn with_rare(
        self,
        rare: Option<usize>,
    ) -> Self {
        Self { rare, ..self }
    }

    /// Set the common threshold.
    pub fn with_common(
        self,
        common: Option<usize>,
    ) -> Self {
        Self { common, ..self }
    }

    /// Is any threshold set?
    pub fn is_active(&self) -> bool {
        self.rare.is_some() || self.common.is_some()
    }

    /// Is a token with this document frequency kept?
    pub fn keeps(
        &self,
        doc_freq: usize,
    ) -> bool {
        self.rare.is_none_or(|rare| rare <= doc_freq)
            && self.common.is_none_or(|common| doc_freq <= common)
    }

    /// Build a [`FrequencyTokenizerBuilder`].
    pub fn init(self) -> FrequencyTokenizerBuilder {
        FrequencyTokenizerBuilder::new(self)
    }
}

/// Runs the document-frequency pre-pass and wraps a base tokenizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTokenizerBuilder {
    options: FrequencyTokenizerOptions,
}

impl FrequencyTokenizerBuilder {
    /// Build a new [`FrequencyTokenizerBuilder`].
    pub fn new(options: FrequencyTokenizerOptions) -> Self {
        Self { options }
    }

    /// The thresholds.
    pub fn options(&self) -> &FrequencyTokenizerOptions {
        &self.options
    }

    /// Count, for each token, the number of texts it appears in.
    pub fn document_frequencies(
        &self,
        inputer: &dyn Inputer,
        extractor: &dyn Extractor,
        tokenizer: &dyn Tokenizer,
    ) -> CMResult<CMHashMap<String, usize>> {
        let mut counts: CMHashMap<String, usize> = hash_map_new();
        for source in inputer.inputs()? {
            for text in extractor.extract(source?)? {
                let text = text?;
                let mut seen: CMHashSet<String> = hash_set_new();
                seen.extend(tokenizer.tokenize(&text.data).into_iter().map(|t| t.token));
                for token in seen {
                    *counts.entry(token).or_default() += 1;
                }
            }
        }
        Ok(counts)
    }

    /// Wrap `base` so it drops tokens outside the thresholds.
    ///
    /// With no thresholds set, `base` is returned as-is and no input is read.
    pub fn build(
        &self,
        inputer: &dyn Inputer,
        extractor: &dyn Extractor,
        base: Box<dyn Tokenizer>,
    ) -> CMResult<Box<dyn Tokenizer>> {
        if !self.options.is_active() {
            return Ok(base);
        }

        let counts = self.document_frequencies(inputer, extractor, base.as_ref())?;
        let mut stopwords: CMHashSet<String> = hash_set_new();
        stopwords.extend(
            counts
                .into_iter()
                .filter(|(_, n)| !self.options.keeps(*n))
                .map(|(token, _)| token),
        );
        log::info!(
            "Frequency filter: {} stopwords (rare={:?}, common={:?})",
            stopwords.len(),
            self.options.rare,
            self.options.common
        );

        Ok(Box::new(StopwordTokenizer::from_set(base, stopwords)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CorpusError;
    use crate::pipeline::traits::InputSource;
    use crate::strategies::extractors::LineExtractor;
    use crate::strategies::tokenizers::default_tokenizer;
    use crate::types::TokenLoc;

    fn inputer() -> impl Iterator<Item = CMResult<InputSource>> {
        std::iter::once(Ok(InputSource::from_bytes(
            "docs",
            "d0 a b c a\nd1 a b\nd2 a\n",
        )))
    }

    fn filtered(options: FrequencyTokenizerOptions) -> Vec<String> {
        let tokenizer = options
            .init()
            .build(&inputer, &LineExtractor::default(), Box::new(default_tokenizer()))
            .unwrap();
        tokenizer
            .tokenize("a b c d")
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn test_keeps() {
        let options = FrequencyTokenizerOptions::default()
            .with_rare(Some(2))
            .with_common(Some(3));
        assert!(!options.keeps(1));
        assert!(options.keeps(2));
        assert!(options.keeps(3));
        assert!(!options.keeps(4));
        assert!(FrequencyTokenizerOptions::default().keeps(0));
    }

    #[test]
    fn test_document_frequencies() {
        let builder = FrequencyTokenizerBuilder::default();
        let counts = builder
            .document_frequencies(&inputer, &LineExtractor::default(), &default_tokenizer())
            .unwrap();
        assert_eq!(counts["a"], 3);
        assert_eq!(counts["b"], 2);
        assert_eq!(counts["c"], 1);
    }

    #[test]
    fn test_thresholds() {
        let base = FrequencyTokenizerOptions::default();
        assert_eq!(filtered(base), vec!["a", "b", "c", "d"]);

        // Unseen tokens have no count, and are never dropped.
        assert_eq!(filtered(base.with_rare(Some(2))), vec!["a", "b", "d"]);
        assert_eq!(filtered(base.with_common(Some(2))), vec!["b", "c", "d"]);
        assert_eq!(
            filtered(base.with_rare(Some(2)).with_common(Some(2))),
            vec!["b", "d"]
        );
    }

    #[test]
    fn test_inactive_builder_reads_nothing() {
        let failing = || -> std::iter::Empty<CMResult<InputSource>> {
            panic!("no pre-pass without thresholds")
        };
        let tokenizer = FrequencyTokenizerBuilder::default()
            .build(&failing, &LineExtractor::default(), Box::new(default_tokenizer()))
            .unwrap();
        assert_eq!(tokenizer.tokenize("x").len(), 1);
    }

    #[test]
    fn test_pre_pass_errors_propagate() {
        let broken = || {
            std::iter::once(CMResult::Ok(InputSource::from_bytes("docs", "no_delim\n")))
        };
        let tokenizer = |data: &str| vec![TokenLoc::new(data.to_string(), (0, data.len()))];
        let result = FrequencyTokenizerOptions::default()
            .with_rare(Some(1))
            .init()
            .build(&broken, &LineExtractor::default(), Box::new(tokenizer));
        assert!(matches!(result, Err(CorpusError::Extract(_))));
    }
}
