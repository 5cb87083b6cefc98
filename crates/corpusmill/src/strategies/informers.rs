//! # Informers

use crate::corpus::Corpus;
use crate::docwords::build_docwords;
use crate::errors::CMResult;
use crate::pipeline::traits::Informer;
use crate::types::Metadata;

macro_rules! attr_informer {
    ($name:ident, $default:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            attr: String,
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new($default)
            }
        }

        impl $name {
            #[doc = concat!("Build a new [`", stringify!($name), "`] writing to `attr`.")]
            pub fn new<S: Into<String>>(attr: S) -> Self {
                Self { attr: attr.into() }
            }
        }
    };
}

attr_informer!(
    NumDocsInformer,
    "num_docs",
    "Records the number of documents; default key `num_docs`."
);

attr_informer!(
    VocabSizeInformer,
    "vocab_size",
    "Records the vocabulary size; default key `vocab_size`."
);

attr_informer!(
    DocwordsInformer,
    "docwords",
    "Records the docwords [`crate::docwords::CscMatrix`]; default key `docwords`."
);

fn single(
    attr: &str,
    value: serde_json::Value,
) -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert(attr.to_string(), value);
    metadata
}

impl Informer for NumDocsInformer {
    fn inform(
        &self,
        corpus: &Corpus,
    ) -> CMResult<Metadata> {
        Ok(single(&self.attr, corpus.num_docs().into()))
    }
}

impl Informer for VocabSizeInformer {
    fn inform(
        &self,
        corpus: &Corpus,
    ) -> CMResult<Metadata> {
        Ok(single(&self.attr, corpus.vocab_size().into()))
    }
}

impl Informer for DocwordsInformer {
    fn inform(
        &self,
        corpus: &Corpus,
    ) -> CMResult<Metadata> {
        let docwords = build_docwords(corpus, None)?;
        Ok(single(&self.attr, serde_json::to_value(&docwords)?))
    }
}

/// Contributes fixed metadata regardless of the corpus.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticInformer {
    metadata: Metadata,
}

impl StaticInformer {
    /// Build a new [`StaticInformer`].
    pub fn new(metadata: Metadata) -> Self {
        Self { metadata }
    }

    /// Add one entry.
    pub fn with<K: Into<String>, V: Into<serde_json::Value>>(
        mut self,
        key: K,
        value: V,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Informer for StaticInformer {
    fn inform(
        &self,
        _corpus: &Corpus,
    ) -> CMResult<Metadata> {
        Ok(self.metadata.clone())
    }
}

/// Merges the output of several informers; later keys win.
#[derive(Default)]
pub struct CompositeInformer {
    informers: Vec<Box<dyn Informer>>,
}

impl CompositeInformer {
    /// Build a new [`CompositeInformer`].
    pub fn new(informers: Vec<Box<dyn Informer>>) -> Self {
        Self { informers }
    }

    /// Append an informer.
    pub fn with<N: Informer + 'static>(
        mut self,
        informer: N,
    ) -> Self {
        self.informers.push(Box::new(informer));
        self
    }
}

impl Informer for CompositeInformer {
    fn inform(
        &self,
        corpus: &Corpus,
    ) -> CMResult<Metadata> {
        let mut metadata = Metadata::new();
        for informer in &self.informers {
            metadata.extend(informer.inform(corpus)?);
        }
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::docwords::CscMatrix;
    use crate::types::{Document, TokenLoc};

    fn corpus() -> Corpus {
        let docs = vec![
            Document::new(
                "a b a".to_string(),
                vec![
                    TokenLoc::new(0, (0, 1)),
                    TokenLoc::new(1, (2, 3)),
                    TokenLoc::new(0, (4, 5)),
                ],
                Metadata::new(),
            ),
            Document::new("b".to_string(), vec![TokenLoc::new(1, (0, 1))], Metadata::new()),
        ];
        Corpus::new(docs, vec!["a".to_string(), "b".to_string()], Metadata::new())
    }

    #[test]
    fn test_count_informers() {
        let corpus = corpus();
        assert_eq!(NumDocsInformer::default().inform(&corpus).unwrap()["num_docs"], 2);
        assert_eq!(
            VocabSizeInformer::new("V").inform(&corpus).unwrap()["V"],
            2
        );
    }

    #[test]
    fn test_docwords_informer() {
        let corpus = corpus();
        let metadata = DocwordsInformer::default().inform(&corpus).unwrap();
        let matrix: CscMatrix = serde_json::from_value(metadata["docwords"].clone()).unwrap();
        assert_eq!(matrix.shape(), (2, 2));
        assert_eq!(matrix.get(0, 0), 2);
        assert_eq!(matrix.get(1, 1), 1);
    }

    #[test]
    fn test_composite_informer() {
        let informer = CompositeInformer::default()
            .with(NumDocsInformer::default())
            .with(StaticInformer::default().with("source", "unit").with("num_docs", 99))
            .with(VocabSizeInformer::default());
        let metadata = informer.inform(&corpus()).unwrap();
        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata["num_docs"], 99);
        assert_eq!(metadata["source"], json!("unit"));
        assert_eq!(metadata["vocab_size"], 2);
    }
}
