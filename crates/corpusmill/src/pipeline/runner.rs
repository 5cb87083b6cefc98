//! # Pipeline Runner

use std::path::{Path, PathBuf};

use crate::corpus::Corpus;
use crate::errors::CMResult;
use crate::io::corpus_cache::{load_corpus_path, save_corpus_path};
use crate::pipeline::traits::{Extractor, Filterer, Informer, Inputer, Labeler, Tokenizer};
use crate::storage::{DocumentStore, DocumentStream};
use crate::strategies::frequency::FrequencyTokenizerBuilder;
use crate::types::{Document, Metadata};
use crate::vocab::{HashedVocabOptions, VocabAssigner, VocabBuilder};

/// Options for [`Pipeline::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Load from / save to this corpus cache file.
    pub cache_path: Option<PathBuf>,

    /// Store documents in a [`DocumentStream`] at this path,
    /// rather than in memory.
    pub stream_path: Option<PathBuf>,

    /// Use a feature-hashed vocabulary with this many buckets.
    pub hash_size: Option<usize>,
}

impl RunOptions {
    /// Set the corpus cache path.
    pub fn with_cache_path<P: AsRef<Path>>(
        self,
        cache_path: Option<P>,
    ) -> Self {
        Self {
            cache_path: cache_path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Set the document stream path.
    pub fn with_stream_path<P: AsRef<Path>>(
        self,
        stream_path: Option<P>,
    ) -> Self {
        Self {
            stream_path: stream_path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }

    /// Set the hashed vocabulary size.
    pub fn with_hash_size(
        self,
        hash_size: Option<usize>,
    ) -> Self {
        Self { hash_size, ..self }
    }
}

/// The staged import process which builds a [`Corpus`].
///
/// ```terminaloutput
/// Inputer -> Extractor -> Tokenizer -> vocab -> Labeler -> Filterer -> store
///                                                         [Informer] -> metadata
/// ```
pub struct Pipeline {
    inputer: Box<dyn Inputer>,
    extractor: Box<dyn Extractor>,
    tokenizer: Box<dyn Tokenizer>,
    labeler: Box<dyn Labeler>,
    filterer: Box<dyn Filterer>,
    informer: Option<Box<dyn Informer>>,
}

impl Pipeline {
    /// Build a pipeline from its stages.
    pub fn new<I, E, T, L, F>(
        inputer: I,
        extractor: E,
        tokenizer: T,
        labeler: L,
        filterer: F,
    ) -> Self
    where
        I: Inputer + 'static,
        E: Extractor + 'static,
        T: Tokenizer + 'static,
        L: Labeler + 'static,
        F: Filterer + 'static,
    {
        Self::from_boxed(
            Box::new(inputer),
            Box::new(extractor),
            Box::new(tokenizer),
            Box::new(labeler),
            Box::new(filterer),
        )
    }

    /// Build a pipeline from already-boxed stages.
    pub fn from_boxed(
        inputer: Box<dyn Inputer>,
        extractor: Box<dyn Extractor>,
        tokenizer: Box<dyn Tokenizer>,
        labeler: Box<dyn Labeler>,
        filterer: Box<dyn Filterer>,
    ) -> Self {
        Self {
            inputer,
            extractor,
            tokenizer,
            labeler,
            filterer,
            informer: None,
        }
    }

    /// Set the informer.
    pub fn with_informer<N: Informer + 'static>(
        self,
        informer: N,
    ) -> Self {
        self.with_boxed_informer(Box::new(informer))
    }

    /// Set an already-boxed informer.
    pub fn with_boxed_informer(
        self,
        informer: Box<dyn Informer>,
    ) -> Self {
        Self {
            informer: Some(informer),
            ..self
        }
    }

    /// Replace the tokenizer.
    pub fn with_tokenizer<T: Tokenizer + 'static>(
        self,
        tokenizer: T,
    ) -> Self {
        Self {
            tokenizer: Box::new(tokenizer),
            ..self
        }
    }

    /// Wrap the tokenizer with document-frequency stopword removal.
    ///
    /// Runs the frequency pre-pass over every input now.
    pub fn with_frequency_filter(
        mut self,
        builder: &FrequencyTokenizerBuilder,
    ) -> CMResult<Self> {
        let base = self.tokenizer;
        self.tokenizer = builder.build(self.inputer.as_ref(), self.extractor.as_ref(), base)?;
        Ok(self)
    }

    /// The inputer stage.
    pub fn inputer(&self) -> &dyn Inputer {
        self.inputer.as_ref()
    }

    /// The extractor stage.
    pub fn extractor(&self) -> &dyn Extractor {
        self.extractor.as_ref()
    }

    /// The tokenizer stage.
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Run the pipeline.
    ///
    /// If `options.cache_path` names an existing file, that corpus is
    /// returned and no stage runs. Stage errors abort the run; documents
    /// already written to a stream file are left in place.
    pub fn run(
        &mut self,
        options: &RunOptions,
    ) -> CMResult<Corpus> {
        if let Some(path) = &options.cache_path
            && path.exists()
        {
            log::info!("Loading cached corpus: {}", path.display());
            return load_corpus_path(path);
        }

        let documents: DocumentStore = match &options.stream_path {
            Some(path) => DocumentStream::create(path)?.into(),
            None => DocumentStore::default(),
        };

        let corpus = match options.hash_size {
            Some(size) => {
                let vocab = HashedVocabOptions::new(size).init()?;
                self.ingest(documents, vocab)?
            }
            None => self.ingest(documents, VocabBuilder::new())?,
        };

        if let Some(path) = &options.cache_path {
            log::info!("Saving corpus cache: {}", path.display());
            save_corpus_path(&corpus, path)?;
        }
        Ok(corpus)
    }

    fn ingest<V: VocabAssigner>(
        &mut self,
        mut documents: DocumentStore,
        mut vocab: V,
    ) -> CMResult<Corpus> {
        log::info!("Starting import");

        let mut num_texts = 0;
        for source in self.inputer.inputs()? {
            let source = source?;
            log::debug!("Reading source: {}", source.name);

            for text in self.extractor.extract(source)? {
                let text = text?;
                num_texts += 1;

                let tokens = self.tokenizer.tokenize(&text.data);
                let types = vocab.convert(&tokens);
                let metadata = self.labeler.label(&text.name)?;
                let doc = Document::new(text.data, types, metadata);
                if self.filterer.keep(&doc) {
                    documents.append(doc)?;
                }
            }
        }

        let mut corpus = Corpus::new(documents, vocab.tokens(), Metadata::new());
        if let Some(informer) = &self.informer {
            let extra = informer.inform(&corpus)?;
            corpus.metadata.extend(extra);
        }

        log::info!(
            "Finished import: {} of {} texts kept, {} vocab entries",
            corpus.num_docs(),
            num_texts,
            corpus.vocab_size()
        );
        Ok(corpus)
    }
}
