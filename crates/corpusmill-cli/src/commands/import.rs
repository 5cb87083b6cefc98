use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

use corpusmill::{
    Pipeline, RunOptions,
    pipeline::{Extractor, Inputer, Tokenizer},
    strategies::{
        CompositeInformer, CompositeLabeler, DelimitedLabelOptions, FileInputer,
        FrequencyTokenizerOptions, GlobInputer, LengthFilterer, LineExtractor, NumDocsInformer,
        SkipExtractor, StopwordTokenizer, TitleLabeler, VocabSizeInformer, WholeExtractor,
        default_tokenizer, float_labeler, list_labeler, string_labeler,
    },
};

use crate::{
    LogArgs,
    input_output::open_output,
    logging::PROGRESS_VERBOSITY,
};

/// How each input file is split into texts.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExtractorKind {
    /// The whole file is one text.
    Whole,

    /// Skip a header ending at the delimiter (default: a blank line).
    Skip,

    /// Each line is "name<delim>data" (default delimiter: a space).
    Line,
}

/// The value type of a label file.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LabelKind {
    /// Plain strings.
    String,

    /// Floating-point numbers.
    Float,

    /// Comma-separated string lists.
    List,
}

/// Args for the import command.
#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Input files.
    files: Vec<String>,

    #[clap(flatten)]
    pub logging: LogArgs,

    /// Glob pattern selecting the input files.
    #[arg(long, conflicts_with = "files")]
    glob: Option<String>,

    /// How each input file is split into texts.
    #[arg(long, value_enum, default_value = "whole")]
    extractor: ExtractorKind,

    /// Extractor delimiter override.
    #[arg(long)]
    delim: Option<String>,

    /// Stopword file, one word per line.
    #[arg(long)]
    stopwords: Option<String>,

    /// Drop tokens found in fewer than this many documents.
    #[arg(long)]
    rare: Option<usize>,

    /// Drop tokens found in more than this many documents.
    #[arg(long)]
    common: Option<usize>,

    /// Drop documents with fewer tokens than this.
    #[arg(long, default_value = "1")]
    min_tokens: usize,

    /// Label file of tab-separated "name<TAB>value" lines.
    #[arg(long)]
    labels: Option<String>,

    /// The value type of the label file.
    #[arg(long, value_enum, default_value = "string")]
    label_kind: LabelKind,

    /// Feature-hash the vocabulary into this many buckets.
    #[arg(long)]
    hash_size: Option<usize>,

    /// Stream documents to this file instead of holding them in memory.
    #[arg(long)]
    stream: Option<String>,

    /// Corpus cache path; an existing cache is reused as-is.
    #[arg(long)]
    cache: String,

    /// Write the vocabulary here, one token per line; "-" for stdout.
    #[arg(long)]
    vocab_out: Option<String>,
}

impl ImportArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(PROGRESS_VERBOSITY)?;

        let mut pipeline = Pipeline::from_boxed(
            self.inputer()?,
            self.extractor(),
            self.tokenizer()?,
            Box::new(self.labeler()?),
            Box::new(LengthFilterer::new(self.min_tokens)),
        )
        .with_informer(
            CompositeInformer::default()
                .with(NumDocsInformer::default())
                .with(VocabSizeInformer::default()),
        );

        let frequency = FrequencyTokenizerOptions::default()
            .with_rare(self.rare)
            .with_common(self.common);
        if frequency.is_active() && !Path::new(&self.cache).exists() {
            log::info!("Counting document frequencies...");
            pipeline = pipeline.with_frequency_filter(&frequency.init())?;
        }

        let options = RunOptions::default()
            .with_cache_path(Some(&self.cache))
            .with_stream_path(self.stream.as_ref())
            .with_hash_size(self.hash_size);
        let corpus = pipeline.run(&options)?;

        log::info!("Corpus cache: {}", self.cache);
        println!(
            "{} documents, {} vocabulary entries",
            corpus.num_docs(),
            corpus.vocab_size()
        );

        if let Some(path) = &self.vocab_out {
            let mut writer = open_output(Some(path))?;
            for token in &corpus.vocabulary {
                writeln!(writer, "{token}")?;
            }
            writer.flush()?;
        }

        Ok(())
    }

    fn inputer(&self) -> Result<Box<dyn Inputer>, Box<dyn std::error::Error>> {
        let inputer: Box<dyn Inputer> = match &self.glob {
            Some(pattern) => Box::new(GlobInputer::new(pattern)?),
            None => {
                if self.files.is_empty() {
                    return Err("no input files; pass FILES or --glob".into());
                }
                Box::new(FileInputer::new(&self.files))
            }
        };
        Ok(inputer)
    }

    fn extractor(&self) -> Box<dyn Extractor> {
        let delim = self.delim.as_deref();
        match self.extractor {
            ExtractorKind::Whole => Box::new(WholeExtractor),
            ExtractorKind::Skip => Box::new(delim.map(SkipExtractor::new).unwrap_or_default()),
            ExtractorKind::Line => Box::new(delim.map(LineExtractor::new).unwrap_or_default()),
        }
    }

    fn tokenizer(&self) -> Result<Box<dyn Tokenizer>, Box<dyn std::error::Error>> {
        let tokenizer: Box<dyn Tokenizer> = Box::new(default_tokenizer());
        let Some(path) = &self.stopwords else {
            return Ok(tokenizer);
        };

        let words = std::fs::read_to_string(path)?;
        let tokenizer = StopwordTokenizer::new(tokenizer, words.lines());
        log::info!("Loaded {} stopwords", tokenizer.stopwords().len());
        Ok(Box::new(tokenizer))
    }

    fn labeler(&self) -> Result<CompositeLabeler, Box<dyn std::error::Error>> {
        let labeler = CompositeLabeler::default().with(TitleLabeler::default());
        let Some(path) = &self.labels else {
            return Ok(labeler);
        };

        let reader = BufReader::new(File::open(path)?);
        let options = DelimitedLabelOptions::default();
        Ok(match self.label_kind {
            LabelKind::String => labeler.with(string_labeler(reader, &options)),
            LabelKind::Float => labeler.with(float_labeler(reader, &options)),
            LabelKind::List => labeler.with(list_labeler(reader, &options)),
        })
    }
}
