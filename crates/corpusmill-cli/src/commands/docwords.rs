use std::io::Write;

use corpusmill::{docwords::build_docwords, io::load_corpus_path};

use crate::{LogArgs, input_output::OutputArgs, logging::DATA_VERBOSITY};

/// Args for the docwords command.
#[derive(clap::Args, Debug)]
pub struct DocwordsArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// The corpus cache to read.
    #[arg(long)]
    cache: String,

    /// Number of matrix columns; defaults to the vocabulary size.
    #[arg(long)]
    vocab_size: Option<usize>,

    #[command(flatten)]
    output: OutputArgs,
}

impl DocwordsArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(DATA_VERBOSITY)?;

        let corpus = load_corpus_path(&self.cache)?;
        let docwords = build_docwords(&corpus, self.vocab_size)?;
        let (rows, cols) = docwords.shape();
        log::info!("docwords: {rows} x {cols}, {} non-zero", docwords.nnz());

        let mut writer = self.output.open_writer()?;
        for (doc, term, count) in docwords.triplets() {
            writeln!(writer, "{doc} {term} {count}")?;
        }
        writer.flush()?;

        Ok(())
    }
}
