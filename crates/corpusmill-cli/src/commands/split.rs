use corpusmill::{
    io::{load_corpus_path, save_corpus_path},
    sampling::{SplitOptions, train_test_split},
};

use crate::{LogArgs, logging::PROGRESS_VERBOSITY};

/// Args for the split command.
#[derive(clap::Args, Debug)]
pub struct SplitArgs {
    #[clap(flatten)]
    pub logging: LogArgs,

    /// The corpus cache to split.
    #[arg(long)]
    cache: String,

    /// Number of training documents; defaults to 80% (or the rest, given --num-test).
    #[arg(long)]
    num_train: Option<usize>,

    /// Number of test documents; defaults to the rest.
    #[arg(long)]
    num_test: Option<usize>,

    /// RNG seed; time-derived when absent.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the training corpus cache.
    #[arg(long)]
    train_out: String,

    /// Where to write the test corpus cache.
    #[arg(long)]
    test_out: String,
}

impl SplitArgs {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(PROGRESS_VERBOSITY)?;

        log::info!("Loading corpus: {}", self.cache);
        let corpus = load_corpus_path(&self.cache)?;

        let options = SplitOptions::default()
            .with_num_train(self.num_train)
            .with_num_test(self.num_test)
            .with_seed(self.seed);
        let split = train_test_split(&corpus, &options)?;

        log::info!(
            "train: {} documents -> {}",
            split.train.num_docs(),
            self.train_out
        );
        save_corpus_path(&split.train, &self.train_out)?;

        log::info!(
            "test: {} documents -> {}",
            split.test.num_docs(),
            self.test_out
        );
        save_corpus_path(&split.test, &self.test_out)?;

        Ok(())
    }
}
