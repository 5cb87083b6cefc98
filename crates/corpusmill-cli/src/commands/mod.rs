use crate::commands::{docwords::DocwordsArgs, import::ImportArgs, split::SplitArgs};

pub mod docwords;
pub mod import;
pub mod split;

/// Subcommands for cmill
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Import files into a cached corpus.
    Import(ImportArgs),

    /// Split a cached corpus into train and test corpora.
    Split(SplitArgs),

    /// Write the docwords matrix of a cached corpus.
    Docwords(DocwordsArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Import(cmd) => cmd.run(),
            Commands::Split(cmd) => cmd.run(),
            Commands::Docwords(cmd) => cmd.run(),
        }
    }
}
