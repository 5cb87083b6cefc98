//! # Error Types

/// Errors from corpusmill operations.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Record payload encode/decode error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// A record file is structurally malformed.
    #[error("malformed record file: {0}")]
    Format(String),

    /// A record file was written by an unknown format version.
    #[error("unsupported format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// The version found in the file header.
        found: u32,

        /// The version this build reads.
        expected: u32,
    },

    /// An extractor could not split a source into texts.
    #[error("extraction failed: {0}")]
    Extract(String),

    /// A stream labeler ran out of entries before finding a name.
    #[error("label not found: {name}")]
    LabelNotFound {
        /// The document name that was requested.
        name: String,
    },

    /// A label value could not be parsed.
    #[error("value parse error: {0}")]
    ValueParse(String),

    /// A token id does not fit the target vocabulary size.
    #[error("token id {token} out of range for vocab size {vocab_size}")]
    TokenOutOfRange {
        /// The offending token id.
        token: u32,

        /// The vocabulary size it was checked against.
        vocab_size: usize,
    },

    /// Feature hashing needs at least one bucket.
    #[error("hash size must be >= 1")]
    InvalidHashSize,

    /// A regex or glob pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// Error from an external component.
    #[error("{0}")]
    External(String),
}

/// Result type for corpusmill operations.
pub type CMResult<T> = core::result::Result<T, CorpusError>;
