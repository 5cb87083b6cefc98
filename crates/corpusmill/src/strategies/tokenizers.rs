//! # Tokenizers
//!
//! [`SplitTokenizer`] produces located tokens from raw data; every other
//! tokenizer here wraps a base tokenizer and rewrites or drops its output.
//! Locations always refer to the untransformed data.
//!
//! ## Example
//!
//! ```rust
//! use corpusmill::pipeline::Tokenizer;
//! use corpusmill::strategies::tokenizers::{StopwordTokenizer, default_tokenizer};
//!
//! let tokenizer = StopwordTokenizer::new(Box::new(default_tokenizer()), ["the"]);
//! let tokens = tokenizer.tokenize("The cat, the hat.");
//! let words: Vec<&str> = tokens.iter().map(|t| t.token.as_str()).collect();
//! assert_eq!(words, vec!["cat", "hat"]);
//! ```

use regex::Regex;

use crate::errors::{CMResult, CorpusError};
use crate::pipeline::traits::Tokenizer;
use crate::types::{CMHashSet, TokenLoc, hash_set_new};

/// Options for [`SplitTokenizer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitTokenizerOptions {
    /// The delimiter characters; `None` splits on Unicode whitespace.
    pub delims: Option<String>,
}

impl SplitTokenizerOptions {
    /// Set the delimiter characters.
    pub fn with_delims<S: Into<String>>(
        self,
        delims: Option<S>,
    ) -> Self {
        Self {
            delims: delims.map(Into::into),
        }
    }

    /// Build a [`SplitTokenizer`].
    pub fn init(self) -> SplitTokenizer {
        SplitTokenizer::new(self)
    }
}

/// Splits data into maximal runs of non-delimiter characters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitTokenizer {
    delims: Option<Vec<char>>,
}

impl SplitTokenizer {
    /// Build a new [`SplitTokenizer`].
    pub fn new(options: SplitTokenizerOptions) -> Self {
        Self {
            delims: options.delims.map(|d| d.chars().collect()),
        }
    }

    fn is_delim(
        &self,
        c: char,
    ) -> bool {
        match &self.delims {
            Some(delims) => delims.contains(&c),
            None => c.is_whitespace(),
        }
    }
}

impl Tokenizer for SplitTokenizer {
    fn tokenize(
        &self,
        data: &str,
    ) -> Vec<TokenLoc<String>> {
        let mut tokens = Vec::new();
        let mut begin: Option<usize> = None;
        for (idx, c) in data.char_indices() {
            if self.is_delim(c) {
                if let Some(start) = begin.take() {
                    tokens.push(TokenLoc::new(data[start..idx].to_string(), (start, idx)));
                }
            } else if begin.is_none() {
                begin = Some(idx);
            }
        }
        if let Some(start) = begin {
            tokens.push(TokenLoc::new(
                data[start..].to_string(),
                (start, data.len()),
            ));
        }
        tokens
    }
}

/// A per-character rewrite; `None` deletes the character.
pub type Translation = fn(char) -> Option<char>;

/// Lowercase ASCII letters and delete ASCII punctuation.
pub fn lower_strip_punct(c: char) -> Option<char> {
    if c.is_ascii_punctuation() {
        None
    } else {
        Some(c.to_ascii_lowercase())
    }
}

/// Rewrites every base token character-by-character, dropping tokens left empty.
pub struct TranslateTokenizer {
    base: Box<dyn Tokenizer>,
    translate: Translation,
}

impl TranslateTokenizer {
    /// Wrap `base` with [`lower_strip_punct`].
    pub fn new(base: Box<dyn Tokenizer>) -> Self {
        Self::with_translation(base, lower_strip_punct)
    }

    /// Wrap `base` with a custom [`Translation`].
    pub fn with_translation(
        base: Box<dyn Tokenizer>,
        translate: Translation,
    ) -> Self {
        Self { base, translate }
    }
}

impl Tokenizer for TranslateTokenizer {
    fn tokenize(
        &self,
        data: &str,
    ) -> Vec<TokenLoc<String>> {
        self.base
            .tokenize(data)
            .into_iter()
            .filter_map(|t| {
                let token: String = t.token.chars().filter_map(self.translate).collect();
                (!token.is_empty()).then(|| t.with_token(token))
            })
            .collect()
    }
}

/// Split on whitespace, lowercase, and strip punctuation.
pub fn default_tokenizer() -> TranslateTokenizer {
    TranslateTokenizer::new(Box::new(SplitTokenizer::default()))
}

fn compile(pattern: &str) -> CMResult<Regex> {
    Regex::new(pattern).map_err(|e| CorpusError::Pattern(e.to_string()))
}

/// Replaces every base token the pattern matches anywhere within.
///
/// Anchor the pattern with `^...$` to match whole tokens only.
pub struct RegexTokenizer {
    base: Box<dyn Tokenizer>,
    pattern: Regex,
    replacement: String,
}

impl RegexTokenizer {
    /// Build a new [`RegexTokenizer`].
    pub fn new<S: Into<String>>(
        base: Box<dyn Tokenizer>,
        pattern: &str,
        replacement: S,
    ) -> CMResult<Self> {
        Ok(Self {
            base,
            pattern: compile(pattern)?,
            replacement: replacement.into(),
        })
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(
        &self,
        data: &str,
    ) -> Vec<TokenLoc<String>> {
        let mut tokens = self.base.tokenize(data);
        for t in tokens.iter_mut() {
            if self.pattern.is_match(&t.token) {
                t.token.clone_from(&self.replacement);
            }
        }
        tokens
    }
}

/// Drops every base token the pattern matches anywhere within.
pub struct RemoveTokenizer {
    base: Box<dyn Tokenizer>,
    pattern: Regex,
}

impl RemoveTokenizer {
    /// Build a new [`RemoveTokenizer`].
    pub fn new(
        base: Box<dyn Tokenizer>,
        pattern: &str,
    ) -> CMResult<Self> {
        Ok(Self {
            base,
            pattern: compile(pattern)?,
        })
    }
}

impl Tokenizer for RemoveTokenizer {
    fn tokenize(
        &self,
        data: &str,
    ) -> Vec<TokenLoc<String>> {
        let mut tokens = self.base.tokenize(data);
        tokens.retain(|t| !self.pattern.is_match(&t.token));
        tokens
    }
}

/// Collect words into a set, trimming surrounding whitespace.
fn token_set<I, S>(words: I) -> CMHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = hash_set_new();
    set.extend(words.into_iter().map(|w| w.as_ref().trim().to_string()));
    set
}

/// Replaces every base token found in a word set.
pub struct CombineTokenizer {
    base: Box<dyn Tokenizer>,
    combine: CMHashSet<String>,
    replacement: String,
}

impl CombineTokenizer {
    /// Build a new [`CombineTokenizer`].
    ///
    /// ## Arguments
    /// * `base` - the wrapped tokenizer.
    /// * `combine` - the words to replace; whitespace is trimmed.
    /// * `replacement` - the single token they become.
    pub fn new<I, S, R>(
        base: Box<dyn Tokenizer>,
        combine: I,
        replacement: R,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        R: Into<String>,
    {
        Self {
            base,
            combine: token_set(combine),
            replacement: replacement.into(),
        }
    }
}

impl Tokenizer for CombineTokenizer {
    fn tokenize(
        &self,
        data: &str,
    ) -> Vec<TokenLoc<String>> {
        let mut tokens = self.base.tokenize(data);
        for t in tokens.iter_mut() {
            if self.combine.contains(&t.token) {
                t.token.clone_from(&self.replacement);
            }
        }
        tokens
    }
}

/// Drops every base token found in a stopword set.
pub struct StopwordTokenizer {
    base: Box<dyn Tokenizer>,
    stopwords: CMHashSet<String>,
}

impl StopwordTokenizer {
    /// Build a new [`StopwordTokenizer`]; stopword whitespace is trimmed.
    pub fn new<I, S>(
        base: Box<dyn Tokenizer>,
        stopwords: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_set(base, token_set(stopwords))
    }

    /// Build a new [`StopwordTokenizer`] from a prepared set.
    pub fn from_set(
        base: Box<dyn Tokenizer>,
        stopwords: CMHashSet<String>,
    ) -> Self {
        Self { base, stopwords }
    }

    /// The stopword set.
    pub fn stopwords(&self) -> &CMHashSet<String> {
        &self.stopwords
    }
}

impl Tokenizer for StopwordTokenizer {
    fn tokenize(
        &self,
        data: &str,
    ) -> Vec<TokenLoc<String>> {
        let mut tokens = self.base.tokenize(data);
        tokens.retain(|t| !self.stopwords.contains(&t.token));
        tokens
    }
}
