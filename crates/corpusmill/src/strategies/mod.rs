//! # Stock Strategies
//!
//! Ready-made implementations of the [`crate::pipeline`] stage traits.
//!
//! | Stage      | Strategies                                                  |
//! | ---------- | ----------------------------------------------------------- |
//! | Inputer    | [`FileInputer`], [`GlobInputer`]                            |
//! | Extractor  | [`WholeExtractor`], [`SkipExtractor`], [`LineExtractor`]    |
//! | Tokenizer  | [`tokenizers`], [`FrequencyTokenizerBuilder`]               |
//! | Labeler    | [`labelers`]                                                |
//! | Filterer   | [`KeepFilterer`], [`LengthFilterer`]                        |
//! | Informer   | [`informers`]                                               |

pub mod extractors;
pub mod filterers;
pub mod frequency;
pub mod informers;
pub mod inputers;
pub mod labelers;
pub mod tokenizers;

#[doc(inline)]
pub use extractors::{LineExtractor, SkipExtractor, WholeExtractor};
#[doc(inline)]
pub use filterers::{KeepFilterer, LengthFilterer};
#[doc(inline)]
pub use frequency::{FrequencyTokenizerBuilder, FrequencyTokenizerOptions};
#[doc(inline)]
pub use informers::{
    CompositeInformer, DocwordsInformer, NumDocsInformer, StaticInformer, VocabSizeInformer,
};
#[doc(inline)]
pub use inputers::{FileInputer, GlobInputer};
#[doc(inline)]
pub use labelers::{
    CompositeLabeler, DelimitedLabelOptions, DirLabeler, NoopLabeler, StreamLabeler,
    TitleLabeler, float_labeler, list_labeler, string_labeler,
};
#[doc(inline)]
pub use tokenizers::{
    CombineTokenizer, RegexTokenizer, RemoveTokenizer, SplitTokenizer, SplitTokenizerOptions,
    StopwordTokenizer, TranslateTokenizer, default_tokenizer,
};
