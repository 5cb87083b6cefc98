//! # Train/Test Splits
//!
//! The algorithm follows the storage kind of the corpus:
//! * [`DocumentStore::Memory`] - a seeded uniform permutation of all ids;
//!   train takes the first `num_train`, test the next `num_test`.
//! * [`DocumentStore::Stream`] - one-pass reservoir sampling of
//!   `k = num_train + num_test` documents; the first `num_train`
//!   reservoir slots are train, the rest test.
//!
//! Requests larger than the corpus are clamped to what is available.

use std::{
    borrow::Cow,
    time::{SystemTime, UNIX_EPOCH},
};

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

use crate::corpus::Corpus;
use crate::errors::CMResult;
use crate::storage::DocumentStore;
use crate::types::Document;

/// The fraction of documents used for training when no sizes are given.
pub const DEFAULT_TRAIN_FRACTION: (usize, usize) = (4, 5);

/// Options for [`SplitSampler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOptions {
    /// The number of training documents.
    pub num_train: Option<usize>,

    /// The number of test documents.
    pub num_test: Option<usize>,

    /// The RNG seed; a time-derived seed is used when absent.
    pub seed: Option<u64>,
}

impl SplitOptions {
    /// Set the number of training documents.
    pub fn with_num_train(
        self,
        num_train: Option<usize>,
    ) -> Self {
        Self { num_train, ..self }
    }

    /// Set the number of test documents.
    pub fn with_num_test(
        self,
        num_test: Option<usize>,
    ) -> Self {
        Self { num_test, ..self }
    }

    /// Set the RNG seed.
    pub fn with_seed(
        self,
        seed: Option<u64>,
    ) -> Self {
        Self { seed, ..self }
    }

    /// Resolve ``(num_train, num_test)`` for a corpus of `total` documents.
    ///
    /// * neither given: `floor(0.8 * total)` and the remainder.
    /// * one given: the other is `total - given`, saturating at 0.
    /// * both given: as-is.
    pub fn resolve_sizes(
        &self,
        total: usize,
    ) -> (usize, usize) {
        match (self.num_train, self.num_test) {
            (None, None) => {
                let (num, den) = DEFAULT_TRAIN_FRACTION;
                let train = total * num / den;
                (train, total - train)
            }
            (Some(train), None) => (train, total.saturating_sub(train)),
            (None, Some(test)) => (total.saturating_sub(test), test),
            (Some(train), Some(test)) => (train, test),
        }
    }

    /// Build a [`SplitSampler`].
    pub fn init(self) -> SplitSampler {
        SplitSampler::new(self)
    }
}

/// The result of a split.
///
/// Both halves are in-memory corpora sharing the source vocabulary
/// and metadata.
#[derive(Debug)]
pub struct CorpusSplit {
    /// Source positions of the training documents, in `train` order.
    pub train_ids: Vec<usize>,

    /// The training corpus.
    pub train: Corpus,

    /// Source positions of the test documents, in `test` order.
    pub test_ids: Vec<usize>,

    /// The test corpus.
    pub test: Corpus,
}

/// Splits corpora into train and test halves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitSampler {
    options: SplitOptions,
}

impl SplitSampler {
    /// Build a new [`SplitSampler`].
    pub fn new(options: SplitOptions) -> Self {
        Self { options }
    }

    /// The options.
    pub fn options(&self) -> &SplitOptions {
        &self.options
    }

    /// Split a corpus.
    pub fn split(
        &self,
        corpus: &Corpus,
    ) -> CMResult<CorpusSplit> {
        let total = corpus.num_docs();
        let (num_train, num_test) = self.options.resolve_sizes(total);

        let seed = self.options.seed.unwrap_or_else(time_seed);
        log::debug!("Split seed: {seed}");
        let mut rng = StdRng::seed_from_u64(seed);

        if num_train.saturating_add(num_test) > total {
            log::warn!(
                "Requested {num_train} train + {num_test} test documents from {total}; clamping"
            );
        }

        let (train_ids, train_docs, test_ids, test_docs) = match &corpus.documents {
            DocumentStore::Memory(docs) => permutation_split(docs, num_train, num_test, &mut rng),
            DocumentStore::Stream(_) => {
                let docs = corpus.iter_documents()?.map(|d| d.map(Cow::into_owned));
                reservoir_split(docs, num_train, num_test, &mut rng)?
            }
        };

        Ok(CorpusSplit {
            train_ids,
            train: corpus.with_documents(train_docs),
            test_ids,
            test: corpus.with_documents(test_docs),
        })
    }
}

/// Split a corpus with [`SplitSampler`].
pub fn train_test_split(
    corpus: &Corpus,
    options: &SplitOptions,
) -> CMResult<CorpusSplit> {
    options.init().split(corpus)
}

type Halves = (Vec<usize>, Vec<Document>, Vec<usize>, Vec<Document>);

fn permutation_split(
    docs: &[Document],
    num_train: usize,
    num_test: usize,
    rng: &mut StdRng,
) -> Halves {
    let mut ids: Vec<usize> = (0..docs.len()).collect();
    ids.shuffle(rng);

    let train_end = num_train.min(ids.len());
    let test_end = train_end.saturating_add(num_test).min(ids.len());
    ids.truncate(test_end);
    let test_ids = ids.split_off(train_end);
    let train_ids = ids;

    let pick = |ids: &[usize]| -> Vec<Document> {
        ids.iter().map(|&i| docs[i].clone()).collect()
    };
    let train_docs = pick(&train_ids);
    let test_docs = pick(&test_ids);
    (train_ids, train_docs, test_ids, test_docs)
}

fn reservoir_split<I>(
    docs: I,
    num_train: usize,
    num_test: usize,
    rng: &mut StdRng,
) -> CMResult<Halves>
where
    I: Iterator<Item = CMResult<Document>>,
{
    let k = num_train.saturating_add(num_test);
    let mut ids: Vec<usize> = Vec::new();
    let mut sample: Vec<Document> = Vec::new();

    for (i, doc) in docs.enumerate() {
        let doc = doc?;
        if i < k {
            ids.push(i);
            sample.push(doc);
        } else if k > 0 {
            let j = rng.random_range(0..=i);
            if j < k {
                ids[j] = i;
                sample[j] = doc;
            }
        }
    }

    let train_end = num_train.min(sample.len());
    let test_ids = ids.split_off(train_end);
    let test_docs = sample.split_off(train_end);
    Ok((ids, sample, test_ids, test_docs))
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DocumentStream;
    use crate::types::Metadata;

    fn doc(i: usize) -> Document {
        Document::new(format!("doc{i}"), Vec::new(), Metadata::new())
    }

    fn memory_corpus(n: usize) -> Corpus {
        let mut metadata = Metadata::new();
        metadata.insert("name".to_string(), "unit".into());
        Corpus::new(
            (0..n).map(doc).collect::<Vec<_>>(),
            vec!["w".to_string()],
            metadata,
        )
    }

    fn stream_corpus(
        dir: &tempdir::TempDir,
        n: usize,
    ) -> Corpus {
        let mut stream = DocumentStream::create(dir.path().join("docs")).unwrap();
        for i in 0..n {
            stream.append(&doc(i)).unwrap();
        }
        Corpus::new(stream, vec!["w".to_string()], Metadata::new())
    }

    fn check_ids_match(split: &CorpusSplit) {
        for (ids, half) in [(&split.train_ids, &split.train), (&split.test_ids, &split.test)] {
            let docs = half.documents.to_vec().unwrap();
            assert_eq!(docs.len(), ids.len());
            for (id, d) in ids.iter().zip(docs.iter()) {
                assert_eq!(d.text, format!("doc{id}"));
            }
        }
    }

    fn check_disjoint(
        split: &CorpusSplit,
        total: usize,
    ) {
        let mut all: Vec<usize> = split
            .train_ids
            .iter()
            .chain(split.test_ids.iter())
            .copied()
            .collect();
        assert!(all.iter().all(|&i| i < total));
        all.sort();
        all.dedup();
        assert_eq!(all.len(), split.train_ids.len() + split.test_ids.len());
    }

    #[test]
    fn test_resolve_sizes() {
        let options = SplitOptions::default();
        assert_eq!(options.resolve_sizes(10), (8, 2));
        assert_eq!(options.resolve_sizes(7), (5, 2));
        assert_eq!(options.resolve_sizes(0), (0, 0));
        assert_eq!(options.with_num_test(Some(3)).resolve_sizes(10), (7, 3));
        assert_eq!(options.with_num_train(Some(12)).resolve_sizes(10), (12, 0));
        assert_eq!(options.with_num_test(Some(12)).resolve_sizes(10), (0, 12));
        assert_eq!(
            options
                .with_num_train(Some(1))
                .with_num_test(Some(1))
                .resolve_sizes(10),
            (1, 1)
        );
    }

    #[test]
    fn test_memory_split_seeded() {
        let corpus = memory_corpus(10);
        let options = SplitOptions::default()
            .with_num_train(Some(6))
            .with_num_test(Some(4))
            .with_seed(Some(42));

        let split = train_test_split(&corpus, &options).unwrap();
        assert_eq!(split.train_ids.len(), 6);
        assert_eq!(split.test_ids.len(), 4);
        check_disjoint(&split, 10);
        check_ids_match(&split);

        assert_eq!(split.train.vocabulary, corpus.vocabulary);
        assert_eq!(split.test.metadata, corpus.metadata);
        assert!(split.train.documents.is_random_access());

        let again = train_test_split(&corpus, &options).unwrap();
        assert_eq!(again.train_ids, split.train_ids);
        assert_eq!(again.test_ids, split.test_ids);
    }

    #[test]
    fn test_memory_split_clamps() {
        let corpus = memory_corpus(5);
        let options = SplitOptions::default()
            .with_num_train(Some(4))
            .with_num_test(Some(4))
            .with_seed(Some(1));
        let split = options.init().split(&corpus).unwrap();
        assert_eq!(split.train_ids.len(), 4);
        assert_eq!(split.test_ids.len(), 1);
        check_disjoint(&split, 5);
    }

    #[test]
    fn test_reservoir_split() {
        let dir = tempdir::TempDir::new("split_test").unwrap();
        let corpus = stream_corpus(&dir, 20);
        let options = SplitOptions::default()
            .with_num_train(Some(5))
            .with_num_test(Some(3))
            .with_seed(Some(7));

        let split = train_test_split(&corpus, &options).unwrap();
        assert_eq!(split.train.num_docs() + split.test.num_docs(), 8);
        assert_eq!(split.train_ids.len(), 5);
        assert_eq!(split.test_ids.len(), 3);
        check_disjoint(&split, 20);
        check_ids_match(&split);
        assert!(split.test.documents.is_random_access());
    }

    #[test]
    fn test_reservoir_inclusion_is_uniform() {
        let (n, num_train, num_test) = (10, 2, 1);
        let trials = 4000u64;

        let mut hits = vec![0usize; n];
        let mut late = 0;
        for seed in 0..trials {
            let mut rng = StdRng::seed_from_u64(seed);
            let docs = (0..n).map(|i| Ok(doc(i)));
            let (train_ids, _, test_ids, _) =
                reservoir_split(docs, num_train, num_test, &mut rng).unwrap();
            for &id in train_ids.iter().chain(test_ids.iter()) {
                hits[id] += 1;
                if id >= num_train + num_test {
                    late += 1;
                }
            }
        }

        // Documents past the initial fill do replace reservoir slots.
        assert!(late > 0);

        let expected = (num_train + num_test) as f64 / n as f64;
        for (id, &count) in hits.iter().enumerate() {
            let freq = count as f64 / trials as f64;
            assert!(
                (freq - expected).abs() < 0.04,
                "position {id}: inclusion {freq:.3}, expected {expected:.3}"
            );
        }
    }

    #[test]
    fn test_reservoir_full_sample() {
        let dir = tempdir::TempDir::new("split_test").unwrap();
        let corpus = stream_corpus(&dir, 6);
        let options = SplitOptions::default()
            .with_num_train(Some(4))
            .with_num_test(Some(2));

        let split = train_test_split(&corpus, &options).unwrap();
        assert_eq!(split.train_ids, vec![0, 1, 2, 3]);
        assert_eq!(split.test_ids, vec![4, 5]);

        let mut all = split.train.documents.to_vec().unwrap();
        all.extend(split.test.documents.to_vec().unwrap());
        assert_eq!(all, corpus.documents.to_vec().unwrap());
    }

    #[test]
    fn test_reservoir_short_stream() {
        let dir = tempdir::TempDir::new("split_test").unwrap();
        let corpus = stream_corpus(&dir, 3);
        let options = SplitOptions::default()
            .with_num_train(Some(2))
            .with_num_test(Some(5))
            .with_seed(Some(3));

        let split = train_test_split(&corpus, &options).unwrap();
        assert_eq!(split.train_ids, vec![0, 1]);
        assert_eq!(split.test_ids, vec![2]);
    }

    #[test]
    fn test_empty_splits() {
        let corpus = memory_corpus(0);
        let split = train_test_split(&corpus, &SplitOptions::default()).unwrap();
        assert!(split.train_ids.is_empty());
        assert!(split.test_ids.is_empty());

        let dir = tempdir::TempDir::new("split_test").unwrap();
        let corpus = stream_corpus(&dir, 4);
        let options = SplitOptions::default()
            .with_num_train(Some(0))
            .with_num_test(Some(0));
        let split = train_test_split(&corpus, &options).unwrap();
        assert_eq!(split.train.num_docs(), 0);
        assert_eq!(split.test.num_docs(), 0);
    }
}
