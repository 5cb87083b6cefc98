//! # Corpus Cache Files
//!
//! A corpus cache is a record file:
//! ```terminaloutput
//! {CMCORPUS header}
//! {CorpusHeader record: vocabulary, metadata, store}
//! {Document record} * store.len     (memory stores only)
//! ```
//!
//! A stream-backed corpus stores only its [`StreamSnapshot`]; the
//! documents stay in the stream's own backing file.
//!
//! No provenance check is made on load: a cache written by a different
//! pipeline configuration is returned as-is.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::corpus::Corpus;
use crate::errors::CMResult;
use crate::io::records::{
    CORPUS_MAGIC, read_header, read_record, write_header, write_record,
};
use crate::storage::{DocumentStore, DocumentStream, StreamSnapshot};
use crate::types::{Document, Metadata};

/// Magic bytes for a generic cached value file.
pub const VALUE_MAGIC: [u8; 8] = *b"CMVALUE1";

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum StoreHeader {
    Memory { len: usize },
    Stream(StreamSnapshot),
}

#[derive(Debug, Serialize, Deserialize)]
struct CorpusHeader {
    vocabulary: Vec<String>,
    metadata: Metadata,
    store: StoreHeader,
}

/// Write a [`Corpus`] to a record writer.
pub fn write_corpus<W: Write>(
    corpus: &Corpus,
    writer: &mut W,
) -> CMResult<()> {
    let store = match &corpus.documents {
        DocumentStore::Memory(docs) => StoreHeader::Memory { len: docs.len() },
        DocumentStore::Stream(stream) => StoreHeader::Stream(stream.snapshot()?),
    };
    let header = CorpusHeader {
        vocabulary: corpus.vocabulary.clone(),
        metadata: corpus.metadata.clone(),
        store,
    };

    write_header(writer, &CORPUS_MAGIC)?;
    write_record(writer, &header)?;
    if let DocumentStore::Memory(docs) = &corpus.documents {
        for doc in docs {
            write_record(writer, doc)?;
        }
    }
    Ok(())
}

/// Read a [`Corpus`] from a record reader.
pub fn read_corpus<R: Read>(reader: &mut R) -> CMResult<Corpus> {
    read_header(reader, &CORPUS_MAGIC)?;
    let header: CorpusHeader = read_record(reader)?;

    let documents = match header.store {
        StoreHeader::Memory { len } => {
            let mut docs: Vec<Document> = Vec::with_capacity(len);
            for _ in 0..len {
                docs.push(read_record(reader)?);
            }
            DocumentStore::Memory(docs)
        }
        StoreHeader::Stream(snapshot) => {
            DocumentStore::Stream(DocumentStream::from_snapshot(snapshot))
        }
    };

    Ok(Corpus {
        documents,
        vocabulary: header.vocabulary,
        metadata: header.metadata,
    })
}

/// Save a [`Corpus`] to a cache file.
///
/// The file is written beside `path` and renamed into place,
/// so an existing `path` always holds a complete cache.
pub fn save_corpus_path<P: AsRef<Path>>(
    corpus: &Corpus,
    path: P,
) -> CMResult<()> {
    write_atomically(path.as_ref(), |w| write_corpus(corpus, w))
}

/// Load a [`Corpus`] from a cache file.
pub fn load_corpus_path<P: AsRef<Path>>(path: P) -> CMResult<Corpus> {
    let mut reader = BufReader::new(File::open(path)?);
    read_corpus(&mut reader)
}

/// Load a cached value from `path`, or build and cache it.
///
/// Existence of `path` alone decides; the cached value is never
/// compared against what `build` would produce.
pub fn cache_or_build<T, P, F>(
    path: P,
    build: F,
) -> CMResult<T>
where
    T: Serialize + DeserializeOwned,
    P: AsRef<Path>,
    F: FnOnce() -> CMResult<T>,
{
    let path = path.as_ref();
    if path.exists() {
        log::debug!("loading cached value: {}", path.display());
        let mut reader = BufReader::new(File::open(path)?);
        read_header(&mut reader, &VALUE_MAGIC)?;
        return read_record(&mut reader);
    }

    let value = build()?;
    write_atomically(path, |w| {
        write_header(w, &VALUE_MAGIC)?;
        write_record(w, &value)
    })?;
    Ok(value)
}

fn write_atomically<F>(
    path: &Path,
    write: F,
) -> CMResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> CMResult<()>,
{
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let tmp = partial_path(path);
    let mut writer = BufWriter::new(File::create(&tmp)?);
    write(&mut writer)?;
    writer.flush()?;
    drop(writer);

    fs::rename(&tmp, path)?;
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}
