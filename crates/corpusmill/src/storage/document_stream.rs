//! # Disk-Backed Document Stream
//!
//! An append-then-replay sequence of [`Document`]s, stored as a
//! record file (see [`crate::io::records`]).
//!
//! Peak memory is one document during both append and iteration;
//! the cost is a full re-scan of the backing file on every iteration.
//! There is no crash consistency: an interrupted append may leave a
//! truncated trailing record, which replay reports as a format error.

use std::{
    cell::{Cell, RefCell},
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CMResult;
use crate::io::records::{STREAM_MAGIC, read_header, read_record, write_header, write_record};
use crate::types::Document;

/// The persistent state of a [`DocumentStream`].
///
/// Document payloads are never part of a snapshot; only the backing
/// path and the number of records to replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSnapshot {
    /// The backing file.
    pub path: PathBuf,

    /// The logical document count.
    pub size: usize,
}

/// A file-backed document stream for large document collections.
///
/// Single writer; not safe for concurrent use.
#[derive(Debug)]
pub struct DocumentStream {
    path: PathBuf,
    size: usize,

    /// Lazily (re)opened append handle.
    writer: RefCell<Option<BufWriter<File>>>,

    /// False when appended records may be sitting in the write buffer.
    flushed: Cell<bool>,
}

impl DocumentStream {
    /// Create a new, empty stream; truncating any existing file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> CMResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut writer = BufWriter::new(File::create(&path)?);
        write_header(&mut writer, &STREAM_MAGIC)?;

        Ok(Self {
            path,
            size: 0,
            writer: RefCell::new(Some(writer)),
            flushed: Cell::new(false),
        })
    }

    /// Restore a stream from a snapshot.
    ///
    /// The backing file is not opened until the next append or iteration.
    pub fn from_snapshot(snapshot: StreamSnapshot) -> Self {
        Self {
            path: snapshot.path,
            size: snapshot.size,
            writer: RefCell::new(None),
            flushed: Cell::new(false),
        }
    }

    /// Flush pending writes and capture ``(path, size)``.
    pub fn snapshot(&self) -> CMResult<StreamSnapshot> {
        self.flush()?;
        Ok(StreamSnapshot {
            path: self.path.clone(),
            size: self.size,
        })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The logical document count.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if no documents have been appended.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Append a document to the backing file.
    pub fn append(
        &mut self,
        doc: &Document,
    ) -> CMResult<()> {
        let writer = self.writer.get_mut();
        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            let empty = file.metadata()?.len() == 0;
            let mut w = BufWriter::new(file);
            if empty {
                write_header(&mut w, &STREAM_MAGIC)?;
            }
            *writer = Some(w);
        }

        if let Some(w) = writer.as_mut() {
            write_record(w, doc)?;
        }
        self.size += 1;
        self.flushed.set(false);
        Ok(())
    }

    /// Flush any buffered writes to the backing file.
    pub fn flush(&self) -> CMResult<()> {
        if self.flushed.get() {
            return Ok(());
        }
        if let Some(w) = self.writer.borrow_mut().as_mut() {
            w.flush()?;
            self.flushed.set(true);
        }
        Ok(())
    }

    /// Replay the stream from the start.
    ///
    /// Each call is an independent full scan of exactly [`Self::len`] records.
    pub fn iter(&self) -> CMResult<StreamIter> {
        self.flush()?;

        let mut reader = BufReader::new(File::open(&self.path)?);
        read_header(&mut reader, &STREAM_MAGIC)?;

        Ok(StreamIter {
            reader,
            remaining: self.size,
        })
    }
}

impl Serialize for DocumentStream {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.snapshot()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for DocumentStream {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StreamSnapshot::deserialize(deserializer).map(Self::from_snapshot)
    }
}

/// Iterator over the documents of a [`DocumentStream`].
///
/// Yields at most the stream's recorded size; stops after the first error.
pub struct StreamIter {
    reader: BufReader<File>,
    remaining: usize,
}

impl Iterator for StreamIter {
    type Item = CMResult<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let result = read_record(&mut self.reader);
        if result.is_err() {
            self.remaining = 0;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
