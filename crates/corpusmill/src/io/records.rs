//! # Length-Prefixed Record Files
//!
//! Layout:
//! ```terminaloutput
//! {MAGIC: 8 bytes} {VERSION: u32 LE}
//! {LEN: u32 LE} {JSON PAYLOAD: LEN bytes}
//! {LEN: u32 LE} {JSON PAYLOAD: LEN bytes}
//! ...
//! ```
//!
//! There is no index or checksum; readers replay records in order.

use std::io::{ErrorKind, Read, Write};

use serde::{Serialize, de::DeserializeOwned};

use crate::errors::{CMResult, CorpusError};

/// The record format version written by this build.
pub const RECORD_FORMAT_VERSION: u32 = 1;

/// Magic bytes for a corpus cache file.
pub const CORPUS_MAGIC: [u8; 8] = *b"CMCORPUS";

/// Magic bytes for a document stream file.
pub const STREAM_MAGIC: [u8; 8] = *b"CMSTREAM";

/// Byte length of a file header.
pub const HEADER_LEN: usize = 12;

/// Write a file header.
pub fn write_header<W: Write>(
    writer: &mut W,
    magic: &[u8; 8],
) -> CMResult<()> {
    writer.write_all(magic)?;
    writer.write_all(&RECORD_FORMAT_VERSION.to_le_bytes())?;
    Ok(())
}

/// Read and validate a file header.
///
/// ## Errors
/// * [`CorpusError::Format`] if the magic bytes do not match.
/// * [`CorpusError::UnsupportedVersion`] for an unknown version.
pub fn read_header<R: Read>(
    reader: &mut R,
    magic: &[u8; 8],
) -> CMResult<()> {
    let mut found = [0u8; 8];
    reader.read_exact(&mut found).map_err(truncated)?;
    if &found != magic {
        return Err(CorpusError::Format(format!(
            "bad magic {:?}, expected {:?}",
            String::from_utf8_lossy(&found),
            String::from_utf8_lossy(magic),
        )));
    }

    let mut version = [0u8; 4];
    reader.read_exact(&mut version).map_err(truncated)?;
    let version = u32::from_le_bytes(version);
    if version != RECORD_FORMAT_VERSION {
        return Err(CorpusError::UnsupportedVersion {
            found: version,
            expected: RECORD_FORMAT_VERSION,
        });
    }
    Ok(())
}

/// Encode one value as a length-prefixed record.
pub fn write_record<W, V>(
    writer: &mut W,
    value: &V,
) -> CMResult<()>
where
    W: Write,
    V: Serialize + ?Sized,
{
    let payload = serde_json::to_vec(value)?;
    let len = u32::try_from(payload.len())
        .map_err(|_| CorpusError::Format(format!("record too large: {} bytes", payload.len())))?;
    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&payload)?;
    Ok(())
}

/// Decode one length-prefixed record.
///
/// ## Errors
/// [`CorpusError::Format`] if the file ends mid-record.
pub fn read_record<R, V>(reader: &mut R) -> CMResult<V>
where
    R: Read,
    V: DeserializeOwned,
{
    let mut len = [0u8; 4];
    reader.read_exact(&mut len).map_err(truncated)?;
    let len = u32::from_le_bytes(len) as usize;

    // Grow with the bytes actually present; the length prefix may be corrupt.
    let mut payload = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut payload)?;
    if payload.len() != len {
        return Err(CorpusError::Format(format!(
            "record truncated: expected {len} bytes, found {}",
            payload.len()
        )));
    }
    Ok(serde_json::from_slice(&payload)?)
}

fn truncated(err: std::io::Error) -> CorpusError {
    if err.kind() == ErrorKind::UnexpectedEof {
        CorpusError::Format("unexpected end of record file".to_string())
    } else {
        err.into()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_header() {
        let mut buf = Vec::new();
        write_header(&mut buf, &STREAM_MAGIC).unwrap();
        assert_eq!(buf.len(), HEADER_LEN);

        read_header(&mut Cursor::new(&buf), &STREAM_MAGIC).unwrap();
        assert!(matches!(
            read_header(&mut Cursor::new(&buf), &CORPUS_MAGIC),
            Err(CorpusError::Format(_))
        ));

        buf[8] = 99;
        assert!(matches!(
            read_header(&mut Cursor::new(&buf), &STREAM_MAGIC),
            Err(CorpusError::UnsupportedVersion {
                found: 99,
                expected: RECORD_FORMAT_VERSION
            })
        ));
    }

    #[test]
    fn test_records_in_order() {
        let mut buf = Vec::new();
        write_record(&mut buf, "first").unwrap();
        write_record(&mut buf, &vec![1u32, 2, 3]).unwrap();

        let mut reader = Cursor::new(&buf);
        let a: String = read_record(&mut reader).unwrap();
        let b: Vec<u32> = read_record(&mut reader).unwrap();
        assert_eq!(a, "first");
        assert_eq!(b, vec![1, 2, 3]);
    }

    #[test]
    fn test_oversized_length_prefix() {
        let mut buf = u32::MAX.to_le_bytes().to_vec();
        buf.extend_from_slice(b"\"short\"");

        let result: CMResult<String> = read_record(&mut Cursor::new(&buf));
        assert!(matches!(result, Err(CorpusError::Format(_))));
    }

    #[test]
    fn test_truncated_record() {
        let mut buf = Vec::new();
        write_record(&mut buf, "a long enough payload").unwrap();
        buf.truncate(buf.len() - 3);

        let result: CMResult<String> = read_record(&mut Cursor::new(&buf));
        assert!(matches!(result, Err(CorpusError::Format(_))));
    }
}
