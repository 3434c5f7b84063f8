//! Failures of event record file input and output

use std::io;
use thiserror::Error;

/// Failure to read or write an event record file
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Not an event record file (magic bytes {found:02x?})")]
    BadMagic { found: [u8; 4] },

    #[error("Unsupported format version {major}.{minor}")]
    UnsupportedVersion { major: u16, minor: u16 },

    #[error("Bad record marker {found:#010x} at byte offset {offset}")]
    BadMarker { found: u32, offset: u64 },

    #[error("Record payload of {len} bytes exceeds the {max} bytes limit")]
    PayloadTooLarge { len: u64, max: u32 },

    #[error("Record payload has {0} trailing bytes")]
    TrailingBytes(usize),

    #[error("Invalid UTF-8 in string field: {0}")]
    InvalidString(#[from] std::string::FromUtf8Error),
}

impl RecordError {
    /// Truncated files show up as unexpected ends of file
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
}
