//! Sequential writing of event record files

use super::{
    codec::{self, Order},
    Event, RecordError, FILE_MAGIC, FORMAT_MAJOR, FORMAT_MINOR, MAX_PAYLOAD_LEN, RECORD_MARKER,
};

use byteorder::WriteBytesExt;
use std::{
    fs::{File, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// Append-only writer of event record files
///
/// Call `finish()` once done: dropping the writer also flushes it, but any
/// error is then lost.
///
#[derive(Debug)]
pub struct EventWriter {
    /// Path of the file being written
    path: PathBuf,

    /// Buffered file handle
    output: BufWriter<File>,

    /// Scratch buffer for encoding event payloads
    payload: Vec<u8>,

    /// Number of events written so far
    events_written: usize,
}
//
impl EventWriter {
    /// Create a new file, failing if something already exists at that path
    pub fn create_new(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let file = OpenOptions::new().write(true).create_new(true).open(path)?;
        let mut output = BufWriter::new(file);
        output.write_all(&FILE_MAGIC)?;
        output.write_u16::<Order>(FORMAT_MAJOR)?;
        output.write_u16::<Order>(FORMAT_MINOR)?;
        Ok(Self {
            path: path.to_owned(),
            output,
            payload: Vec::new(),
            events_written: 0,
        })
    }

    /// Path of the file being written
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an event to the file
    pub fn write_event(&mut self, event: &Event) -> Result<(), RecordError> {
        self.payload.clear();
        codec::encode_event(event, &mut self.payload)?;
        let len = u32::try_from(self.payload.len())
            .ok()
            .filter(|&len| len <= MAX_PAYLOAD_LEN)
            .ok_or(RecordError::PayloadTooLarge {
                len: self.payload.len() as u64,
                max: MAX_PAYLOAD_LEN,
            })?;

        self.output.write_u32::<Order>(RECORD_MARKER)?;
        self.output.write_u32::<Order>(len)?;
        self.output.write_all(&self.payload)?;
        self.events_written += 1;
        Ok(())
    }

    /// Number of events written so far
    pub fn events_written(&self) -> usize {
        self.events_written
    }

    /// Flush everything to disk and close the file
    ///
    /// Returns the number of events that were written.
    ///
    pub fn finish(mut self) -> Result<usize, RecordError> {
        self.output.flush()?;
        self.output.get_ref().sync_all()?;
        Ok(self.events_written)
    }
}
