//! Sequential reading of event record files

use super::{
    codec::{self, Order},
    Event, RecordError, FILE_MAGIC, FORMAT_MAJOR, MAX_PAYLOAD_LEN, RECORD_MARKER,
};

use byteorder::ReadBytesExt;
use std::{
    fs::File,
    io::{self, BufReader, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

/// Size of the file header (bytes)
const FILE_HEADER_LEN: u64 = 8;

/// Size of the marker + length header of each event frame (bytes)
const FRAME_HEADER_LEN: u64 = 8;

/// Reader which yields the events of a file one at a time
///
/// Events are handed out as owned values, which the caller is free to modify
/// and pass on to an `EventWriter`.
///
#[derive(Debug)]
pub struct EventReader {
    /// Path of the file being read
    path: PathBuf,

    /// Buffered file handle
    input: BufReader<File>,

    /// Byte offset of the next frame
    position: u64,

    /// Total size of the file (bytes)
    file_len: u64,
}
//
impl EventReader {
    /// Open an event record file and check its header
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        let mut input = BufReader::new(file);

        let mut magic = [0; 4];
        input.read_exact(&mut magic)?;
        if magic != FILE_MAGIC {
            return Err(RecordError::BadMagic { found: magic });
        }
        let major = input.read_u16::<Order>()?;
        let minor = input.read_u16::<Order>()?;
        if major != FORMAT_MAJOR {
            return Err(RecordError::UnsupportedVersion { major, minor });
        }

        Ok(Self {
            path: path.to_owned(),
            input,
            position: FILE_HEADER_LEN,
            file_len,
        })
    }

    /// Path of the file being read
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Count the events of the file
    ///
    /// This walks over all frame headers without decoding any payload, then
    /// goes back to where reading was. A truncated final frame is an error.
    ///
    pub fn event_count(&mut self) -> Result<usize, RecordError> {
        let resume_position = self.position;
        self.input.seek(SeekFrom::Start(FILE_HEADER_LEN))?;
        self.position = FILE_HEADER_LEN;

        let mut count = 0;
        let outcome: Result<usize, RecordError> = loop {
            match self.next_frame_len() {
                Ok(Some(len)) => {
                    let frame_end = self.position + len;
                    if frame_end > self.file_len {
                        break Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
                    }
                    if let Err(e) = self.input.seek_relative(len as i64) {
                        break Err(e.into());
                    }
                    self.position = frame_end;
                    count += 1;
                }
                Ok(None) => break Ok(count),
                Err(e) => break Err(e),
            }
        };

        self.input.seek(SeekFrom::Start(resume_position))?;
        self.position = resume_position;
        outcome
    }

    /// Read the next event, or `None` once the end of the file is reached
    pub fn read_next_event(&mut self) -> Result<Option<Event>, RecordError> {
        let Some(len) = self.next_frame_len()? else {
            return Ok(None);
        };
        let mut payload = vec![0; len as usize];
        self.input.read_exact(&mut payload)?;
        self.position += len;
        codec::decode_event(&payload).map(Some)
    }

    /// Read a frame header and return the payload length that follows
    ///
    /// A clean end of file, right at a frame boundary, yields `None`.
    ///
    fn next_frame_len(&mut self) -> Result<Option<u64>, RecordError> {
        let mut header = [0; FRAME_HEADER_LEN as usize];
        let mut filled = 0;
        while filled < header.len() {
            match self.input.read(&mut header[filled..]) {
                Ok(0) if filled == 0 => return Ok(None),
                Ok(0) => return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into()),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }

        let mut header = &header[..];
        let marker = header.read_u32::<Order>()?;
        if marker != RECORD_MARKER {
            return Err(RecordError::BadMarker {
                found: marker,
                offset: self.position,
            });
        }
        let len = header.read_u32::<Order>()?;
        if len > MAX_PAYLOAD_LEN {
            return Err(RecordError::PayloadTooLarge {
                len: u64::from(len),
                max: MAX_PAYLOAD_LEN,
            });
        }
        self.position += FRAME_HEADER_LEN;
        Ok(Some(u64::from(len)))
    }
}
