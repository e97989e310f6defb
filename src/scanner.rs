//! Chunked scanner splitting an ITCH file into length-prefixed messages.
//!
//! The file is read through one fixed-size buffer. Each message on the wire is
//! `[len:u16 be][type:u8][payload...]` where `len` covers type and payload.
//! When the bytes left in the buffer do not hold a complete message, the tail
//! is moved to the front and the buffer is refilled behind it, so a message is
//! always handed out whole.
use crate::codec::u16be;
use crate::error::{ItchError, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::{debug, warn};

/// Smallest accepted scanner buffer, in bytes.
pub const MIN_BUFFER_SIZE: usize = 50;
/// Buffers above this size only trade memory for fewer reads.
pub const LARGE_BUFFER_WARN: usize = 1 << 30;

const LEN_PREFIX: usize = 2;

/// One complete protocol message: the type byte followed by its payload.
///
/// Field offsets used by the decoders count the type byte as index 0.
#[derive(Debug, Clone, Copy)]
pub struct RawMessage<'a> {
    bytes: &'a [u8],
    offset: u64,
}

impl<'a> RawMessage<'a> {
    /// Wrap a message body (type byte first). `None` for an empty slice.
    pub fn new(bytes: &'a [u8], offset: u64) -> Option<Self> {
        if bytes.is_empty() { None } else { Some(Self { bytes, offset }) }
    }

    pub fn msg_type(&self) -> u8 { self.bytes[0] }

    /// Type byte plus payload.
    pub fn bytes(&self) -> &'a [u8] { self.bytes }

    pub fn payload(&self) -> &'a [u8] { &self.bytes[1..] }

    pub fn len(&self) -> usize { self.bytes.len() }

    pub fn is_empty(&self) -> bool { self.bytes.is_empty() }

    /// File offset of the length prefix of this message.
    pub fn offset(&self) -> u64 { self.offset }
}

/// Single-pass reader over a plain ITCH file.
///
/// Not restartable: open a new scanner for every pass over the file.
pub struct Scanner<R = File> {
    reader: R,
    buf: Vec<u8>,
    pos: usize,
    filled: usize,
    /// File offset of `buf[pos]`.
    offset: u64,
    eof: bool,
    refills: u64,
}

impl Scanner<File> {
    /// Open `path` with a buffer of `buffer_size` bytes.
    ///
    /// Fails before reading anything if the file is missing or the buffer is
    /// below [`MIN_BUFFER_SIZE`].
    pub fn open(path: impl AsRef<Path>, buffer_size: usize) -> Result<Self> {
        let path = path.as_ref();
        check_input(path, buffer_size)?;
        Self::open_checked(path, buffer_size)
    }

    /// [`Scanner::open`] for callers that already ran [`check_input`].
    pub(crate) fn open_checked(path: &Path, buffer_size: usize) -> Result<Self> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        // never allocate more than the whole file
        let cap = (buffer_size as u64).min(file_len.max(MIN_BUFFER_SIZE as u64)) as usize;
        Ok(Self::with_capacity(file, cap))
    }
}

impl<R: Read> Scanner<R> {
    /// Scan any reader, e.g. an in-memory cursor.
    pub fn from_reader(reader: R, buffer_size: usize) -> Result<Self> {
        check_buffer_size(buffer_size)?;
        Ok(Self::with_capacity(reader, buffer_size))
    }

    fn with_capacity(reader: R, cap: usize) -> Self {
        Self { reader, buf: vec![0u8; cap], pos: 0, filled: 0, offset: 0, eof: false, refills: 0 }
    }

    /// Next complete message, `Ok(None)` at a clean end of file.
    ///
    /// A partial message left at end of file is a [`ItchError::TruncatedMessage`].
    pub fn next_message(&mut self) -> Result<Option<RawMessage<'_>>> {
        match self.frame()? {
            Some((start, len, offset)) => Ok(RawMessage::new(&self.buf[start..start + len], offset)),
            None => Ok(None),
        }
    }

    /// Bytes consumed so far, i.e. the file offset of the next message.
    pub fn position(&self) -> u64 { self.offset }

    /// Number of buffer refills performed.
    pub fn refills(&self) -> u64 { self.refills }

    /// Current buffer capacity (may exceed the requested size after growth).
    pub fn capacity(&self) -> usize { self.buf.len() }

    /// Locate the next message in the buffer, refilling as needed.
    /// Returns `(start, len, offset)` of the message body.
    fn frame(&mut self) -> Result<Option<(usize, usize, u64)>> {
        loop {
            let avail = self.filled - self.pos;
            let mut needed = LEN_PREFIX;
            if avail >= LEN_PREFIX {
                let len = u16be(&self.buf[self.pos..]) as usize;
                if len == 0 {
                    return Err(ItchError::EmptyMessage { offset: self.offset });
                }
                needed = LEN_PREFIX + len;
                if avail >= needed {
                    let start = self.pos + LEN_PREFIX;
                    let offset = self.offset;
                    self.pos += needed;
                    self.offset += needed as u64;
                    return Ok(Some((start, len, offset)));
                }
                if needed > self.buf.len() {
                    warn!(needed, capacity = self.buf.len(), offset = self.offset, "message larger than scan buffer, growing buffer");
                    self.buf.resize(needed, 0);
                }
            }
            if self.eof {
                if avail == 0 {
                    return Ok(None);
                }
                return Err(ItchError::TruncatedMessage { offset: self.offset, needed, available: avail });
            }
            self.refill()?;
        }
    }

    /// Move the unconsumed tail to the front and read behind it until the
    /// buffer is full or the reader is exhausted.
    fn refill(&mut self) -> Result<()> {
        let tail = self.filled - self.pos;
        self.buf.copy_within(self.pos..self.filled, 0);
        self.pos = 0;
        self.filled = tail;
        while self.filled < self.buf.len() {
            match self.reader.read(&mut self.buf[self.filled..]) {
                Ok(0) => { self.eof = true; break; }
                Ok(n) => self.filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.refills += 1;
        debug!(refill = self.refills, carried = tail, filled = self.filled, eof = self.eof, "scanner refill");
        Ok(())
    }
}

/// Configuration checks shared by every pass over a file: buffer floor first,
/// then existence.
pub(crate) fn check_input(path: &Path, buffer_size: usize) -> Result<()> {
    check_buffer_size(buffer_size)?;
    if !path.is_file() {
        return Err(ItchError::MissingFile { path: path.to_path_buf() });
    }
    Ok(())
}

fn check_buffer_size(size: usize) -> Result<()> {
    if size < MIN_BUFFER_SIZE {
        return Err(ItchError::BufferTooSmall { size, min: MIN_BUFFER_SIZE });
    }
    if size > LARGE_BUFFER_WARN {
        warn!(size, "very large scan buffer requested");
    }
    Ok(())
}
