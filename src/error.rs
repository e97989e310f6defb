//! Error taxonomy for the ITCH decode engine.
//!
//! Configuration errors are raised before any scanning starts, format errors
//! describe a malformed file, and `UnknownSubtype` flags a decoder that was
//! handed a type byte it has no field layout for.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItchError {
    /// Input file does not exist or is not a regular file.
    #[error("input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Scanner buffer is smaller than the practical floor.
    #[error("buffer size {size} is below the minimum of {min} bytes")]
    BufferTooSmall { size: usize, min: usize },

    /// File ended in the middle of a length-prefixed message.
    #[error("truncated message at offset {offset}: need {needed} bytes, only {available} left in file")]
    TruncatedMessage {
        offset: u64,
        needed: usize,
        available: usize,
    },

    /// Length prefix of zero, no room for the type byte.
    #[error("zero-length message at offset {offset}")]
    EmptyMessage { offset: u64 },

    /// Message is shorter than the fixed layout of its type.
    #[error("message '{}' too short: need {needed} bytes, got {got}", *msg_type as char)]
    MessageTooShort {
        msg_type: u8,
        needed: usize,
        got: usize,
    },

    /// Accepted type byte without a matching field layout.
    #[error("{family}: no layout for message type '{}'", *msg_type as char)]
    UnknownSubtype {
        family: &'static str,
        msg_type: u8,
    },

    /// Exported frame failed its CRC check.
    #[error("CRC mismatch at frame {frame}: file={expected:#010x}, calc={calculated:#010x}")]
    ChecksumMismatch {
        frame: usize,
        expected: u32,
        calculated: u32,
    },

    /// Exported file does not hold a header followed by a table.
    #[error("invalid export file: {reason}")]
    InvalidExport { reason: String },

    #[error("frame encoding: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ItchError>;
