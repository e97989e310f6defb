//! On-disk export of decoded tables.
//!
//! Frames are `[len:u32 le][crc32:u32 le][bincode payload]`. An export file
//! holds one `Header` frame followed by one `Table` frame.
use crate::error::{ItchError, Result};
use crate::table::Table;
use crc32fast::Hasher as Crc32;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

pub const FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileHeader {
    pub version: u16,
    pub created_unix_ns: u128,
    /// ITCH file the table was decoded from.
    pub source: String,
    pub family: String,
    pub start: u64,
    pub end: u64,
}

impl FileHeader {
    pub fn new(source: &Path, family: &str, start: u64, end: u64) -> Self {
        Self {
            version: FORMAT_VERSION,
            created_unix_ns: now_unix_ns(),
            source: source.display().to_string(),
            family: family.to_string(),
            start,
            end,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RecordFrame {
    Header(FileHeader),
    Table(Table),
}

fn now_unix_ns() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

fn crc(payload: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    hasher.update(payload);
    hasher.finalize()
}

pub fn write_frame<W: Write>(w: &mut W, frame: &RecordFrame) -> Result<()> {
    let payload = bincode::serialize(frame)?;
    let len = payload.len() as u32;
    w.write_all(&len.to_le_bytes())?;
    w.write_all(&crc(&payload).to_le_bytes())?;
    w.write_all(&payload)?;
    Ok(())
}

fn read_u32<R: Read>(r: &mut R) -> std::io::Result<u32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Read the next frame; `Ok(None)` at end of file. `index` is only used for
/// error reporting.
pub fn read_frame<R: Read>(r: &mut R, index: usize) -> Result<Option<RecordFrame>> {
    let len = match read_u32(r) {
        Ok(v) => v as usize,
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let expected = read_u32(r)?;
    // grow with the bytes actually present instead of trusting `len`
    let mut payload = Vec::new();
    r.by_ref().take(len as u64).read_to_end(&mut payload)?;
    if payload.len() != len {
        return Err(ItchError::InvalidExport {
            reason: format!("frame {index} declares {len} bytes, only {} present", payload.len()),
        });
    }
    let calculated = crc(&payload);
    if calculated != expected {
        return Err(ItchError::ChecksumMismatch { frame: index, expected, calculated });
    }
    Ok(Some(bincode::deserialize(&payload)?))
}

/// Write `table` to `out`, creating parent directories as needed.
pub fn export_table(out: &Path, header: FileHeader, table: Table) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).write(true).truncate(true).open(out)?;
    let mut w = BufWriter::with_capacity(1 << 20, file);
    write_frame(&mut w, &RecordFrame::Header(header))?;
    write_frame(&mut w, &RecordFrame::Table(table))?;
    w.flush()?;
    Ok(())
}

/// Read back a file written by [`export_table`].
pub fn import_table(path: &Path) -> Result<(FileHeader, Table)> {
    let mut r = BufReader::new(File::open(path)?);
    let header = match read_frame(&mut r, 0)? {
        Some(RecordFrame::Header(h)) => h,
        Some(_) => return Err(ItchError::InvalidExport { reason: "first frame is not a header".into() }),
        None => return Err(ItchError::InvalidExport { reason: "empty file".into() }),
    };
    if header.version != FORMAT_VERSION {
        return Err(ItchError::InvalidExport { reason: format!("unsupported version {}", header.version) });
    }
    match read_frame(&mut r, 1)? {
        Some(RecordFrame::Table(t)) => Ok((header, t)),
        Some(_) => Err(ItchError::InvalidExport { reason: "second frame is not a table".into() }),
        None => Err(ItchError::InvalidExport { reason: "missing table frame".into() }),
    }
}
