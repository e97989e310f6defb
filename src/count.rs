//! Counting pass: tally message types over a whole file.
use crate::error::Result;
use crate::scanner::Scanner;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Occurrences of every message-type byte in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountsTable {
    counts: [u64; 256],
}

impl Default for CountsTable {
    fn default() -> Self { Self { counts: [0; 256] } }
}

impl CountsTable {
    /// Count for a single type byte.
    pub fn get(&self, msg_type: u8) -> u64 { self.counts[msg_type as usize] }

    /// Sum of counts over a set of type bytes, e.g. one decoder family.
    pub fn total_for(&self, types: &[u8]) -> u64 {
        types.iter().map(|&t| self.get(t)).sum()
    }

    /// Messages of every type.
    pub fn total(&self) -> u64 { self.counts.iter().sum() }

    /// Non-zero `(type, count)` pairs in type-byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts.iter().enumerate().filter(|(_, c)| **c > 0).map(|(t, c)| (t as u8, *c))
    }

    fn bump(&mut self, msg_type: u8) { self.counts[msg_type as usize] += 1; }
}

/// Scan `path` once and count messages per type byte. Only the type byte is
/// inspected, no fields are decoded.
pub fn count_messages(path: impl AsRef<Path>, buffer_size: usize) -> Result<CountsTable> {
    count_pass(Scanner::open(path, buffer_size)?)
}

pub(crate) fn count_pass<R: Read>(mut scanner: Scanner<R>) -> Result<CountsTable> {
    let mut table = CountsTable::default();
    while let Some(msg) = scanner.next_message()? {
        table.bump(msg.msg_type());
    }
    debug!(messages = table.total(), bytes = scanner.position(), refills = scanner.refills(), "counting pass done");
    Ok(table)
}
