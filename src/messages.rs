//! Entry points: decode one message family from a plain ITCH file.
//!
//! Each call is independent. When no upper bound is given the file is scanned
//! once to count the family's messages, then scanned again to decode the
//! requested ordinal range into a [`Table`].
use crate::count::count_pass;
use crate::decode::{MessageDecoder, RangeFilter, Step};
use crate::error::Result;
use crate::modifications::Modifications;
use crate::orders::Orders;
use crate::scanner::{Scanner, check_input};
use crate::table::Table;
use crate::trades::Trades;
use std::path::Path;
use tracing::{debug, info};

/// Default scanner buffer, 100 MB.
pub const DEFAULT_BUFFER_SIZE: usize = 100_000_000;

/// Which part of the file to decode and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// First ordinal to decode (inclusive).
    pub start: u64,
    /// Last ordinal to decode (inclusive); 0 means through end of file.
    pub end: u64,
    pub buffer_size: usize,
    /// Suppress progress messages. Does not change the result.
    pub quiet: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self { start: 0, end: 0, buffer_size: DEFAULT_BUFFER_SIZE, quiet: false }
    }
}

impl DecodeOptions {
    pub fn range(mut self, start: u64, end: u64) -> Self {
        self.start = start;
        self.end = end;
        self
    }

    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }
}

/// The three supported message families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Family {
    Orders,
    Trades,
    Modifications,
}

impl Family {
    pub fn name(self) -> &'static str {
        match self {
            Family::Orders => Orders::FAMILY,
            Family::Trades => Trades::FAMILY,
            Family::Modifications => Modifications::FAMILY,
        }
    }

    /// Type bytes that make up the family.
    pub fn types(self) -> &'static [u8] {
        match self {
            Family::Orders => Orders::TYPES,
            Family::Trades => Trades::TYPES,
            Family::Modifications => Modifications::TYPES,
        }
    }
}

/// Add-order messages (`A`, `F`).
pub fn get_orders(path: impl AsRef<Path>, opts: &DecodeOptions) -> Result<Table> {
    decode_with::<Orders>(path.as_ref(), opts)
}

/// Trade messages (`P`, `Q`, `B`).
pub fn get_trades(path: impl AsRef<Path>, opts: &DecodeOptions) -> Result<Table> {
    decode_with::<Trades>(path.as_ref(), opts)
}

/// Order modifications (`E`, `C`, `X`, `D`, `U`).
pub fn get_modifications(path: impl AsRef<Path>, opts: &DecodeOptions) -> Result<Table> {
    decode_with::<Modifications>(path.as_ref(), opts)
}

pub fn get_messages(family: Family, path: impl AsRef<Path>, opts: &DecodeOptions) -> Result<Table> {
    match family {
        Family::Orders => get_orders(path, opts),
        Family::Trades => get_trades(path, opts),
        Family::Modifications => get_modifications(path, opts),
    }
}

/// Count (if needed), reserve, then decode the requested range with `D`.
pub fn decode_with<D: MessageDecoder>(path: &Path, opts: &DecodeOptions) -> Result<Table> {
    check_input(path, opts.buffer_size)?;

    let (mut start, mut end) = (opts.start, opts.end);
    if start > end {
        std::mem::swap(&mut start, &mut end);
    }

    let rows = if end == 0 {
        if !opts.quiet { info!(family = D::FAMILY, "counting messages"); }
        let counts = count_pass(Scanner::open_checked(path, opts.buffer_size)?)?;
        let total = counts.total_for(D::TYPES);
        if !opts.quiet { info!(family = D::FAMILY, "{total} messages found"); }
        if total == 0 {
            return Ok(D::default().columns());
        }
        end = total - 1;
        (end + 1).saturating_sub(start)
    } else {
        (end - start).saturating_add(1)
    };

    // a file cannot hold more messages than fit at the family's smallest size
    let file_len = std::fs::metadata(path)?.len();
    let max_rows = file_len / (2 + D::MIN_LEN as u64);
    let reserve = rows.min(max_rows) as usize;
    debug!(family = D::FAMILY, start, end, rows, reserve, "resolved range");

    let mut decoder = D::default();
    decoder.reserve(reserve);

    if !opts.quiet { info!(family = D::FAMILY, start, end, "loading messages"); }
    let mut filter = RangeFilter::new(start, end);
    let mut scanner = Scanner::open_checked(path, opts.buffer_size)?;
    while let Some(msg) = scanner.next_message()? {
        if filter.feed(&mut decoder, &msg)? == Step::Done {
            break;
        }
    }
    debug!(
        family = D::FAMILY,
        decoded = decoder.len(),
        seen = filter.ordinal(),
        bytes = scanner.position(),
        refills = scanner.refills(),
        "decode pass done"
    );

    if !opts.quiet { info!(family = D::FAMILY, rows = decoder.len(), "converting to table"); }
    Ok(decoder.columns())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ItchError;

    #[test]
    fn option_builders() {
        let o = DecodeOptions::default().range(3, 9).buffer_size(1000).quiet(true);
        assert_eq!(o, DecodeOptions { start: 3, end: 9, buffer_size: 1000, quiet: true });
        assert_eq!(DecodeOptions::default().buffer_size, DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn family_type_sets() {
        assert_eq!(Family::Orders.types(), b"AF");
        assert_eq!(Family::Trades.types(), b"PQB");
        assert_eq!(Family::Modifications.types(), b"ECXDU");
        assert_eq!(Family::Modifications.name(), "modifications");
    }

    #[test]
    fn configuration_errors_come_first() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.itch");
        let small = DecodeOptions::default().buffer_size(49);
        assert!(matches!(get_orders(&missing, &small), Err(ItchError::BufferTooSmall { size: 49, .. })));
        assert!(matches!(get_trades(&missing, &DecodeOptions::default()), Err(ItchError::MissingFile { .. })));
    }
}
