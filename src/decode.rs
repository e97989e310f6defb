//! Decoder capability set and the ordinal range filter shared by all families.
use crate::error::Result;
use crate::scanner::RawMessage;
use crate::table::Table;

/// A message family that turns raw messages into columns.
///
/// Implementations append to every column or to none: `decode_fields`
/// validates the message completely before the first push.
pub trait MessageDecoder: Default {
    /// Family name used in logs and errors.
    const FAMILY: &'static str;
    /// Type bytes belonging to this family.
    const TYPES: &'static [u8];
    /// Length of the shortest accepted message, type byte included.
    const MIN_LEN: usize;

    fn accepts(msg_type: u8) -> bool { Self::TYPES.contains(&msg_type) }

    /// Decode one accepted message into a new row.
    fn decode_fields(&mut self, msg: &RawMessage<'_>) -> Result<()>;

    /// Reserve room for `n` rows in every column.
    fn reserve(&mut self, n: usize);

    /// Rows decoded so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Finish decoding and hand out the named columns.
    fn columns(self) -> Table;
}

/// Outcome of feeding one message through a [`RangeFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Type not in the family.
    Ignored,
    /// Accepted but before `start`.
    Skipped,
    Decoded,
    /// Past `end`; stop scanning.
    Done,
}

/// Tracks the family-relative ordinal and decides which messages to decode.
///
/// `start` and `end` are inclusive ordinals counted over accepted messages only.
#[derive(Debug, Clone)]
pub struct RangeFilter {
    start: u64,
    end: u64,
    ordinal: u64,
}

impl RangeFilter {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end, ordinal: 0 }
    }

    /// Accepted messages seen so far, skipped ones included.
    pub fn ordinal(&self) -> u64 { self.ordinal }

    pub fn feed<D: MessageDecoder>(&mut self, decoder: &mut D, msg: &RawMessage<'_>) -> Result<Step> {
        if !D::accepts(msg.msg_type()) {
            return Ok(Step::Ignored);
        }
        if self.ordinal < self.start {
            self.ordinal += 1;
            return Ok(Step::Skipped);
        }
        // ordinals only grow, nothing later can be in range
        if self.ordinal > self.end {
            return Ok(Step::Done);
        }
        decoder.decode_fields(msg)?;
        self.ordinal += 1;
        Ok(Step::Decoded)
    }
}

/// Fail with `MessageTooShort` unless `msg` holds at least `needed` bytes.
pub(crate) fn require_len(msg: &RawMessage<'_>, needed: usize) -> Result<()> {
    if msg.len() < needed {
        return Err(crate::error::ItchError::MessageTooShort { msg_type: msg.msg_type(), needed, got: msg.len() });
    }
    Ok(())
}
