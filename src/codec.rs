//! Big-endian field readers used by the ITCH decoders.
//!
//! Every reader takes a slice that starts at the field and indexes exactly the
//! field width, so a short slice panics on the bounds check instead of reading
//! past the message. Decoders validate message length before calling these.

/// Read 2 bytes as a big-endian `u16`.
#[inline]
pub fn u16be(b: &[u8]) -> u16 {
    u16::from_be_bytes([b[0], b[1]])
}

/// Read 4 bytes as a big-endian `u32`.
#[inline]
pub fn u32be(b: &[u8]) -> u32 {
    u32::from_be_bytes([b[0], b[1], b[2], b[3]])
}

/// Read 6 bytes as a big-endian integer (ITCH nanosecond timestamps).
///
/// The six bytes land in the top of a 64-bit word, the low 16 bits are masked
/// off and the value is shifted down.
#[inline]
pub fn u48be(b: &[u8]) -> u64 {
    let mut tmp = [0u8; 8];
    tmp[..6].copy_from_slice(&b[..6]);
    (u64::from_be_bytes(tmp) & 0xFFFF_FFFF_FFFF_0000) >> 16
}

/// Read 8 bytes as a big-endian `u64`.
#[inline]
pub fn u64be(b: &[u8]) -> u64 {
    let mut tmp = [0u8; 8];
    tmp.copy_from_slice(&b[..8]);
    u64::from_be_bytes(tmp)
}

/// Fixed-point price to float. All price fields use four implied decimals.
#[inline]
pub fn price(b: &[u8]) -> f64 {
    u32be(b) as f64 / 10000.0
}

/// Copy an ASCII field dropping every space, including embedded ones.
pub fn alpha(b: &[u8]) -> String {
    b.iter().filter(|&&c| c != b' ').map(|&c| c as char).collect()
}
