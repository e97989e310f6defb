//! Order modifications: executions (`E`, `C`), cancel (`X`), delete (`D`)
//! and replace (`U`).
use crate::codec::{price, u16be, u32be, u48be, u64be};
use crate::decode::{MessageDecoder, require_len};
use crate::error::{ItchError, Result};
use crate::scanner::RawMessage;
use crate::table::{Column, Table};

const LEN_E: usize = 31;
const LEN_C: usize = 36;
const LEN_X: usize = 23;
const LEN_D: usize = 19;
const LEN_U: usize = 35;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Modifications {
    pub msg_type: Vec<char>,
    pub locate_code: Vec<u16>,
    pub tracking_number: Vec<u16>,
    pub timestamp: Vec<u64>,
    /// For `U` this is the order being replaced.
    pub order_ref: Vec<u64>,
    /// Executed or cancelled shares; new size for `U`.
    pub shares: Vec<u32>,
    pub match_number: Vec<u64>,
    pub printable: Vec<char>,
    pub price: Vec<f64>,
    pub new_order_ref: Vec<u64>,
}

impl MessageDecoder for Modifications {
    const FAMILY: &'static str = "modifications";
    const TYPES: &'static [u8] = b"ECXDU";
    const MIN_LEN: usize = LEN_D;

    fn decode_fields(&mut self, msg: &RawMessage<'_>) -> Result<()> {
        let t = msg.msg_type();
        let needed = match t {
            b'E' => LEN_E,
            b'C' => LEN_C,
            b'X' => LEN_X,
            b'D' => LEN_D,
            b'U' => LEN_U,
            _ => return Err(ItchError::UnknownSubtype { family: Self::FAMILY, msg_type: t }),
        };
        require_len(msg, needed)?;
        let b = msg.bytes();

        self.msg_type.push(t as char);
        self.locate_code.push(u16be(&b[1..3]));
        self.tracking_number.push(u16be(&b[3..5]));
        self.timestamp.push(u48be(&b[5..11]));
        self.order_ref.push(u64be(&b[11..19]));

        // (shares, match_number, printable, price, new_order_ref)
        let (shares, match_number, printable, px, new_ref) = match t {
            b'E' => (u32be(&b[19..23]), u64be(&b[23..31]), 'N', 0.0, 0),
            b'C' => (u32be(&b[19..23]), u64be(&b[23..31]), b[31] as char, price(&b[32..36]), 0),
            b'X' => (u32be(&b[19..23]), 0, '\0', 0.0, 0),
            b'U' => (u32be(&b[27..31]), 0, '\0', price(&b[31..35]), u64be(&b[19..27])),
            _ => (0, 0, '\0', 0.0, 0),
        };
        self.shares.push(shares);
        self.match_number.push(match_number);
        self.printable.push(printable);
        self.price.push(px);
        self.new_order_ref.push(new_ref);
        Ok(())
    }

    fn reserve(&mut self, n: usize) {
        self.msg_type.reserve(n);
        self.locate_code.reserve(n);
        self.tracking_number.reserve(n);
        self.timestamp.reserve(n);
        self.order_ref.reserve(n);
        self.shares.reserve(n);
        self.match_number.reserve(n);
        self.printable.reserve(n);
        self.price.reserve(n);
        self.new_order_ref.reserve(n);
    }

    fn len(&self) -> usize { self.msg_type.len() }

    fn columns(self) -> Table {
        Table::default()
            .with("msg_type", Column::Char(self.msg_type))
            .with("locate_code", Column::U16(self.locate_code))
            .with("tracking_number", Column::U16(self.tracking_number))
            .with("timestamp", Column::U64(self.timestamp))
            .with("order_ref", Column::U64(self.order_ref))
            .with("shares", Column::U32(self.shares))
            .with("match_number", Column::U64(self.match_number))
            .with("printable", Column::Char(self.printable))
            .with("price", Column::F64(self.price))
            .with("new_order_ref", Column::U64(self.new_order_ref))
    }
}
