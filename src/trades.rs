//! Trade messages: `P` (non-cross), `Q` (cross) and `B` (broken trade).
use crate::codec::{alpha, price, u16be, u32be, u48be, u64be};
use crate::decode::{MessageDecoder, require_len};
use crate::error::{ItchError, Result};
use crate::scanner::RawMessage;
use crate::table::{Column, Table};

const LEN_P: usize = 44;
const LEN_Q: usize = 40;
const LEN_B: usize = 19;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Trades {
    pub msg_type: Vec<char>,
    pub locate_code: Vec<u16>,
    pub tracking_number: Vec<u16>,
    pub timestamp: Vec<u64>,
    pub order_ref: Vec<u64>,
    pub buy: Vec<bool>,
    pub shares: Vec<u32>,
    pub stock: Vec<String>,
    /// Cross price for `Q`.
    pub price: Vec<f64>,
    pub match_number: Vec<u64>,
    pub cross_type: Vec<char>,
}

impl MessageDecoder for Trades {
    const FAMILY: &'static str = "trades";
    const TYPES: &'static [u8] = b"PQB";
    const MIN_LEN: usize = LEN_B;

    fn decode_fields(&mut self, msg: &RawMessage<'_>) -> Result<()> {
        let t = msg.msg_type();
        let needed = match t {
            b'P' => LEN_P,
            b'Q' => LEN_Q,
            b'B' => LEN_B,
            _ => return Err(ItchError::UnknownSubtype { family: Self::FAMILY, msg_type: t }),
        };
        require_len(msg, needed)?;
        let b = msg.bytes();

        self.msg_type.push(t as char);
        self.locate_code.push(u16be(&b[1..3]));
        self.tracking_number.push(u16be(&b[3..5]));
        self.timestamp.push(u48be(&b[5..11]));

        match t {
            b'P' => {
                self.order_ref.push(u64be(&b[11..19]));
                self.buy.push(b[19] == b'B');
                self.shares.push(u32be(&b[20..24]));
                self.stock.push(alpha(&b[24..32]));
                self.price.push(price(&b[32..36]));
                self.match_number.push(u64be(&b[36..44]));
                self.cross_type.push(' ');
            }
            b'Q' => {
                self.order_ref.push(0);
                self.buy.push(false);
                self.shares.push(u32be(&b[11..15]));
                self.stock.push(alpha(&b[19..27]));
                self.price.push(price(&b[27..31]));
                self.match_number.push(u64be(&b[31..39]));
                self.cross_type.push(b[39] as char);
            }
            _ => {
                self.order_ref.push(0);
                self.buy.push(false);
                self.shares.push(0);
                self.stock.push(String::new());
                self.price.push(0.0);
                self.match_number.push(u64be(&b[11..19]));
                self.cross_type.push(' ');
            }
        }
        Ok(())
    }

    fn reserve(&mut self, n: usize) {
        self.msg_type.reserve(n);
        self.locate_code.reserve(n);
        self.tracking_number.reserve(n);
        self.timestamp.reserve(n);
        self.order_ref.reserve(n);
        self.buy.reserve(n);
        self.shares.reserve(n);
        self.stock.reserve(n);
        self.price.reserve(n);
        self.match_number.reserve(n);
        self.cross_type.reserve(n);
    }

    fn len(&self) -> usize { self.msg_type.len() }

    fn columns(self) -> Table {
        Table::default()
            .with("msg_type", Column::Char(self.msg_type))
            .with("locate_code", Column::U16(self.locate_code))
            .with("tracking_number", Column::U16(self.tracking_number))
            .with("timestamp", Column::U64(self.timestamp))
            .with("order_ref", Column::U64(self.order_ref))
            .with("buy", Column::Bool(self.buy))
            .with("shares", Column::U32(self.shares))
            .with("stock", Column::Str(self.stock))
            .with("price", Column::F64(self.price))
            .with("match_number", Column::U64(self.match_number))
            .with("cross_type", Column::Char(self.cross_type))
    }
}
