//! Add-order messages: `A` (no attribution) and `F` (with MPID).
use crate::codec::{alpha, price, u16be, u32be, u48be, u64be};
use crate::decode::{MessageDecoder, require_len};
use crate::error::{ItchError, Result};
use crate::scanner::RawMessage;
use crate::table::{Column, Table};

const LEN_A: usize = 36;
const LEN_F: usize = 40;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Orders {
    pub msg_type: Vec<char>,
    pub locate_code: Vec<u16>,
    pub tracking_number: Vec<u16>,
    pub timestamp: Vec<u64>,
    pub order_ref: Vec<u64>,
    pub buy: Vec<bool>,
    pub shares: Vec<u32>,
    pub stock: Vec<String>,
    pub price: Vec<f64>,
    /// Empty for `A` orders.
    pub mpid: Vec<String>,
}

impl MessageDecoder for Orders {
    const FAMILY: &'static str = "orders";
    const TYPES: &'static [u8] = b"AF";
    const MIN_LEN: usize = LEN_A;

    fn decode_fields(&mut self, msg: &RawMessage<'_>) -> Result<()> {
        let t = msg.msg_type();
        let needed = match t {
            b'A' => LEN_A,
            b'F' => LEN_F,
            _ => return Err(ItchError::UnknownSubtype { family: Self::FAMILY, msg_type: t }),
        };
        require_len(msg, needed)?;
        let b = msg.bytes();
        self.msg_type.push(t as char);
        self.locate_code.push(u16be(&b[1..3]));
        self.tracking_number.push(u16be(&b[3..5]));
        self.timestamp.push(u48be(&b[5..11]));
        self.order_ref.push(u64be(&b[11..19]));
        self.buy.push(b[19] == b'B');
        self.shares.push(u32be(&b[20..24]));
        self.stock.push(alpha(&b[24..32]));
        self.price.push(price(&b[32..36]));
        self.mpid.push(if t == b'F' { alpha(&b[36..40]) } else { String::new() });
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
        self.mpid.reserve(n);
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
            .with("mpid", Column::Str(self.mpid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_order(t: u8, order_ref: u64, side: u8, shares: u32, stock: &[u8; 8], px: u32, mpid: &[u8; 4]) -> Vec<u8> {
        let mut b = vec![t];
        b.extend_from_slice(&7u16.to_be_bytes());
        b.extend_from_slice(&3u16.to_be_bytes());
        b.extend_from_slice(&34_200_000_000_123u64.to_be_bytes()[2..]);
        b.extend_from_slice(&order_ref.to_be_bytes());
        b.push(side);
        b.extend_from_slice(&shares.to_be_bytes());
        b.extend_from_slice(stock);
        b.extend_from_slice(&px.to_be_bytes());
        if t == b'F' { b.extend_from_slice(mpid); }
        b
    }

    #[test]
    fn decodes_a_and_f() {
        let mut o = Orders::default();
        let a = add_order(b'A', 42, b'B', 100, b"AAPL    ", 1_500_000, b"    ");
        let f = add_order(b'F', 43, b'S', 5, b"A A P L ", 12_345, b"GS  ");
        o.decode_fields(&RawMessage::new(&a, 0).unwrap()).unwrap();
        o.decode_fields(&RawMessage::new(&f, 0).unwrap()).unwrap();

        assert_eq!(o.msg_type, vec!['A', 'F']);
        assert_eq!(o.locate_code, vec![7, 7]);
        assert_eq!(o.tracking_number, vec![3, 3]);
        assert_eq!(o.timestamp, vec![34_200_000_000_123; 2]);
        assert_eq!(o.order_ref, vec![42, 43]);
        assert_eq!(o.buy, vec![true, false]);
        assert_eq!(o.shares, vec![100, 5]);
        assert_eq!(o.stock, vec!["AAPL", "AAPL"]);
        assert!((o.price[0] - 150.0).abs() < 1e-9);
        assert!((o.price[1] - 1.2345).abs() < 1e-9);
        assert_eq!(o.mpid, vec!["", "GS"]);
    }

    #[test]
    fn truncated_f_appends_nothing() {
        let mut o = Orders::default();
        // an A-sized body typed as F is missing the MPID
        let mut f = add_order(b'A', 1, b'B', 1, b"X       ", 1, b"    ");
        f[0] = b'F';
        let err = o.decode_fields(&RawMessage::new(&f, 0).unwrap()).unwrap_err();
        assert!(matches!(err, ItchError::MessageTooShort { msg_type: b'F', needed: 40, got: 36 }));
        let t = o.columns();
        assert_eq!(t.num_rows(), 0);
        assert!(t.is_consistent());
    }

    #[test]
    fn column_order() {
        assert_eq!(
            Orders::default().columns().names(),
            vec!["msg_type", "locate_code", "tracking_number", "timestamp", "order_ref", "buy", "shares", "stock", "price", "mpid"]
        );
    }
}
