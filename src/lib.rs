//! NASDAQ ITCH 5.0 decoder library.
//!
//! This crate turns plain (uncompressed) ITCH 5.0 files into column-oriented
//! tables for three message families:
//!
//! - `orders`: add-order messages `A` and `F`
//! - `trades`: trade messages `P`, `Q` and `B`
//! - `modifications`: `E`, `C`, `X`, `D` and `U`
//!
//! `scanner` splits the file into length-prefixed messages through a fixed
//! buffer, `count` tallies message types in one pass, and `messages` drives a
//! second pass through a family decoder over a requested ordinal range.
//! `record` writes decoded tables to CRC-framed files, which the binaries in
//! this repository (`src/main.rs` and `src/bin/dump.rs`) produce and read.
pub mod codec;
pub mod count;
pub mod decode;
pub mod error;
pub mod messages;
pub mod modifications;
pub mod orders;
pub mod record;
pub mod scanner;
pub mod table;
pub mod trades;

pub use count::{CountsTable, count_messages};
pub use error::{ItchError, Result};
pub use messages::{DecodeOptions, Family, get_messages, get_modifications, get_orders, get_trades};
pub use table::{Column, Table};
