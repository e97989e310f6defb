//! Byte builders for ITCH 5.0 test files.
#![allow(dead_code)]

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub fn header(t: u8, locate: u16, tracking: u16, timestamp: u64) -> Vec<u8> {
    let mut b = vec![t];
    b.extend_from_slice(&locate.to_be_bytes());
    b.extend_from_slice(&tracking.to_be_bytes());
    b.extend_from_slice(&timestamp.to_be_bytes()[2..]);
    b
}

pub fn system_event(timestamp: u64, code: u8) -> Vec<u8> {
    let mut b = header(b'S', 0, 0, timestamp);
    b.push(code);
    b
}

/// NOII message, 50 bytes: longer than anything the decoders read.
pub fn noii(timestamp: u64) -> Vec<u8> {
    let mut b = header(b'I', 1, 0, timestamp);
    b.extend(std::iter::repeat(b' ').take(50 - b.len()));
    b
}

pub fn add_order(order_ref: u64, side: u8, shares: u32, stock: &[u8; 8], price: u32, mpid: Option<&[u8; 4]>) -> Vec<u8> {
    let t = if mpid.is_some() { b'F' } else { b'A' };
    let mut b = header(t, 1, 0, 123_456);
    b.extend_from_slice(&order_ref.to_be_bytes());
    b.push(side);
    b.extend_from_slice(&shares.to_be_bytes());
    b.extend_from_slice(stock);
    b.extend_from_slice(&price.to_be_bytes());
    if let Some(m) = mpid {
        b.extend_from_slice(m);
    }
    b
}

pub fn trade(order_ref: u64, shares: u32, stock: &[u8; 8], price: u32, match_number: u64) -> Vec<u8> {
    let mut b = header(b'P', 2, 0, 200);
    b.extend_from_slice(&order_ref.to_be_bytes());
    b.push(b'B');
    b.extend_from_slice(&shares.to_be_bytes());
    b.extend_from_slice(stock);
    b.extend_from_slice(&price.to_be_bytes());
    b.extend_from_slice(&match_number.to_be_bytes());
    b
}

pub fn cross_trade(shares: u32, stock: &[u8; 8], price: u32, match_number: u64, cross_type: u8) -> Vec<u8> {
    let mut b = header(b'Q', 2, 0, 300);
    b.extend_from_slice(&shares.to_be_bytes());
    b.extend_from_slice(&[0u8; 4]);
    b.extend_from_slice(stock);
    b.extend_from_slice(&price.to_be_bytes());
    b.extend_from_slice(&match_number.to_be_bytes());
    b.push(cross_type);
    b
}

pub fn broken_trade(match_number: u64) -> Vec<u8> {
    let mut b = header(b'B', 2, 0, 400);
    b.extend_from_slice(&match_number.to_be_bytes());
    b
}

pub fn executed(order_ref: u64, shares: u32, match_number: u64) -> Vec<u8> {
    let mut b = header(b'E', 1, 0, 500);
    b.extend_from_slice(&order_ref.to_be_bytes());
    b.extend_from_slice(&shares.to_be_bytes());
    b.extend_from_slice(&match_number.to_be_bytes());
    b
}

pub fn executed_with_price(order_ref: u64, shares: u32, match_number: u64, printable: u8, price: u32) -> Vec<u8> {
    let mut b = executed(order_ref, shares, match_number);
    b[0] = b'C';
    b.push(printable);
    b.extend_from_slice(&price.to_be_bytes());
    b
}

pub fn cancel(order_ref: u64, shares: u32) -> Vec<u8> {
    let mut b = header(b'X', 1, 0, 600);
    b.extend_from_slice(&order_ref.to_be_bytes());
    b.extend_from_slice(&shares.to_be_bytes());
    b
}

pub fn delete(order_ref: u64) -> Vec<u8> {
    let mut b = header(b'D', 1, 0, 700);
    b.extend_from_slice(&order_ref.to_be_bytes());
    b
}

pub fn replace(order_ref: u64, new_order_ref: u64, shares: u32, price: u32) -> Vec<u8> {
    let mut b = header(b'U', 1, 0, 800);
    b.extend_from_slice(&order_ref.to_be_bytes());
    b.extend_from_slice(&new_order_ref.to_be_bytes());
    b.extend_from_slice(&shares.to_be_bytes());
    b.extend_from_slice(&price.to_be_bytes());
    b
}

/// Length-prefix every body and write them to `dir/name`.
pub fn write_itch(dir: &Path, name: &str, bodies: &[Vec<u8>]) -> PathBuf {
    let path = dir.join(name);
    let mut w = BufWriter::new(File::create(&path).unwrap());
    for body in bodies {
        w.write_all(&(body.len() as u16).to_be_bytes()).unwrap();
        w.write_all(body).unwrap();
    }
    w.flush().unwrap();
    path
}

/// A day in miniature: every decoded type interleaved with messages no
/// decoder accepts.
pub fn mixed_session() -> Vec<Vec<u8>> {
    let mut out = vec![system_event(1, b'O'), noii(2)];
    for i in 0..12u64 {
        let mpid: Option<&[u8; 4]> = if i % 3 == 2 { Some(b"MS  ") } else { None };
        out.push(add_order(i, if i % 2 == 0 { b'B' } else { b'S' }, 100 + i as u32, b"AAPL    ", 1_500_000 + i as u32, mpid));
        match i % 5 {
            0 => out.push(executed(i, 10, 1_000 + i)),
            1 => out.push(executed_with_price(i, 20, 2_000 + i, b'Y', 1_500_000)),
            2 => out.push(cancel(i, 5)),
            3 => out.push(replace(i, 100 + i, 50, 1_500_000)),
            _ => out.push(delete(i)),
        }
        match i % 4 {
            0 => out.push(trade(i, 7, b"MSFT    ", 1_500_000, 3_000 + i)),
            1 => out.push(cross_trade(1_000, b"SPY     ", 1_500_000, 4_000 + i, b'O')),
            2 => out.push(broken_trade(3_000 + i - 2)),
            _ => out.push(noii(10 + i)),
        }
    }
    out.push(system_event(99, b'C'));
    out
}
