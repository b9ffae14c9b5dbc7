#![allow(dead_code)]

use lua_tlv::{Table, Value};

/// Test-side writer for the wire format.
#[derive(Default)]
pub struct Encoder {
    out: Vec<u8>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Vec<u8> {
        self.out
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.out.extend_from_slice(bytes);
        self
    }

    pub fn padding(self) -> Self {
        self.raw(&[0x00])
    }

    pub fn value(mut self, value: &Value) -> Self {
        write_value(&mut self.out, value);
        self
    }

    pub fn table(self, entries: &[(&str, Value)]) -> Self {
        let table: Table = entries.iter().map(|(k, v)| (*k, v.clone())).collect();
        self.value(&Value::Table(table))
    }
}

pub fn encode(value: &Value) -> Vec<u8> {
    Encoder::new().value(value).finish()
}

pub fn varint(mut value: u64, out: &mut Vec<u8>) {
    while value >= 0x80 {
        out.push((value as u8) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

pub fn write_bytes(out: &mut Vec<u8>, bytes: &[u8]) {
    out.push(b'S');
    varint(bytes.len() as u64, out);
    out.extend_from_slice(bytes);
}

pub fn write_number(out: &mut Vec<u8>, value: f64) {
    out.push(b'N');
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn write_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::String(s) => write_bytes(out, s.as_bytes()),
        Value::Integer(i) => write_number(out, *i as f64),
        Value::Float(f) => write_number(out, *f),
        Value::Boolean(b) => out.extend_from_slice(&[b'B', u8::from(*b)]),
        Value::Table(table) => {
            out.extend_from_slice(&[b'T', 0, 0, 0, 0]);
            out.extend_from_slice(&(table.len() as i32).to_le_bytes());
            for (key, value) in table {
                write_bytes(out, key.as_bytes());
                write_value(out, value);
            }
        }
    }
}

/// `depth` tables, each holding the next under the key `child`.
pub fn nested_tables(depth: usize) -> Vec<u8> {
    let mut level = vec![b'T', 0, 0, 0, 0];
    level.extend_from_slice(&1i32.to_le_bytes());
    write_bytes(&mut level, b"child");

    let mut out = level.repeat(depth.saturating_sub(1));
    out.extend_from_slice(&[b'T', 0, 0, 0, 0, 0, 0, 0, 0]);
    out
}
