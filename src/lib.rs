//! Decoder for binary-serialized Lua tables.
//!
//! The format is a Type-Length-Value stream with four tags:
//!
//! | Tag | Payload |
//! |-----|---------|
//! | `S` | varint length + raw bytes |
//! | `N` | little-endian `f64` |
//! | `B` | one byte, nonzero is true |
//! | `T` | 4 padding bytes + little-endian `i32` count, then `count` key/value pairs |
//!
//! A buffer holds a sequence of top-level tables, sometimes separated by zero
//! bytes; [`decode_all`] merges them into one [`Table`].
//!
//! ```
//! let bytes = [
//!     b'T', 0, 0, 0, 0, 1, 0, 0, 0, // table with one entry
//!     b'S', 3, b'h', b'p', b'!',    // key "hp!"
//!     b'N', 0, 0, 0, 0, 0, 0, 0x08, 0x40, // 3.0
//! ];
//! let table = lua_tlv::decode_all(&bytes).unwrap();
//! assert_eq!(table.get("hp!").and_then(lua_tlv::Value::as_i64), Some(3));
//! ```

pub mod classify;
pub mod constants;
pub mod decode;
pub mod error;
pub mod num;
pub mod options;
pub mod text;
pub mod types;

pub use crate::classify::{classify, GameData};
pub use crate::decode::{ByteCursor, StreamDecoder, StreamReport, ValueDecoder};
pub use crate::error::{Error, ErrorKind, Frame};
pub use crate::options::DecodeOptions;
pub use crate::types::{LuaString, Table, Value};

pub type Result<T> = std::result::Result<T, Error>;

pub fn decode_all(input: &[u8]) -> Result<Table> {
    decode_all_with_options(input, &DecodeOptions::default())
}

pub fn decode_all_with_options(input: &[u8], options: &DecodeOptions) -> Result<Table> {
    decode::decode_all(input, options)
}

pub fn decode_value(input: &[u8]) -> Result<Value> {
    decode_value_with_options(input, &DecodeOptions::default())
}

pub fn decode_value_with_options(input: &[u8], options: &DecodeOptions) -> Result<Value> {
    decode::decode_value(input, options)
}

pub fn decode_to_json(input: &[u8]) -> Result<serde_json::Value> {
    decode_to_json_with_options(input, &DecodeOptions::default())
}

pub fn decode_to_json_with_options(
    input: &[u8],
    options: &DecodeOptions,
) -> Result<serde_json::Value> {
    decode_all_with_options(input, options).map(serde_json::Value::from)
}
