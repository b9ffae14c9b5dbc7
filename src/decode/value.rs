use tracing::trace;

use crate::constants::{Tag, MIN_PAIR_LEN, TABLE_HEADER_LEN};
use crate::{DecodeOptions, Error, Frame, LuaString, Result, Table, Value};

use super::{read_varint, ByteCursor};

/// Strict recursive decoder for a single tagged value.
///
/// Holds no state besides its limits, so the same decoder can be reused
/// across cursors. Errors are never recovered here; they carry the offset of
/// the failing field and the chain of enclosing table entries.
#[derive(Debug, Clone, Copy)]
pub struct ValueDecoder {
    max_depth: usize,
}

impl ValueDecoder {
    pub fn new(options: &DecodeOptions) -> Self {
        Self {
            max_depth: options.max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn decode_value(&self, cursor: &mut ByteCursor<'_>) -> Result<Value> {
        self.decode_nested(cursor, 0)
    }

    fn decode_nested(&self, cursor: &mut ByteCursor<'_>, depth: usize) -> Result<Value> {
        let offset = cursor.position();
        let byte = cursor.read_byte().map_err(|err| err.within(Frame::Tag))?;
        match Tag::from_byte(byte) {
            Some(Tag::String) => self.decode_string(cursor).map(Value::String),
            Some(Tag::Number) => {
                let raw = cursor
                    .read_array::<8>()
                    .map_err(|err| err.within(Frame::Number))?;
                Ok(Value::from_number(f64::from_le_bytes(raw)))
            }
            Some(Tag::Boolean) => {
                let raw = cursor
                    .read_byte()
                    .map_err(|err| err.within(Frame::Boolean))?;
                Ok(Value::Boolean(raw != 0))
            }
            Some(Tag::Table) => {
                if depth >= self.max_depth {
                    return Err(Error::recursion_limit(self.max_depth, offset));
                }
                self.decode_table(cursor, depth + 1).map(Value::Table)
            }
            None => Err(Error::unknown_tag(byte, offset)),
        }
    }

    fn decode_string(&self, cursor: &mut ByteCursor<'_>) -> Result<LuaString> {
        let length_offset = cursor.position();
        let length = read_varint(cursor).map_err(|err| err.within(Frame::StringLength))?;
        // A length beyond the address space can never be satisfied by the buffer.
        let length = usize::try_from(length)
            .map_err(|_| Error::end_of_input(length_offset).within(Frame::StringBody))?;
        let body = cursor
            .read_exact(length)
            .map_err(|err| err.within(Frame::StringBody))?;
        Ok(LuaString::from(body))
    }

    fn decode_table(&self, cursor: &mut ByteCursor<'_>, depth: usize) -> Result<Table> {
        let header_offset = cursor.position();
        let header = cursor.read_array::<TABLE_HEADER_LEN>().map_err(|err| {
            let err = if cursor.is_empty() {
                err
            } else {
                err.into_truncated()
            };
            err.within(Frame::TableHeader)
        })?;
        let count = i32::from_le_bytes([header[4], header[5], header[6], header[7]]);
        trace!(offset = header_offset, count, depth, "table header");

        // Negative counts describe an empty table.
        let count = usize::try_from(count).unwrap_or(0);
        let mut table = Table::with_capacity(count.min(cursor.remaining() / MIN_PAIR_LEN));
        for index in 0..count {
            let key = self
                .decode_nested(cursor, depth)
                .map_err(|err| err.within(Frame::TableKey(index)))?;
            let value = self
                .decode_nested(cursor, depth)
                .map_err(|err| err.within(Frame::TableValue(index)))?;
            table.insert(key.into_key(), value);
        }
        Ok(table)
    }
}

impl Default for ValueDecoder {
    fn default() -> Self {
        Self::new(&DecodeOptions::default())
    }
}
