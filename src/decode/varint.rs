use crate::constants::MAX_VARINT_GROUPS;
use crate::{Error, ErrorKind, Result};

use super::ByteCursor;

/// Reads a base-128 little-endian unsigned integer.
///
/// Each byte contributes its low seven bits; a set high bit means another
/// group follows. Input that runs out after the first group is `Truncated`,
/// input with no bytes at all is `EndOfInput`, and more than
/// [`MAX_VARINT_GROUPS`] groups (or bits past 64) is `MalformedVarInt`.
pub fn read_varint(cursor: &mut ByteCursor<'_>) -> Result<u64> {
    let start = cursor.position();
    let mut value = 0u64;
    for group in 0..MAX_VARINT_GROUPS {
        let byte = match cursor.read_byte() {
            Ok(byte) => byte,
            Err(err) if group == 0 => return Err(err),
            Err(err) => return Err(err.into_truncated()),
        };
        let payload = u64::from(byte & 0x7F);
        let shift = 7 * group as u32;
        if shift == 63 && payload > 1 {
            return Err(malformed(start));
        }
        value |= payload << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(malformed(start))
}

fn malformed(offset: usize) -> Error {
    Error::new(
        ErrorKind::MalformedVarInt {
            max_groups: MAX_VARINT_GROUPS,
        },
        offset,
    )
}
