/// Nested table limit applied when no explicit depth is configured.
///
/// Decoding recurses once per table, so the limit has to fit a 2 MiB thread
/// stack in an unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A 64-bit length never needs more than ten 7-bit groups.
pub const MAX_VARINT_GROUPS: usize = 10;

/// Four bytes of ignored padding followed by a little-endian `i32` count.
pub const TABLE_HEADER_LEN: usize = 8;

pub const PADDING_BYTE: u8 = 0x00;

/// Smallest encoded key/value pair: two booleans (`B` + payload each).
pub(crate) const MIN_PAIR_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    String = b'S',
    Number = b'N',
    Boolean = b'B',
    Table = b'T',
}

impl Tag {
    #[inline]
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'S' => Some(Tag::String),
            b'N' => Some(Tag::Number),
            b'B' => Some(Tag::Boolean),
            b'T' => Some(Tag::Table),
            _ => None,
        }
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}
