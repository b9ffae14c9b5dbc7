use crate::{Error, Result};

/// Forward-only reader over a fully resident buffer.
///
/// The only backwards movement is [`ByteCursor::unread_one`], which steps
/// back over the single byte returned by the latest [`ByteCursor::read_byte`].
#[derive(Debug)]
pub struct ByteCursor<'a> {
    bytes: &'a [u8],
    position: usize,
    can_unread: bool,
}

impl<'a> ByteCursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            position: 0,
            can_unread: false,
        }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.position).copied()
    }

    #[inline]
    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self
            .peek()
            .ok_or_else(|| Error::end_of_input(self.position))?;
        self.position += 1;
        self.can_unread = true;
        Ok(byte)
    }

    /// Fails without advancing when fewer than `len` bytes remain.
    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::end_of_input(self.position));
        }
        let start = self.position;
        self.position += len;
        self.can_unread = false;
        Ok(&self.bytes[start..self.position])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let slice = self.read_exact(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Steps back over the byte returned by the latest `read_byte`.
    ///
    /// Returns `false`, leaving the position untouched, when the previous
    /// operation was not a single-byte read or a pushback already happened.
    pub fn unread_one(&mut self) -> bool {
        if !self.can_unread {
            return false;
        }
        self.position -= 1;
        self.can_unread = false;
        true
    }
}
