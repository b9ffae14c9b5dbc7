mod cursor;
mod value;
mod varint;

#[cfg(test)]
pub(crate) mod fixtures;

use serde::Serialize;
use tracing::debug;

use crate::constants::PADDING_BYTE;
use crate::{DecodeOptions, Error, ErrorKind, Result, Table, Value};

pub use cursor::ByteCursor;
pub use value::ValueDecoder;
pub use varint::read_varint;

pub fn decode_all(input: &[u8], options: &DecodeOptions) -> Result<Table> {
    StreamDecoder::new(input, options).decode_all()
}

/// Decodes exactly one value starting at the first byte of `input`.
pub fn decode_value(input: &[u8], options: &DecodeOptions) -> Result<Value> {
    let mut cursor = ByteCursor::new(input);
    ValueDecoder::new(options).decode_value(&mut cursor)
}

/// What happened while walking the top level of a stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamReport {
    pub tables_merged: usize,
    pub values_discarded: usize,
    pub padding_skipped: usize,
    /// Bytes left undecoded when the stream stopped early.
    pub trailing_bytes: usize,
}

/// Drives repeated top-level decoding and merges the resulting tables.
///
/// Recovery lives only here: a failed value may be followed by a single zero
/// padding byte, which is skipped before retrying. Any other failure ends the
/// stream, successfully when something was already merged.
#[derive(Debug)]
pub struct StreamDecoder<'a> {
    cursor: ByteCursor<'a>,
    decoder: ValueDecoder,
    skip_padding: bool,
    strict: bool,
    report: StreamReport,
}

impl<'a> StreamDecoder<'a> {
    pub fn new(input: &'a [u8], options: &DecodeOptions) -> Self {
        Self {
            cursor: ByteCursor::new(input),
            decoder: ValueDecoder::new(options),
            skip_padding: options.skip_padding,
            strict: options.strict,
            report: StreamReport::default(),
        }
    }

    pub fn report(&self) -> &StreamReport {
        &self.report
    }

    /// Bytes the cursor has not consumed yet.
    pub fn remaining(&self) -> usize {
        self.cursor.remaining()
    }

    pub fn decode_all(&mut self) -> Result<Table> {
        let total = self.cursor.position() + self.cursor.remaining();
        let mut merged = Table::new();

        while !self.cursor.is_empty() {
            let start = self.cursor.position();
            match self.decoder.decode_value(&mut self.cursor) {
                Ok(Value::Table(table)) => {
                    self.report.tables_merged += 1;
                    merged.merge(table);
                }
                Ok(other) => {
                    self.report.values_discarded += 1;
                    debug!(
                        offset = start,
                        kind = other.type_name(),
                        "discarding non-table top-level value"
                    );
                }
                Err(err) => {
                    if self.skip_padding_after(&err) {
                        continue;
                    }
                    if merged.is_empty() {
                        return Err(err);
                    }
                    let trailing = total - start;
                    self.report.trailing_bytes = trailing;
                    if self.strict {
                        return Err(Error::trailing_bytes(trailing, start));
                    }
                    debug!(
                        offset = start,
                        trailing,
                        error = %err,
                        "stopping at undecodable trailing bytes"
                    );
                    break;
                }
            }
        }

        debug!(
            entries = merged.len(),
            tables = self.report.tables_merged,
            discarded = self.report.values_discarded,
            padding = self.report.padding_skipped,
            "decoded stream"
        );
        Ok(merged)
    }

    fn skip_padding_after(&mut self, err: &Error) -> bool {
        if !self.skip_padding {
            return false;
        }
        // The offending tag byte was consumed; step back onto it.
        if matches!(err.kind, ErrorKind::UnknownTag { .. }) {
            self.cursor.unread_one();
        }
        if self.cursor.peek() != Some(PADDING_BYTE) {
            return false;
        }
        let offset = self.cursor.position();
        if self.cursor.read_byte().is_err() {
            return false;
        }
        self.report.padding_skipped += 1;
        debug!(offset, "skipped padding byte");
        true
    }
}
