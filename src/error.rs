use std::fmt;

use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("unexpected end of input")]
    EndOfInput,
    #[error("truncated input")]
    Truncated,
    #[error("malformed varint: no terminating group within {max_groups} bytes")]
    MalformedVarInt { max_groups: usize },
    #[error("unknown type byte 0x{tag:02X}")]
    UnknownTag { tag: u8 },
    #[error("more than {limit} nested tables")]
    RecursionLimitExceeded { limit: usize },
    #[error("{count} undecodable trailing bytes")]
    TrailingBytes { count: usize },
}

/// The field being read when a decode error was raised, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Tag,
    StringLength,
    StringBody,
    Number,
    Boolean,
    TableHeader,
    TableKey(usize),
    TableValue(usize),
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frame::Tag => write!(f, "type byte"),
            Frame::StringLength => write!(f, "string length"),
            Frame::StringBody => write!(f, "string body"),
            Frame::Number => write!(f, "number"),
            Frame::Boolean => write!(f, "boolean"),
            Frame::TableHeader => write!(f, "table header"),
            Frame::TableKey(index) => write!(f, "key of entry {index}"),
            Frame::TableValue(index) => write!(f, "value of entry {index}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trail(SmallVec<[Frame; 4]>);

impl Trail {
    pub fn frames(&self) -> &[Frame] {
        &self.0
    }

    pub fn innermost(&self) -> Option<Frame> {
        self.0.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut frames = self.0.iter();
        if let Some(first) = frames.next() {
            write!(f, " while reading {first}")?;
        }
        for frame in frames {
            write!(f, " in {frame}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}{trail} at offset {offset}")]
pub struct Error {
    pub kind: ErrorKind,
    /// Absolute byte offset of the field that failed.
    pub offset: usize,
    pub trail: Trail,
}

impl Error {
    pub fn new(kind: ErrorKind, offset: usize) -> Self {
        Self {
            kind,
            offset,
            trail: Trail::default(),
        }
    }

    pub fn end_of_input(offset: usize) -> Self {
        Self::new(ErrorKind::EndOfInput, offset)
    }

    pub fn truncated(offset: usize) -> Self {
        Self::new(ErrorKind::Truncated, offset)
    }

    pub fn unknown_tag(tag: u8, offset: usize) -> Self {
        Self::new(ErrorKind::UnknownTag { tag }, offset)
    }

    pub fn recursion_limit(limit: usize, offset: usize) -> Self {
        Self::new(ErrorKind::RecursionLimitExceeded { limit }, offset)
    }

    pub fn trailing_bytes(count: usize, offset: usize) -> Self {
        Self::new(ErrorKind::TrailingBytes { count }, offset)
    }

    /// Records an enclosing field as the error travels outward.
    pub fn within(mut self, frame: Frame) -> Self {
        self.trail.0.push(frame);
        self
    }

    /// Reclassifies an exhausted read of a multi-byte header.
    pub(crate) fn into_truncated(mut self) -> Self {
        if self.kind == ErrorKind::EndOfInput {
            self.kind = ErrorKind::Truncated;
        }
        self
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind == ErrorKind::EndOfInput
    }
}
