// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for object stream encoding/decoding.

use std::fmt;
use std::io;

/// Error raised by object writers and readers.
///
/// Writers only ever surface `Io`, `Closed` and `UtfTooLong`; the remaining
/// variants come from decoding a malformed or unexpected stream.
#[derive(Debug)]
pub enum StreamError {
    /// Failure reported by the underlying sink or source.
    Io(io::Error),
    /// Operation attempted after `close`.
    Closed,
    /// `write_utf` payload exceeds the 16-bit length prefix.
    UtfTooLong { len: usize },
    /// Stream does not start with the expected magic/version.
    InvalidHeader { magic: u16, version: u16 },
    /// Tag byte not valid at this position.
    UnexpectedTag { tag: u8, expected: &'static str },
    /// Back-reference to a handle that was never assigned (or is not complete yet).
    InvalidHandle(u32),
    /// Structurally valid bytes that do not describe a valid value.
    InvalidData { reason: String },
    /// `read_object` called while primitive block data is still unread.
    PendingBlockData { remaining: usize },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::Io(err) => write!(f, "I/O error: {}", err),
            StreamError::Closed => write!(f, "stream is closed"),
            StreamError::UtfTooLong { len } => {
                write!(f, "encoded string too long for UTF record: {} bytes", len)
            }
            StreamError::InvalidHeader { magic, version } => write!(
                f,
                "invalid stream header (magic {:#06X}, version {})",
                magic, version
            ),
            StreamError::UnexpectedTag { tag, expected } => {
                write!(f, "unexpected tag {:#04X}, expected {}", tag, expected)
            }
            StreamError::InvalidHandle(handle) => write!(f, "invalid handle {:#X}", handle),
            StreamError::InvalidData { reason } => write!(f, "invalid data: {}", reason),
            StreamError::PendingBlockData { remaining } => write!(
                f,
                "{} bytes of primitive data pending before object",
                remaining
            ),
        }
    }
}

impl std::error::Error for StreamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StreamError {
    fn from(err: io::Error) -> Self {
        StreamError::Io(err)
    }
}

impl StreamError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        StreamError::InvalidData {
            reason: reason.into(),
        }
    }

    /// True for failures of the underlying sink/source.
    pub fn is_io(&self) -> bool {
        matches!(self, StreamError::Io(_))
    }
}

pub type Result<T> = core::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_stream_error_display_variants() {
        assert_eq!(StreamError::Closed.to_string(), "stream is closed");
        assert_eq!(
            StreamError::UtfTooLong { len: 70000 }.to_string(),
            "encoded string too long for UTF record: 70000 bytes"
        );
        assert_eq!(
            StreamError::UnexpectedTag {
                tag: 0x42,
                expected: "object"
            }
            .to_string(),
            "unexpected tag 0x42, expected object"
        );
        assert_eq!(
            StreamError::InvalidHeader {
                magic: 0xCAFE,
                version: 1
            }
            .to_string(),
            "invalid stream header (magic 0xCAFE, version 1)"
        );
        assert_eq!(
            StreamError::PendingBlockData { remaining: 4 }.to_string(),
            "4 bytes of primitive data pending before object"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err: StreamError = io::Error::new(io::ErrorKind::BrokenPipe, "sink gone").into();
        assert!(err.is_io());
        assert!(err.source().is_some());
        assert!(!StreamError::Closed.is_io());
        assert!(StreamError::Closed.source().is_none());
    }
}
