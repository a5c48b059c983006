//! Error types for stream operations.

use std::fmt;

/// Result type for stream operations.
pub type StreamResult<T> = Result<T, StreamError>;

/// Errors that can occur while reading or writing XDR units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Attempted to read past the end of the buffer.
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Padding after an opaque block contained a non-zero byte.
    NonZeroPadding {
        /// Byte offset of the offending padding byte.
        position: usize,
    },

    /// A length prefix exceeded the maximum allowed for the item.
    LengthExceeded {
        /// Length found in the stream.
        length: u32,
        /// Maximum allowed length.
        max: u32,
    },

    /// A length does not fit in the 32-bit XDR length prefix.
    LengthOverflow {
        /// The length that could not be encoded.
        length: usize,
    },
}

impl fmt::Display for StreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof {
                requested,
                available,
            } => {
                write!(
                    f,
                    "unexpected end of stream: attempted to read {requested} bytes but only {available} bytes available"
                )
            }
            Self::NonZeroPadding { position } => {
                write!(f, "non-zero padding byte at offset {position}")
            }
            Self::LengthExceeded { length, max } => {
                write!(f, "length {length} exceeds maximum {max}")
            }
            Self::LengthOverflow { length } => {
                write!(f, "length {length} does not fit in a 32-bit length prefix")
            }
        }
    }
}

impl std::error::Error for StreamError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_unexpected_eof() {
        let err = StreamError::UnexpectedEof {
            requested: 8,
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("8 bytes"), "should mention requested bytes");
        assert!(msg.contains("3 bytes"), "should mention available bytes");
        assert!(msg.contains("end of stream"));
    }

    #[test]
    fn error_display_non_zero_padding() {
        let err = StreamError::NonZeroPadding { position: 7 };
        assert!(err.to_string().contains('7'));
    }

    #[test]
    fn error_display_length_exceeded() {
        let err = StreamError::LengthExceeded { length: 100, max: 64 };
        let msg = err.to_string();
        assert!(msg.contains("100"), "should mention length");
        assert!(msg.contains("64"), "should mention maximum");
    }

    #[test]
    fn error_equality() {
        let err1 = StreamError::UnexpectedEof {
            requested: 4,
            available: 3,
        };
        let err2 = StreamError::UnexpectedEof {
            requested: 4,
            available: 3,
        };
        let err3 = StreamError::UnexpectedEof {
            requested: 4,
            available: 2,
        };
        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<StreamError>();
    }
}
