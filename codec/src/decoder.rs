//! Decoding cursor with limit tracking.

use stream::XdrReader;

use crate::error::{CodecError, CodecResult, LimitKind};
use crate::limits::CodecLimits;

/// A reader paired with decode limits and the current nesting depth.
#[derive(Debug)]
pub struct Decoder<'a> {
    reader: XdrReader<'a>,
    limits: &'a CodecLimits,
    depth: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder over `bytes`.
    #[must_use]
    pub const fn new(bytes: &'a [u8], limits: &'a CodecLimits) -> Self {
        Self {
            reader: XdrReader::new(bytes),
            limits,
            depth: 0,
        }
    }

    /// Returns the underlying reader.
    pub fn reader(&mut self) -> &mut XdrReader<'a> {
        &mut self.reader
    }

    /// Returns the active limits.
    #[must_use]
    pub const fn limits(&self) -> &CodecLimits {
        self.limits
    }

    /// Returns the current nesting depth.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.reader.remaining()
    }

    /// Runs `f` one nesting level deeper, failing if the depth limit is hit.
    pub fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> CodecResult<T>) -> CodecResult<T> {
        let depth = self.depth + 1;
        if depth > self.limits.max_depth {
            return Err(CodecError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit: self.limits.max_depth,
                actual: depth,
            });
        }
        self.depth = depth;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Checks a decoded length against a limit before anything is allocated.
    pub fn check_len(&self, kind: LimitKind, actual: usize) -> CodecResult<()> {
        let limit = match kind {
            LimitKind::Depth => self.limits.max_depth,
            LimitKind::OpaqueLength => self.limits.max_opaque_len,
            LimitKind::ArrayLength => self.limits.max_array_len,
        };
        if actual > limit {
            return Err(CodecError::LimitsExceeded {
                kind,
                limit,
                actual,
            });
        }
        Ok(())
    }

    /// Ensures the whole input was consumed.
    pub fn finish(self) -> CodecResult<()> {
        let remaining = self.reader.remaining();
        if remaining > 0 {
            return Err(CodecError::TrailingBytes { remaining });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_tracks_depth() {
        let limits = CodecLimits::for_testing();
        let mut decoder = Decoder::new(&[], &limits);
        let seen = decoder
            .nested(|d| d.nested(|inner| Ok(inner.depth())))
            .unwrap();
        assert_eq!(seen, 2);
        assert_eq!(decoder.depth(), 0);
    }

    #[test]
    fn nested_rejects_excess_depth() {
        let limits = CodecLimits {
            max_depth: 1,
            ..CodecLimits::for_testing()
        };
        let mut decoder = Decoder::new(&[], &limits);
        let err = decoder
            .nested(|d| d.nested(|_| Ok(())))
            .unwrap_err();
        assert_eq!(
            err,
            CodecError::LimitsExceeded {
                kind: LimitKind::Depth,
                limit: 1,
                actual: 2
            }
        );
        assert_eq!(decoder.depth(), 0);
    }

    #[test]
    fn finish_reports_trailing_bytes() {
        let limits = CodecLimits::default();
        let decoder = Decoder::new(&[0, 0, 0, 1], &limits);
        assert_eq!(
            decoder.finish().unwrap_err(),
            CodecError::TrailingBytes { remaining: 4 }
        );
    }

    #[test]
    fn check_len_against_limits() {
        let limits = CodecLimits::for_testing();
        let decoder = Decoder::new(&[], &limits);
        assert!(decoder.check_len(LimitKind::ArrayLength, 64).is_ok());
        assert!(matches!(
            decoder.check_len(LimitKind::ArrayLength, 65),
            Err(CodecError::LimitsExceeded { .. })
        ));
    }
}
