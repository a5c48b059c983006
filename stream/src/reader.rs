//! Sequential XDR reader with bounded operations.

use crate::error::{StreamError, StreamResult};
use crate::padding_for;

/// A sequential reader for XDR-encoded data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct XdrReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> XdrReader<'a> {
    /// Creates a new `XdrReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Reads an unsigned 32-bit integer.
    pub fn read_u32(&mut self) -> StreamResult<u32> {
        Ok(u32::from_be_bytes(self.read_array::<4>()?))
    }

    /// Reads a signed 32-bit integer.
    pub fn read_i32(&mut self) -> StreamResult<i32> {
        Ok(i32::from_be_bytes(self.read_array::<4>()?))
    }

    /// Reads an unsigned 64-bit integer (XDR unsigned hyper).
    pub fn read_u64(&mut self) -> StreamResult<u64> {
        Ok(u64::from_be_bytes(self.read_array::<8>()?))
    }

    /// Reads a signed 64-bit integer (XDR hyper).
    pub fn read_i64(&mut self) -> StreamResult<i64> {
        Ok(i64::from_be_bytes(self.read_array::<8>()?))
    }

    /// Reads a single-precision float.
    pub fn read_f32(&mut self) -> StreamResult<f32> {
        Ok(f32::from_be_bytes(self.read_array::<4>()?))
    }

    /// Reads a double-precision float.
    pub fn read_f64(&mut self) -> StreamResult<f64> {
        Ok(f64::from_be_bytes(self.read_array::<8>()?))
    }

    /// Reads a fixed-size array of bytes with no padding.
    pub fn read_array<const N: usize>(&mut self) -> StreamResult<[u8; N]> {
        let bytes = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads `len` bytes of opaque data followed by its zero padding.
    pub fn read_fixed_opaque(&mut self, len: usize) -> StreamResult<&'a [u8]> {
        let pad = padding_for(len);
        self.ensure(len.saturating_add(pad))?;
        let bytes = self.take(len)?;
        let pad_start = self.pos;
        let padding = self.take(pad)?;
        if let Some(offset) = padding.iter().position(|&b| b != 0) {
            return Err(StreamError::NonZeroPadding {
                position: pad_start + offset,
            });
        }
        Ok(bytes)
    }

    /// Reads a length-prefixed opaque block, rejecting lengths above `max`.
    pub fn read_var_opaque(&mut self, max: u32) -> StreamResult<&'a [u8]> {
        let length = self.read_u32()?;
        if length > max {
            return Err(StreamError::LengthExceeded { length, max });
        }
        self.read_fixed_opaque(length as usize)
    }

    fn ensure(&self, bytes: usize) -> StreamResult<()> {
        let available = self.remaining();
        if bytes > available {
            return Err(StreamError::UnexpectedEof {
                requested: bytes,
                available,
            });
        }
        Ok(())
    }

    fn take(&mut self, len: usize) -> StreamResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = XdrReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = XdrReader::new(&[]);
        let result = reader.read_u32();
        assert!(matches!(
            result,
            Err(StreamError::UnexpectedEof {
                requested: 4,
                available: 0
            })
        ));
    }

    #[test]
    fn read_u32_big_endian() {
        let mut reader = XdrReader::new(&[0x12, 0x34, 0x56, 0x78]);
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_negative_i32() {
        let mut reader = XdrReader::new(&[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.read_i32().unwrap(), -1);
    }

    #[test]
    fn read_truncated_hyper_fails() {
        let mut reader = XdrReader::new(&[0, 0, 0, 0, 0]);
        let err = reader.read_i64().unwrap_err();
        assert_eq!(
            err,
            StreamError::UnexpectedEof {
                requested: 8,
                available: 5
            }
        );
        // A failed read does not advance the cursor.
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_opaque_skips_padding() {
        let mut reader = XdrReader::new(&[0, 0, 0, 2, 0xAB, 0xCD, 0, 0, 0, 0, 0, 9]);
        assert_eq!(reader.read_var_opaque(8).unwrap(), &[0xAB, 0xCD]);
        assert_eq!(reader.position(), 8);
        assert_eq!(reader.read_u32().unwrap(), 9);
    }

    #[test]
    fn read_opaque_rejects_non_zero_padding() {
        let mut reader = XdrReader::new(&[0xAB, 0, 1, 0]);
        let err = reader.read_fixed_opaque(1).unwrap_err();
        assert_eq!(err, StreamError::NonZeroPadding { position: 2 });
    }

    #[test]
    fn read_opaque_missing_padding_fails() {
        let mut reader = XdrReader::new(&[0, 0, 0, 3, b'a', b'b', b'c']);
        let err = reader.read_var_opaque(16).unwrap_err();
        assert!(matches!(err, StreamError::UnexpectedEof { .. }));
    }

    #[test]
    fn read_var_opaque_rejects_long_length() {
        let mut reader = XdrReader::new(&[0, 0, 1, 0]);
        let err = reader.read_var_opaque(16).unwrap_err();
        assert_eq!(err, StreamError::LengthExceeded { length: 256, max: 16 });
    }
}
