//! Sequential XDR writer.

use crate::error::{StreamError, StreamResult};
use crate::padding_for;

/// A writer that accumulates XDR units in a growable buffer.
///
/// Call [`finish`](Self::finish) to get the final byte buffer.
#[derive(Debug, Default)]
pub struct XdrWriter {
    bytes: Vec<u8>,
}

impl XdrWriter {
    /// Creates a new empty `XdrWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `XdrWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Writes an unsigned 32-bit integer.
    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a signed 32-bit integer.
    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes an unsigned 64-bit integer (XDR unsigned hyper).
    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a signed 64-bit integer (XDR hyper).
    pub fn write_i64(&mut self, value: i64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a single-precision float.
    pub fn write_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a double-precision float.
    pub fn write_f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes raw bytes with no padding.
    pub fn write_array(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Writes opaque data followed by zero padding to a unit boundary.
    pub fn write_fixed_opaque(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
        let pad = padding_for(bytes.len());
        self.bytes.resize(self.bytes.len() + pad, 0);
    }

    /// Writes a length prefix, the opaque data, and its padding.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::LengthOverflow`] if the length does not fit in `u32`.
    pub fn write_var_opaque(&mut self, bytes: &[u8]) -> StreamResult<()> {
        self.write_length(bytes.len())?;
        self.write_fixed_opaque(bytes);
        Ok(())
    }

    /// Writes a 32-bit length or element count.
    pub fn write_length(&mut self, length: usize) -> StreamResult<()> {
        let length_u32 =
            u32::try_from(length).map_err(|_| StreamError::LengthOverflow { length })?;
        self.write_u32(length_u32);
        Ok(())
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = XdrWriter::new();
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn write_u32_big_endian() {
        let mut writer = XdrWriter::new();
        writer.write_u32(0x1234_5678);
        assert_eq!(writer.finish(), vec![0x12, 0x34, 0x56, 0x78]);
    }

    #[test]
    fn write_hyper() {
        let mut writer = XdrWriter::new();
        writer.write_i64(-2);
        assert_eq!(
            writer.finish(),
            vec![0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE]
        );
    }

    #[test]
    fn write_fixed_opaque_pads_with_zeros() {
        let mut writer = XdrWriter::new();
        writer.write_fixed_opaque(&[1, 2, 3, 4, 5]);
        assert_eq!(writer.len(), 8);
        assert_eq!(writer.finish(), vec![1, 2, 3, 4, 5, 0, 0, 0]);
    }

    #[test]
    fn write_aligned_opaque_has_no_padding() {
        let mut writer = XdrWriter::new();
        writer.write_fixed_opaque(&[9, 9, 9, 9]);
        assert_eq!(writer.len(), 4);
    }

    #[test]
    fn write_empty_var_opaque() {
        let mut writer = XdrWriter::new();
        writer.write_var_opaque(&[]).unwrap();
        assert_eq!(writer.finish(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn finish_into_appends() {
        let mut writer = XdrWriter::new();
        writer.write_u32(1);
        let mut buf = vec![0xAA];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0xAA, 0, 0, 0, 1]);
    }
}
