//! Byte stream primitives for XDR (RFC 4506) encoding.
//!
//! This crate provides [`XdrWriter`] and [`XdrReader`], sequential cursors that
//! speak the XDR unit layout: every item is big-endian and occupies a multiple
//! of four bytes, with opaque data padded by zero bytes.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked before slicing.
//! - **No domain knowledge** - This crate knows nothing about structs, unions, or schemas.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use stream::{XdrReader, XdrWriter};
//!
//! let mut writer = XdrWriter::new();
//! writer.write_i32(-2);
//! writer.write_var_opaque(b"abc").unwrap();
//!
//! let bytes = writer.finish();
//! assert_eq!(bytes.len(), 12);
//!
//! let mut reader = XdrReader::new(&bytes);
//! assert_eq!(reader.read_i32().unwrap(), -2);
//! assert_eq!(reader.read_var_opaque(u32::MAX).unwrap(), b"abc");
//! ```

mod error;
mod reader;
mod writer;

pub use error::{StreamError, StreamResult};
pub use reader::XdrReader;
pub use writer::XdrWriter;

/// Size in bytes of one XDR unit.
pub const UNIT: usize = 4;

/// Returns the number of zero bytes that follow a `len`-byte opaque block.
#[must_use]
pub const fn padding_for(len: usize) -> usize {
    (UNIT - len % UNIT) % UNIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let writer = XdrWriter::new();
        let bytes = writer.finish();
        assert!(bytes.is_empty());

        let reader = XdrReader::new(&bytes);
        assert!(reader.is_empty());
    }

    #[test]
    fn padding_sizes() {
        assert_eq!(padding_for(0), 0);
        assert_eq!(padding_for(1), 3);
        assert_eq!(padding_for(2), 2);
        assert_eq!(padding_for(3), 1);
        assert_eq!(padding_for(4), 0);
        assert_eq!(padding_for(5), 3);
    }

    #[test]
    fn mixed_roundtrip() {
        let mut writer = XdrWriter::new();
        writer.write_u32(7);
        writer.write_i64(-9_000_000_000);
        writer.write_f64(1.5);
        writer.write_fixed_opaque(&[1, 2, 3]);
        writer.write_var_opaque(b"hello").unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes.len(), 4 + 8 + 8 + 4 + 12);

        let mut reader = XdrReader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 7);
        assert_eq!(reader.read_i64().unwrap(), -9_000_000_000);
        assert_eq!(reader.read_f64().unwrap(), 1.5);
        assert_eq!(reader.read_fixed_opaque(3).unwrap(), &[1, 2, 3]);
        assert_eq!(reader.read_var_opaque(16).unwrap(), b"hello");
        assert!(reader.is_empty());
    }

    #[test]
    fn doctest_example() {
        let mut writer = XdrWriter::new();
        writer.write_i32(-2);
        writer.write_var_opaque(b"abc").unwrap();
        let bytes = writer.finish();

        assert_eq!(
            bytes,
            vec![0xFF, 0xFF, 0xFF, 0xFE, 0, 0, 0, 3, b'a', b'b', b'c', 0]
        );
    }
}
