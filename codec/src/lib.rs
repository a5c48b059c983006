//! Schema-driven XDR (RFC 4506) encoding and decoding for structs and unions.
//!
//! This crate ties together the byte stream and schema crates:
//! - [`XdrType`] is the read/write/validate capability shared by every type
//! - Struct values are encoded field by field in declaration order
//! - Union values are encoded as a discriminant followed by the selected arm
//! - Encoded bytes can be presented as raw, hex, or base64
//!
//! # Design Principles
//!
//! - **Deterministic** - Wire order is the declaration order; nothing is sorted.
//! - **Validated at the boundary** - Values are shape-checked when set and fully
//!   checked when written; decoded lengths are checked before allocation.
//! - **Immutable schemas** - Values hold an `Arc` to their schema; no global registry.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use codec::{CodecLimits, UnionValue, Value};
//! use schema::{TypeDescriptor, UnionSchema};
//!
//! let schema = Arc::new(
//!     UnionSchema::builder("Reply", "status", TypeDescriptor::Int)
//!         .case(0, "ok")
//!         .arm("ok", TypeDescriptor::UInt)
//!         .void_arm("error")
//!         .default_arm("error")
//!         .build()
//!         .unwrap(),
//! );
//! let reply = UnionValue::with(Arc::clone(&schema), 0, 7u32).unwrap();
//! let bytes = reply.to_xdr().unwrap();
//! assert_eq!(bytes, [0, 0, 0, 0, 0, 0, 0, 7]);
//!
//! let decoded = UnionValue::from_xdr(&schema, &bytes, &CodecLimits::default()).unwrap();
//! assert_eq!(decoded.get_checked("ok").unwrap(), &Value::UInt(7));
//! ```

mod decoder;
mod error;
mod limits;
mod presentation;
mod primitive;
mod shape;
mod structure;
mod union;
mod value;
mod xdr_type;

pub use decoder::Decoder;
pub use error::{CodecError, CodecResult, LimitKind};
pub use limits::CodecLimits;
pub use presentation::{from_xdr_as, to_xdr_as, Encoding};
pub use shape::matches_shape;
pub use structure::StructValue;
pub use union::{normalize_discriminant, resolve_arm, DiscriminantInput, UnionValue};
pub use value::Value;
pub use xdr_type::{decode, encode, XdrType};
