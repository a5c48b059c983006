//! Struct, union, and enum schema descriptors for the xdrkit codec.
//!
//! This crate defines the declared shape of XDR data:
//! - Type descriptors for every XDR type (scalars, strings, opaque data,
//!   arrays, optionals, enums, structs, unions)
//! - A closed [`TypeCategory`] used by shape validation
//! - Struct, union, and enum schemas with validating builders
//! - Deterministic schema hashing
//!
//! # Design Principles
//!
//! - **Immutable schemas** - Schemas are built once, validated, then shared read-only via `Arc`.
//! - **No global registry** - Composite types reference each other directly.
//! - **Deterministic hashing** - Schema hash is stable given the same definition.

mod descriptor;
mod enumeration;
mod error;
mod hash;
mod structure;
mod union;

pub use descriptor::{TypeCategory, TypeDescriptor};
pub use enumeration::{EnumMember, EnumSchema, EnumSchemaBuilder};
pub use error::{SchemaError, SchemaResult};
pub use hash::schema_hash;
pub use structure::{FieldDef, StructSchema, StructSchemaBuilder};
pub use union::{ArmDef, UnionCase, UnionSchema, UnionSchemaBuilder};
