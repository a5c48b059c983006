//! Command-line support for encoding, decoding, and inspecting XDR data.
//!
//! This crate provides the pieces behind the `xdrkit` binary:
//!
//! - JSON schema documents resolved into type descriptors
//! - Conversion between decoded values and JSON
//! - Schema inspection reports with schema hashes
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to understand what the codec is doing.

mod document;
mod inspect;
mod json;

pub use document::{
    ArmRef, CaseDef, FieldRef, MemberDef, ParamRef, SchemaDocument, TypeDef, TypeRef, TypeRegistry,
};
pub use inspect::{format_report, inspect_registry, InspectReport, TypeSummary};
pub use json::{from_json, to_json};

use anyhow::{Context, Result};
use codec::{CodecLimits, Encoding};
use schema::TypeDescriptor;

/// Parses presented bytes and decodes them as `ty`, rendered as JSON.
pub fn decode_to_json(
    ty: &TypeDescriptor,
    input: &[u8],
    encoding: Encoding,
    limits: &CodecLimits,
) -> Result<serde_json::Value> {
    let bytes = encoding.parse(input)?;
    log::debug!("decoding {} bytes as {ty}", bytes.len());
    let value = codec::decode(ty, &bytes, limits).with_context(|| format!("decode {ty}"))?;
    Ok(to_json(ty, &value))
}

/// Builds a value of `ty` from JSON and encodes it in `encoding`.
pub fn encode_from_json(
    ty: &TypeDescriptor,
    json: &serde_json::Value,
    encoding: Encoding,
) -> Result<Vec<u8>> {
    let value = from_json(ty, json)?;
    let bytes = codec::encode(ty, &value).with_context(|| format!("encode {ty}"))?;
    Ok(encoding.present(bytes))
}
