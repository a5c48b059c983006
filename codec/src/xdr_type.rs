//! The type-descriptor capability shared by every XDR type.

use schema::TypeDescriptor;
use stream::XdrWriter;

use crate::decoder::Decoder;
use crate::error::{CodecResult, LimitKind};
use crate::limits::CodecLimits;
use crate::primitive::{self, invalid};
use crate::value::Value;

/// Read, write, and validate values of one declared XDR type.
///
/// Implemented for [`TypeDescriptor`] and for the composite schemas, so a
/// struct field or union arm can be any of them and nest arbitrarily.
pub trait XdrType {
    /// Decodes one value from the stream.
    fn read(&self, decoder: &mut Decoder<'_>) -> CodecResult<Value>;

    /// Encodes `value`, failing with `InvalidValue` if it does not conform.
    fn write(&self, value: &Value, writer: &mut XdrWriter) -> CodecResult<()>;

    /// Returns `true` if `value` fully conforms (ranges, lengths, elements).
    fn is_valid(&self, value: &Value) -> bool;
}

/// Encodes a single value to a fresh buffer.
pub fn encode<T: XdrType + ?Sized>(ty: &T, value: &Value) -> CodecResult<Vec<u8>> {
    let mut writer = XdrWriter::new();
    ty.write(value, &mut writer)?;
    Ok(writer.finish())
}

/// Decodes a single value, rejecting trailing bytes.
pub fn decode<T: XdrType + ?Sized>(
    ty: &T,
    bytes: &[u8],
    limits: &CodecLimits,
) -> CodecResult<Value> {
    let mut decoder = Decoder::new(bytes, limits);
    let value = ty.read(&mut decoder)?;
    decoder.finish()?;
    Ok(value)
}

impl XdrType for TypeDescriptor {
    fn read(&self, decoder: &mut Decoder<'_>) -> CodecResult<Value> {
        let value = match self {
            Self::Int => Value::Int(i64::from(decoder.reader().read_i32()?)),
            Self::UInt => Value::UInt(u64::from(decoder.reader().read_u32()?)),
            Self::Hyper => Value::Int(decoder.reader().read_i64()?),
            Self::UHyper => Value::UInt(decoder.reader().read_u64()?),
            Self::Float => Value::Float(f64::from(decoder.reader().read_f32()?)),
            Self::Double => Value::Float(decoder.reader().read_f64()?),
            Self::Quadruple => Value::Quadruple(decoder.reader().read_array::<16>()?),
            Self::Bool => Value::Bool(primitive::read_bool(decoder)?),
            Self::Enum(schema) => Value::Enum(primitive::read_enum(schema, decoder)?),
            Self::String { max } => Value::Text(primitive::read_string(decoder, *max)?),
            Self::Opaque { len } => {
                let len = *len as usize;
                decoder.check_len(LimitKind::OpaqueLength, len)?;
                Value::Opaque(decoder.reader().read_fixed_opaque(len)?.to_vec())
            }
            Self::VarOpaque { max } => {
                Value::Opaque(primitive::read_var_bytes(decoder, *max)?.to_vec())
            }
            Self::Array { element, len } => {
                let count = *len as usize;
                decoder.check_len(LimitKind::ArrayLength, count)?;
                Value::Array(decoder.nested(|d| read_elements(element, count, d))?)
            }
            Self::VarArray { element, max } => {
                let count = primitive::read_length(decoder, *max, LimitKind::ArrayLength)?;
                Value::Array(decoder.nested(|d| read_elements(element, count, d))?)
            }
            Self::Optional(element) => {
                if primitive::read_bool(decoder)? {
                    decoder.nested(|d| element.read(d))?
                } else {
                    Value::Void
                }
            }
            Self::Struct(schema) => schema.read(decoder)?,
            Self::Union(schema) => schema.read(decoder)?,
        };
        Ok(value)
    }

    fn write(&self, value: &Value, writer: &mut XdrWriter) -> CodecResult<()> {
        let mismatch = || invalid(self, value);
        match self {
            Self::Int => writer.write_i32(primitive::int_value(value).ok_or_else(mismatch)?),
            Self::UInt => writer.write_u32(primitive::uint_value(value).ok_or_else(mismatch)?),
            Self::Hyper => writer.write_i64(value.as_i64().ok_or_else(mismatch)?),
            Self::UHyper => writer.write_u64(value.as_u64().ok_or_else(mismatch)?),
            Self::Float => writer.write_f32(primitive::float_value(value).ok_or_else(mismatch)?),
            Self::Double => writer.write_f64(value.as_f64().ok_or_else(mismatch)?),
            Self::Quadruple => match value {
                Value::Quadruple(bytes) => writer.write_array(bytes),
                _ => return Err(mismatch()),
            },
            Self::Bool => writer.write_u32(u32::from(value.as_bool().ok_or_else(mismatch)?)),
            Self::Enum(schema) => {
                writer.write_i32(primitive::enum_value(schema, value).ok_or_else(mismatch)?);
            }
            Self::String { max } => {
                let bytes = primitive::text_bytes(value, *max).ok_or_else(mismatch)?;
                writer.write_var_opaque(bytes)?;
            }
            Self::VarOpaque { max } => {
                let bytes = primitive::bounded_bytes(value, *max).ok_or_else(mismatch)?;
                writer.write_var_opaque(bytes)?;
            }
            Self::Opaque { len } => match value.as_bytes() {
                Some(bytes) if bytes.len() == *len as usize => writer.write_fixed_opaque(bytes),
                _ => return Err(mismatch()),
            },
            Self::Array { element, len } => match value {
                Value::Array(items) if items.len() == *len as usize => {
                    write_elements(element, items, writer)?;
                }
                _ => return Err(mismatch()),
            },
            Self::VarArray { element, max } => match value {
                Value::Array(items) if primitive::within(items.len(), *max) => {
                    writer.write_length(items.len())?;
                    write_elements(element, items, writer)?;
                }
                _ => return Err(mismatch()),
            },
            Self::Optional(element) => {
                if value.is_void() {
                    writer.write_u32(0);
                } else {
                    writer.write_u32(1);
                    element.write(value, writer)?;
                }
            }
            Self::Struct(schema) => schema.write(value, writer)?,
            Self::Union(schema) => schema.write(value, writer)?,
        }
        Ok(())
    }

    fn is_valid(&self, value: &Value) -> bool {
        match self {
            Self::Int => primitive::int_value(value).is_some(),
            Self::UInt => primitive::uint_value(value).is_some(),
            Self::Hyper => value.as_i64().is_some(),
            Self::UHyper => value.as_u64().is_some(),
            Self::Float => primitive::float_value(value).is_some(),
            Self::Double => matches!(value, Value::Float(_)),
            Self::Quadruple => matches!(value, Value::Quadruple(_)),
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::Enum(schema) => primitive::enum_value(schema, value).is_some(),
            Self::String { max } => primitive::text_bytes(value, *max).is_some(),
            Self::VarOpaque { max } => primitive::bounded_bytes(value, *max).is_some(),
            Self::Opaque { len } => value
                .as_bytes()
                .is_some_and(|bytes| bytes.len() == *len as usize),
            Self::Array { element, len } => match value {
                Value::Array(items) => {
                    items.len() == *len as usize && items.iter().all(|item| element.is_valid(item))
                }
                _ => false,
            },
            Self::VarArray { element, max } => match value {
                Value::Array(items) => {
                    primitive::within(items.len(), *max)
                        && items.iter().all(|item| element.is_valid(item))
                }
                _ => false,
            },
            Self::Optional(element) => value.is_void() || element.is_valid(value),
            Self::Struct(schema) => schema.is_valid(value),
            Self::Union(schema) => schema.is_valid(value),
        }
    }
}

fn read_elements(
    element: &TypeDescriptor,
    count: usize,
    decoder: &mut Decoder<'_>,
) -> CodecResult<Vec<Value>> {
    let mut items = Vec::with_capacity(count.min(decoder.remaining()));
    for _ in 0..count {
        items.push(element.read(decoder)?);
    }
    Ok(items)
}

fn write_elements(
    element: &TypeDescriptor,
    items: &[Value],
    writer: &mut XdrWriter,
) -> CodecResult<()> {
    for item in items {
        element.write(item, writer)?;
    }
    Ok(())
}
