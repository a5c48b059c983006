//! Primitive XDR codecs: scalars, strings, opaque data, counts, and void.

use std::fmt;

use schema::EnumSchema;
use stream::{StreamError, XdrWriter};

use crate::decoder::Decoder;
use crate::error::{CodecError, CodecResult, LimitKind};
use crate::value::Value;

pub(crate) fn invalid(expected: &impl fmt::Display, value: &Value) -> CodecError {
    CodecError::InvalidValue {
        expected: expected.to_string(),
        found: value.describe(),
    }
}

pub(crate) fn int_value(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|v| i32::try_from(v).ok())
}

pub(crate) fn uint_value(value: &Value) -> Option<u32> {
    value.as_u64().and_then(|v| u32::try_from(v).ok())
}

pub(crate) fn enum_value(schema: &EnumSchema, value: &Value) -> Option<i32> {
    match value {
        Value::Enum(v) if schema.contains(*v) => Some(*v),
        _ => None,
    }
}

/// Returns the bytes of a string/opaque value if its length is within `max`.
pub(crate) fn bounded_bytes(value: &Value, max: Option<u32>) -> Option<&[u8]> {
    let bytes = value.as_bytes()?;
    let max = max.unwrap_or(u32::MAX);
    u32::try_from(bytes.len())
        .is_ok_and(|len| len <= max)
        .then_some(bytes)
}

/// Returns the bytes of a string value if they are UTF-8 and within `max`.
pub(crate) fn text_bytes(value: &Value, max: Option<u32>) -> Option<&[u8]> {
    bounded_bytes(value, max).filter(|bytes| std::str::from_utf8(bytes).is_ok())
}

/// Returns the value as `f32` if it is exactly representable in single precision.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn float_value(value: &Value) -> Option<f32> {
    let v = value.as_f64()?;
    let narrowed = v as f32;
    (v.is_nan() || f64::from(narrowed) == v).then_some(narrowed)
}

pub(crate) fn within(len: usize, max: Option<u32>) -> bool {
    u32::try_from(len).is_ok_and(|len| len <= max.unwrap_or(u32::MAX))
}

pub(crate) fn read_bool(decoder: &mut Decoder<'_>) -> CodecResult<bool> {
    match decoder.reader().read_u32()? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(CodecError::InvalidBool { value }),
    }
}

pub(crate) fn read_enum(schema: &EnumSchema, decoder: &mut Decoder<'_>) -> CodecResult<i32> {
    let value = decoder.reader().read_i32()?;
    if !schema.contains(value) {
        return Err(CodecError::InvalidEnum {
            enumeration: schema.name().to_string(),
            value,
        });
    }
    Ok(value)
}

/// Reads a length prefix and checks it against the declared bound and the
/// decode limit for `kind`.
pub(crate) fn read_length(
    decoder: &mut Decoder<'_>,
    max: Option<u32>,
    kind: LimitKind,
) -> CodecResult<usize> {
    let length = decoder.reader().read_u32()?;
    let max = max.unwrap_or(u32::MAX);
    if length > max {
        return Err(StreamError::LengthExceeded { length, max }.into());
    }
    let length = length as usize;
    decoder.check_len(kind, length)?;
    Ok(length)
}

pub(crate) fn read_var_bytes<'a>(
    decoder: &mut Decoder<'a>,
    max: Option<u32>,
) -> CodecResult<&'a [u8]> {
    let length = read_length(decoder, max, LimitKind::OpaqueLength)?;
    Ok(decoder.reader().read_fixed_opaque(length)?)
}

pub(crate) fn read_string(decoder: &mut Decoder<'_>, max: Option<u32>) -> CodecResult<String> {
    let start = decoder.reader().position() + stream::UNIT;
    let bytes = read_var_bytes(decoder, max)?;
    String::from_utf8(bytes.to_vec()).map_err(|err| CodecError::InvalidUtf8 {
        position: start + err.utf8_error().valid_up_to(),
    })
}

/// The void codec: zero bytes on the wire, `Value::Void` in memory.
pub(crate) fn read_void() -> Value {
    Value::Void
}

pub(crate) fn write_void(value: &Value, _writer: &mut XdrWriter) -> CodecResult<()> {
    if value.is_void() {
        Ok(())
    } else {
        Err(invalid(&"void", value))
    }
}
