//! Shape validation for union arm payloads.

use schema::{TypeCategory, TypeDescriptor};

use crate::value::Value;

/// Returns `true` if `value` has the shape declared by an arm type.
///
/// `None` is a void arm and only accepts [`Value::Void`]. Only the runtime
/// category is checked; lengths and element types are left to the type's own
/// codec. Optionals recurse into their element type, and struct/union arms
/// require a value of exactly that schema.
#[must_use]
pub fn matches_shape(ty: Option<&TypeDescriptor>, value: &Value) -> bool {
    let Some(ty) = ty else {
        return value.is_void();
    };
    match ty.category() {
        TypeCategory::Integer => matches!(value, Value::Int(_) | Value::UInt(_)),
        TypeCategory::Float => match ty {
            TypeDescriptor::Quadruple => matches!(value, Value::Quadruple(_)),
            _ => matches!(value, Value::Float(_)),
        },
        TypeCategory::Bool => matches!(value, Value::Bool(_)),
        TypeCategory::Enum(schema) => matches!(value, Value::Enum(v) if schema.contains(*v)),
        TypeCategory::Bytes => matches!(value, Value::Text(_) | Value::Opaque(_)),
        TypeCategory::Sequence => matches!(value, Value::Array(_)),
        TypeCategory::Optional(element) => value.is_void() || matches_shape(Some(element), value),
        TypeCategory::Struct(schema) => value.as_struct().is_some_and(|s| s.is_kind(schema)),
        TypeCategory::Union(schema) => value.as_union().is_some_and(|u| u.is_kind(schema)),
    }
}
