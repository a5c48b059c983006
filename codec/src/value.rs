//! In-memory values for XDR data.

use crate::structure::StructValue;
use crate::union::UnionValue;

/// A decoded (or to-be-encoded) XDR value.
///
/// Optional values are either [`Value::Void`] (absent) or the present inner
/// value; there is no separate wrapper.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Void marker: void arms and absent optionals.
    Void,
    Bool(bool),
    /// Signed integers (int, hyper).
    Int(i64),
    /// Unsigned integers (unsigned int, unsigned hyper).
    UInt(u64),
    /// Float and double.
    Float(f64),
    /// Quadruple-precision float as raw big-endian bytes.
    Quadruple([u8; 16]),
    /// Enum member value.
    Enum(i32),
    Text(String),
    Opaque(Vec<u8>),
    Array(Vec<Value>),
    Struct(StructValue),
    Union(Box<UnionValue>),
}

impl Value {
    /// Returns `true` for the void marker.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Returns the integer as `i64` if it fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Returns the integer as `u64` if it fits.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Int(v) => u64::try_from(*v).ok(),
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the bytes of a string or opaque value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Text(text) => Some(text.as_bytes()),
            Self::Opaque(bytes) => Some(bytes),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_union(&self) -> Option<&UnionValue> {
        match self {
            Self::Union(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the discriminant carried by an int, unsigned int, bool, or enum value.
    #[must_use]
    pub fn as_discriminant(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::UInt(v) => i64::try_from(*v).ok(),
            Self::Bool(v) => Some(i64::from(*v)),
            Self::Enum(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    /// Short human-readable description used in error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Void => "void".to_string(),
            Self::Bool(v) => format!("bool {v}"),
            Self::Int(v) => format!("int {v}"),
            Self::UInt(v) => format!("unsigned int {v}"),
            Self::Float(v) => format!("float {v}"),
            Self::Quadruple(_) => "quadruple".to_string(),
            Self::Enum(v) => format!("enum value {v}"),
            Self::Text(text) => format!("string of {} bytes", text.len()),
            Self::Opaque(bytes) => format!("opaque of {} bytes", bytes.len()),
            Self::Array(items) => format!("array of {} elements", items.len()),
            Self::Struct(value) => format!("struct {}", value.schema().name()),
            Self::Union(value) => format!("union {}", value.schema().name()),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::UInt(u64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Opaque(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<StructValue> for Value {
    fn from(value: StructValue) -> Self {
        Self::Struct(value)
    }
}

impl From<UnionValue> for Value {
    fn from(value: UnionValue) -> Self {
        Self::Union(Box::new(value))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Void, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_accessors_cross_signedness() {
        assert_eq!(Value::UInt(7).as_i64(), Some(7));
        assert_eq!(Value::UInt(u64::MAX).as_i64(), None);
        assert_eq!(Value::Int(-1).as_u64(), None);
        assert_eq!(Value::Int(3).as_u64(), Some(3));
        assert_eq!(Value::Float(1.0).as_i64(), None);
    }

    #[test]
    fn bytes_accessor_covers_text_and_opaque() {
        assert_eq!(Value::from("ab").as_bytes(), Some(&b"ab"[..]));
        assert_eq!(Value::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
        assert_eq!(Value::Int(1).as_bytes(), None);
    }

    #[test]
    fn discriminant_sources() {
        assert_eq!(Value::Int(-4).as_discriminant(), Some(-4));
        assert_eq!(Value::Bool(true).as_discriminant(), Some(1));
        assert_eq!(Value::Enum(9).as_discriminant(), Some(9));
        assert_eq!(Value::Void.as_discriminant(), None);
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(None::<i32>), Value::Void);
        assert_eq!(Value::from(Some(5i32)), Value::Int(5));
    }

    #[test]
    fn describe_mentions_sizes() {
        assert_eq!(Value::from("abc").describe(), "string of 3 bytes");
        assert_eq!(
            Value::Array(vec![Value::Void, Value::Void]).describe(),
            "array of 2 elements"
        );
    }
}
