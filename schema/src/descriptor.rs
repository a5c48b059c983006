//! Type descriptors and their validation categories.

use std::fmt;
use std::sync::Arc;

use crate::{EnumSchema, StructSchema, UnionSchema};

/// Declared XDR type of a struct field, union arm, or element.
///
/// Descriptors are immutable once built; composite kinds are shared via `Arc`
/// so a schema tree can be referenced from many places without copying.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TypeDescriptor {
    /// Signed 32-bit integer.
    Int,
    /// Unsigned 32-bit integer.
    #[cfg_attr(feature = "serde", serde(rename = "unsigned_int"))]
    UInt,
    /// Signed 64-bit integer.
    Hyper,
    /// Unsigned 64-bit integer.
    #[cfg_attr(feature = "serde", serde(rename = "unsigned_hyper"))]
    UHyper,
    /// IEEE-754 single-precision float.
    Float,
    /// IEEE-754 double-precision float.
    Double,
    /// IEEE-754 quadruple-precision float, carried as raw bytes.
    Quadruple,
    /// Boolean (encoded as an int of 0 or 1).
    Bool,
    /// Enumeration with named members.
    Enum(Arc<EnumSchema>),
    /// ASCII string with an optional maximum length.
    String { max: Option<u32> },
    /// Fixed-length opaque data.
    Opaque { len: u32 },
    /// Variable-length opaque data with an optional maximum length.
    VarOpaque { max: Option<u32> },
    /// Fixed-length array.
    Array {
        element: Box<TypeDescriptor>,
        len: u32,
    },
    /// Variable-length array with an optional maximum element count.
    VarArray {
        element: Box<TypeDescriptor>,
        max: Option<u32>,
    },
    /// Optional value (XDR `*T`).
    Optional(Box<TypeDescriptor>),
    /// Nested struct.
    Struct(Arc<StructSchema>),
    /// Nested discriminated union.
    Union(Arc<UnionSchema>),
}

/// Validation category of a type descriptor.
///
/// Shape validation dispatches on this enum, so every descriptor maps to
/// exactly one category and adding a descriptor forces the match to be updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeCategory<'a> {
    /// int, unsigned int, hyper, unsigned hyper.
    Integer,
    /// float, double, quadruple.
    Float,
    /// bool.
    Bool,
    /// enum; values must be declared members.
    Enum(&'a Arc<EnumSchema>),
    /// string, opaque, variable-length opaque.
    Bytes,
    /// Fixed or variable-length array.
    Sequence,
    /// Optional of the inner descriptor.
    Optional(&'a TypeDescriptor),
    /// Struct of exactly this kind.
    Struct(&'a Arc<StructSchema>),
    /// Union of exactly this kind.
    Union(&'a Arc<UnionSchema>),
}

impl TypeDescriptor {
    /// Creates a string descriptor.
    #[must_use]
    pub const fn string(max: Option<u32>) -> Self {
        Self::String { max }
    }

    /// Creates a fixed-length opaque descriptor.
    #[must_use]
    pub const fn opaque(len: u32) -> Self {
        Self::Opaque { len }
    }

    /// Creates a variable-length opaque descriptor.
    #[must_use]
    pub const fn var_opaque(max: Option<u32>) -> Self {
        Self::VarOpaque { max }
    }

    /// Creates a fixed-length array descriptor.
    #[must_use]
    pub fn array(element: TypeDescriptor, len: u32) -> Self {
        Self::Array {
            element: Box::new(element),
            len,
        }
    }

    /// Creates a variable-length array descriptor.
    #[must_use]
    pub fn var_array(element: TypeDescriptor, max: Option<u32>) -> Self {
        Self::VarArray {
            element: Box::new(element),
            max,
        }
    }

    /// Creates an optional descriptor.
    #[must_use]
    pub fn optional(element: TypeDescriptor) -> Self {
        Self::Optional(Box::new(element))
    }

    /// Returns the validation category of this descriptor.
    #[must_use]
    pub fn category(&self) -> TypeCategory<'_> {
        match self {
            Self::Int | Self::UInt | Self::Hyper | Self::UHyper => TypeCategory::Integer,
            Self::Float | Self::Double | Self::Quadruple => TypeCategory::Float,
            Self::Bool => TypeCategory::Bool,
            Self::Enum(schema) => TypeCategory::Enum(schema),
            Self::String { .. } | Self::Opaque { .. } | Self::VarOpaque { .. } => {
                TypeCategory::Bytes
            }
            Self::Array { .. } | Self::VarArray { .. } => TypeCategory::Sequence,
            Self::Optional(inner) => TypeCategory::Optional(inner),
            Self::Struct(schema) => TypeCategory::Struct(schema),
            Self::Union(schema) => TypeCategory::Union(schema),
        }
    }

    /// Returns `true` if a union may use this descriptor as its discriminant.
    #[must_use]
    pub const fn is_switch_type(&self) -> bool {
        matches!(self, Self::Int | Self::UInt | Self::Bool | Self::Enum(_))
    }

    /// Returns `true` if `value` is inside the discriminant domain of this type.
    ///
    /// Always `false` for descriptors that cannot be discriminants.
    #[must_use]
    pub fn accepts_discriminant(&self, value: i64) -> bool {
        match self {
            Self::Int => i32::try_from(value).is_ok(),
            Self::UInt => u32::try_from(value).is_ok(),
            Self::Bool => value == 0 || value == 1,
            Self::Enum(schema) => i32::try_from(value).is_ok_and(|v| schema.contains(v)),
            _ => false,
        }
    }
}

impl From<StructSchema> for TypeDescriptor {
    fn from(schema: StructSchema) -> Self {
        Self::Struct(Arc::new(schema))
    }
}

impl From<Arc<StructSchema>> for TypeDescriptor {
    fn from(schema: Arc<StructSchema>) -> Self {
        Self::Struct(schema)
    }
}

impl From<UnionSchema> for TypeDescriptor {
    fn from(schema: UnionSchema) -> Self {
        Self::Union(Arc::new(schema))
    }
}

impl From<Arc<UnionSchema>> for TypeDescriptor {
    fn from(schema: Arc<UnionSchema>) -> Self {
        Self::Union(schema)
    }
}

impl From<EnumSchema> for TypeDescriptor {
    fn from(schema: EnumSchema) -> Self {
        Self::Enum(Arc::new(schema))
    }
}

impl From<Arc<EnumSchema>> for TypeDescriptor {
    fn from(schema: Arc<EnumSchema>) -> Self {
        Self::Enum(schema)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::UInt => write!(f, "unsigned int"),
            Self::Hyper => write!(f, "hyper"),
            Self::UHyper => write!(f, "unsigned hyper"),
            Self::Float => write!(f, "float"),
            Self::Double => write!(f, "double"),
            Self::Quadruple => write!(f, "quadruple"),
            Self::Bool => write!(f, "bool"),
            Self::Enum(schema) => write!(f, "enum {}", schema.name()),
            Self::String { max: Some(max) } => write!(f, "string<{max}>"),
            Self::String { max: None } => write!(f, "string<>"),
            Self::Opaque { len } => write!(f, "opaque[{len}]"),
            Self::VarOpaque { max: Some(max) } => write!(f, "opaque<{max}>"),
            Self::VarOpaque { max: None } => write!(f, "opaque<>"),
            Self::Array { element, len } => write!(f, "{element}[{len}]"),
            Self::VarArray {
                element,
                max: Some(max),
            } => write!(f, "{element}<{max}>"),
            Self::VarArray { element, max: None } => write!(f, "{element}<>"),
            Self::Optional(element) => write!(f, "{element}*"),
            Self::Struct(schema) => write!(f, "struct {}", schema.name()),
            Self::Union(schema) => write!(f, "union {}", schema.name()),
        }
    }
}
