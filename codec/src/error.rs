//! Error types for codec operations.

use std::fmt;

use stream::StreamError;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding, decoding, or building values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Byte stream error (truncation, bad padding, oversized length).
    Stream(StreamError),

    /// Discriminant has no mapped arm and the union has no default arm,
    /// or lies outside the discriminant type's domain.
    InvalidSwitch { union: String, switch: i64 },

    /// Symbolic discriminant name could not be resolved.
    UnknownSwitchName { union: String, name: String },

    /// Value does not conform to the declared type.
    InvalidValue { expected: String, found: String },

    /// Guarded accessor used with an arm that is not active.
    ArmNotSet {
        union: String,
        requested: String,
        active: Option<String>,
    },

    /// Struct instance lacks a value for a declared field.
    MissingField { structure: String, field: String },

    /// Field name is not declared by the struct.
    UnknownField { structure: String, field: String },

    /// Union instance has never been set.
    UnionNotSet { union: String },

    /// Boolean (or optional marker) was neither 0 nor 1.
    InvalidBool { value: u32 },

    /// Enum value is not a declared member.
    InvalidEnum { enumeration: String, value: i32 },

    /// String bytes are not valid UTF-8.
    InvalidUtf8 { position: usize },

    /// Decode limits exceeded.
    LimitsExceeded {
        kind: LimitKind,
        limit: usize,
        actual: usize,
    },

    /// Bytes left over after the top-level value was decoded.
    TrailingBytes { remaining: usize },

    /// Presentation mode is not `raw`, `hex`, or `base64`.
    InvalidEncoding { mode: String },

    /// Presented text could not be turned back into raw bytes.
    InvalidPresentation { encoding: &'static str, reason: String },
}

/// Specific decode limit that was exceeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    Depth,
    OpaqueLength,
    ArrayLength,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(e) => write!(f, "stream error: {e}"),
            Self::InvalidSwitch { union, switch } => {
                write!(f, "bad switch {switch} for union {union}")
            }
            Self::UnknownSwitchName { union, name } => {
                write!(f, "unknown switch name {name:?} for union {union}")
            }
            Self::InvalidValue { expected, found } => {
                write!(f, "invalid value: expected {expected}, found {found}")
            }
            Self::ArmNotSet {
                union,
                requested,
                active,
            } => match active {
                Some(active) => write!(
                    f,
                    "{requested} is not the set arm of union {union} (active arm is {active})"
                ),
                None => write!(f, "{requested} is not the set arm of union {union} (unset)"),
            },
            Self::MissingField { structure, field } => {
                write!(f, "struct {structure} is missing field {field:?}")
            }
            Self::UnknownField { structure, field } => {
                write!(f, "struct {structure} has no field {field:?}")
            }
            Self::UnionNotSet { union } => {
                write!(f, "union {union} has no arm set")
            }
            Self::InvalidBool { value } => {
                write!(f, "invalid bool value {value}, expected 0 or 1")
            }
            Self::InvalidEnum { enumeration, value } => {
                write!(f, "{value} is not a member of enum {enumeration}")
            }
            Self::InvalidUtf8 { position } => {
                write!(f, "string is not valid UTF-8 at byte {position}")
            }
            Self::LimitsExceeded {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} limit exceeded: {actual} > {limit}")
            }
            Self::TrailingBytes { remaining } => {
                write!(f, "{remaining} trailing bytes after value")
            }
            Self::InvalidEncoding { mode } => {
                write!(
                    f,
                    "invalid encoding {mode:?}; must be raw, hex, or base64"
                )
            }
            Self::InvalidPresentation { encoding, reason } => {
                write!(f, "invalid {encoding} input: {reason}")
            }
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Depth => "nesting depth",
            Self::OpaqueLength => "opaque length",
            Self::ArrayLength => "array length",
        };
        write!(f, "{name}")
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Stream(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StreamError> for CodecError {
    fn from(err: StreamError) -> Self {
        Self::Stream(err)
    }
}
