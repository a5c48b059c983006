//! Schema validation errors.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building or validating a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Duplicate field name within a struct.
    DuplicateField { structure: String, field: String },

    /// Duplicate arm name within a union.
    DuplicateArm { union: String, arm: String },

    /// The same discriminant value is mapped twice.
    DuplicateCase { union: String, value: i64 },

    /// A case or the default refers to an arm that was never declared.
    UnknownArm { union: String, arm: String },

    /// The discriminant type is not int, unsigned int, bool, or an enum.
    InvalidSwitchType { union: String, found: String },

    /// A case value is outside the discriminant type's domain.
    CaseOutOfRange { union: String, value: i64 },

    /// A symbolic case was used with a non-enum discriminant.
    NamedCaseWithoutEnum { union: String, member: String },

    /// A symbolic name is not a member of the enum.
    UnknownEnumMember { enumeration: String, member: String },

    /// Duplicate member name within an enum.
    DuplicateEnumMember { enumeration: String, member: String },

    /// Duplicate member value within an enum.
    DuplicateEnumValue { enumeration: String, value: i32 },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField { structure, field } => {
                write!(f, "duplicate field {field:?} in struct {structure}")
            }
            Self::DuplicateArm { union, arm } => {
                write!(f, "duplicate arm {arm:?} in union {union}")
            }
            Self::DuplicateCase { union, value } => {
                write!(f, "duplicate case {value} in union {union}")
            }
            Self::UnknownArm { union, arm } => {
                write!(f, "union {union} refers to undeclared arm {arm:?}")
            }
            Self::InvalidSwitchType { union, found } => {
                write!(
                    f,
                    "union {union} cannot switch on {found}; expected int, unsigned int, bool, or enum"
                )
            }
            Self::CaseOutOfRange { union, value } => {
                write!(f, "case {value} is outside the discriminant range of union {union}")
            }
            Self::NamedCaseWithoutEnum { union, member } => {
                write!(f, "named case {member:?} requires an enum discriminant in union {union}")
            }
            Self::UnknownEnumMember {
                enumeration,
                member,
            } => {
                write!(f, "{member:?} is not a member of enum {enumeration}")
            }
            Self::DuplicateEnumMember {
                enumeration,
                member,
            } => {
                write!(f, "duplicate member {member:?} in enum {enumeration}")
            }
            Self::DuplicateEnumValue { enumeration, value } => {
                write!(f, "duplicate value {value} in enum {enumeration}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_duplicate_field() {
        let err = SchemaError::DuplicateField {
            structure: "Point".into(),
            field: "x".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Point"));
        assert!(msg.contains("\"x\""));
    }

    #[test]
    fn error_display_unknown_arm() {
        let err = SchemaError::UnknownArm {
            union: "Result".into(),
            arm: "missing".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Result"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>() {}
        assert_error::<SchemaError>();
    }
}
