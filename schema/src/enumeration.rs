//! Enum definitions.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};

/// A named enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumMember {
    pub name: String,
    pub value: i32,
}

/// An XDR enum: a closed set of named 32-bit values.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumSchema {
    name: String,
    members: Vec<EnumMember>,
}

impl EnumSchema {
    /// Creates an enum builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> EnumSchemaBuilder {
        EnumSchemaBuilder {
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Returns the enum name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the members in declaration order.
    #[must_use]
    pub fn members(&self) -> &[EnumMember] {
        &self.members
    }

    /// Looks up the value of a member by name.
    #[must_use]
    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.members
            .iter()
            .find(|member| member.name == name)
            .map(|member| member.value)
    }

    /// Looks up the name of a member by value.
    #[must_use]
    pub fn name_of(&self, value: i32) -> Option<&str> {
        self.members
            .iter()
            .find(|member| member.value == value)
            .map(|member| member.name.as_str())
    }

    /// Returns `true` if `value` is a declared member.
    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        self.members.iter().any(|member| member.value == value)
    }

    fn validate(&self) -> SchemaResult<()> {
        let mut names = HashSet::new();
        let mut values = HashSet::new();
        for member in &self.members {
            if !names.insert(member.name.as_str()) {
                return Err(SchemaError::DuplicateEnumMember {
                    enumeration: self.name.clone(),
                    member: member.name.clone(),
                });
            }
            if !values.insert(member.value) {
                return Err(SchemaError::DuplicateEnumValue {
                    enumeration: self.name.clone(),
                    value: member.value,
                });
            }
        }
        Ok(())
    }
}

/// Builder for `EnumSchema`.
#[derive(Debug)]
pub struct EnumSchemaBuilder {
    name: String,
    members: Vec<EnumMember>,
}

impl EnumSchemaBuilder {
    /// Adds a member.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, value: i32) -> Self {
        self.members.push(EnumMember {
            name: name.into(),
            value,
        });
        self
    }

    /// Builds the enum after validation.
    pub fn build(self) -> SchemaResult<EnumSchema> {
        let schema = EnumSchema {
            name: self.name,
            members: self.members,
        };
        schema.validate()?;
        Ok(schema)
    }
}
