//! Discriminated union definitions.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::TypeDescriptor;

/// One arm of a union: a name and its payload type (`None` for void).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ArmDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: Option<TypeDescriptor>,
}

/// A discriminant value mapped to an arm.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnionCase {
    pub value: i64,
    pub arm: String,
}

/// A union schema.
///
/// Invariant (checked by [`UnionSchemaBuilder::build`]): every arm named by a
/// case or by the default is declared in `arms`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UnionSchema {
    name: String,
    switch_name: String,
    switch_type: TypeDescriptor,
    cases: Vec<UnionCase>,
    default_arm: Option<String>,
    arms: Vec<ArmDef>,
}

impl UnionSchema {
    /// Creates a union builder.
    #[must_use]
    pub fn builder(
        name: impl Into<String>,
        switch_name: impl Into<String>,
        switch_type: TypeDescriptor,
    ) -> UnionSchemaBuilder {
        UnionSchemaBuilder {
            name: name.into(),
            switch_name: switch_name.into(),
            switch_type,
            cases: Vec::new(),
            default_arm: None,
            arms: Vec::new(),
        }
    }

    /// Returns the union name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the discriminant field name.
    #[must_use]
    pub fn switch_name(&self) -> &str {
        &self.switch_name
    }

    /// Returns the discriminant type.
    #[must_use]
    pub fn switch_type(&self) -> &TypeDescriptor {
        &self.switch_type
    }

    /// Returns the explicit cases in declaration order.
    #[must_use]
    pub fn cases(&self) -> &[UnionCase] {
        &self.cases
    }

    /// Returns the default arm, if any.
    #[must_use]
    pub fn default_arm(&self) -> Option<&str> {
        self.default_arm.as_deref()
    }

    /// Returns the arms in declaration order.
    #[must_use]
    pub fn arms(&self) -> &[ArmDef] {
        &self.arms
    }

    /// Returns the arm explicitly mapped to `value`, ignoring the default.
    #[must_use]
    pub fn case_arm(&self, value: i64) -> Option<&str> {
        self.cases
            .iter()
            .find(|case| case.value == value)
            .map(|case| case.arm.as_str())
    }

    /// Returns the arm definition by name.
    #[must_use]
    pub fn arm(&self, name: &str) -> Option<&ArmDef> {
        self.arms.iter().find(|arm| arm.name == name)
    }

    /// Returns the payload type of an arm; `Some(None)` marks a void arm.
    #[must_use]
    pub fn arm_type(&self, name: &str) -> Option<Option<&TypeDescriptor>> {
        self.arm(name).map(|arm| arm.ty.as_ref())
    }

    fn validate(&self) -> SchemaResult<()> {
        if !self.switch_type.is_switch_type() {
            return Err(SchemaError::InvalidSwitchType {
                union: self.name.clone(),
                found: self.switch_type.to_string(),
            });
        }

        let mut arm_names = HashSet::new();
        for arm in &self.arms {
            if !arm_names.insert(arm.name.as_str()) {
                return Err(SchemaError::DuplicateArm {
                    union: self.name.clone(),
                    arm: arm.name.clone(),
                });
            }
        }

        let mut values = HashSet::new();
        for case in &self.cases {
            if !self.switch_type.accepts_discriminant(case.value) {
                return Err(SchemaError::CaseOutOfRange {
                    union: self.name.clone(),
                    value: case.value,
                });
            }
            if !values.insert(case.value) {
                return Err(SchemaError::DuplicateCase {
                    union: self.name.clone(),
                    value: case.value,
                });
            }
            self.ensure_arm(&arm_names, &case.arm)?;
        }

        if let Some(default_arm) = &self.default_arm {
            self.ensure_arm(&arm_names, default_arm)?;
        }
        Ok(())
    }

    fn ensure_arm(&self, arm_names: &HashSet<&str>, arm: &str) -> SchemaResult<()> {
        if arm_names.contains(arm) {
            Ok(())
        } else {
            Err(SchemaError::UnknownArm {
                union: self.name.clone(),
                arm: arm.to_string(),
            })
        }
    }
}

#[derive(Debug)]
enum CaseKey {
    Raw(i64),
    Named(String),
}

/// Builder for `UnionSchema`.
#[derive(Debug)]
pub struct UnionSchemaBuilder {
    name: String,
    switch_name: String,
    switch_type: TypeDescriptor,
    cases: Vec<(CaseKey, String)>,
    default_arm: Option<String>,
    arms: Vec<ArmDef>,
}

impl UnionSchemaBuilder {
    /// Maps a raw discriminant value to an arm.
    #[must_use]
    pub fn case(mut self, value: i64, arm: impl Into<String>) -> Self {
        self.cases.push((CaseKey::Raw(value), arm.into()));
        self
    }

    /// Maps an enum member (by name) to an arm.
    #[must_use]
    pub fn case_named(mut self, member: impl Into<String>, arm: impl Into<String>) -> Self {
        self.cases.push((CaseKey::Named(member.into()), arm.into()));
        self
    }

    /// Declares an arm with a payload.
    #[must_use]
    pub fn arm(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.arms.push(ArmDef {
            name: name.into(),
            ty: Some(ty),
        });
        self
    }

    /// Declares an arm with no payload.
    #[must_use]
    pub fn void_arm(mut self, name: impl Into<String>) -> Self {
        self.arms.push(ArmDef {
            name: name.into(),
            ty: None,
        });
        self
    }

    /// Sets the arm used when no case matches.
    #[must_use]
    pub fn default_arm(mut self, name: impl Into<String>) -> Self {
        self.default_arm = Some(name.into());
        self
    }

    /// Builds the union after resolving named cases and validating.
    pub fn build(self) -> SchemaResult<UnionSchema> {
        let mut cases = Vec::with_capacity(self.cases.len());
        for (key, arm) in self.cases {
            let value = match key {
                CaseKey::Raw(value) => value,
                CaseKey::Named(member) => resolve_member(&self.name, &self.switch_type, member)?,
            };
            cases.push(UnionCase { value, arm });
        }

        let schema = UnionSchema {
            name: self.name,
            switch_name: self.switch_name,
            switch_type: self.switch_type,
            cases,
            default_arm: self.default_arm,
            arms: self.arms,
        };
        schema.validate()?;
        Ok(schema)
    }
}

fn resolve_member(union: &str, switch_type: &TypeDescriptor, member: String) -> SchemaResult<i64> {
    let TypeDescriptor::Enum(schema) = switch_type else {
        return Err(SchemaError::NamedCaseWithoutEnum {
            union: union.to_string(),
            member,
        });
    };
    schema
        .value_of(&member)
        .map(i64::from)
        .ok_or_else(|| SchemaError::UnknownEnumMember {
            enumeration: schema.name().to_string(),
            member,
        })
}
