//! Struct definitions.

use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};
use crate::TypeDescriptor;

/// Field definition within a struct.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: TypeDescriptor,
}

impl FieldDef {
    /// Creates a field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// A struct schema: named fields in wire order.
///
/// Declaration order is the encoding order; it is never sorted.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StructSchema {
    name: String,
    fields: Vec<FieldDef>,
}

impl StructSchema {
    /// Creates a struct from fields after validation.
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> SchemaResult<Self> {
        let schema = Self {
            name: name.into(),
            fields,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// Creates a struct builder.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> StructSchemaBuilder {
        StructSchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Returns the struct name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the fields in wire order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Returns the position of a field by name.
    #[must_use]
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Returns a field definition by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    fn validate(&self) -> SchemaResult<()> {
        let mut names = HashSet::new();
        for field in &self.fields {
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    structure: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Builder for `StructSchema`.
#[derive(Debug)]
pub struct StructSchemaBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl StructSchemaBuilder {
    /// Appends a field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, ty: TypeDescriptor) -> Self {
        self.fields.push(FieldDef::new(name, ty));
        self
    }

    /// Builds the struct after validation.
    pub fn build(self) -> SchemaResult<StructSchema> {
        StructSchema::new(self.name, self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_field_order() {
        let schema = StructSchema::builder("Point")
            .field("y", TypeDescriptor::Int)
            .field("x", TypeDescriptor::Int)
            .build()
            .unwrap();
        let names: Vec<_> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["y", "x"]);
        assert_eq!(schema.field_index("x"), Some(1));
        assert_eq!(schema.field("y").map(|f| &f.ty), Some(&TypeDescriptor::Int));
        assert!(schema.field("z").is_none());
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let err = StructSchema::builder("Point")
            .field("x", TypeDescriptor::Int)
            .field("x", TypeDescriptor::Hyper)
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                structure: "Point".into(),
                field: "x".into()
            }
        );
    }

    #[test]
    fn empty_struct_is_valid() {
        let schema = StructSchema::new("Empty", Vec::new()).unwrap();
        assert!(schema.fields().is_empty());
    }
}
