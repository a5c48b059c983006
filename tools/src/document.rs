//! JSON schema documents.
//!
//! A document is a list of enum, struct, and union definitions resolved in
//! order; a definition may only refer to primitives and earlier definitions.
//!
//! ```json
//! { "types": [
//!   { "kind": "enum", "name": "Color", "members": [{ "name": "RED", "value": 0 }] },
//!   { "kind": "struct", "name": "Pixel", "fields": [
//!       { "name": "x", "type": "unsigned int" },
//!       { "name": "tag", "type": { "string": 16 } } ] },
//!   { "kind": "union", "name": "Paint", "switch": { "name": "color", "type": "Color" },
//!     "cases": [{ "member": "RED", "arm": "pixel" }],
//!     "arms": [{ "name": "pixel", "type": "Pixel" }, { "name": "none" }],
//!     "default": "none" }
//! ] }
//! ```

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use schema::{EnumSchema, FieldDef, StructSchema, TypeDescriptor, UnionSchema};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    pub types: Vec<TypeDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeDef {
    Enum {
        name: String,
        members: Vec<MemberDef>,
    },
    Struct {
        name: String,
        fields: Vec<FieldRef>,
    },
    Union {
        name: String,
        switch: FieldRef,
        #[serde(default)]
        cases: Vec<CaseDef>,
        arms: Vec<ArmRef>,
        #[serde(default)]
        default: Option<String>,
    },
}

impl TypeDef {
    pub fn name(&self) -> &str {
        match self {
            Self::Enum { name, .. } | Self::Struct { name, .. } | Self::Union { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemberDef {
    pub name: String,
    pub value: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldRef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CaseDef {
    Value { value: i64, arm: String },
    Member { member: String, arm: String },
}

/// Union arm; a missing `type` declares a void arm.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArmRef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<TypeRef>,
}

/// A reference to a type: a primitive or declared name, or a parameterized type.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Named(String),
    Param(ParamRef),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamRef {
    String(Option<u32>),
    Opaque(u32),
    VarOpaque(Option<u32>),
    Array { of: Box<TypeRef>, len: u32 },
    VarArray { of: Box<TypeRef>, max: Option<u32> },
    Optional(Box<TypeRef>),
}

/// Types declared by a document, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<(String, TypeDescriptor)>,
}

impl TypeRegistry {
    /// Looks up a declared type by name.
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types
            .iter()
            .find(|(declared, _)| declared == name)
            .map(|(_, ty)| ty)
    }

    /// Looks up a declared type, failing with the list of known names.
    pub fn require(&self, name: &str) -> Result<&TypeDescriptor> {
        self.get(name).with_context(|| {
            let known: Vec<&str> = self.names().collect();
            format!("unknown type {name:?} (declared: {})", known.join(", "))
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDescriptor)> {
        self.types.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Resolves a type reference against primitives and declared types.
    pub fn resolve(&self, ty: &TypeRef) -> Result<TypeDescriptor> {
        match ty {
            TypeRef::Named(name) => self.resolve_name(name),
            TypeRef::Param(param) => Ok(match param {
                ParamRef::String(max) => TypeDescriptor::string(*max),
                ParamRef::Opaque(len) => TypeDescriptor::opaque(*len),
                ParamRef::VarOpaque(max) => TypeDescriptor::var_opaque(*max),
                ParamRef::Array { of, len } => TypeDescriptor::array(self.resolve(of)?, *len),
                ParamRef::VarArray { of, max } => {
                    TypeDescriptor::var_array(self.resolve(of)?, *max)
                }
                ParamRef::Optional(of) => TypeDescriptor::optional(self.resolve(of)?),
            }),
        }
    }

    fn resolve_name(&self, name: &str) -> Result<TypeDescriptor> {
        let ty = match name {
            "int" => TypeDescriptor::Int,
            "unsigned int" => TypeDescriptor::UInt,
            "hyper" => TypeDescriptor::Hyper,
            "unsigned hyper" => TypeDescriptor::UHyper,
            "float" => TypeDescriptor::Float,
            "double" => TypeDescriptor::Double,
            "quadruple" => TypeDescriptor::Quadruple,
            "bool" => TypeDescriptor::Bool,
            "string" => TypeDescriptor::string(None),
            "opaque" => TypeDescriptor::var_opaque(None),
            _ => return self.require(name).cloned(),
        };
        Ok(ty)
    }

    fn declare(&mut self, name: &str, ty: TypeDescriptor) -> Result<()> {
        if self.get(name).is_some() {
            bail!("type {name:?} is declared twice");
        }
        self.types.push((name.to_string(), ty));
        Ok(())
    }
}

impl SchemaDocument {
    /// Parses a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("parse schema document")
    }

    /// Builds every definition in order.
    pub fn resolve(&self) -> Result<TypeRegistry> {
        let mut registry = TypeRegistry::default();
        for def in &self.types {
            let ty = build(&registry, def).with_context(|| format!("type {:?}", def.name()))?;
            log::debug!("declared {} as {ty}", def.name());
            registry.declare(def.name(), ty)?;
        }
        Ok(registry)
    }
}

fn build(registry: &TypeRegistry, def: &TypeDef) -> Result<TypeDescriptor> {
    let ty = match def {
        TypeDef::Enum { name, members } => {
            let schema = members
                .iter()
                .fold(EnumSchema::builder(name.as_str()), |builder, member| {
                    builder.member(member.name.as_str(), member.value)
                })
                .build()?;
            TypeDescriptor::from(Arc::new(schema))
        }
        TypeDef::Struct { name, fields } => {
            let fields = fields
                .iter()
                .map(|field| {
                    let ty = registry
                        .resolve(&field.ty)
                        .with_context(|| format!("field {:?}", field.name))?;
                    Ok(FieldDef::new(field.name.as_str(), ty))
                })
                .collect::<Result<Vec<_>>>()?;
            TypeDescriptor::from(Arc::new(StructSchema::new(name.as_str(), fields)?))
        }
        TypeDef::Union {
            name,
            switch,
            cases,
            arms,
            default,
        } => {
            let switch_type = registry.resolve(&switch.ty).context("switch type")?;
            let mut builder = UnionSchema::builder(name.as_str(), switch.name.as_str(), switch_type);
            for case in cases {
                builder = match case {
                    CaseDef::Value { value, arm } => builder.case(*value, arm.as_str()),
                    CaseDef::Member { member, arm } => {
                        builder.case_named(member.as_str(), arm.as_str())
                    }
                };
            }
            for arm in arms {
                builder = match &arm.ty {
                    Some(ty) => builder.arm(
                        arm.name.as_str(),
                        registry
                            .resolve(ty)
                            .with_context(|| format!("arm {:?}", arm.name))?,
                    ),
                    None => builder.void_arm(arm.name.as_str()),
                };
            }
            if let Some(default) = default {
                builder = builder.default_arm(default.as_str());
            }
            TypeDescriptor::from(Arc::new(builder.build()?))
        }
    };
    Ok(ty)
}
