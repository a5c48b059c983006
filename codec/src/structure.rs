//! Struct values and the field-sequencing codec.

use std::sync::Arc;

use schema::StructSchema;
use stream::XdrWriter;

use crate::decoder::Decoder;
use crate::error::{CodecError, CodecResult};
use crate::limits::CodecLimits;
use crate::presentation::Encoding;
use crate::primitive::invalid;
use crate::shape::matches_shape;
use crate::value::Value;
use crate::xdr_type::{self, XdrType};

/// An instance of a struct schema.
///
/// Fields are stored in declaration order. A value may be partially filled
/// while it is being built, but only complete values can be encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct StructValue {
    schema: Arc<StructSchema>,
    fields: Vec<Option<Value>>,
}

impl StructValue {
    /// Creates an empty instance of `schema`.
    #[must_use]
    pub fn new(schema: Arc<StructSchema>) -> Self {
        let fields = vec![None; schema.fields().len()];
        Self { schema, fields }
    }

    /// Sets a field and returns the instance, for chained construction.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> CodecResult<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Sets a field after checking the value's shape against the field type.
    ///
    /// On error the instance is left unchanged.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> CodecResult<()> {
        let index = self
            .schema
            .field_index(name)
            .ok_or_else(|| CodecError::UnknownField {
                structure: self.schema.name().to_string(),
                field: name.to_string(),
            })?;
        let value = value.into();
        let ty = &self.schema.fields()[index].ty;
        if !matches_shape(Some(ty), &value) {
            return Err(invalid(ty, &value));
        }
        self.fields[index] = Some(value);
        Ok(())
    }

    /// Returns the value of a field, if set.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.schema.field_index(name)?;
        self.fields[index].as_ref()
    }

    /// Iterates `(field name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.schema
            .fields()
            .iter()
            .zip(&self.fields)
            .map(|(def, value)| (def.name.as_str(), value.as_ref()))
    }

    /// Returns `true` if every declared field has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(Option::is_some)
    }

    /// Returns the names of fields that have no value yet.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<StructSchema> {
        &self.schema
    }

    /// Returns `true` if this value is an instance of `schema`.
    #[must_use]
    pub fn is_kind(&self, schema: &Arc<StructSchema>) -> bool {
        Arc::ptr_eq(&self.schema, schema) || *self.schema == **schema
    }

    /// Encodes this instance.
    pub fn to_xdr(&self) -> CodecResult<Vec<u8>> {
        let mut writer = XdrWriter::new();
        write_fields(self, &mut writer)?;
        Ok(writer.finish())
    }

    /// Encodes this instance and presents the bytes as `raw`, `hex`, or `base64`.
    ///
    /// The mode is checked before any encoding happens.
    pub fn to_xdr_as(&self, mode: &str) -> CodecResult<Vec<u8>> {
        let encoding: Encoding = mode.parse()?;
        Ok(encoding.present(self.to_xdr()?))
    }

    /// Decodes an instance of `schema`, rejecting trailing bytes.
    pub fn from_xdr(
        schema: &Arc<StructSchema>,
        bytes: &[u8],
        limits: &CodecLimits,
    ) -> CodecResult<Self> {
        match xdr_type::decode(schema, bytes, limits)? {
            Value::Struct(value) => Ok(value),
            other => Err(invalid(&format!("struct {}", schema.name()), &other)),
        }
    }
}

fn write_fields(value: &StructValue, writer: &mut XdrWriter) -> CodecResult<()> {
    for (def, field) in value.schema.fields().iter().zip(&value.fields) {
        let field = field.as_ref().ok_or_else(|| CodecError::MissingField {
            structure: value.schema.name().to_string(),
            field: def.name.clone(),
        })?;
        def.ty.write(field, writer)?;
    }
    Ok(())
}

impl XdrType for Arc<StructSchema> {
    fn read(&self, decoder: &mut Decoder<'_>) -> CodecResult<Value> {
        decoder.nested(|decoder| {
            let fields = self
                .fields()
                .iter()
                .map(|def| def.ty.read(decoder).map(Some))
                .collect::<CodecResult<Vec<_>>>()?;
            Ok(Value::Struct(StructValue {
                schema: Arc::clone(self),
                fields,
            }))
        })
    }

    fn write(&self, value: &Value, writer: &mut XdrWriter) -> CodecResult<()> {
        match value.as_struct() {
            Some(instance) if instance.is_kind(self) => write_fields(instance, writer),
            _ => Err(invalid(&format!("struct {}", self.name()), value)),
        }
    }

    fn is_valid(&self, value: &Value) -> bool {
        value.as_struct().is_some_and(|instance| {
            instance.is_kind(self)
                && self
                    .fields()
                    .iter()
                    .zip(&instance.fields)
                    .all(|(def, field)| field.as_ref().is_some_and(|v| def.ty.is_valid(v)))
        })
    }
}
