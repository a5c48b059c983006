//! Union values and the arm-dispatching codec.

use std::sync::Arc;

use log::{debug, trace};
use schema::{TypeDescriptor, UnionSchema};
use stream::XdrWriter;

use crate::decoder::Decoder;
use crate::error::{CodecError, CodecResult};
use crate::limits::CodecLimits;
use crate::presentation::Encoding;
use crate::primitive::{self, invalid};
use crate::shape::matches_shape;
use crate::value::Value;
use crate::xdr_type::{self, XdrType};

static VOID: Value = Value::Void;

/// A discriminant given either as a raw value or as a symbolic name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscriminantInput {
    Raw(i64),
    /// Enum member name, or `TRUE`/`FALSE` for bool discriminants.
    Named(String),
}

impl From<i64> for DiscriminantInput {
    fn from(value: i64) -> Self {
        Self::Raw(value)
    }
}

impl From<i32> for DiscriminantInput {
    fn from(value: i32) -> Self {
        Self::Raw(i64::from(value))
    }
}

impl From<u32> for DiscriminantInput {
    fn from(value: u32) -> Self {
        Self::Raw(i64::from(value))
    }
}

impl From<bool> for DiscriminantInput {
    fn from(value: bool) -> Self {
        Self::Raw(i64::from(value))
    }
}

impl From<&str> for DiscriminantInput {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for DiscriminantInput {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

/// Turns a discriminant input into a raw value in the switch type's domain.
pub fn normalize_discriminant(schema: &UnionSchema, input: DiscriminantInput) -> CodecResult<i64> {
    let switch = match input {
        DiscriminantInput::Raw(value) => value,
        DiscriminantInput::Named(name) => named_discriminant(schema.switch_type(), &name)
            .ok_or_else(|| CodecError::UnknownSwitchName {
                union: schema.name().to_string(),
                name,
            })?,
    };
    if !schema.switch_type().accepts_discriminant(switch) {
        return Err(CodecError::InvalidSwitch {
            union: schema.name().to_string(),
            switch,
        });
    }
    Ok(switch)
}

fn named_discriminant(switch_type: &TypeDescriptor, name: &str) -> Option<i64> {
    match switch_type {
        TypeDescriptor::Enum(schema) => schema.value_of(name).map(i64::from),
        TypeDescriptor::Bool => match name {
            "TRUE" => Some(1),
            "FALSE" => Some(0),
            _ => None,
        },
        _ => None,
    }
}

/// Resolves the arm selected by `switch`: an exact case first, then the
/// default arm.
pub fn resolve_arm(schema: &UnionSchema, switch: i64) -> CodecResult<&str> {
    if let Some(arm) = schema.case_arm(switch) {
        trace!("union {}: {switch} selects arm {arm}", schema.name());
        return Ok(arm);
    }
    if let Some(arm) = schema.default_arm() {
        debug!(
            "union {}: {switch} has no case, using default arm {arm}",
            schema.name()
        );
        return Ok(arm);
    }
    debug!("union {}: rejected discriminant {switch}", schema.name());
    Err(CodecError::InvalidSwitch {
        union: schema.name().to_string(),
        switch,
    })
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveArm {
    switch: i64,
    arm: String,
    value: Value,
}

/// An instance of a union schema.
///
/// Starts unset; once set, the discriminant, arm, and payload always change
/// together.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionValue {
    schema: Arc<UnionSchema>,
    state: Option<ActiveArm>,
}

impl UnionValue {
    /// Creates an unset instance of `schema`.
    #[must_use]
    pub const fn new(schema: Arc<UnionSchema>) -> Self {
        Self {
            schema,
            state: None,
        }
    }

    /// Creates an instance set to `switch` carrying `value`.
    pub fn with(
        schema: Arc<UnionSchema>,
        switch: impl Into<DiscriminantInput>,
        value: impl Into<Value>,
    ) -> CodecResult<Self> {
        let mut union = Self::new(schema);
        union.set(switch, value)?;
        Ok(union)
    }

    /// Selects the arm for `switch` and stores `value` as its payload.
    ///
    /// The value must have the arm's shape (void arms take [`Value::Void`]).
    /// On error the instance is left unchanged.
    pub fn set(
        &mut self,
        switch: impl Into<DiscriminantInput>,
        value: impl Into<Value>,
    ) -> CodecResult<()> {
        let switch = normalize_discriminant(&self.schema, switch.into())?;
        let arm = resolve_arm(&self.schema, switch)?;
        let ty = self.schema.arm_type(arm).flatten();
        let value = value.into();
        if !matches_shape(ty, &value) {
            return Err(match ty {
                Some(ty) => invalid(&format!("{ty} for arm {arm}"), &value),
                None => invalid(&format!("void for arm {arm}"), &value),
            });
        }
        self.state = Some(ActiveArm {
            switch,
            arm: arm.to_string(),
            value,
        });
        Ok(())
    }

    /// Selects a void arm.
    pub fn set_void(&mut self, switch: impl Into<DiscriminantInput>) -> CodecResult<()> {
        self.set(switch, Value::Void)
    }

    /// Returns the stored payload, or void if the union is unset.
    #[must_use]
    pub fn get(&self) -> &Value {
        self.state.as_ref().map_or(&VOID, |state| &state.value)
    }

    /// Returns the stored payload only if `arm` is the active arm.
    pub fn get_checked(&self, arm: &str) -> CodecResult<&Value> {
        match &self.state {
            Some(state) if state.arm == arm => Ok(&state.value),
            state => Err(CodecError::ArmNotSet {
                union: self.schema.name().to_string(),
                requested: arm.to_string(),
                active: state.as_ref().map(|state| state.arm.clone()),
            }),
        }
    }

    /// Returns the raw discriminant, if set.
    #[must_use]
    pub fn switch(&self) -> Option<i64> {
        self.state.as_ref().map(|state| state.switch)
    }

    /// Returns the active arm name, if set.
    #[must_use]
    pub fn arm(&self) -> Option<&str> {
        self.state.as_ref().map(|state| state.arm.as_str())
    }

    #[must_use]
    pub const fn is_set(&self) -> bool {
        self.state.is_some()
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<UnionSchema> {
        &self.schema
    }

    /// Returns `true` if this value is an instance of `schema`.
    #[must_use]
    pub fn is_kind(&self, schema: &Arc<UnionSchema>) -> bool {
        Arc::ptr_eq(&self.schema, schema) || *self.schema == **schema
    }

    /// Encodes this instance.
    pub fn to_xdr(&self) -> CodecResult<Vec<u8>> {
        let mut writer = XdrWriter::new();
        write_union(self, &mut writer)?;
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
        schema: &Arc<UnionSchema>,
        bytes: &[u8],
        limits: &CodecLimits,
    ) -> CodecResult<Self> {
        match xdr_type::decode(schema, bytes, limits)? {
            Value::Union(value) => Ok(*value),
            other => Err(invalid(&format!("union {}", schema.name()), &other)),
        }
    }
}

/// Converts a raw discriminant into a value the switch type can write.
fn switch_value(schema: &UnionSchema, switch: i64) -> CodecResult<Value> {
    let value = match schema.switch_type() {
        TypeDescriptor::Bool => Value::Bool(switch != 0),
        TypeDescriptor::Enum(_) => {
            Value::Enum(
                i32::try_from(switch).map_err(|_| CodecError::InvalidSwitch {
                    union: schema.name().to_string(),
                    switch,
                })?,
            )
        }
        _ => Value::Int(switch),
    };
    Ok(value)
}

fn write_union(value: &UnionValue, writer: &mut XdrWriter) -> CodecResult<()> {
    let schema = &value.schema;
    let state = value.state.as_ref().ok_or_else(|| CodecError::UnionNotSet {
        union: schema.name().to_string(),
    })?;
    schema
        .switch_type()
        .write(&switch_value(schema, state.switch)?, writer)?;
    match schema.arm_type(&state.arm).flatten() {
        Some(ty) => ty.write(&state.value, writer),
        None => primitive::write_void(&state.value, writer),
    }
}

impl XdrType for Arc<UnionSchema> {
    fn read(&self, decoder: &mut Decoder<'_>) -> CodecResult<Value> {
        decoder.nested(|decoder| {
            let raw = self.switch_type().read(decoder)?;
            let switch = raw
                .as_discriminant()
                .ok_or_else(|| invalid(self.switch_type(), &raw))?;
            let arm = resolve_arm(self, switch)?;
            let value = match self.arm_type(arm).flatten() {
                Some(ty) => ty.read(decoder)?,
                None => primitive::read_void(),
            };
            Ok(Value::Union(Box::new(UnionValue {
                schema: Arc::clone(self),
                state: Some(ActiveArm {
                    switch,
                    arm: arm.to_string(),
                    value,
                }),
            })))
        })
    }

    fn write(&self, value: &Value, writer: &mut XdrWriter) -> CodecResult<()> {
        match value.as_union() {
            Some(instance) if instance.is_kind(self) => write_union(instance, writer),
            _ => Err(invalid(&format!("union {}", self.name()), value)),
        }
    }

    fn is_valid(&self, value: &Value) -> bool {
        let Some(state) = value
            .as_union()
            .filter(|instance| instance.is_kind(self))
            .and_then(|instance| instance.state.as_ref())
        else {
            return false;
        };
        if !self.switch_type().accepts_discriminant(state.switch) {
            return false;
        }
        if resolve_arm(self, state.switch).ok() != Some(state.arm.as_str()) {
            return false;
        }
        match self.arm_type(&state.arm).flatten() {
            Some(ty) => ty.is_valid(&state.value),
            None => state.value.is_void(),
        }
    }
}
