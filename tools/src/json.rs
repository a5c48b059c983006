//! Conversion between codec values and JSON.
//!
//! Opaque data and quadruple floats are rendered as lowercase hex strings,
//! enum values by member name, and unions as
//! `{ "switch": .., "arm": .., "value": .. }`.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use codec::{normalize_discriminant, resolve_arm, DiscriminantInput, StructValue, UnionValue, Value};
use schema::TypeDescriptor;
use serde_json::{Map, Number, Value as Json};

/// Renders a decoded value as JSON, using `ty` for enum names and element types.
pub fn to_json(ty: &TypeDescriptor, value: &Value) -> Json {
    match value {
        Value::Void => Json::Null,
        Value::Bool(v) => Json::Bool(*v),
        Value::Int(v) => Json::from(*v),
        Value::UInt(v) => Json::from(*v),
        Value::Float(v) => Number::from_f64(*v).map_or(Json::Null, Json::Number),
        Value::Quadruple(bytes) => Json::String(hex::encode(bytes)),
        Value::Enum(v) => enum_json(ty, *v),
        Value::Text(text) => Json::String(text.clone()),
        Value::Opaque(bytes) => Json::String(hex::encode(bytes)),
        Value::Array(items) => {
            let element = element_type(ty);
            Json::Array(items.iter().map(|item| to_json(element, item)).collect())
        }
        Value::Struct(instance) => {
            let object: Map<String, Json> = instance
                .schema()
                .fields()
                .iter()
                .zip(instance.iter())
                .map(|(def, (name, field))| {
                    let json = field.map_or(Json::Null, |field| to_json(&def.ty, field));
                    (name.to_string(), json)
                })
                .collect();
            Json::Object(object)
        }
        Value::Union(instance) => union_json(instance),
    }
}

fn enum_json(ty: &TypeDescriptor, value: i32) -> Json {
    match unwrap_optional(ty) {
        TypeDescriptor::Enum(schema) => schema
            .name_of(value)
            .map_or_else(|| Json::from(value), |name| Json::String(name.to_string())),
        _ => Json::from(value),
    }
}

fn union_json(instance: &UnionValue) -> Json {
    let schema = instance.schema();
    let mut object = Map::new();
    if let Some(switch) = instance.switch() {
        let switch_json = match schema.switch_type() {
            TypeDescriptor::Bool => Json::Bool(switch != 0),
            TypeDescriptor::Enum(_) => i32::try_from(switch)
                .map_or_else(|_| Json::from(switch), |v| enum_json(schema.switch_type(), v)),
            _ => Json::from(switch),
        };
        object.insert("switch".to_string(), switch_json);
    }
    if let Some(arm) = instance.arm() {
        object.insert("arm".to_string(), Json::String(arm.to_string()));
        let value = match schema.arm_type(arm).flatten() {
            Some(ty) => to_json(ty, instance.get()),
            None => Json::Null,
        };
        object.insert("value".to_string(), value);
    }
    Json::Object(object)
}

fn unwrap_optional(ty: &TypeDescriptor) -> &TypeDescriptor {
    match ty {
        TypeDescriptor::Optional(inner) => unwrap_optional(inner),
        other => other,
    }
}

fn element_type(ty: &TypeDescriptor) -> &TypeDescriptor {
    match unwrap_optional(ty) {
        TypeDescriptor::Array { element, .. } | TypeDescriptor::VarArray { element, .. } => element,
        other => other,
    }
}

/// Builds a value of type `ty` from JSON.
///
/// Struct and union values are built through their setters, so shape errors
/// surface here; lengths and ranges are checked when the value is encoded.
pub fn from_json(ty: &TypeDescriptor, json: &Json) -> Result<Value> {
    let mismatch = || format!("expected {ty}, found {json}");
    let value = match ty {
        TypeDescriptor::Int | TypeDescriptor::Hyper => {
            Value::Int(json.as_i64().with_context(mismatch)?)
        }
        TypeDescriptor::UInt | TypeDescriptor::UHyper => {
            Value::UInt(json.as_u64().with_context(mismatch)?)
        }
        TypeDescriptor::Float => nearest_single(json.as_f64().with_context(mismatch)?),
        TypeDescriptor::Double => Value::Float(json.as_f64().with_context(mismatch)?),
        TypeDescriptor::Quadruple => {
            let bytes = hex_bytes(json).with_context(mismatch)?;
            let bytes: [u8; 16] = bytes
                .try_into()
                .map_err(|bytes: Vec<u8>| anyhow::anyhow!("quadruple needs 16 bytes, got {}", bytes.len()))?;
            Value::Quadruple(bytes)
        }
        TypeDescriptor::Bool => Value::Bool(json.as_bool().with_context(mismatch)?),
        TypeDescriptor::Enum(schema) => {
            let value = match json {
                Json::String(name) => schema
                    .value_of(name)
                    .with_context(|| format!("{name:?} is not a member of enum {}", schema.name()))?,
                _ => json
                    .as_i64()
                    .and_then(|v| i32::try_from(v).ok())
                    .with_context(mismatch)?,
            };
            Value::Enum(value)
        }
        TypeDescriptor::String { .. } => Value::Text(json.as_str().with_context(mismatch)?.to_string()),
        TypeDescriptor::Opaque { .. } | TypeDescriptor::VarOpaque { .. } => {
            Value::Opaque(hex_bytes(json).with_context(mismatch)?)
        }
        TypeDescriptor::Array { element, .. } | TypeDescriptor::VarArray { element, .. } => {
            let items = json.as_array().with_context(mismatch)?;
            Value::Array(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| from_json(element, item).with_context(|| format!("element {i}")))
                    .collect::<Result<_>>()?,
            )
        }
        TypeDescriptor::Optional(inner) => {
            if json.is_null() {
                Value::Void
            } else {
                from_json(inner, json)?
            }
        }
        TypeDescriptor::Struct(schema) => {
            let object = json.as_object().with_context(mismatch)?;
            let mut instance = StructValue::new(Arc::clone(schema));
            for (name, field_json) in object {
                let def = schema
                    .field(name)
                    .with_context(|| format!("struct {} has no field {name:?}", schema.name()))?;
                let field = from_json(&def.ty, field_json).with_context(|| format!("field {name:?}"))?;
                instance.set(name, field)?;
            }
            Value::Struct(instance)
        }
        TypeDescriptor::Union(schema) => {
            let object = json.as_object().with_context(mismatch)?;
            let input = match object.get("switch") {
                Some(Json::String(name)) => DiscriminantInput::Named(name.clone()),
                Some(Json::Bool(flag)) => DiscriminantInput::from(*flag),
                Some(other) => DiscriminantInput::Raw(
                    other
                        .as_i64()
                        .with_context(|| format!("invalid switch {other}"))?,
                ),
                None => bail!("union {} needs a \"switch\"", schema.name()),
            };
            let switch = normalize_discriminant(schema, input)?;
            let arm = resolve_arm(schema, switch)?;
            if let Some(requested) = object.get("arm").and_then(Json::as_str) {
                if requested != arm {
                    bail!("switch {switch} selects arm {arm:?}, not {requested:?}");
                }
            }
            let payload = match schema.arm_type(arm).flatten() {
                Some(arm_type) => from_json(arm_type, object.get("value").unwrap_or(&Json::Null))
                    .with_context(|| format!("arm {arm:?}"))?,
                None => Value::Void,
            };
            Value::from(UnionValue::with(Arc::clone(schema), switch, payload)?)
        }
    };
    Ok(value)
}

// JSON numbers are doubles; a `float` field takes the closest `f32`.
#[allow(clippy::cast_possible_truncation)]
fn nearest_single(value: f64) -> Value {
    Value::from(value as f32)
}

fn hex_bytes(json: &Json) -> Option<Vec<u8>> {
    json.as_str().and_then(|text| hex::decode(text).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codec::XdrType;
    use schema::{EnumSchema, StructSchema, UnionSchema};
    use serde_json::json;

    fn paint() -> TypeDescriptor {
        let color = EnumSchema::builder("Color")
            .member("RED", 0)
            .member("GREEN", 1)
            .build()
            .unwrap();
        let pixel = StructSchema::builder("Pixel")
            .field("x", TypeDescriptor::UInt)
            .field("raw", TypeDescriptor::opaque(2))
            .field("note", TypeDescriptor::optional(TypeDescriptor::string(None)))
            .build()
            .unwrap();
        TypeDescriptor::from(
            UnionSchema::builder("Paint", "color", TypeDescriptor::from(color))
                .case_named("RED", "pixel")
                .arm("pixel", TypeDescriptor::from(pixel))
                .void_arm("none")
                .default_arm("none")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn union_json_roundtrip() {
        let ty = paint();
        let input = json!({
            "switch": "RED",
            "value": { "x": 3, "raw": "beef", "note": null }
        });
        let value = from_json(&ty, &input).unwrap();
        let output = to_json(&ty, &value);
        assert_eq!(
            output,
            json!({
                "switch": "RED",
                "arm": "pixel",
                "value": { "x": 3, "raw": "beef", "note": null }
            })
        );
        assert_eq!(from_json(&ty, &output).unwrap(), value);
    }

    #[test]
    fn struct_fields_keep_declaration_order() {
        let ty = paint();
        let value = from_json(
            &ty,
            &json!({ "switch": 0, "value": { "note": "n", "raw": "0000", "x": 1 } }),
        )
        .unwrap();
        let rendered = to_json(&ty, &value).to_string();
        let x = rendered.find("\"x\"").unwrap();
        let note = rendered.find("\"note\"").unwrap();
        assert!(x < note, "{rendered}");
    }

    #[test]
    fn mismatched_arm_and_unknown_field_are_errors() {
        let ty = paint();
        assert!(from_json(&ty, &json!({ "switch": "GREEN", "arm": "pixel" })).is_err());
        assert!(from_json(&ty, &json!({ "switch": 0, "value": { "y": 1 } })).is_err());
        assert!(from_json(&ty, &json!({ "value": null })).is_err());
        assert_eq!(
            from_json(&ty, &json!({ "switch": "GREEN" }))
                .unwrap()
                .as_union()
                .and_then(UnionValue::arm),
            Some("none")
        );
    }

    #[test]
    fn scalars() {
        assert_eq!(from_json(&TypeDescriptor::Hyper, &json!(-5)).unwrap(), Value::Int(-5));
        assert!(from_json(&TypeDescriptor::UInt, &json!(-5)).is_err());
        assert!(from_json(&TypeDescriptor::Int, &json!("5")).is_err());
        assert_eq!(
            from_json(&TypeDescriptor::Quadruple, &json!("00".repeat(16))).unwrap(),
            Value::Quadruple([0; 16])
        );
        assert!(from_json(&TypeDescriptor::Quadruple, &json!("00")).is_err());
        assert_eq!(to_json(&TypeDescriptor::Double, &Value::Float(f64::NAN)), Json::Null);
    }

    #[test]
    fn float_input_is_narrowed_to_single_precision() {
        let value = from_json(&TypeDescriptor::Float, &json!(0.1)).unwrap();
        assert_eq!(value, Value::from(0.1f32));
        assert!(TypeDescriptor::Float.is_valid(&value));
        assert_eq!(
            from_json(&TypeDescriptor::Double, &json!(0.1)).unwrap(),
            Value::Float(0.1)
        );
    }
}
