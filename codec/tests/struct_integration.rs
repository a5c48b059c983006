use std::sync::Arc;

use codec::{decode, encode, CodecError, CodecLimits, StructValue, Value, XdrType};
use schema::{FieldDef, StructSchema, TypeDescriptor};
use stream::StreamError;

fn int_then_string(order: &[&str]) -> Arc<StructSchema> {
    let fields = order
        .iter()
        .map(|name| match *name {
            "a" => FieldDef::new("a", TypeDescriptor::Int),
            _ => FieldDef::new("b", TypeDescriptor::string(None)),
        })
        .collect();
    Arc::new(StructSchema::new("Pair", fields).unwrap())
}

fn pair(schema: &Arc<StructSchema>) -> StructValue {
    StructValue::new(Arc::clone(schema))
        .with("a", 1)
        .unwrap()
        .with("b", "xy")
        .unwrap()
}

#[test]
fn integration_fields_are_written_in_declaration_order() {
    let ab = int_then_string(&["a", "b"]);
    let bytes = pair(&ab).to_xdr().unwrap();
    assert_eq!(&bytes[..4], [0, 0, 0, 1]);
    assert_eq!(&bytes[4..], [0, 0, 0, 2, b'x', b'y', 0, 0]);

    let ba = int_then_string(&["b", "a"]);
    let swapped = pair(&ba).to_xdr().unwrap();
    assert_ne!(bytes, swapped);
    assert_eq!(&swapped[..8], [0, 0, 0, 2, b'x', b'y', 0, 0]);
}

#[test]
fn integration_roundtrip_all_field_kinds() {
    let schema = Arc::new(
        StructSchema::builder("Everything")
            .field("i", TypeDescriptor::Int)
            .field("u", TypeDescriptor::UInt)
            .field("h", TypeDescriptor::Hyper)
            .field("uh", TypeDescriptor::UHyper)
            .field("f", TypeDescriptor::Float)
            .field("d", TypeDescriptor::Double)
            .field("q", TypeDescriptor::Quadruple)
            .field("b", TypeDescriptor::Bool)
            .field("s", TypeDescriptor::string(Some(16)))
            .field("fixed", TypeDescriptor::opaque(3))
            .field("var", TypeDescriptor::var_opaque(Some(8)))
            .field("list", TypeDescriptor::array(TypeDescriptor::Int, 2))
            .field(
                "vlist",
                TypeDescriptor::var_array(TypeDescriptor::string(None), None),
            )
            .field("maybe", TypeDescriptor::optional(TypeDescriptor::Double))
            .field("none", TypeDescriptor::optional(TypeDescriptor::Double))
            .build()
            .unwrap(),
    );
    let value = StructValue::new(Arc::clone(&schema))
        .with("i", i32::MIN)
        .unwrap()
        .with("u", u32::MAX)
        .unwrap()
        .with("h", i64::MIN)
        .unwrap()
        .with("uh", u64::MAX)
        .unwrap()
        .with("f", 0.25f32)
        .unwrap()
        .with("d", 1e300)
        .unwrap()
        .with("q", Value::Quadruple([0x3F; 16]))
        .unwrap()
        .with("b", false)
        .unwrap()
        .with("s", "héllo")
        .unwrap()
        .with("fixed", vec![1u8, 2, 3])
        .unwrap()
        .with("var", vec![9u8; 5])
        .unwrap()
        .with("list", vec![Value::Int(4), Value::Int(5)])
        .unwrap()
        .with("vlist", vec![Value::from("a"), Value::from("")])
        .unwrap()
        .with("maybe", Some(2.5))
        .unwrap()
        .with("none", None::<f64>)
        .unwrap();

    assert!(schema.is_valid(&Value::Struct(value.clone())));
    let bytes = value.to_xdr().unwrap();
    assert_eq!(bytes.len() % 4, 0);
    let decoded = StructValue::from_xdr(&schema, &bytes, &CodecLimits::default()).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(decoded.get("none"), Some(&Value::Void));
}

#[test]
fn integration_every_truncation_is_unexpected_eof() {
    let schema = int_then_string(&["a", "b"]);
    let bytes = pair(&schema).to_xdr().unwrap();
    for len in 0..bytes.len() {
        let err = StructValue::from_xdr(&schema, &bytes[..len], &CodecLimits::default())
            .unwrap_err();
        assert!(
            matches!(err, CodecError::Stream(StreamError::UnexpectedEof { .. })),
            "len {len}: {err}"
        );
    }
}

#[test]
fn integration_nonzero_padding_is_rejected() {
    let schema = int_then_string(&["a", "b"]);
    let mut bytes = pair(&schema).to_xdr().unwrap();
    let last = bytes.len() - 1;
    bytes[last] = 1;
    let err = StructValue::from_xdr(&schema, &bytes, &CodecLimits::default()).unwrap_err();
    assert!(matches!(
        err,
        CodecError::Stream(StreamError::NonZeroPadding { .. })
    ));
}

#[test]
fn integration_invalid_utf8_in_string_field() {
    let schema = int_then_string(&["a", "b"]);
    let bytes = [0, 0, 0, 1, 0, 0, 0, 2, b'x', 0xFF, 0, 0];
    let err = StructValue::from_xdr(&schema, &bytes, &CodecLimits::default()).unwrap_err();
    assert_eq!(err, CodecError::InvalidUtf8 { position: 9 });
}

#[test]
fn integration_non_utf8_bytes_in_string_field_fail_encode() {
    let schema = int_then_string(&["a", "b"]);
    let value = StructValue::new(Arc::clone(&schema))
        .with("a", 1)
        .unwrap()
        .with("b", vec![0xFFu8, 0xFE])
        .unwrap();
    assert!(!TypeDescriptor::from(Arc::clone(&schema)).is_valid(&Value::Struct(value.clone())));
    assert!(matches!(
        value.to_xdr(),
        Err(CodecError::InvalidValue { .. })
    ));
}

#[test]
fn integration_float_field_rejects_lossy_values() {
    let schema = Arc::new(
        StructSchema::new("Sample", vec![FieldDef::new("f", TypeDescriptor::Float)]).unwrap(),
    );
    let lossy = StructValue::new(Arc::clone(&schema)).with("f", 0.1f64).unwrap();
    assert!(matches!(
        lossy.to_xdr(),
        Err(CodecError::InvalidValue { .. })
    ));

    let exact = StructValue::new(Arc::clone(&schema)).with("f", 0.1f32).unwrap();
    let bytes = exact.to_xdr().unwrap();
    assert_eq!(bytes, 0.1f32.to_be_bytes());
    assert_eq!(
        StructValue::from_xdr(&schema, &bytes, &CodecLimits::default()).unwrap(),
        exact
    );
}

#[test]
fn integration_struct_through_type_descriptor() {
    let schema = int_then_string(&["a", "b"]);
    let ty = TypeDescriptor::from(Arc::clone(&schema));
    let value = Value::Struct(pair(&schema));
    let bytes = encode(&ty, &value).unwrap();
    assert_eq!(decode(&ty, &bytes, &CodecLimits::default()).unwrap(), value);

    let incomplete = Value::Struct(StructValue::new(schema));
    assert!(!ty.is_valid(&incomplete));
    assert!(matches!(
        encode(&ty, &incomplete),
        Err(CodecError::MissingField { .. })
    ));
}

#[test]
fn integration_write_rejects_values_that_outgrew_their_field() {
    let schema = Arc::new(
        StructSchema::builder("Name")
            .field("name", TypeDescriptor::string(Some(4)))
            .build()
            .unwrap(),
    );
    let value = StructValue::new(schema).with("name", "too long").unwrap();
    assert!(matches!(
        value.to_xdr(),
        Err(CodecError::InvalidValue { .. })
    ));
}
