use codec::{CodecError, CodecLimits, Encoding};
use serde_json::json;
use xdrkit_tools::{decode_to_json, encode_from_json, SchemaDocument};

const DOC: &str = r#"{ "types": [
    { "kind": "enum", "name": "FileType", "members": [
        { "name": "TEXT", "value": 0 }, { "name": "DATA", "value": 1 }, { "name": "EXEC", "value": 2 } ] },
    { "kind": "union", "name": "FileKind", "switch": { "name": "type", "type": "FileType" },
      "cases": [ { "member": "TEXT", "arm": "nothing" }, { "member": "DATA", "arm": "creator" },
                 { "member": "EXEC", "arm": "interpretor" } ],
      "arms": [ { "name": "nothing" }, { "name": "creator", "type": { "string": 255 } },
                { "name": "interpretor", "type": { "string": 255 } } ] },
    { "kind": "struct", "name": "File", "fields": [
        { "name": "filename", "type": { "string": 255 } },
        { "name": "type", "type": "FileKind" },
        { "name": "owner", "type": { "string": 32 } },
        { "name": "data", "type": { "var_opaque": 65535 } } ] }
] }"#;

#[test]
fn integration_rfc4506_file_example() {
    let registry = SchemaDocument::from_json(DOC).unwrap().resolve().unwrap();
    let file = registry.require("File").unwrap();
    let value = json!({
        "filename": "sillyprog",
        "type": { "switch": "EXEC", "value": "lisp" },
        "owner": "john",
        "data": "287175697429"
    });

    let hex = encode_from_json(file, &value, Encoding::Hex).unwrap();
    assert_eq!(
        String::from_utf8(hex.clone()).unwrap(),
        concat!(
            "0000000973696c6c7970726f67000000",
            "00000002",
            "000000046c697370",
            "000000046a6f686e",
            "000000062871756974290000",
        )
    );

    let decoded = decode_to_json(file, &hex, Encoding::Hex, &CodecLimits::default()).unwrap();
    assert_eq!(decoded["type"]["arm"], "interpretor");
    assert_eq!(decoded["type"]["switch"], "EXEC");
    assert_eq!(decoded["data"], "287175697429");
}

#[test]
fn integration_decode_errors_keep_codec_error() {
    let registry = SchemaDocument::from_json(DOC).unwrap().resolve().unwrap();
    let kind = registry.require("FileKind").unwrap();
    let err = decode_to_json(kind, &[0, 0, 0, 9], Encoding::Raw, &CodecLimits::default())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CodecError>(),
        Some(CodecError::InvalidEnum { value: 9, .. })
    ));
}

#[test]
fn integration_base64_input() {
    let registry = SchemaDocument::from_json(DOC).unwrap().resolve().unwrap();
    let kind = registry.require("FileKind").unwrap();
    let decoded = decode_to_json(kind, b"AAAAAA==", Encoding::Base64, &CodecLimits::default())
        .unwrap();
    assert_eq!(decoded, json!({ "switch": "TEXT", "arm": "nothing", "value": null }));
}
