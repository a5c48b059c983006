#![no_main]

use std::sync::Arc;

use codec::{CodecLimits, UnionValue};
use libfuzzer_sys::fuzz_target;
use schema::{EnumSchema, StructSchema, TypeDescriptor, UnionSchema};

fn schema() -> Arc<UnionSchema> {
    let kind = EnumSchema::builder("Kind")
        .member("LEAF", 0)
        .member("PAIR", 1)
        .member("LIST", 2)
        .build()
        .unwrap();
    let pair = StructSchema::builder("Pair")
        .field("key", TypeDescriptor::string(Some(64)))
        .field("value", TypeDescriptor::optional(TypeDescriptor::Hyper))
        .build()
        .unwrap();
    Arc::new(
        UnionSchema::builder("Node", "kind", TypeDescriptor::from(kind))
            .case_named("LEAF", "leaf")
            .case_named("PAIR", "pair")
            .case_named("LIST", "list")
            .arm("leaf", TypeDescriptor::var_opaque(Some(128)))
            .arm("pair", TypeDescriptor::from(pair))
            .arm(
                "list",
                TypeDescriptor::var_array(TypeDescriptor::UInt, Some(32)),
            )
            .build()
            .unwrap(),
    )
}

fuzz_target!(|data: &[u8]| {
    let schema = schema();
    if let Ok(value) = UnionValue::from_xdr(&schema, data, &CodecLimits::for_testing()) {
        // Whatever decodes must re-encode to the same bytes.
        let bytes = value.to_xdr().unwrap();
        assert_eq!(bytes, data);
    }
});
