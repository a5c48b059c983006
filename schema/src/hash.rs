//! Deterministic schema hashing.

use blake3::Hasher;

use crate::{EnumSchema, StructSchema, TypeDescriptor, UnionSchema};

/// Computes a deterministic fingerprint of a type descriptor tree.
///
/// Names, field order, arm order, and case order all contribute, so two peers
/// can cheaply confirm they agree on a wire layout before exchanging data.
#[must_use]
pub fn schema_hash(ty: &TypeDescriptor) -> u64 {
    let mut hasher = Hasher::new();
    write_type(&mut hasher, ty);

    let hash = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

fn write_type(hasher: &mut Hasher, ty: &TypeDescriptor) {
    match ty {
        TypeDescriptor::Int => write_u8(hasher, 0),
        TypeDescriptor::UInt => write_u8(hasher, 1),
        TypeDescriptor::Hyper => write_u8(hasher, 2),
        TypeDescriptor::UHyper => write_u8(hasher, 3),
        TypeDescriptor::Float => write_u8(hasher, 4),
        TypeDescriptor::Double => write_u8(hasher, 5),
        TypeDescriptor::Quadruple => write_u8(hasher, 6),
        TypeDescriptor::Bool => write_u8(hasher, 7),
        TypeDescriptor::Enum(schema) => {
            write_u8(hasher, 8);
            write_enum(hasher, schema);
        }
        TypeDescriptor::String { max } => {
            write_u8(hasher, 9);
            write_max(hasher, *max);
        }
        TypeDescriptor::Opaque { len } => {
            write_u8(hasher, 10);
            write_u32(hasher, *len);
        }
        TypeDescriptor::VarOpaque { max } => {
            write_u8(hasher, 11);
            write_max(hasher, *max);
        }
        TypeDescriptor::Array { element, len } => {
            write_u8(hasher, 12);
            write_u32(hasher, *len);
            write_type(hasher, element);
        }
        TypeDescriptor::VarArray { element, max } => {
            write_u8(hasher, 13);
            write_max(hasher, *max);
            write_type(hasher, element);
        }
        TypeDescriptor::Optional(element) => {
            write_u8(hasher, 14);
            write_type(hasher, element);
        }
        TypeDescriptor::Struct(schema) => {
            write_u8(hasher, 15);
            write_struct(hasher, schema);
        }
        TypeDescriptor::Union(schema) => {
            write_u8(hasher, 16);
            write_union(hasher, schema);
        }
    }
}

fn write_enum(hasher: &mut Hasher, schema: &EnumSchema) {
    write_str(hasher, schema.name());
    write_len(hasher, schema.members().len());
    for member in schema.members() {
        write_str(hasher, &member.name);
        hasher.update(&member.value.to_le_bytes());
    }
}

fn write_struct(hasher: &mut Hasher, schema: &StructSchema) {
    write_str(hasher, schema.name());
    write_len(hasher, schema.fields().len());
    for field in schema.fields() {
        write_str(hasher, &field.name);
        write_type(hasher, &field.ty);
    }
}

fn write_union(hasher: &mut Hasher, schema: &UnionSchema) {
    write_str(hasher, schema.name());
    write_str(hasher, schema.switch_name());
    write_type(hasher, schema.switch_type());

    write_len(hasher, schema.cases().len());
    for case in schema.cases() {
        hasher.update(&case.value.to_le_bytes());
        write_str(hasher, &case.arm);
    }

    match schema.default_arm() {
        Some(arm) => {
            write_u8(hasher, 1);
            write_str(hasher, arm);
        }
        None => write_u8(hasher, 0),
    }

    write_len(hasher, schema.arms().len());
    for arm in schema.arms() {
        write_str(hasher, &arm.name);
        match &arm.ty {
            Some(ty) => {
                write_u8(hasher, 1);
                write_type(hasher, ty);
            }
            None => write_u8(hasher, 0),
        }
    }
}

fn write_max(hasher: &mut Hasher, max: Option<u32>) {
    match max {
        Some(max) => {
            write_u8(hasher, 1);
            write_u32(hasher, max);
        }
        None => write_u8(hasher, 0),
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_len(hasher, value.len());
    hasher.update(value.as_bytes());
}

fn write_len(hasher: &mut Hasher, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn point(first: &str, second: &str) -> TypeDescriptor {
        StructSchema::builder("Point")
            .field(first, TypeDescriptor::Int)
            .field(second, TypeDescriptor::string(Some(8)))
            .build()
            .unwrap()
            .into()
    }

    #[test]
    fn schema_hash_is_stable() {
        let ty = point("a", "b");
        assert_eq!(schema_hash(&ty), schema_hash(&ty.clone()));
    }

    #[test]
    fn schema_hash_changes_with_field_order() {
        let a = StructSchema::builder("S")
            .field("a", TypeDescriptor::Int)
            .field("b", TypeDescriptor::Bool)
            .build()
            .unwrap();
        let b = StructSchema::builder("S")
            .field("b", TypeDescriptor::Bool)
            .field("a", TypeDescriptor::Int)
            .build()
            .unwrap();
        assert_ne!(schema_hash(&a.into()), schema_hash(&b.into()));
    }

    #[test]
    fn schema_hash_changes_with_field_name() {
        assert_ne!(schema_hash(&point("a", "b")), schema_hash(&point("a", "c")));
    }

    #[test]
    fn schema_hash_distinguishes_bounds() {
        assert_ne!(
            schema_hash(&TypeDescriptor::string(None)),
            schema_hash(&TypeDescriptor::string(Some(u32::MAX)))
        );
        assert_ne!(
            schema_hash(&TypeDescriptor::opaque(4)),
            schema_hash(&TypeDescriptor::var_opaque(Some(4)))
        );
    }

    #[test]
    fn schema_hash_covers_union_default() {
        let build = |with_default: bool| {
            let builder = UnionSchema::builder("U", "tag", TypeDescriptor::Int)
                .case(1, "a")
                .arm("a", TypeDescriptor::Int)
                .void_arm("b");
            let builder = if with_default {
                builder.default_arm("b")
            } else {
                builder
            };
            TypeDescriptor::from(builder.build().unwrap())
        };
        assert_ne!(schema_hash(&build(true)), schema_hash(&build(false)));
    }

    proptest! {
        #[test]
        fn prop_hash_tracks_field_names(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
            prop_assume!(a != b);
            let ty_a = StructSchema::builder("S").field(a.as_str(), TypeDescriptor::Int).build().unwrap();
            let ty_b = StructSchema::builder("S").field(b.as_str(), TypeDescriptor::Int).build().unwrap();
            prop_assert_ne!(schema_hash(&ty_a.into()), schema_hash(&ty_b.into()));
        }
    }
}
