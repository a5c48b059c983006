//! Schema inspection reports.

use std::fmt::Write as _;

use schema::{schema_hash, TypeDescriptor};
use serde::Serialize;

use crate::document::TypeRegistry;

/// Summary of one declared type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub kind: &'static str,
    pub hash: String,
    pub detail: String,
    pub descriptor: TypeDescriptor,
}

#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub types: Vec<TypeSummary>,
}

/// Summarizes every type in a registry, in declaration order.
pub fn inspect_registry(registry: &TypeRegistry) -> InspectReport {
    let types = registry
        .iter()
        .map(|(name, ty)| TypeSummary {
            name: name.to_string(),
            kind: kind_of(ty),
            hash: format!("0x{:016x}", schema_hash(ty)),
            detail: detail_of(ty),
            descriptor: ty.clone(),
        })
        .collect();
    InspectReport { types }
}

const fn kind_of(ty: &TypeDescriptor) -> &'static str {
    match ty {
        TypeDescriptor::Enum(_) => "enum",
        TypeDescriptor::Struct(_) => "struct",
        TypeDescriptor::Union(_) => "union",
        _ => "type",
    }
}

fn detail_of(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Enum(schema) => format!("{} members", schema.members().len()),
        TypeDescriptor::Struct(schema) => format!("{} fields", schema.fields().len()),
        TypeDescriptor::Union(schema) => {
            let mut detail = format!(
                "switch {}: {}, {} cases, {} arms",
                schema.switch_name(),
                schema.switch_type(),
                schema.cases().len(),
                schema.arms().len()
            );
            if let Some(default) = schema.default_arm() {
                let _ = write!(detail, ", default {default}");
            }
            detail
        }
        other => other.to_string(),
    }
}

/// Formats a report as human-readable text.
pub fn format_report(report: &InspectReport) -> String {
    let mut out = String::new();
    for summary in &report.types {
        let _ = writeln!(
            out,
            "{} {} ({}) hash {}",
            summary.kind, summary.name, summary.detail, summary.hash
        );
        match &summary.descriptor {
            TypeDescriptor::Struct(schema) => {
                for field in schema.fields() {
                    let _ = writeln!(out, "  {}: {}", field.name, field.ty);
                }
            }
            TypeDescriptor::Union(schema) => {
                for case in schema.cases() {
                    let _ = writeln!(out, "  case {}: {}", case.value, case.arm);
                }
                for arm in schema.arms() {
                    match &arm.ty {
                        Some(ty) => {
                            let _ = writeln!(out, "  arm {}: {ty}", arm.name);
                        }
                        None => {
                            let _ = writeln!(out, "  arm {}: void", arm.name);
                        }
                    }
                }
            }
            TypeDescriptor::Enum(schema) => {
                for member in schema.members() {
                    let _ = writeln!(out, "  {} = {}", member.name, member.value);
                }
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SchemaDocument;

    const DOC: &str = r#"{ "types": [
        { "kind": "struct", "name": "Point", "fields": [
            { "name": "x", "type": "int" }, { "name": "y", "type": "int" } ] },
        { "kind": "union", "name": "Maybe", "switch": { "name": "has", "type": "bool" },
          "cases": [ { "value": 1, "arm": "some" } ],
          "arms": [ { "name": "some", "type": "Point" }, { "name": "none" } ],
          "default": "none" }
    ] }"#;

    #[test]
    fn report_lists_types_with_hashes() {
        let registry = SchemaDocument::from_json(DOC).unwrap().resolve().unwrap();
        let report = inspect_registry(&registry);
        assert_eq!(report.types.len(), 2);
        assert_eq!(report.types[0].kind, "struct");
        assert_eq!(report.types[0].detail, "2 fields");
        assert_eq!(
            report.types[1].detail,
            "switch has: bool, 1 cases, 2 arms, default none"
        );
        assert_eq!(report.types[0].hash.len(), 18);
        assert_ne!(report.types[0].hash, report.types[1].hash);

        let text = format_report(&report);
        assert!(text.contains("struct Point (2 fields)"), "{text}");
        assert!(text.contains("  arm none: void"), "{text}");
    }

    #[test]
    fn report_serializes_descriptors() {
        let registry = SchemaDocument::from_json(DOC).unwrap().resolve().unwrap();
        let json = serde_json::to_value(inspect_registry(&registry)).unwrap();
        assert_eq!(json["types"][0]["name"], "Point");
        assert_eq!(json["types"][0]["descriptor"]["struct"]["fields"][0]["type"], "int");
    }
}
