//! TypeScript code emission via the Emit trait.
//!
//! Each IR type implements `Emit` so declarations are built as structured
//! values and only turned into text at the very end.

use super::types::{TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};
use super::utils::{escape_js_string, quote_if_needed, single_line};

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the IR node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Null => "null".to_string(),
            TsPrimitive::Undefined => "undefined".to_string(),
            TsPrimitive::Any => "any".to_string(),
            TsPrimitive::Object => "object".to_string(),
        }
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap complex types in parentheses
                if matches!(**inner, TsType::Union(_) | TsType::Intersection(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    let s = t.emit();
                    if matches!(t, TsType::Union(_)) {
                        format!("({s})")
                    } else {
                        s
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(Emit::emit).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Literal(value) => format!("'{}'", escape_js_string(value)),
            TsType::Ref(name) => name.clone(),
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{key}{opt}: {}", self.ty.emit())
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                if properties.is_empty() {
                    return format!("export interface {} {{}}\n", self.name);
                }
                let mut output = format!("export interface {} {{\n", self.name);
                for prop in properties {
                    output.push_str(&format!("  {};", prop.emit()));
                    if let Some(description) = &prop.description {
                        output.push_str(&format!(" // {}", single_line(description)));
                    }
                    output.push('\n');
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::TypeAlias { ty } => {
                format!("export type {} = {};\n", self.name, ty.emit())
            }
            TypeDefKind::Marker { combines } => {
                let mut output = String::new();
                if !combines.is_empty() {
                    output.push_str(&format!("// Combines: {}\n", combines.join(", ")));
                    output.push_str(
                        "// Each part is sent through its own channel; pick one with the selector type.\n",
                    );
                }
                output.push_str(&format!("export interface {} {{}}\n", self.name));
                output
            }
            TypeDefKind::Selector {
                param,
                discriminants,
                branches,
                fallback,
            } => {
                let constraint = discriminants
                    .iter()
                    .map(|d| TsType::Literal(d.clone()).emit())
                    .collect::<Vec<_>>()
                    .join(" | ");
                let mut output = format!(
                    "export type {}<{param} extends {constraint}> =\n",
                    self.name
                );
                for (discriminant, ty) in branches {
                    output.push_str(&format!(
                        "  {param} extends {} ? {} :\n",
                        TsType::Literal(discriminant.clone()).emit(),
                        ty.emit()
                    ));
                }
                output.push_str(&format!("  {};\n", fallback.emit()));
                output
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_primitive() {
        assert_eq!(TsPrimitive::String.emit(), "string");
        assert_eq!(TsPrimitive::Number.emit(), "number");
        assert_eq!(TsPrimitive::Boolean.emit(), "boolean");
        assert_eq!(TsPrimitive::Null.emit(), "null");
        assert_eq!(TsPrimitive::Undefined.emit(), "undefined");
        assert_eq!(TsPrimitive::Any.emit(), "any");
        assert_eq!(TsPrimitive::Object.emit(), "object");
    }

    #[test]
    fn test_emit_array_type() {
        let ty = TsType::Array(Box::new(TsType::Primitive(TsPrimitive::String)));
        assert_eq!(ty.emit(), "string[]");
    }

    #[test]
    fn test_emit_union_array() {
        // (string | null)[] - union inside array needs parens
        let inner = TsType::Union(vec![
            TsType::Primitive(TsPrimitive::String),
            TsType::Primitive(TsPrimitive::Null),
        ]);
        let ty = TsType::Array(Box::new(inner));
        assert_eq!(ty.emit(), "(string | null)[]");
    }

    #[test]
    fn test_emit_object_type() {
        let ty = TsType::Object(vec![
            TsProp::new("id", TsType::Primitive(TsPrimitive::Number), false),
            TsProp::new("name", TsType::Primitive(TsPrimitive::String), true),
        ]);
        assert_eq!(ty.emit(), "{ id: number; name?: string }");
        assert_eq!(TsType::Object(vec![]).emit(), "{}");
    }

    #[test]
    fn test_emit_intersection_with_union() {
        let ty = TsType::Intersection(vec![
            TsType::Ref("A".into()),
            TsType::Union(vec![TsType::Ref("B".into()), TsType::Ref("C".into())]),
        ]);
        assert_eq!(ty.emit(), "A & (B | C)");
    }

    #[test]
    fn test_emit_interface_with_descriptions() {
        let def = TsTypeDef::interface(
            "GetRequestQuery",
            vec![
                TsProp::new("id", TsType::Primitive(TsPrimitive::String), false)
                    .with_description(Some("user\nid".into())),
                TsProp::new("page-size", TsType::Primitive(TsPrimitive::Number), true),
            ],
        );
        let expected = "export interface GetRequestQuery {\n  id: string; // user id\n  'page-size'?: number;\n}\n";
        assert_eq!(def.emit(), expected);
    }

    #[test]
    fn test_emit_empty_interface() {
        let def = TsTypeDef::interface("Empty", vec![]);
        assert_eq!(def.emit(), "export interface Empty {}\n");
    }

    #[test]
    fn test_emit_type_alias() {
        let def = TsTypeDef::alias(
            "GetFullRequest",
            TsType::Intersection(vec![TsType::Ref("A".into()), TsType::Ref("B".into())]),
        );
        assert_eq!(def.emit(), "export type GetFullRequest = A & B;\n");
    }

    #[test]
    fn test_emit_marker() {
        let def = TsTypeDef {
            name: "GetRequest".into(),
            kind: TypeDefKind::Marker {
                combines: vec!["A".into(), "B".into()],
            },
        };
        let out = def.emit();
        assert!(out.starts_with("// Combines: A, B\n"));
        assert!(out.ends_with("export interface GetRequest {}\n"));
    }

    #[test]
    fn test_emit_selector() {
        let def = TsTypeDef {
            name: "GetParams".into(),
            kind: TypeDefKind::Selector {
                param: "T".into(),
                discriminants: vec!["params".into(), "full".into()],
                branches: vec![("params".into(), TsType::Ref("GetRequestParams".into()))],
                fallback: TsType::Ref("GetFullRequest".into()),
            },
        };
        let expected = "export type GetParams<T extends 'params' | 'full'> =\n  T extends 'params' ? GetRequestParams :\n  GetFullRequest;\n";
        assert_eq!(def.emit(), expected);
    }
}
