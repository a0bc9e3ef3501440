//! Schema node to TypeScript type resolution.
//!
//! [`resolve`] is total: every node, however malformed, maps to some type and
//! anything unrecognized becomes `any`. It carries no state, so resolving the
//! same node twice always yields the same type.

use tracing::trace;

use crate::schema::{MAX_SCHEMA_DEPTH, PrimitiveKind, SchemaNode};
use crate::typegen::{TsPrimitive, TsProp, TsType};

/// Resolve a schema node into a TypeScript type expression.
///
/// `name_hint` names the value being resolved (a property name, or the
/// parent's hint suffixed with `Item` for array elements). It only shows up in
/// trace logs when a node degrades to `any`.
pub fn resolve(node: &SchemaNode, name_hint: &str) -> TsType {
    resolve_at(node, name_hint, 0)
}

/// Map a primitive kind through the type table.
///
/// Returns `None` for kinds the table doesn't know about.
pub fn primitive_type(kind: &PrimitiveKind) -> Option<TsType> {
    let ty = match kind {
        PrimitiveKind::String => TsType::Primitive(TsPrimitive::String),
        PrimitiveKind::Number | PrimitiveKind::Integer => TsType::Primitive(TsPrimitive::Number),
        PrimitiveKind::Boolean => TsType::Primitive(TsPrimitive::Boolean),
        PrimitiveKind::Array => TsType::Array(Box::new(TsType::ANY)),
        PrimitiveKind::Object => TsType::Primitive(TsPrimitive::Object),
        PrimitiveKind::Null => TsType::Primitive(TsPrimitive::Null),
        PrimitiveKind::Undefined => TsType::Primitive(TsPrimitive::Undefined),
        PrimitiveKind::Other(_) => return None,
    };
    Some(ty)
}

fn resolve_at(node: &SchemaNode, hint: &str, depth: usize) -> TsType {
    if depth > MAX_SCHEMA_DEPTH {
        trace!(hint, depth, "Schema nesting too deep, using any.");
        return TsType::ANY;
    }

    match node {
        SchemaNode::Primitive(kind) => primitive_type(kind).unwrap_or_else(|| {
            trace!(hint, ?kind, "Unmapped primitive kind, using any.");
            TsType::ANY
        }),
        SchemaNode::Union(variants) => {
            let mut types: Vec<TsType> = variants.iter().filter_map(primitive_type).collect();
            match types.len() {
                0 => {
                    trace!(hint, "Union has no mapped variants, using any.");
                    TsType::ANY
                }
                1 => types.remove(0),
                _ => TsType::Union(types),
            }
        }
        SchemaNode::Array(item) => {
            let item_hint = format!("{hint}Item");
            TsType::Array(Box::new(resolve_at(item, &item_hint, depth + 1)))
        }
        SchemaNode::Object {
            properties,
            required,
        } => TsType::Object(
            properties
                .iter()
                .map(|prop| {
                    TsProp::new(
                        prop.name.clone(),
                        resolve_at(&prop.node, &prop.name, depth + 1),
                        !required.contains(&prop.name),
                    )
                    .with_description(prop.description.clone())
                })
                .collect(),
        ),
        SchemaNode::Unknown => TsType::ANY,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::schema::SchemaProperty;
    use crate::typegen::Emit;

    fn prim(kind: PrimitiveKind) -> SchemaNode {
        SchemaNode::Primitive(kind)
    }

    fn prop(name: &str, node: SchemaNode) -> SchemaProperty {
        SchemaProperty {
            name: name.to_string(),
            node,
            description: None,
        }
    }

    fn object(props: Vec<SchemaProperty>, required: &[&str]) -> SchemaNode {
        SchemaNode::Object {
            properties: props,
            required: required.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn test_primitive_table() {
        let cases = [
            (PrimitiveKind::String, "string"),
            (PrimitiveKind::Number, "number"),
            (PrimitiveKind::Integer, "number"),
            (PrimitiveKind::Boolean, "boolean"),
            (PrimitiveKind::Array, "any[]"),
            (PrimitiveKind::Object, "object"),
            (PrimitiveKind::Null, "null"),
            (PrimitiveKind::Undefined, "undefined"),
            (PrimitiveKind::Other("date".into()), "any"),
        ];
        for (kind, expected) in cases {
            assert_eq!(resolve(&prim(kind), "x").emit(), expected);
        }
    }

    #[test]
    fn test_union_reduction() {
        let two = SchemaNode::Union(vec![PrimitiveKind::String, PrimitiveKind::Null]);
        assert_eq!(resolve(&two, "x").emit(), "string | null");

        let one = SchemaNode::Union(vec![PrimitiveKind::String]);
        assert_eq!(resolve(&one, "x"), TsType::Primitive(TsPrimitive::String));

        let empty = SchemaNode::Union(vec![]);
        assert!(resolve(&empty, "x").is_any());

        let unmapped = SchemaNode::Union(vec![
            PrimitiveKind::Other("date".into()),
            PrimitiveKind::Other("file".into()),
        ]);
        assert!(resolve(&unmapped, "x").is_any());

        let partially = SchemaNode::Union(vec![
            PrimitiveKind::Other("date".into()),
            PrimitiveKind::Integer,
        ]);
        assert_eq!(resolve(&partially, "x").emit(), "number");
    }

    #[test]
    fn test_union_preserves_input_order() {
        let node = SchemaNode::Union(vec![
            PrimitiveKind::Null,
            PrimitiveKind::Boolean,
            PrimitiveKind::String,
        ]);
        assert_eq!(resolve(&node, "x").emit(), "null | boolean | string");
    }

    #[test]
    fn test_array_of_items() {
        let node = SchemaNode::Array(Box::new(SchemaNode::Union(vec![
            PrimitiveKind::String,
            PrimitiveKind::Number,
        ])));
        assert_eq!(resolve(&node, "tags").emit(), "(string | number)[]");
    }

    #[test]
    fn test_object_order_and_optionality() {
        let node = object(
            vec![
                prop("c", prim(PrimitiveKind::String)),
                prop("a", prim(PrimitiveKind::Integer)),
                prop("b", prim(PrimitiveKind::Boolean)),
            ],
            &["a"],
        );
        assert_eq!(
            resolve(&node, "root").emit(),
            "{ c?: string; a: number; b?: boolean }"
        );
    }

    #[test]
    fn test_empty_object_differs_from_bare_object() {
        let empty = object(vec![], &[]);
        assert_eq!(resolve(&empty, "x").emit(), "{}");
        assert_eq!(resolve(&prim(PrimitiveKind::Object), "x").emit(), "object");
    }

    #[test]
    fn test_nested_structures() {
        let node = object(
            vec![prop(
                "items",
                SchemaNode::Array(Box::new(object(
                    vec![prop("id", prim(PrimitiveKind::Integer))],
                    &["id"],
                ))),
            )],
            &[],
        );
        assert_eq!(resolve(&node, "root").emit(), "{ items?: { id: number }[] }");
    }

    #[test]
    fn test_unknown_is_any() {
        assert!(resolve(&SchemaNode::Unknown, "x").is_any());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let node = object(
            vec![
                prop("name", prim(PrimitiveKind::String)),
                prop("meta", SchemaNode::Union(vec![PrimitiveKind::Object, PrimitiveKind::Null])),
            ],
            &["name"],
        );
        assert_eq!(resolve(&node, "x"), resolve(&node, "x"));
    }

    #[test]
    fn test_deep_nesting_degrades_to_any() {
        let mut node = prim(PrimitiveKind::String);
        for _ in 0..(MAX_SCHEMA_DEPTH + 5) {
            node = SchemaNode::Array(Box::new(node));
        }
        let emitted = resolve(&node, "deep").emit();
        assert!(emitted.starts_with("any"));
        assert!(!emitted.contains("string"));
    }

    #[test]
    fn test_required_names_outside_properties_are_ignored() {
        let node = SchemaNode::Object {
            properties: vec![prop("a", prim(PrimitiveKind::String))],
            required: BTreeSet::from(["missing".to_string()]),
        };
        assert_eq!(resolve(&node, "x").emit(), "{ a?: string }");
    }

    use proptest::prelude::*;

    fn primitive_kind() -> impl Strategy<Value = PrimitiveKind> {
        prop_oneof![
            Just(PrimitiveKind::String),
            Just(PrimitiveKind::Number),
            Just(PrimitiveKind::Integer),
            Just(PrimitiveKind::Boolean),
            Just(PrimitiveKind::Array),
            Just(PrimitiveKind::Object),
            Just(PrimitiveKind::Null),
            Just(PrimitiveKind::Undefined),
            "[a-zA-Z]{0,8}".prop_map(PrimitiveKind::Other),
        ]
    }

    fn properties(
        node: impl Strategy<Value = SchemaNode>,
    ) -> impl Strategy<Value = Vec<SchemaProperty>> {
        prop::collection::vec(
            ("[a-z_]{1,6}", node, prop::option::of("[a-z ]{0,12}")),
            0..6,
        )
        .prop_map(|props| {
            props
                .into_iter()
                .map(|(name, node, description)| SchemaProperty {
                    name,
                    node,
                    description,
                })
                .collect()
        })
    }

    fn schema_node() -> impl Strategy<Value = SchemaNode> {
        let leaf = prop_oneof![
            primitive_kind().prop_map(SchemaNode::Primitive),
            prop::collection::vec(primitive_kind(), 0..4).prop_map(SchemaNode::Union),
            Just(SchemaNode::Unknown),
        ];
        leaf.prop_recursive(5, 48, 6, |inner| {
            prop_oneof![
                inner
                    .clone()
                    .prop_map(|node| SchemaNode::Array(Box::new(node))),
                (
                    properties(inner),
                    prop::collection::btree_set("[a-z_]{1,6}", 0..4),
                )
                    .prop_map(|(properties, required)| SchemaNode::Object {
                        properties,
                        required,
                    }),
            ]
        })
    }

    proptest! {
        #[test]
        fn resolve_is_total_and_deterministic(node in schema_node()) {
            let first = resolve(&node, "root");
            let second = resolve(&node, "root");
            prop_assert_eq!(first.emit(), second.emit());
            prop_assert_eq!(first, second);
        }

        #[test]
        fn object_fields_keep_order_and_optionality(
            props in properties(schema_node()),
            required in prop::collection::btree_set("[a-z_]{1,6}", 0..4),
        ) {
            let node = SchemaNode::Object {
                properties: props.clone(),
                required: required.clone(),
            };
            let TsType::Object(fields) = resolve(&node, "root") else {
                return Err(TestCaseError::fail("object node did not resolve to a record"));
            };
            prop_assert_eq!(fields.len(), props.len());
            for (field, prop) in fields.iter().zip(&props) {
                prop_assert_eq!(&field.name, &prop.name);
                prop_assert_eq!(field.optional, !required.contains(&prop.name));
                prop_assert_eq!(&field.ty, &resolve(&prop.node, &prop.name));
            }
        }
    }
}
