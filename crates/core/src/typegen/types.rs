//! TypeScript IR types for declaration generation.
//!
//! This module defines the subset of the TypeScript type system that generated
//! modules use:
//! - TsType: type expressions (primitives, arrays, unions, intersections, records)
//! - TsProp: a named field of a structural record
//! - TsTypeDef: a top-level `export` declaration

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, undefined, any, object
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Structural record: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// String literal type: 'params'
    Literal(String),
    /// Named type reference
    Ref(String),
}

impl TsType {
    /// The universal permissive type.
    pub const ANY: Self = Self::Primitive(TsPrimitive::Any);

    /// Check if this type is the permissive `any`.
    pub fn is_any(&self) -> bool {
        matches!(self, TsType::Primitive(TsPrimitive::Any))
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// `any`
    Any,
    /// The generic non-primitive `object` type
    Object,
}

/// Field of a structural record type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProp {
    /// Field name, quoted on emission when it is not an identifier
    pub name: String,
    /// Field type
    pub ty: TsType,
    /// Emitted as `name?:`
    pub optional: bool,
    /// Emitted as a trailing line comment on top-level declarations
    pub description: Option<String>,
}

impl TsProp {
    /// Field without a description.
    pub fn new(name: impl Into<String>, ty: TsType, optional: bool) -> Self {
        Self {
            name: name.into(),
            ty,
            optional,
            description: None,
        }
    }

    /// Attach a description. Blank text is dropped.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface {
        /// Fields in declaration order
        properties: Vec<TsProp>,
    },
    /// type Foo = ...
    TypeAlias {
        /// Aliased type expression
        ty: TsType,
    },
    /// interface Foo {} documenting the types it stands for
    Marker {
        /// Names of the declarations this marker stands for
        combines: Vec<String>,
    },
    /// type Foo<T extends 'a' | 'b'> = T extends 'a' ? A : ... : Fallback
    Selector {
        /// Type parameter name
        param: String,
        /// Literal values the parameter is constrained to
        discriminants: Vec<String>,
        /// `(discriminant, type)` pairs tested in order
        branches: Vec<(String, TsType)>,
        /// Type when no branch matches
        fallback: TsType,
    },
}

/// Type definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsTypeDef {
    /// Exported name
    pub name: String,
    /// Declaration shape
    pub kind: TypeDefKind,
}

impl TsTypeDef {
    /// `export interface name { .. }`
    pub fn interface(name: impl Into<String>, properties: Vec<TsProp>) -> Self {
        Self {
            name: name.into(),
            kind: TypeDefKind::Interface { properties },
        }
    }

    /// `export type name = ty;`
    pub fn alias(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            kind: TypeDefKind::TypeAlias { ty },
        }
    }
}
