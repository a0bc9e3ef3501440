//! One TypeScript module per interface.
//!
//! The module layout is fixed: header comment, path params, query params,
//! request body, the combined request helpers (only when at least two request
//! groups exist), and the response last.

use crate::interface::InterfaceDetail;
use crate::params::build_parameter_set;
use crate::typegen::utils::{single_line, symbol_prefix};
use crate::typegen::{Emit, TsType, TsTypeDef, TypeDefKind};

/// Role of a declaration within a generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    /// `{P}RequestParams`
    ParamsShape,
    /// `{P}RequestQuery`
    QueryShape,
    /// `{P}RequestBody`
    BodyShape,
    /// `{P}Request`, naming the groups it combines
    CompositeRequest,
    /// `{P}FullRequest`, the intersection of every group
    FullRequest,
    /// `{P}Params<T>`, picking one group by name
    ParamSelector,
    /// `{P}Response`
    Response,
}

impl DeclarationKind {
    fn section_comment(self) -> &'static str {
        match self {
            DeclarationKind::ParamsShape => "// Path parameters",
            DeclarationKind::QueryShape => "// Query parameters",
            DeclarationKind::BodyShape => "// Request body",
            DeclarationKind::CompositeRequest => "// Combined request",
            DeclarationKind::FullRequest => "// Every request part at once",
            DeclarationKind::ParamSelector => "// Request part selector",
            DeclarationKind::Response => "// Response body",
        }
    }
}

/// A top-level declaration together with its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDeclaration {
    /// Role within the module
    pub kind: DeclarationKind,
    /// The declaration itself
    pub def: TsTypeDef,
}

impl TypeDeclaration {
    /// Exported TypeScript name.
    pub fn symbol_name(&self) -> &str {
        &self.def.name
    }
}

/// Header fields echoed at the top of a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHeader {
    /// Interface title
    pub title: String,
    /// Request path
    pub path: String,
    /// HTTP method, emitted upper-cased
    pub method: String,
}

/// Generated declarations for one interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    /// Last path segment; names the output file
    pub interface_name: String,
    /// Id of the interface this module was generated from
    pub source_interface_id: u64,
    /// Leading comment block
    pub header: ModuleHeader,
    /// Declarations in emission order
    pub declarations: Vec<TypeDeclaration>,
}

impl GeneratedModule {
    /// Default output file name: `<interface_name>.ts`.
    pub fn file_name(&self) -> String {
        format!("{}.ts", self.interface_name)
    }

    /// Look up a declaration by role.
    pub fn declaration(&self, kind: DeclarationKind) -> Option<&TypeDeclaration> {
        self.declarations.iter().find(|d| d.kind == kind)
    }
}

/// Discriminants accepted by the selector type, in emission order.
const SELECTOR_DISCRIMINANTS: [&str; 4] = ["params", "query", "body", "full"];

/// Generate the module for one interface detail.
pub fn generate_module(detail: &InterfaceDetail) -> GeneratedModule {
    let interface_name = detail.interface_name();
    let prefix = symbol_prefix(&interface_name);
    let set = build_parameter_set(detail, &prefix);

    let groups: Vec<(&str, DeclarationKind, &TsTypeDef)> = [
        ("params", DeclarationKind::ParamsShape, set.params.as_ref()),
        ("query", DeclarationKind::QueryShape, set.query.as_ref()),
        ("body", DeclarationKind::BodyShape, set.body.as_ref()),
    ]
    .into_iter()
    .filter_map(|(discriminant, kind, def)| def.map(|def| (discriminant, kind, def)))
    .collect();

    let mut declarations: Vec<TypeDeclaration> = groups
        .iter()
        .map(|(_, kind, def)| TypeDeclaration {
            kind: *kind,
            def: (*def).clone(),
        })
        .collect();

    if groups.len() >= 2 {
        let group_names: Vec<String> = groups.iter().map(|(_, _, def)| def.name.clone()).collect();
        let full_name = format!("{prefix}FullRequest");

        declarations.push(TypeDeclaration {
            kind: DeclarationKind::CompositeRequest,
            def: TsTypeDef {
                name: format!("{prefix}Request"),
                kind: TypeDefKind::Marker {
                    combines: group_names.clone(),
                },
            },
        });
        declarations.push(TypeDeclaration {
            kind: DeclarationKind::FullRequest,
            def: TsTypeDef::alias(
                full_name.clone(),
                TsType::Intersection(group_names.into_iter().map(TsType::Ref).collect()),
            ),
        });
        declarations.push(TypeDeclaration {
            kind: DeclarationKind::ParamSelector,
            def: TsTypeDef {
                name: format!("{prefix}Params"),
                kind: TypeDefKind::Selector {
                    param: "T".to_string(),
                    discriminants: SELECTOR_DISCRIMINANTS.iter().map(|d| (*d).to_string()).collect(),
                    branches: groups
                        .iter()
                        .map(|(discriminant, _, def)| {
                            ((*discriminant).to_string(), TsType::Ref(def.name.clone()))
                        })
                        .collect(),
                    fallback: TsType::Ref(full_name),
                },
            },
        });
    }

    if let Some(response) = set.response {
        declarations.push(TypeDeclaration {
            kind: DeclarationKind::Response,
            def: response,
        });
    }

    GeneratedModule {
        interface_name,
        source_interface_id: detail.id,
        header: ModuleHeader {
            title: detail.title.clone(),
            path: detail.path.clone(),
            method: detail.method.clone(),
        },
        declarations,
    }
}

impl Emit for ModuleHeader {
    fn emit(&self) -> String {
        format!(
            "// Generated by yapi2ts from a YAPI interface definition.\n// Title: {}\n// Path: {}\n// Method: {}\n",
            single_line(&self.title),
            single_line(&self.path),
            single_line(&self.method).to_uppercase(),
        )
    }
}

impl Emit for TypeDeclaration {
    fn emit(&self) -> String {
        format!("{}\n{}", self.kind.section_comment(), self.def.emit())
    }
}

impl Emit for GeneratedModule {
    fn emit(&self) -> String {
        let mut output = self.header.emit();
        for declaration in &self.declarations {
            output.push('\n');
            output.push_str(&declaration.emit());
        }
        output
    }
}
