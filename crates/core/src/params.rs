//! Per-interface parameter and response declarations.

use tracing::{debug, warn};

use crate::interface::{InterfaceDetail, ParamSpec};
use crate::resolver::resolve;
use crate::schema::SchemaNode;
use crate::typegen::{TsProp, TsType, TsTypeDef};

/// The up to four structural declarations derived from one interface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    /// `<Prefix>RequestParams`, from path parameters
    pub params: Option<TsTypeDef>,
    /// `<Prefix>RequestQuery`, from query parameters
    pub query: Option<TsTypeDef>,
    /// `<Prefix>RequestBody`, from the request body schema
    pub body: Option<TsTypeDef>,
    /// `<Prefix>Response`, from the response body schema
    pub response: Option<TsTypeDef>,
}

impl ParameterSet {
    /// The request groups that were produced, in params/query/body order.
    pub fn request_groups(&self) -> Vec<&TsTypeDef> {
        [&self.params, &self.query, &self.body]
            .into_iter()
            .flatten()
            .collect()
    }
}

/// Build the parameter set for an interface.
///
/// Never fails. A body or response schema that can't be parsed, or that
/// declares no properties, only drops its own declaration.
pub fn build_parameter_set(detail: &InterfaceDetail, prefix: &str) -> ParameterSet {
    ParameterSet {
        params: param_group(format!("{prefix}RequestParams"), &detail.path_params),
        query: param_group(format!("{prefix}RequestQuery"), &detail.query_params),
        body: schema_group(
            format!("{prefix}RequestBody"),
            detail.request_body_schema.as_deref(),
            detail.id,
            "request body",
        ),
        response: schema_group(
            format!("{prefix}Response"),
            detail.response_body_schema.as_deref(),
            detail.id,
            "response body",
        ),
    }
}

fn param_group(name: String, params: &[ParamSpec]) -> Option<TsTypeDef> {
    if params.is_empty() {
        return None;
    }

    let properties = params
        .iter()
        .map(|param| {
            let ty = resolve(&SchemaNode::Primitive(param.kind.clone()), &param.name);
            TsProp::new(param.name.clone(), ty, !param.required)
                .with_description(Some(param.description.clone()))
        })
        .collect();

    Some(TsTypeDef::interface(name, properties))
}

fn schema_group(
    name: String,
    schema: Option<&str>,
    interface_id: u64,
    label: &str,
) -> Option<TsTypeDef> {
    let text = schema.map(str::trim).filter(|text| !text.is_empty())?;

    let node = match SchemaNode::parse(text) {
        Ok(node) => node,
        Err(err) => {
            warn!(interface_id, error = %err, "Skipping unparseable {label} schema.");
            return None;
        }
    };

    match resolve(&node, &name) {
        TsType::Object(properties) if !properties.is_empty() => {
            Some(TsTypeDef::interface(name, properties))
        }
        _ => {
            debug!(interface_id, "No {label} properties declared.");
            None
        }
    }
}
