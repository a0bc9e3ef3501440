//! Interface summaries and details.

use crate::schema::PrimitiveKind;

/// One entry of the interface listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceSummary {
    /// YAPI interface id
    pub id: u64,
    /// Display title
    pub title: String,
    /// Request path, e.g. `/api/user/get`
    pub path: String,
    /// HTTP method as YAPI reports it
    pub method: String,
    /// Category the interface is listed under
    pub category_name: String,
}

/// A path or query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Parameter name as sent on the wire
    pub name: String,
    /// Declared type, `string` when YAPI leaves it out
    pub kind: PrimitiveKind,
    /// Whether the parameter must be present
    pub required: bool,
    /// Free-text description, possibly empty
    pub description: String,
}

/// Full definition of one interface.
///
/// Body schemas are kept as the embedded JSON text YAPI returns. They are
/// normalized when the parameter set is built, so one broken schema only
/// drops its own declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceDetail {
    /// YAPI interface id
    pub id: u64,
    /// Display title
    pub title: String,
    /// Request path
    pub path: String,
    /// HTTP method as YAPI reports it
    pub method: String,
    /// `req_params`
    pub path_params: Vec<ParamSpec>,
    /// `req_query`
    pub query_params: Vec<ParamSpec>,
    /// `req_body_other`, unparsed
    pub request_body_schema: Option<String>,
    /// `res_body`, unparsed
    pub response_body_schema: Option<String>,
}

impl InterfaceDetail {
    /// Stand-in detail used when fetching the real one failed.
    pub fn degraded(summary: &InterfaceSummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title.clone(),
            path: summary.path.clone(),
            method: summary.method.clone(),
            path_params: Vec::new(),
            query_params: Vec::new(),
            request_body_schema: None,
            response_body_schema: None,
        }
    }

    /// The derived output identity: the last non-empty path segment.
    pub fn interface_name(&self) -> String {
        interface_name(&self.path)
    }
}

/// Last non-empty segment of an interface path, or `index` when there is none.
///
/// Distinct paths can share a last segment (`/a/user/list`, `/b/user/list`);
/// the batch collision policy decides what happens then.
pub fn interface_name(path: &str) -> String {
    path.split('/')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .next_back()
        .unwrap_or("index")
        .to_string()
}
