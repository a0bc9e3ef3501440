//! HTTP client for the YAPI open API.

use std::time::Duration;

use futures_util::future::BoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::batch::DetailSource;
use crate::categories::{InterfaceCategory, MenuEntry, index_categories};
use crate::error::FetchError;
use crate::interface::{InterfaceDetail, ParamSpec};
use crate::schema::PrimitiveKind;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const PROJECT_ENDPOINT: &str = "api/project/get";
const MENU_ENDPOINT: &str = "api/interface/list_menu";
const DETAIL_ENDPOINT: &str = "api/interface/get";

/// Every YAPI response is wrapped like this.
///
/// `data` stays untyped until `errcode` has been checked, since error replies
/// carry payloads of arbitrary shape.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    errcode: i64,
    #[serde(default)]
    errmsg: Option<String>,
    data: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ProjectInfo {
    #[serde(rename = "_id")]
    id: u64,
}

#[derive(Debug, Deserialize)]
struct WireDetail {
    #[serde(rename = "_id", default)]
    id: Option<u64>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    req_params: Option<Vec<WireParam>>,
    #[serde(default)]
    req_query: Option<Vec<WireParam>>,
    #[serde(default)]
    req_body_other: Option<String>,
    #[serde(default)]
    res_body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireParam {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default, deserialize_with = "flexible_bool")]
    required: bool,
    #[serde(default)]
    desc: Option<String>,
}

/// YAPI sends `required` as a bool, a number, or `"1"`/`"0"`.
fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > f64::EPSILON),
        Value::String(text) => matches!(text.trim().to_ascii_lowercase().as_str(), "1" | "true"),
        _ => false,
    })
}

impl WireParam {
    fn into_spec(self) -> ParamSpec {
        ParamSpec {
            name: self.name.unwrap_or_default(),
            kind: self
                .kind
                .as_deref()
                .map(str::trim)
                .filter(|kind| !kind.is_empty())
                .map_or(PrimitiveKind::String, PrimitiveKind::parse),
            required: self.required,
            description: self.desc.unwrap_or_default(),
        }
    }
}

impl WireDetail {
    fn into_detail(self, requested_id: u64) -> InterfaceDetail {
        let params = |list: Option<Vec<WireParam>>| -> Vec<ParamSpec> {
            list.unwrap_or_default()
                .into_iter()
                .map(WireParam::into_spec)
                .collect()
        };
        InterfaceDetail {
            id: self.id.unwrap_or(requested_id),
            title: self.title.unwrap_or_default(),
            path: self.path.unwrap_or_default(),
            method: self.method.unwrap_or_default(),
            path_params: params(self.req_params),
            query_params: params(self.req_query),
            request_body_schema: self.req_body_other,
            response_body_schema: self.res_body,
        }
    }
}

/// Client bound to one YAPI server and project token.
#[derive(Debug, Clone)]
pub struct YapiClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

impl YapiClient {
    /// Client with its own HTTP connection pool and a 30 second timeout.
    pub fn new(base_url: Url, token: impl Into<String>) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;
        Ok(Self::with_client(http, base_url, token))
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(http: reqwest::Client, mut base_url: Url, token: impl Into<String>) -> Self {
        // Url::join drops the last path segment unless it ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    /// Server root every endpoint is joined onto. Always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str, query: &[(&str, String)]) -> Result<Url, FetchError> {
        let mut url = self.base_url.join(path)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("token", &self.token);
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// GET an endpoint and unwrap the envelope.
    ///
    /// The token travels in the query string, so only the path is logged.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, FetchError> {
        debug!(endpoint = url.path(), "Sending YAPI request.");
        let envelope: Envelope = self
            .http
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if envelope.errcode != 0 {
            let message = envelope
                .errmsg
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(FetchError::Api {
                errcode: envelope.errcode,
                message,
            });
        }
        envelope
            .data
            .map(serde_json::from_value)
            .transpose()
            .map_err(FetchError::Decode)
    }

    /// Id of the project the token belongs to.
    pub async fn project_id(&self) -> Result<u64, FetchError> {
        let url = self.endpoint(PROJECT_ENDPOINT, &[])?;
        let project: ProjectInfo = self
            .get(url)
            .await?
            .ok_or(FetchError::MissingData("project info"))?;
        debug!(project_id = project.id, "Resolved YAPI project.");
        Ok(project.id)
    }

    /// Raw menu listing of a project. A missing payload is an empty listing.
    pub async fn list_menu(&self, project_id: u64) -> Result<Vec<MenuEntry>, FetchError> {
        let url = self.endpoint(MENU_ENDPOINT, &[("projectId", project_id.to_string())])?;
        Ok(self.get(url).await?.unwrap_or_default())
    }

    /// The token's project listing, grouped into categories.
    pub async fn fetch_categories(&self) -> Result<Vec<InterfaceCategory>, FetchError> {
        let project_id = self.project_id().await?;
        let menu = self.list_menu(project_id).await?;
        let categories = index_categories(&menu);
        info!(
            project_id,
            categories = categories.len(),
            interfaces = categories.iter().map(|c| c.interfaces.len()).sum::<usize>(),
            "Fetched YAPI interface listing."
        );
        Ok(categories)
    }

    /// Full definition of one interface.
    pub async fn interface_detail(&self, id: u64) -> Result<InterfaceDetail, FetchError> {
        let url = self.endpoint(DETAIL_ENDPOINT, &[("id", id.to_string())])?;
        let wire: WireDetail = self
            .get(url)
            .await?
            .ok_or(FetchError::MissingData("interface detail"))?;
        Ok(wire.into_detail(id))
    }
}

impl DetailSource for YapiClient {
    fn fetch_detail(&self, id: u64) -> BoxFuture<'_, Result<InterfaceDetail, FetchError>> {
        Box::pin(self.interface_detail(id))
    }
}
