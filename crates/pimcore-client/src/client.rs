//! Resource bridge: the public CRUD/search surface.

use crate::config::ConnectionConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::resource;
use crate::transport::{self, ApiSuccess};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// Client for one backend server.
///
/// Holds the immutable [`ConnectionConfig`] and the underlying
/// `reqwest::Client`. Cloning is cheap; both parts are shared handles or
/// plain data.
#[derive(Debug, Clone)]
pub struct PimcoreClient {
    config: ConnectionConfig,
    http: reqwest::Client,
}

impl PimcoreClient {
    /// Build a client from the given configuration.
    pub fn new(config: ConnectionConfig) -> BridgeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BridgeError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, http })
    }

    /// Build a client from `PIMCORE_URL` / `PIMCORE_API_KEY`.
    pub fn from_env() -> BridgeResult<Self> {
        Self::new(ConnectionConfig::from_env())
    }

    /// Build a client around a pre-built `reqwest::Client` (for testing).
    #[must_use]
    pub fn with_http_client(config: ConnectionConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// The configuration this client was constructed with.
    #[must_use]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Absolute URL for a REST action:
    /// `<server>/webservice/rest/<action>?apikey=<key><extra>`.
    ///
    /// `api_key` overrides the configured key for this URL only. `extra`
    /// must already start with `&` when non-empty. No escaping is applied;
    /// callers are responsible for percent-encoding values containing
    /// reserved characters. A missing server or key passes through as an
    /// empty segment.
    #[must_use]
    pub fn rest_url(&self, action: &str, api_key: Option<&str>, extra: &str) -> String {
        let key = api_key.unwrap_or(&self.config.api_key);
        format!(
            "{}/webservice/rest/{}?apikey={}{}",
            self.config.server_url, action, key, extra
        )
    }

    async fn dispatch(
        &self,
        method: Method,
        url: String,
        body: Option<Value>,
    ) -> BridgeResult<ApiSuccess> {
        transport::request(&self.http, method, &url, body.as_ref(), &self.config.response).await
    }

    /// Fetch a resource by id, or the whole collection when `id` is `None`.
    ///
    /// The `inheritance` and `light` modifiers only apply to resource types
    /// that support them; on any other type they are dropped silently.
    pub async fn get(
        &self,
        resource: &str,
        id: Option<i64>,
        params: &GetParams,
    ) -> BridgeResult<ApiSuccess> {
        let Some(id) = id else {
            return self
                .dispatch(Method::GET, self.rest_url(resource, None, ""), None)
                .await;
        };

        let extra = resource::fetch_extension(resource)
            .and_then(|extension| {
                params
                    .value_for(extension)
                    .map(|value| format!("&{extension}={value}"))
            })
            .unwrap_or_default();

        self.dispatch(
            Method::GET,
            self.rest_url(&format!("{resource}/id/{id}"), None, &extra),
            None,
        )
        .await
    }

    /// Create a resource. The backend expects at least `parentId`, `key`
    /// and `type` in `params`.
    pub async fn create(&self, resource: &str, params: &Value) -> BridgeResult<ApiSuccess> {
        self.dispatch(
            Method::POST,
            self.rest_url(resource, None, ""),
            Some(params.clone()),
        )
        .await
    }

    /// Update a resource by shallow-merging `params` over its current
    /// state and putting the merged object back.
    ///
    /// `params` must carry an `id`; with no `id` this returns a validation
    /// error, and with `id` alone there is nothing to merge and a
    /// validation error is returned as well. Neither case issues a network
    /// call. The put always targets the type-agnostic `object` endpoint.
    pub async fn update(&self, resource: &str, params: &Value) -> BridgeResult<ApiSuccess> {
        let Some(fields) = params.as_object() else {
            return Err(BridgeError::validation("no id provided"));
        };
        let Some(id) = fields.get("id").and_then(Value::as_i64) else {
            return Err(BridgeError::validation("no id provided"));
        };
        if fields.len() == 1 {
            return Err(BridgeError::validation("nothing to update"));
        }

        let current = self.get(resource, Some(id), &GetParams::default()).await?;
        let mut merged = current.into_data();
        if let Some(target) = merged.as_object_mut() {
            for (key, value) in fields {
                target.insert(key.clone(), value.clone());
            }
        }

        self.dispatch(Method::PUT, self.rest_url("object", None, ""), Some(merged))
            .await
    }

    /// Delete a resource by id.
    pub async fn remove(&self, resource: &str, id: i64) -> BridgeResult<ApiSuccess> {
        self.dispatch(
            Method::DELETE,
            self.rest_url(&format!("{resource}/id/{id}"), None, ""),
            None,
        )
        .await
    }

    /// Check which of the given ids exist. With `condense` set, the reply
    /// is restricted to the ids that do not exist.
    pub async fn exists(
        &self,
        resource: &str,
        ids: &[i64],
        condense: bool,
    ) -> BridgeResult<ApiSuccess> {
        let joined = ids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let extra = format!("&ids={joined}&condense={}", u8::from(condense));
        self.dispatch(
            Method::GET,
            self.rest_url(&format!("{resource}-inquire"), None, &extra),
            None,
        )
        .await
    }

    /// Search resources matching `query` on the `<resource>-list` endpoint.
    ///
    /// `resource` may be a plural or alternate spelling; it is resolved
    /// through [`resource::canonical_search_name`].
    pub async fn search(&self, resource: &str, query: &SearchQuery) -> BridgeResult<ApiSuccess> {
        self.search_endpoint(resource, query, "list").await
    }

    /// Count resources matching `query` on the `<resource>-count` endpoint.
    pub async fn count(&self, resource: &str, query: &SearchQuery) -> BridgeResult<ApiSuccess> {
        self.search_endpoint(resource, query, "count").await
    }

    async fn search_endpoint(
        &self,
        resource: &str,
        query: &SearchQuery,
        kind: &str,
    ) -> BridgeResult<ApiSuccess> {
        let name = resource::canonical_search_name(resource);
        self.dispatch(
            Method::GET,
            self.rest_url(&format!("{name}-{kind}"), None, &query.to_query_string()),
            None,
        )
        .await
    }

    /// Fetch the user owning the given API key (the configured key when
    /// `api_key` is `None`).
    pub async fn get_user(&self, api_key: Option<&str>) -> BridgeResult<ApiSuccess> {
        self.dispatch(Method::GET, self.rest_url("user", api_key, ""), None)
            .await
    }

    /// Fetch server information.
    pub async fn server_info(&self) -> BridgeResult<ApiSuccess> {
        self.dispatch(Method::GET, self.rest_url("server-info", None, ""), None)
            .await
    }

    /// Fetch the server clock.
    pub async fn server_time(&self) -> BridgeResult<ApiSuccess> {
        self.dispatch(Method::GET, self.rest_url("system-clock", None, ""), None)
            .await
    }
}

/// Modifiers for fetch-by-id requests. Each one applies only to resource
/// types that support it (see [`crate::resource`]).
#[derive(Debug, Clone, Copy, Default)]
pub struct GetParams {
    /// Inheritance depth, supported by `object`.
    pub inheritance: Option<u32>,
    /// Light rendition flag, supported by `asset` and `image`.
    pub light: Option<u32>,
}

impl GetParams {
    /// Request inherited attribute resolution.
    #[must_use]
    pub fn inheritance(value: u32) -> Self {
        Self {
            inheritance: Some(value),
            light: None,
        }
    }

    /// Request the light rendition.
    #[must_use]
    pub fn light(value: u32) -> Self {
        Self {
            inheritance: None,
            light: Some(value),
        }
    }

    pub(crate) fn value_for(&self, extension: &str) -> Option<u32> {
        match extension {
            "inheritance" => self.inheritance,
            "light" => self.light,
            _ => None,
        }
    }
}

/// Ordered search parameters, serialized onto the query string in
/// insertion order.
///
/// The default query carries `limit=100`. The `q` key is JSON-serialized
/// so structured criteria survive interpolation; every other value is
/// rendered bare. No percent-encoding is applied (see
/// [`PimcoreClient::rest_url`]).
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pairs: Vec<(String, Value)>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            pairs: vec![("limit".to_string(), Value::from(100))],
        }
    }
}

impl SearchQuery {
    /// The default query with `limit=100`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A query with no parameters at all.
    #[must_use]
    pub fn empty() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Set a parameter, replacing an earlier value for the same key in
    /// place (the key keeps its original position).
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(existing, _)| *existing == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    /// Set the result limit.
    #[must_use]
    pub fn limit(self, limit: u64) -> Self {
        self.param("limit", limit)
    }

    /// Set the result offset.
    #[must_use]
    pub fn offset(self, offset: u64) -> Self {
        self.param("offset", offset)
    }

    /// Set the structured `q` criteria object.
    #[must_use]
    pub fn q(self, criteria: Value) -> Self {
        self.param("q", criteria)
    }

    pub(crate) fn to_query_string(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.pairs {
            let rendered = if key == "q" {
                value.to_string()
            } else {
                render_scalar(value)
            };
            out.push('&');
            out.push_str(key);
            out.push('=');
            out.push_str(&rendered);
        }
        out
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConnectionConfig;
    use serde_json::json;

    fn client() -> PimcoreClient {
        PimcoreClient::with_http_client(
            ConnectionConfig::new("https://fake-pimcore.org", "fakekey"),
            reqwest::Client::new(),
        )
    }

    #[test]
    fn rest_url_matches_the_wire_shape() {
        assert_eq!(
            client().rest_url("object/id/1281", None, ""),
            "https://fake-pimcore.org/webservice/rest/object/id/1281?apikey=fakekey"
        );
    }

    #[test]
    fn rest_url_prefers_the_call_site_key() {
        assert_eq!(
            client().rest_url("object/id/1281", Some("alternateApiKey"), ""),
            "https://fake-pimcore.org/webservice/rest/object/id/1281?apikey=alternateApiKey"
        );
    }

    #[test]
    fn rest_url_appends_extra_query_untouched() {
        assert_eq!(
            client().rest_url("object/id/1281", None, "&inheritance=1"),
            "https://fake-pimcore.org/webservice/rest/object/id/1281?apikey=fakekey&inheritance=1"
        );
    }

    #[test]
    fn rest_url_passes_empty_config_through() {
        let bare = PimcoreClient::with_http_client(
            ConnectionConfig::new("", ""),
            reqwest::Client::new(),
        );
        assert_eq!(bare.rest_url("user", None, ""), "/webservice/rest/user?apikey=");
    }

    #[test]
    fn search_query_serializes_in_insertion_order() {
        let query = SearchQuery::new().limit(45).offset(97);
        assert_eq!(query.to_query_string(), "&limit=45&offset=97");
    }

    #[test]
    fn search_query_default_carries_limit_100() {
        assert_eq!(SearchQuery::new().to_query_string(), "&limit=100");
        assert_eq!(SearchQuery::empty().to_query_string(), "");
    }

    #[test]
    fn search_query_json_serializes_q() {
        let query = SearchQuery::empty().q(json!({"o_type": "folder"}));
        assert_eq!(query.to_query_string(), "&q={\"o_type\":\"folder\"}");
    }

    #[test]
    fn search_query_renders_strings_bare() {
        let query = SearchQuery::empty().param("orderKey", "o_modificationDate");
        assert_eq!(query.to_query_string(), "&orderKey=o_modificationDate");
    }
}
