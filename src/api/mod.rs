use crate::models::{AdminUser, DealSummary};
use crate::storage::SessionStore;
use futures::channel::oneshot;
use futures::future::{self, Either};
use leptos::logging::warn;
use leptos::prelude::set_timeout_with_handle;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:5002";
const DEFAULT_SITE_URL: &str = "http://localhost:5173";
pub(crate) const SETTINGS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Unauthorized,
    Network,
    Http,
    Parse,
    Aborted,
    Timeout,
}

#[derive(Clone, Debug, thiserror::Error)]
#[error("{message}")]
pub(crate) struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn network(e: impl std::fmt::Display) -> Self {
        Self::new(ApiErrorKind::Network, e.to_string())
    }

    pub fn parse(e: impl std::fmt::Display) -> Self {
        Self::new(ApiErrorKind::Parse, e.to_string())
    }

    pub fn unauthorized() -> Self {
        Self {
            status: Some(401),
            ..Self::new(
                ApiErrorKind::Unauthorized,
                "Authentication failed. Please login again.",
            )
        }
    }

    pub fn aborted() -> Self {
        Self::new(ApiErrorKind::Aborted, "Request cancelled")
    }

    pub fn timeout(after: Duration) -> Self {
        Self::new(
            ApiErrorKind::Timeout,
            format!("Request timed out after {}ms", after.as_millis()),
        )
    }

    /// Prefix the message, keeping kind and status.
    pub fn context(mut self, what: &str) -> Self {
        self.message = format!("{}: {}", what, self.message);
        self
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(ApiErrorKind::Http, message)
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == ApiErrorKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

/// Pull a human message out of an error body: `{error}` first, then `{message}`.
pub(crate) fn error_message_from_body(body: &str, fallback: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"].iter().find_map(|k| {
                v.get(*k)
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .map(str::to_string)
            })
        })
        .unwrap_or_else(|| fallback.to_string())
}

/// List endpoints answer with a bare array, `{value: [...]}` or `{data: [...]}`.
pub(crate) fn extract_list(data: Value) -> ApiResult<Vec<Value>> {
    match data {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            for key in ["value", "data"] {
                if let Some(Value::Array(items)) = map.remove(key) {
                    return Ok(items);
                }
            }
            Err(ApiError::parse(
                "Invalid response shape: expected an array or { value: [] } or { data: [] }",
            ))
        }
        _ => Err(ApiError::parse(
            "Invalid response shape: expected an array or { value: [] } or { data: [] }",
        )),
    }
}

/// Decode list items one by one; malformed rows are skipped.
pub(crate) fn decode_list<T: DeserializeOwned>(data: Value) -> ApiResult<Vec<T>> {
    let items = extract_list(data)?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match serde_json::from_value::<T>(item) {
            Ok(v) => out.push(v),
            Err(e) => warn!("skipping malformed list item: {e}"),
        }
    }
    Ok(out)
}

/// Single-record endpoints sometimes wrap the document in `{data: {...}}`.
pub(crate) fn extract_record(data: Value) -> Value {
    match data {
        Value::Object(mut map) if matches!(map.get("data"), Some(Value::Object(_))) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Resolve with the request, or with a timeout error once `timer` fires first.
pub(crate) async fn race_timeout<T>(
    request: impl Future<Output = ApiResult<T>>,
    timer: impl Future<Output = ()>,
    after: Duration,
) -> ApiResult<T> {
    futures::pin_mut!(request, timer);
    match future::select(request, timer).await {
        Either::Left((res, _)) => res,
        Either::Right(((), _)) => Err(ApiError::timeout(after)),
    }
}

/// Fires after `after` on the browser clock. Never fires if the timeout cannot be scheduled.
fn browser_timer(after: Duration) -> impl Future<Output = ()> {
    let (tx, rx) = oneshot::channel::<()>();
    let scheduled = set_timeout_with_handle(
        move || {
            let _ = tx.send(());
        },
        after,
    )
    .is_ok();
    async move {
        if scheduled {
            let _ = rx.await;
        } else {
            future::pending::<()>().await;
        }
    }
}

/// Make a configured backend URL absolute: trim, drop trailing slashes, default to https.
pub(crate) fn normalize_backend_url(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_API_URL.to_string();
    };
    let trimmed = raw.trim_end_matches('/');
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct EnvConfig {
    pub api_url: String,
    pub upload_url: Option<String>,
    /// Public site, used for "View Blog" links.
    pub site_url: String,
}

fn read_env_string(env: &wasm_bindgen::JsValue, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        js_sys::Reflect::get(env, &(*k).into())
            .ok()
            .and_then(|v| v.as_string())
    })
}

impl EnvConfig {
    /// Read `window.ENV` (`API_URL` or `api_url`, optional `UPLOAD_URL`).
    pub fn new() -> Self {
        let env = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .map(wasm_bindgen::JsValue::from)
            .filter(|env| !env.is_undefined() && env.is_object());

        match env {
            Some(env) => Self::from_parts(
                read_env_string(&env, &["API_URL", "api_url"]).as_deref(),
                read_env_string(&env, &["UPLOAD_URL", "upload_url"]).as_deref(),
            )
            .with_site_url(read_env_string(&env, &["SITE_URL", "site_url"]).as_deref()),
            None => Self::from_parts(None, None),
        }
    }

    pub fn from_parts(api_url: Option<&str>, upload_url: Option<&str>) -> Self {
        let api_url = normalize_backend_url(api_url);
        let upload_url = upload_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self {
            api_url,
            upload_url,
            site_url: DEFAULT_SITE_URL.to_string(),
        }
    }

    pub fn with_site_url(mut self, site_url: Option<&str>) -> Self {
        if let Some(url) = site_url.map(str::trim).filter(|s| !s.is_empty()) {
            self.site_url = url.trim_end_matches('/').to_string();
        }
        self
    }

    pub fn blog_url(&self, slug: &str) -> Option<String> {
        let slug = slug.trim();
        (!slug.is_empty()).then(|| format!("{}/blog/{}", self.site_url, slug))
    }

    pub fn upload_endpoint(&self) -> String {
        self.upload_url
            .clone()
            .unwrap_or_else(|| format!("{}/api/upload", self.api_url))
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Collection {
    Blogs,
    Comparisons,
    Reviews,
    Deals,
    Authors,
}

impl Collection {
    pub fn path(self) -> &'static str {
        match self {
            Collection::Blogs => "blogs",
            Collection::Comparisons => "comparisons",
            Collection::Reviews => "reviews",
            Collection::Deals => "deals",
            Collection::Authors => "authors",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Collection::Blogs => "blog",
            Collection::Comparisons => "comparison",
            Collection::Reviews => "review",
            Collection::Deals => "deal",
            Collection::Authors => "author",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct LoginResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub token: String,
    pub user: AdminUser,
}

pub(crate) fn parse_login_response(data: Value) -> ApiResult<LoginResponse> {
    serde_json::from_value::<LoginResponse>(data)
        .ok()
        .filter(|r| !r.token.trim().is_empty())
        .ok_or_else(|| ApiError::parse("Invalid response from server"))
}

pub(crate) fn parse_upload_response(data: &Value) -> ApiResult<String> {
    ["secure_url", "url"]
        .iter()
        .find_map(|k| data.get(*k).and_then(Value::as_str))
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::parse("Upload response is missing a url"))
}

/// Persistence seam used by the submit pipeline.
pub(crate) trait ContentApi {
    async fn create(&self, collection: Collection, body: &Value) -> ApiResult<Value>;
    async fn update(&self, collection: Collection, id: &str, body: &Value) -> ApiResult<Value>;
    /// The singleton settings document behind a collection's public landing page.
    async fn fetch_page_settings(&self, collection: Collection) -> ApiResult<Value>;
    async fn update_page_settings(&self, collection: Collection, body: &Value) -> ApiResult<Value>;
}

/// File bytes in, hosted URL out.
pub(crate) trait UploadService {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<String>;
}

fn with_auth_headers(
    mut req: reqwest::RequestBuilder,
    token: Option<&str>,
) -> reqwest::RequestBuilder {
    if let Some(token) = token {
        req = req.header("Authorization", format!("Bearer {}", token));
    }
    req
}

/// Send, map 401, extract server messages and parse JSON. Empty bodies become `null`.
async fn send_json(req: reqwest::RequestBuilder) -> ApiResult<Value> {
    let res = req.send().await.map_err(ApiError::network)?;
    let status = res.status();
    if status.as_u16() == 401 {
        return Err(ApiError::unauthorized());
    }
    let text = res.text().await.map_err(ApiError::network)?;
    if !status.is_success() {
        return Err(ApiError::http(
            status.as_u16(),
            error_message_from_body(&text, "Request failed"),
        ));
    }
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&text).map_err(ApiError::parse)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
        }
    }

    pub fn from_session() -> Self {
        Self::new(EnvConfig::new().api_url, SessionStore::token())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn collection_url(&self, collection: Collection) -> String {
        format!("{}/api/{}", self.base_url, collection.path())
    }

    pub fn record_url(&self, collection: Collection, id: &str) -> String {
        format!(
            "{}/{}",
            self.collection_url(collection),
            urlencoding::encode(id)
        )
    }

    pub fn page_settings_url(&self, collection: Collection) -> String {
        format!("{}/page/settings", self.collection_url(collection))
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        let req = reqwest::Client::new().request(method, url);
        with_auth_headers(req, self.token.as_deref())
    }

    pub async fn list(&self, collection: Collection) -> ApiResult<Vec<Value>> {
        let url = self.collection_url(collection);
        extract_list(send_json(self.request(reqwest::Method::GET, url)).await?)
    }

    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> ApiResult<Vec<T>> {
        let url = self.collection_url(collection);
        decode_list(send_json(self.request(reqwest::Method::GET, url)).await?)
    }

    pub async fn fetch_one(&self, collection: Collection, id: &str) -> ApiResult<Value> {
        let url = self.record_url(collection, id);
        let data = send_json(self.request(reqwest::Method::GET, url)).await?;
        Ok(extract_record(data))
    }

    pub async fn delete(&self, collection: Collection, id: &str) -> ApiResult<()> {
        let url = self.record_url(collection, id);
        send_json(self.request(reqwest::Method::DELETE, url))
            .await
            .map(|_| ())
    }

    pub async fn search_deals(&self, query: &str) -> ApiResult<Vec<DealSummary>> {
        let url = format!(
            "{}?q={}",
            self.collection_url(Collection::Deals),
            urlencoding::encode(query.trim())
        );
        decode_list(send_json(self.request(reqwest::Method::GET, url)).await?)
    }

    /// `POST /api/auth/login`. Rejected credentials surface as `Http`, not `Unauthorized`.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let url = format!("{}/api/auth/login", self.base_url);
        let res = reqwest::Client::new()
            .post(url)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status();
        let text = res.text().await.map_err(ApiError::network)?;
        if !status.is_success() {
            return Err(ApiError::http(
                status.as_u16(),
                error_message_from_body(&text, "Login failed"),
            ));
        }
        let data: Value = serde_json::from_str(&text)
            .map_err(|_| ApiError::parse("Invalid response from server"))?;
        parse_login_response(data)
    }
}

impl ContentApi for ApiClient {
    async fn create(&self, collection: Collection, body: &Value) -> ApiResult<Value> {
        let url = self.collection_url(collection);
        send_json(self.request(reqwest::Method::POST, url).json(body)).await
    }

    async fn update(&self, collection: Collection, id: &str, body: &Value) -> ApiResult<Value> {
        let url = self.record_url(collection, id);
        send_json(self.request(reqwest::Method::PUT, url).json(body)).await
    }

    /// Public read, bounded by [`SETTINGS_TIMEOUT`].
    async fn fetch_page_settings(&self, collection: Collection) -> ApiResult<Value> {
        let url = self.page_settings_url(collection);
        let request = send_json(reqwest::Client::new().get(url));
        race_timeout(request, browser_timer(SETTINGS_TIMEOUT), SETTINGS_TIMEOUT)
            .await
            .map(extract_record)
            .map_err(|e| {
                e.context(&format!("Failed to fetch {} page settings", collection.singular()))
            })
    }

    async fn update_page_settings(&self, collection: Collection, body: &Value) -> ApiResult<Value> {
        let url = self.page_settings_url(collection);
        send_json(self.request(reqwest::Method::PUT, url).json(body))
            .await
            .map(extract_record)
            .map_err(|e| {
                e.context(&format!("Failed to update {} page settings", collection.singular()))
            })
    }
}

#[derive(Clone, Debug)]
pub(crate) struct HttpUploader {
    endpoint: String,
    token: Option<String>,
}

impl HttpUploader {
    pub fn new(endpoint: impl Into<String>, token: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token,
        }
    }

    pub fn from_session() -> Self {
        Self::new(EnvConfig::new().upload_endpoint(), SessionStore::token())
    }
}

impl UploadService for HttpUploader {
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> ApiResult<String> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);
        let req = with_auth_headers(
            reqwest::Client::new().post(&self.endpoint).multipart(form),
            self.token.as_deref(),
        );
        let data = send_json(req).await?;
        parse_upload_response(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use serde_json::json;

    #[test]
    fn test_normalize_backend_url() {
        assert_eq!(normalize_backend_url(None), "http://localhost:5002");
        assert_eq!(normalize_backend_url(Some("   ")), "http://localhost:5002");
        assert_eq!(
            normalize_backend_url(Some(" api.example.com/// ")),
            "https://api.example.com"
        );
        assert_eq!(
            normalize_backend_url(Some("HTTP://localhost:5002/")),
            "HTTP://localhost:5002"
        );
    }

    #[test]
    fn test_upload_endpoint_defaults_to_backend() {
        let env = EnvConfig::from_parts(Some("https://api.test"), None);
        assert_eq!(env.upload_endpoint(), "https://api.test/api/upload");
        let env = EnvConfig::from_parts(None, Some(" https://cdn.test/upload "));
        assert_eq!(env.upload_endpoint(), "https://cdn.test/upload");
    }

    #[test]
    fn test_blog_url_needs_a_slug() {
        let env = EnvConfig::from_parts(None, None);
        assert_eq!(
            env.blog_url("best-notes-apps").as_deref(),
            Some("http://localhost:5173/blog/best-notes-apps")
        );
        assert_eq!(env.blog_url("  "), None);
        let env = env.with_site_url(Some("https://perkpilot.io/"));
        assert_eq!(
            env.blog_url("x").as_deref(),
            Some("https://perkpilot.io/blog/x")
        );
    }

    #[test]
    fn test_extract_list_shapes() {
        assert_eq!(extract_list(json!([1, 2])).map(|v| v.len()).ok(), Some(2));
        assert_eq!(extract_list(json!({"data": [1]})).map(|v| v.len()).ok(), Some(1));
        assert_eq!(
            extract_list(json!({"value": [1, 2, 3]})).map(|v| v.len()).ok(),
            Some(3)
        );

        let err = extract_list(json!({"items": []})).expect_err("unknown shape");
        assert_eq!(err.kind, ApiErrorKind::Parse);
        assert!(extract_list(json!("nope")).is_err());
    }

    #[test]
    fn test_decode_list_skips_malformed_rows() {
        let deals: Vec<DealSummary> =
            decode_list(json!({"data": [{"title": "Notion"}, 42, {"title": "Linear"}]}))
                .expect("list decodes");
        assert_eq!(deals.len(), 2);
        assert_eq!(deals[1].title.as_deref(), Some("Linear"));
    }

    #[test]
    fn test_extract_record_unwraps_data() {
        assert_eq!(extract_record(json!({"data": {"_id": "x"}})), json!({"_id": "x"}));
        assert_eq!(extract_record(json!({"_id": "y", "data": [1]}))["_id"], "y");
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(r#"{"error":"Slug taken"}"#, "Request failed"),
            "Slug taken"
        );
        assert_eq!(error_message_from_body(r#"{"message":"Bad id"}"#, "Request failed"), "Bad id");
        assert_eq!(error_message_from_body("<html>", "Request failed"), "Request failed");
        assert_eq!(error_message_from_body(r#"{"error":""}"#, "Login failed"), "Login failed");
    }

    #[test]
    fn test_parse_login_response() {
        let ok = parse_login_response(json!({
            "message": "ok",
            "token": "t0k",
            "user": {"id": "u1", "email": "a@b.c", "isAdmin": true}
        }))
        .expect("valid login");
        assert_eq!(ok.token, "t0k");
        assert!(ok.user.is_admin);

        for bad in [
            json!({"token": "t"}),
            json!({"token": "", "user": {"id": "u", "email": "e", "isAdmin": false}}),
            json!({"user": {"id": "u", "email": "e", "isAdmin": false}}),
        ] {
            let err = parse_login_response(bad).expect_err("rejected");
            assert_eq!(err.message, "Invalid response from server");
        }
    }

    #[test]
    fn test_parse_upload_response() {
        assert_eq!(
            parse_upload_response(&json!({
                "secure_url": "https://img/1.png",
                "url": "http://img/1.png"
            }))
            .ok()
            .as_deref(),
            Some("https://img/1.png")
        );
        assert_eq!(
            parse_upload_response(&json!({"url": "http://img/2.png"})).ok().as_deref(),
            Some("http://img/2.png")
        );
        assert!(parse_upload_response(&json!({})).is_err());
    }

    #[test]
    fn test_urls() {
        let c = ApiClient::new("https://api.test", None);
        assert_eq!(c.collection_url(Collection::Comparisons), "https://api.test/api/comparisons");
        assert_eq!(c.record_url(Collection::Blogs, "a b"), "https://api.test/api/blogs/a%20b");
        assert!(!c.is_authenticated());
    }

    #[test]
    fn test_settings_url() {
        let c = ApiClient::new("https://api.test", None);
        assert_eq!(
            c.page_settings_url(Collection::Comparisons),
            "https://api.test/api/comparisons/page/settings"
        );
    }

    #[test]
    fn test_slow_request_times_out() {
        let slow = future::pending::<ApiResult<Value>>();
        let err = block_on(race_timeout(slow, future::ready(()), SETTINGS_TIMEOUT))
            .expect_err("timer wins");
        assert_eq!(err.kind, ApiErrorKind::Timeout);
        assert_eq!(err.to_string(), "Request timed out after 10000ms");

        let fast = future::ready(Ok(json!({"comparisonPageHeading": "Compare"})));
        let value = block_on(race_timeout(fast, future::pending(), SETTINGS_TIMEOUT))
            .expect("request wins");
        assert_eq!(value["comparisonPageHeading"], "Compare");
    }

    #[test]
    fn test_context_keeps_kind() {
        let err = ApiError::unauthorized().context("Failed to update comparison page settings");
        assert!(err.is_unauthorized());
        assert_eq!(
            err.to_string(),
            "Failed to update comparison page settings: Authentication failed. Please login again."
        );
    }

    #[test]
    fn test_error_kinds() {
        assert!(ApiError::unauthorized().is_unauthorized());
        assert!(ApiError::http(404, "Blog not found").is_not_found());
        assert_eq!(ApiError::http(500, "boom").to_string(), "boom");
    }
}
