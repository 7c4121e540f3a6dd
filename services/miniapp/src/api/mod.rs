//! HTTP client adapter for the backend REST API
//!
//! Wraps a generic transport with bearer-token injection and a
//! single-retry-on-401 re-authentication flow. The transport itself is a
//! trait so the whole client can run against an in-memory fake in tests.

mod moderator;
mod orders;
mod products;
mod users;

pub use users::{InviteLink, UserFilters};

use std::sync::Arc;
use std::time::Duration;

use common::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::session::SessionManager;
use crate::telegram::TelegramBridge;

/// HTTP method subset the backend API uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

/// One part of a multipart file upload
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    /// A PNG screenshot part with the given file name
    pub fn png(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: "image/png".to_string(),
            bytes,
        }
    }
}

/// A single multipart form field
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    Text(String),
    File(FilePart),
}

/// An owned multipart form, built up field by field.
///
/// Keeping this independent of the HTTP library makes step payload builders
/// pure functions that tests can inspect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: Vec<(String, FormValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), FormValue::Text(value.into())));
        self
    }

    /// Append a file field
    pub fn file(mut self, name: impl Into<String>, part: FilePart) -> Self {
        self.fields.push((name.into(), FormValue::File(part)));
        self
    }

    /// All fields in insertion order
    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    /// Look up a text field by name
    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FormValue::Text(s) if n == name => Some(s.as_str()),
            _ => None,
        })
    }

    /// Whether a field with the given name is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }
}

/// Request body shapes the backend accepts
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(FormData),
}

/// A transport-agnostic request description
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(Method::Post, path);
        request.body = RequestBody::Json(body);
        request
    }

    pub fn patch_json(path: impl Into<String>, body: Value) -> Self {
        let mut request = Self::new(Method::Patch, path);
        request.body = RequestBody::Json(body);
        request
    }

    pub fn post_multipart(path: impl Into<String>, form: FormData) -> Self {
        let mut request = Self::new(Method::Post, path);
        request.body = RequestBody::Multipart(form);
        request
    }

    pub fn patch_multipart(path: impl Into<String>, form: FormData) -> Self {
        let mut request = Self::new(Method::Patch, path);
        request.body = RequestBody::Multipart(form);
        request
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A raw response: status plus body text
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> ApiResult<T> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::Decode(format!("{e}: {}", truncate(&self.body))))
    }
}

fn truncate(body: &str) -> &str {
    let end = body
        .char_indices()
        .take(200)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    &body[..end]
}

/// The wire-level sender behind the API client
pub trait Transport: Send + Sync {
    /// Perform the request, returning a response for any HTTP status.
    ///
    /// `Err` is reserved for transport-level failures where no status was
    /// received.
    fn send(&self, request: ApiRequest) -> impl Future<Output = ApiResult<ApiResponse>> + Send;
}

/// Production transport backed by reqwest
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base: String,
}

impl HttpTransport {
    /// Build a transport against the given API base URL
    pub fn new(api_base: &str, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn build_multipart(form: &FormData) -> ApiResult<reqwest::multipart::Form> {
        let mut multipart = reqwest::multipart::Form::new();
        for (name, value) in form.fields() {
            multipart = match value {
                FormValue::Text(text) => multipart.text(name.clone(), text.clone()),
                FormValue::File(part) => {
                    let file = reqwest::multipart::Part::bytes(part.bytes.clone())
                        .file_name(part.filename.clone())
                        .mime_str(&part.content_type)
                        .map_err(|e| ApiError::Transport(e.to_string()))?;
                    multipart.part(name.clone(), file)
                }
            };
        }
        Ok(multipart)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let url = format!("{}{}", self.base, request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, url).query(&request.query);

        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(form) => builder.multipart(Self::build_multipart(form)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

/// Bearer-injecting API client with the single-retry-on-401 flow
pub struct ApiClient<T: Transport, B: TelegramBridge> {
    transport: Arc<T>,
    session: SessionManager<T, B>,
}

impl<T: Transport, B: TelegramBridge> ApiClient<T, B> {
    pub fn new(transport: Arc<T>, session: SessionManager<T, B>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionManager<T, B> {
        &self.session
    }

    /// Send a request with the stored bearer token; on 401, re-authenticate
    /// (single-flight across concurrent callers) and retry exactly once.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let token = self.session.store().access_token();

        let mut first = request.clone();
        first.bearer = token.clone();
        let response = self.transport.send(first).await?;

        if response.status != 401 {
            return check(response);
        }

        debug!(path = %request.path, "got 401, re-authenticating");
        self.session.reauthenticate(token.as_deref()).await?;

        let mut retry = request;
        retry.bearer = self.session.store().access_token();
        let response = self.transport.send(retry).await?;

        if response.status == 401 {
            warn!("request still unauthorized after re-authentication");
            return Err(ApiError::Unauthorized);
        }
        check(response)
    }

    /// Execute and decode a JSON response
    pub async fn fetch<R: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<R> {
        self.execute(request).await?.json()
    }

    /// Execute and decode, mapping 404 to `None` for optional lookups
    pub async fn fetch_optional<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ApiResult<Option<R>> {
        match self.execute(request).await {
            Ok(response) => response.json().map(Some),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

fn check(response: ApiResponse) -> ApiResult<ApiResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_response(response.status, &response.body))
    }
}
