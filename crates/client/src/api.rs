//! HTTP client for the museum REST API.
//!
//! Wraps [`reqwest`], attaches the bearer token from session storage and
//! normalizes response envelopes (see [`crate::envelope`]). Each call is a
//! single attempt: no retry and no backoff.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::envelope::{parse_error, parse_success};
use crate::error::{ApiError, ApiResult};
use crate::storage::{SessionStorage, TOKEN_KEY};

/// Header carrying the per-request correlation id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Which bearer token, if any, a request carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// The stored session token; omitted for `/auth` endpoints.
    #[default]
    Session,
    /// The public visitor token from configuration.
    Visitor,
    /// No `Authorization` header.
    Anonymous,
}

/// Normalized success payload.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub success: bool,
    /// Optional human-readable message from the envelope.
    pub message: Option<String>,
}

/// A request to be sent through [`ApiClient::send`].
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    endpoint: String,
    query: Vec<(String, String)>,
    body: Option<serde_json::Value>,
    auth: AuthMode,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
            auth: AuthMode::Session,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("body is not serializable: {e}")))?;
        self.body = Some(value);
        Ok(self)
    }

    pub fn auth(mut self, auth: AuthMode) -> Self {
        self.auth = auth;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Shared handle to the REST API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn SessionStorage>,
    visitor_token: Option<String>,
}

impl ApiClient {
    /// Build a client from configuration, reading tokens from `storage`.
    pub fn new(config: &ClientConfig, storage: Arc<dyn SessionStorage>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            storage,
            visitor_token: config.public_visitor_token.clone(),
        })
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across portals).
    pub fn with_client(
        http: reqwest::Client,
        config: &ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            storage,
            visitor_token: config.public_visitor_token.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session storage this client reads its token from.
    pub fn storage(&self) -> Arc<dyn SessionStorage> {
        Arc::clone(&self.storage)
    }

    /// Send a request and decode the envelope's `data` into `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<ApiResponse<T>> {
        let raw = self.send_raw(request).await?;
        let data = serde_json::from_value(raw.data).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(ApiResponse {
            data,
            success: raw.success,
            message: raw.message,
        })
    }

    /// Send a request and return the envelope's `data` undecoded.
    pub async fn send_raw(&self, request: ApiRequest) -> ApiResult<ApiResponse<serde_json::Value>> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let url = self.url(&request.endpoint);

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .header(REQUEST_ID_HEADER, &request_id);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = self.bearer_for(&request.endpoint, request.auth) {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(
            method = %request.method,
            endpoint = %request.endpoint,
            request_id = %request_id,
            "Sending API request",
        );

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %request.method,
                endpoint = %request.endpoint,
                request_id = %request_id,
                error = %e,
                "API request failed to send",
            );
            ApiError::Transport(e)
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let err = parse_error(status, &body);
            tracing::warn!(
                method = %request.method,
                endpoint = %request.endpoint,
                request_id = %request_id,
                status = status.as_u16(),
                error = %err.message(),
                "API request returned an error",
            );
            return Err(err);
        }

        tracing::debug!(
            endpoint = %request.endpoint,
            request_id = %request_id,
            status = status.as_u16(),
            "API request succeeded",
        );

        let unwrapped = parse_success(&body)?;
        Ok(ApiResponse {
            data: unwrapped.data,
            success: unwrapped.success,
            message: unwrapped.message,
        })
    }

    /// `GET endpoint?query`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<ApiResponse<T>> {
        self.send(ApiRequest::get(endpoint).query(query)).await
    }

    /// `POST endpoint` with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        self.send(ApiRequest::post(endpoint).json(body)?).await
    }

    /// `PUT endpoint` with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        self.send(ApiRequest::put(endpoint).json(body)?).await
    }

    /// `PATCH endpoint` without a body (status transitions).
    pub async fn patch(&self, endpoint: &str) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.send_raw(ApiRequest::patch(endpoint)).await
    }

    /// `DELETE endpoint`.
    pub async fn delete(&self, endpoint: &str) -> ApiResult<ApiResponse<serde_json::Value>> {
        self.send_raw(ApiRequest::delete(endpoint)).await
    }

    // ---- private helpers ----

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    fn bearer_for(&self, endpoint: &str, auth: AuthMode) -> Option<String> {
        match auth {
            AuthMode::Anonymous => None,
            AuthMode::Visitor => self.visitor_token.clone(),
            AuthMode::Session if is_auth_endpoint(endpoint) => None,
            AuthMode::Session => self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty()),
        }
    }
}

/// `true` for `/auth` and anything below it.
fn is_auth_endpoint(endpoint: &str) -> bool {
    let path = endpoint.trim_start_matches('/');
    let path = path.split(['?', '#']).next().unwrap_or(path);
    path == "auth" || path.starts_with("auth/")
}
