use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use std::time::Instant;
use tracing::{error, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};
use crate::models::ApiErrorBody;

/// 请求ID头部名称
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        })
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// One attempt per request, no retries. `Ok(None)` means the backend answered
/// successfully without a body (204).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> AppResult<Option<Value>>;
}

/// reqwest-backed transport against the real backend.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        // Url::join drops the last segment unless the base ends with '/'
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> AppResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> AppResult<Option<Value>> {
        let url = self.url_for(&request.path)?;
        let request_id = Uuid::new_v4();
        let method = request.method;
        let path = request.path;
        let start_time = Instant::now();

        let mut builder = self
            .client
            .request(method.into(), url)
            .header(REQUEST_ID_HEADER, request_id.to_string());
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    error = %e,
                    "Request failed"
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        let duration_ms = start_time.elapsed().as_millis();

        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let message = ApiErrorBody::parse(&body).into_message(status.as_u16());

            if status.is_client_error() {
                warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status,
                    duration_ms = %duration_ms,
                    "Request completed with client error"
                );
            } else {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status,
                    duration_ms = %duration_ms,
                    "Request completed with server error"
                );
            }
            return Err(AppError::api(status.as_u16(), message));
        }

        info!(
            request_id = %request_id,
            method = %method,
            path = %path,
            status = %status,
            duration_ms = %duration_ms,
            "Request completed successfully"
        );

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&body)?))
    }
}
