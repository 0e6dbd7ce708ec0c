use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::transport::{ApiRequest, HttpMethod, HttpTransport, Transport};
use crate::config::ApiConfig;
use crate::error::{AppError, AppResult};

/// Typed JSON access on top of a [`Transport`].
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http(config: &ApiConfig) -> AppResult<Self> {
        Ok(Self::new(Arc::new(HttpTransport::new(config)?)))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let value = self
            .transport
            .send(ApiRequest::new(HttpMethod::Get, path))
            .await?;
        decode(path, value)
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request =
            ApiRequest::new(HttpMethod::Post, path).with_body(serde_json::to_value(body)?);
        let value = self.transport.send(request).await?;
        decode(path, value)
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request =
            ApiRequest::new(HttpMethod::Put, path).with_body(serde_json::to_value(body)?);
        let value = self.transport.send(request).await?;
        decode(path, value)
    }

    /// Any successful status counts; a body, if present, is ignored.
    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.transport
            .send(ApiRequest::new(HttpMethod::Delete, path))
            .await?;
        Ok(())
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Option<serde_json::Value>) -> AppResult<T> {
    let value = value
        .ok_or_else(|| AppError::internal(format!("Empty response body from {}", path)))?;
    Ok(serde_json::from_value(value)?)
}
