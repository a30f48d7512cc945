// rulekeeper-core/src/infrastructure/http/transport.rs

use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, instrument, warn};

use crate::infrastructure::error::InfrastructureError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// JSON-over-HTTP access to the backend.
///
/// No authentication, no retries and no timeout beyond reqwest's defaults.
/// Non-2xx answers become [`InfrastructureError::Status`] carrying the
/// backend's `detail` message when it sent one.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    http: Client,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, InfrastructureError> {
        Self::with_client(base_url, Client::builder().build()?)
    }

    pub fn with_client(base_url: &str, http: Client) -> Result<Self, InfrastructureError> {
        let parsed = Url::parse(base_url)
            .map_err(|_| InfrastructureError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(InfrastructureError::InvalidBaseUrl(base_url.to_string()));
        }
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends a request and decodes the JSON answer.
    pub async fn request<B, R>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<R, InfrastructureError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.request_with_query(method, path, &[], body).await
    }

    pub async fn request_with_query<B, R>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<R, InfrastructureError>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let response = self.send(method, path, query, body).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| InfrastructureError::Decode {
            path: path.to_string(),
            message: e.to_string(),
        })
    }

    /// Sends a request whose answer body is irrelevant.
    pub async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), InfrastructureError>
    where
        B: Serialize + ?Sized + Sync,
    {
        self.send(method, path, &[], body).await.map(|_| ())
    }

    #[instrument(skip(self, query, body), fields(base = %self.base_url))]
    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<Response, InfrastructureError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let start = Instant::now();
        let mut builder = self.http.request(method.clone(), self.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            warn!("🔌 {} {} failed after {:.2?}: {}", method, path, start.elapsed(), e);
            InfrastructureError::Network(e)
        })?;

        let status = response.status();
        debug!(
            "{} {} -> {} in {:.2?}",
            method,
            path,
            status.as_u16(),
            start.elapsed()
        );

        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(InfrastructureError::Status {
            status: status.as_u16(),
            detail: extract_detail(&text),
        })
    }
}

/// The `detail` field of an error body, as FastAPI-style backends send it.
/// Structured details (validation error lists) are kept as compact JSON.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::Null => None,
        Value::String(detail) => Some(detail.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_removed() {
        let transport = HttpTransport::new("http://localhost:8000/").unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8000");
        assert_eq!(
            transport.url("/api/v1/rules"),
            "http://localhost:8000/api/v1/rules"
        );
    }

    #[test]
    fn test_base_path_is_kept() {
        let transport = HttpTransport::new("https://dq.internal/backend").unwrap();
        assert_eq!(
            transport.url("api/v1/rules/3"),
            "https://dq.internal/backend/api/v1/rules/3"
        );
    }

    #[test]
    fn test_rejects_relative_base_url() {
        assert!(matches!(
            HttpTransport::new("localhost:8000"),
            Err(InfrastructureError::InvalidBaseUrl(_))
        ));
        assert!(HttpTransport::new("not a url").is_err());
    }

    #[test]
    fn test_extract_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Rule 9 not found"}"#).as_deref(),
            Some("Rule 9 not found")
        );
        assert_eq!(
            extract_detail(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#)
                .as_deref(),
            Some(r#"[{"loc":["body"],"msg":"field required"}]"#)
        );
        assert_eq!(extract_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(extract_detail("Internal Server Error"), None);
        assert_eq!(extract_detail(r#"{"detail": null}"#), None);
    }
}
