use crate::config::UpstreamConfig;
use crate::error::UpstreamError;
use crate::utils::text::single_line_excerpt;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde_json::Value;
use std::time::Duration;

/// Longest upstream error body carried into an error message.
const ERROR_BODY_EXCERPT_CHARS: usize = 200;

/// The delay engine's status endpoint, seen as raw JSON.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn get_status(&self) -> Result<Value, UpstreamError>;

    async fn patch_status(&self, body: &Value) -> Result<Value, UpstreamError>;
}

/// `GET`/`PATCH {base_url}/status?key=...` over HTTP.
pub struct HttpStatusSource {
    status_url: String,
    api_key: String,
    timeout: Duration,
    client: Client,
}

impl HttpStatusSource {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> Self {
        Self {
            status_url: format!("{}/status", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            timeout,
            client: Client::builder()
                .timeout(timeout)
                .connect_timeout(timeout)
                .pool_max_idle_per_host(4)
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self::new(
            &config.base_url,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.status_url)
            .query(&[("key", self.api_key.as_str())])
            .timeout(self.timeout)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Value, UpstreamError> {
        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(UpstreamError::Status {
                url: self.status_url.clone(),
                status: status.as_u16(),
                body: single_line_excerpt(&body, ERROR_BODY_EXCERPT_CHARS),
            });
        }

        if body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// Keeps the shared key out of error text: reqwest errors embed the full
    /// URL, query string included.
    fn transport_error(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            return UpstreamError::Timeout {
                url: self.status_url.clone(),
            };
        }
        UpstreamError::Transport {
            url: self.status_url.clone(),
            message: error.without_url().to_string(),
        }
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn get_status(&self) -> Result<Value, UpstreamError> {
        self.execute(self.request(Method::GET)).await
    }

    async fn patch_status(&self, body: &Value) -> Result<Value, UpstreamError> {
        self.execute(self.request(Method::PATCH).json(body)).await
    }
}

impl std::fmt::Debug for HttpStatusSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStatusSource")
            .field("status_url", &self.status_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
