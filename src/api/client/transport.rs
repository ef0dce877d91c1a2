//! reqwest-backed transport for the Places web service.

use async_trait::async_trait;
use std::time::Duration;

use crate::api::params::EndpointKind;
use crate::api::PlacesTransport;
use crate::build_info;
use crate::error::TransportError;
use crate::types::ResponseEnvelope;

/// Build an HTTP client with timeout applied.
pub(super) fn build_http_client(timeout: Duration) -> reqwest::Client {
    // Fall back to reqwest defaults if builder creation fails for any reason.
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(build_info::user_agent())
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// Issues one GET per call against `<base_url>/<endpoint path>`.
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            http: build_http_client(timeout),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: EndpointKind) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl PlacesTransport for HttpTransport {
    async fn get(
        &self,
        endpoint: EndpointKind,
        query: &[(&'static str, String)],
    ) -> Result<ResponseEnvelope, TransportError> {
        let response = self.http.get(self.url(endpoint)).query(query).send().await?;
        if !response.status().is_success() {
            let code = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status { code, body });
        }
        let bytes = response.bytes().await?;
        ResponseEnvelope::from_slice(&bytes)
    }
}
