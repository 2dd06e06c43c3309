//! Same-origin relay client.

use crate::TextSource;
use async_trait::async_trait;
use derive_getters::Getters;
use reqwest::Client;
use serde::Serialize;
use sheetcraft_core::GenerationRequest;
use sheetcraft_error::{EmptyResponseError, SheetcraftResult, TransportError, TransportErrorKind};
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct RelayBody {
    prompt: String,
    schema: serde_json::Value,
    model: String,
    use_search: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mime_type: Option<String>,
}

impl From<&GenerationRequest> for RelayBody {
    fn from(request: &GenerationRequest) -> Self {
        let media = request.attached_media().as_ref();
        Self {
            prompt: request.prompt_text().clone(),
            schema: request.schema().to_remote_schema(),
            model: request.model_hint().clone(),
            use_search: request.use_extended_search(),
            image: media.map(|m| m.to_base64()),
            mime_type: media.map(|m| m.mime_type.clone()),
        }
    }
}

/// Client for the relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
}

impl RelayClient {
    /// Creates a relay client for `{base_url}/api/generate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            TransportError::new(TransportErrorKind::RequestBuild(e.to_string()))
        })?;
        let endpoint = format!("{}/api/generate", base_url.trim_end_matches('/'));

        debug!(endpoint = %endpoint, "Created relay client");
        Ok(Self { client, endpoint })
    }

    /// Full endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextSource for RelayClient {
    fn path_name(&self) -> &'static str {
        "relay"
    }

    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, model = %request.model_hint()))]
    async fn fetch_text(&self, request: &GenerationRequest) -> SheetcraftResult<String> {
        let body = RelayBody::from(request);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Relay request failed");
                TransportError::new(TransportErrorKind::Network(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "Relay returned error status");
            return Err(TransportError::new(TransportErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message: error_text,
            })
            .into());
        }

        let text = response.text().await.map_err(|e| {
            TransportError::new(TransportErrorKind::Network(format!(
                "Failed to read relay body: {}",
                e
            )))
        })?;

        if text.trim().is_empty() {
            return Err(EmptyResponseError::new(self.path_name()).into());
        }

        debug!(len = text.len(), "Received relay response");
        Ok(text)
    }
}
