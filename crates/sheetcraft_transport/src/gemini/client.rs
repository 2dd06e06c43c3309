//! Direct client for the remote generation service.

use super::dto::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData, Part,
};
use crate::TextSource;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use sheetcraft_core::GenerationRequest;
use sheetcraft_error::{EmptyResponseError, SheetcraftResult, TransportError, TransportErrorKind};
use std::time::Duration;
use tracing::{debug, error, instrument, warn};

/// Default base URL of the generation API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Low sampling temperature used on the direct path; reduces looping output.
pub const DIRECT_TEMPERATURE: f32 = 0.2;

/// Direct `generateContent` client.
///
/// The credential is optional at construction. A request without one fails
/// with [`TransportErrorKind::MissingApiKey`] so the caller can still fall
/// back to offline generation.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
    api_key_env: String,
    temperature: f32,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl GeminiClient {
    /// Creates a client with an explicit key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    #[instrument(skip(api_key))]
    pub fn new(
        api_base: &str,
        api_key: Option<String>,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            TransportError::new(TransportErrorKind::RequestBuild(e.to_string()))
        })?;

        debug!(has_key = api_key.is_some(), "Created direct client");
        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature,
        })
    }

    /// Creates a client reading the key from `key_env`.
    ///
    /// A missing variable is not an error here; see the type docs.
    pub fn from_env(
        api_base: &str,
        key_env: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let api_key = std::env::var(key_env).ok().filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!(env = key_env, "No API key for direct generation");
        }
        let mut client = Self::new(api_base, api_key, temperature, timeout)?;
        client.api_key_env = key_env.to_string();
        Ok(client)
    }

    /// Sampling temperature sent with every request.
    pub fn temperature(&self) -> f32 {
        self.temperature
    }

    /// Build the wire request for a generation request.
    ///
    /// Search grounding and a response schema cannot be combined, so a
    /// search request carries the schema only as prompt text.
    pub fn build_request(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerateContentRequest, TransportError> {
        let remote_schema = request.schema().to_remote_schema();

        let mut parts = Vec::with_capacity(2);
        if let Some(media) = request.attached_media() {
            parts.push(Part::InlineData {
                inline_data: InlineData {
                    mime_type: media.mime_type.clone(),
                    data: media.to_base64(),
                },
            });
        }

        let mut config = GenerationConfig::builder();
        config.temperature(self.temperature);
        let tools = if request.use_extended_search() {
            parts.push(Part::Text {
                text: format!(
                    "{}\n\nRespond only with JSON matching this schema:\n{}",
                    request.prompt_text(),
                    remote_schema
                ),
            });
            Some(vec![json!({ "googleSearch": {} })])
        } else {
            parts.push(Part::Text {
                text: request.prompt_text().clone(),
            });
            config
                .response_mime_type(Some("application/json".to_string()))
                .response_schema(Some(remote_schema));
            None
        };

        let generation_config = config
            .build()
            .map_err(|e| TransportError::new(TransportErrorKind::RequestBuild(e.to_string())))?;

        GenerateContentRequest::builder()
            .contents(vec![Content {
                role: Some("user".to_string()),
                parts,
            }])
            .generation_config(generation_config)
            .tools(tools)
            .build()
            .map_err(|e| TransportError::new(TransportErrorKind::RequestBuild(e.to_string())))
    }
}

#[async_trait]
impl TextSource for GeminiClient {
    fn path_name(&self) -> &'static str {
        "direct"
    }

    #[instrument(skip(self, request), fields(model = %request.model_hint()))]
    async fn fetch_text(&self, request: &GenerationRequest) -> SheetcraftResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            TransportError::new(TransportErrorKind::MissingApiKey(self.api_key_env.clone()))
        })?;

        let body = self.build_request(request)?;
        let url = format!(
            "{}/models/{}:generateContent",
            self.api_base,
            request.model_hint()
        );

        debug!(url = %url, search = request.use_extended_search(), "Sending direct request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Direct request failed");
                TransportError::new(TransportErrorKind::Network(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, error = %error_text, "Direct call returned error status");
            return Err(TransportError::new(TransportErrorKind::HttpStatus {
                status_code: status.as_u16(),
                message: error_text,
            })
            .into());
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse direct response");
            TransportError::new(TransportErrorKind::InvalidEnvelope(e.to_string()))
        })?;

        if let Some(reason) = parsed.block_reason() {
            return Err(
                TransportError::new(TransportErrorKind::Blocked(reason.to_string())).into(),
            );
        }

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(EmptyResponseError::new(self.path_name()).into());
        }

        debug!(
            len = text.len(),
            candidates = parsed.candidates.len(),
            "Received direct response"
        );
        Ok(text)
    }
}
