//! Transports for schema-constrained generation requests.
//!
//! Two paths reach the remote text generator:
//!
//! - [`RelayClient`] posts to a same-origin relay (`POST /api/generate`)
//! - [`GeminiClient`] calls the generation service directly with a locally
//!   held credential
//!
//! [`FailoverTransport`] tries the relay first and falls through to the
//! direct call on network failure or a non-success status. Whatever text
//! comes back is handed to the repair engine and validated against the
//! request's schema descriptor.

#![warn(missing_docs)]

mod failover;
mod gemini;
mod relay;
mod transport;

pub use failover::FailoverTransport;
pub use gemini::{
    Candidate, Content, DEFAULT_API_BASE, DEFAULT_API_KEY_ENV, DIRECT_TEMPERATURE,
    GeminiClient, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineData,
    Part, PromptFeedback,
};
pub use relay::{RelayBody, RelayClient};
pub use transport::{TextSource, Transport};
