//! Media attachments for multimodal generation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

/// Binary media sent alongside the prompt (e.g. a photographed worksheet).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAttachment {
    /// Raw bytes
    pub bytes: Vec<u8>,
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
}

impl MediaAttachment {
    /// Create an attachment from bytes and a MIME type.
    pub fn new(bytes: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Standard base64 encoding of the bytes, as carried on the wire.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}
