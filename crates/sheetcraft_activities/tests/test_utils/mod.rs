//! Test utilities for activity tests.
//!
//! Provides a scripted transport that records every request it sees.

use async_trait::async_trait;
use serde_json::Value;
use sheetcraft_core::GenerationRequest;
use sheetcraft_error::{SheetcraftError, SheetcraftResult};
use sheetcraft_transport::Transport;
use std::sync::{Arc, Mutex};

type Failure = Box<dyn Fn() -> SheetcraftError + Send + Sync>;

/// Transport answering every request with the same value or failure.
pub struct MockTransport {
    value: Value,
    failure: Option<Failure>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl MockTransport {
    /// A transport that always answers with `value`.
    pub fn returning(value: Value) -> Arc<Self> {
        Arc::new(Self {
            value,
            failure: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// A transport that always fails with the error `make` builds.
    #[allow(dead_code)]
    pub fn failing(make: impl Fn() -> SheetcraftError + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            value: Value::Null,
            failure: Some(Box::new(make)),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &GenerationRequest) -> SheetcraftResult<Value> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.failure {
            Some(make) => Err(make()),
            None => Ok(self.value.clone()),
        }
    }
}
