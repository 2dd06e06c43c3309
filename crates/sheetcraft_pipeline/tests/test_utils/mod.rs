//! Test utilities for orchestrator tests.
//!
//! Mock online and offline generators that count their calls, and a
//! template store that is always down.

use async_trait::async_trait;
use serde_json::{Value, json};
use sheetcraft_activities::{OfflineGenerator, OnlineGenerator, PromptTemplate, TemplateStore};
use sheetcraft_core::{ActivityOptions, ResultPages};
use sheetcraft_error::{SheetcraftError, SheetcraftResult, TemplateError, TemplateErrorKind};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

type Failure = Box<dyn Fn() -> SheetcraftError + Send + Sync>;

/// Online generator returning a fixed value or error.
pub struct MockOnline {
    value: Value,
    failure: Option<Failure>,
    calls: AtomicUsize,
}

impl MockOnline {
    /// Always succeeds with `value`.
    pub fn returning(value: Value) -> Arc<Self> {
        Arc::new(Self {
            value,
            failure: None,
            calls: AtomicUsize::new(0),
        })
    }

    /// Always fails with the error `make` builds.
    pub fn failing(make: impl Fn() -> SheetcraftError + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            value: Value::Null,
            failure: Some(Box::new(make)),
            calls: AtomicUsize::new(0),
        })
    }

    /// Number of calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OnlineGenerator for MockOnline {
    async fn generate(&self, _options: &ActivityOptions) -> SheetcraftResult<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(make) => Err(make()),
            None => Ok(self.value.clone()),
        }
    }
}

/// Offline generator emitting one numbered page per worksheet.
#[derive(Default)]
pub struct MockOffline {
    calls: AtomicUsize,
}

impl MockOffline {
    /// A fresh generator.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OfflineGenerator for MockOffline {
    fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<ResultPages> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let pages = (1..=options.worksheet_count_or_one())
            .map(|n| json!({"title": format!("Offline {n}")}))
            .collect();
        Ok(ResultPages::new(pages)?)
    }
}

/// Template store whose every call fails.
pub struct MockStoreDown;

#[async_trait]
impl TemplateStore for MockStoreDown {
    async fn get_prompt_template(&self, _id: &str) -> SheetcraftResult<Option<PromptTemplate>> {
        Err(TemplateError::new(TemplateErrorKind::Store("db timeout".into())).into())
    }

    async fn test_prompt(
        &self,
        _template: &PromptTemplate,
        _bindings: &BTreeMap<String, String>,
    ) -> SheetcraftResult<Value> {
        Err(TemplateError::new(TemplateErrorKind::Store("db timeout".into())).into())
    }
}
