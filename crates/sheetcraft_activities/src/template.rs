//! User-authored prompt templates.
//!
//! A template is prompt text with `{{variable}}` placeholders filled from the
//! activity options. Templates are stored by an external collaborator behind
//! [`TemplateStore`]; [`InMemoryTemplateStore`] keeps them in a map and sends
//! rendered prompts through a [`Transport`].

use crate::OnlineGenerator;
use async_trait::async_trait;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheetcraft_core::{ActivityOptions, DEFAULT_MODEL, GenerationRequest, SchemaDescriptor};
use sheetcraft_error::{ConfigError, SheetcraftResult, TemplateError, TemplateErrorKind};
use sheetcraft_transport::Transport;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// A stored prompt template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct PromptTemplate {
    /// Identifier the activity is requested by
    id: String,
    /// Display name
    name: String,
    /// Prompt text with `{{variable}}` placeholders
    prompt: String,
    /// Expected result shape; a page list with titles when absent
    #[serde(default)]
    schema: Option<SchemaDescriptor>,
    /// Model override
    #[serde(default)]
    model_hint: Option<String>,
}

impl PromptTemplate {
    /// Create a template without a schema or model override.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            prompt: prompt.into(),
            schema: None,
            model_hint: None,
        }
    }

    /// Set the expected result shape.
    pub fn with_schema(mut self, schema: SchemaDescriptor) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set the model override.
    pub fn with_model_hint(mut self, model: impl Into<String>) -> Self {
        self.model_hint = Some(model.into());
        self
    }

    /// Schema used when the template does not declare one.
    pub fn default_schema() -> SchemaDescriptor {
        SchemaDescriptor::array(
            SchemaDescriptor::object()
                .required("title", SchemaDescriptor::string())
                .optional("instructions", SchemaDescriptor::string())
                .build(),
        )
    }

    /// Declared schema or [`PromptTemplate::default_schema`].
    pub fn effective_schema(&self) -> SchemaDescriptor {
        self.schema.clone().unwrap_or_else(Self::default_schema)
    }

    /// Replace every `{{name}}` placeholder with its binding.
    ///
    /// # Errors
    ///
    /// Fails on an unbound variable or a `{{` without a matching `}}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sheetcraft_activities::PromptTemplate;
    /// use std::collections::BTreeMap;
    ///
    /// let template = PromptTemplate::new("t", "T", "Write about {{ topic }}.");
    /// let bindings = BTreeMap::from([("topic".to_string(), "bees".to_string())]);
    /// assert_eq!(template.render(&bindings).unwrap(), "Write about bees.");
    /// ```
    pub fn render(&self, bindings: &BTreeMap<String, String>) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.prompt.len());
        let mut rest = self.prompt.as_str();

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or_else(|| TemplateError::new(TemplateErrorKind::Unterminated(self.id.clone())))?;
            let name = after[..close].trim();
            let value = bindings.get(name).ok_or_else(|| {
                TemplateError::new(TemplateErrorKind::MissingVariable {
                    template: self.id.clone(),
                    variable: name.to_string(),
                })
            })?;
            out.push_str(value);
            rest = &after[close + 2..];
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// A TOML file of `[[templates]]` tables.
#[derive(Debug, Deserialize)]
struct TemplateFile {
    #[serde(default)]
    templates: Vec<PromptTemplate>,
}

/// Parse `[[templates]]` tables from TOML text.
///
/// # Errors
///
/// Returns a [`ConfigError`] for invalid TOML, a missing field, or an
/// identifier used twice.
///
/// # Examples
///
/// ```
/// use sheetcraft_activities::parse_templates;
///
/// let templates = parse_templates(r#"
/// [[templates]]
/// id = "story_map"
/// name = "Story map"
/// prompt = "Map the story of {{topic}}"
/// "#).unwrap();
/// assert_eq!(templates[0].id(), "story_map");
/// ```
pub fn parse_templates(toml: &str) -> Result<Vec<PromptTemplate>, ConfigError> {
    let file: TemplateFile = toml::from_str(toml)
        .map_err(|e| ConfigError::new(format!("Failed to parse templates: {}", e)))?;

    let mut seen = std::collections::HashSet::new();
    for template in &file.templates {
        if !seen.insert(template.id.as_str()) {
            return Err(ConfigError::new(format!(
                "Template '{}' is defined more than once",
                template.id
            )));
        }
    }
    Ok(file.templates)
}

/// Read and parse a template file.
///
/// # Errors
///
/// See [`parse_templates`]; an unreadable file is also a [`ConfigError`].
#[instrument(fields(path = %path.display()))]
pub fn load_templates(path: &Path) -> Result<Vec<PromptTemplate>, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::new(format!("Failed to read template file: {}", e)))?;
    let templates = parse_templates(&content)?;
    info!(count = templates.len(), "Loaded prompt templates");
    Ok(templates)
}

/// Variables available to templates, derived from the options.
///
/// `topic`, `difficulty`, `item_count`, `worksheet_count`, `language`,
/// `variant`, `student_name`, `student_context` and `blueprint`. Unset
/// options bind to defaults or the empty string.
pub fn template_bindings(options: &ActivityOptions) -> BTreeMap<String, String> {
    let student = options.student_context().as_ref();
    let blueprint = options
        .custom_input()
        .as_ref()
        .and_then(|c| c.blueprint_text.clone())
        .unwrap_or_default();

    BTreeMap::from([
        ("topic".to_string(), options.topic_or("general knowledge").to_string()),
        ("difficulty".to_string(), options.difficulty().to_string()),
        ("item_count".to_string(), options.item_count_or(5).to_string()),
        (
            "worksheet_count".to_string(),
            options.worksheet_count_or_one().to_string(),
        ),
        ("language".to_string(), options.language_or_default().to_string()),
        (
            "variant".to_string(),
            options.variant().clone().unwrap_or_default(),
        ),
        (
            "student_name".to_string(),
            student.map(|s| s.name().clone()).unwrap_or_default(),
        ),
        (
            "student_context".to_string(),
            student.map(|s| s.prompt_clause()).unwrap_or_default(),
        ),
        ("blueprint".to_string(), blueprint),
    ])
}

/// External store of user-authored templates.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Look up a template by activity identifier.
    async fn get_prompt_template(&self, id: &str) -> SheetcraftResult<Option<PromptTemplate>>;

    /// Render the template with the bindings and run it.
    ///
    /// The result may be a single page or a page list; callers normalize it.
    async fn test_prompt(
        &self,
        template: &PromptTemplate,
        bindings: &BTreeMap<String, String>,
    ) -> SheetcraftResult<Value>;
}

/// Template store backed by a map.
///
/// Rendered prompts are sent through the given transport.
#[derive(Clone)]
pub struct InMemoryTemplateStore {
    templates: Arc<RwLock<HashMap<String, PromptTemplate>>>,
    transport: Arc<dyn Transport>,
}

impl InMemoryTemplateStore {
    /// Create an empty store.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            templates: Arc::new(RwLock::new(HashMap::new())),
            transport,
        }
    }

    /// Create a store holding `templates`.
    pub fn with_templates(
        transport: Arc<dyn Transport>,
        templates: impl IntoIterator<Item = PromptTemplate>,
    ) -> Self {
        let templates = templates
            .into_iter()
            .map(|t| (t.id.clone(), t))
            .collect::<HashMap<_, _>>();
        Self {
            templates: Arc::new(RwLock::new(templates)),
            transport,
        }
    }

    /// Add or replace a template.
    pub async fn insert(&self, template: PromptTemplate) {
        debug!(id = %template.id, "Storing prompt template");
        self.templates
            .write()
            .await
            .insert(template.id.clone(), template);
    }

    /// Remove a template.
    pub async fn remove(&self, id: &str) -> Option<PromptTemplate> {
        self.templates.write().await.remove(id)
    }

    /// Number of stored templates.
    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn get_prompt_template(&self, id: &str) -> SheetcraftResult<Option<PromptTemplate>> {
        Ok(self.templates.read().await.get(id).cloned())
    }

    #[instrument(skip(self, template, bindings), fields(template = %template.id))]
    async fn test_prompt(
        &self,
        template: &PromptTemplate,
        bindings: &BTreeMap<String, String>,
    ) -> SheetcraftResult<Value> {
        let prompt = template.render(bindings)?;
        let request = GenerationRequest::builder()
            .prompt_text(prompt)
            .schema(template.effective_schema())
            .model_hint(
                template
                    .model_hint
                    .clone()
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            )
            .build()
            .map_err(|e| TemplateError::new(TemplateErrorKind::Store(e.to_string())))?;

        self.transport.send(&request).await
    }
}

/// Online generator backed by a stored template.
pub struct TemplateGenerator {
    template: PromptTemplate,
    store: Arc<dyn TemplateStore>,
}

impl TemplateGenerator {
    /// Bind a template to the store that runs it.
    pub fn new(template: PromptTemplate, store: Arc<dyn TemplateStore>) -> Self {
        Self { template, store }
    }

    /// The bound template.
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }
}

#[async_trait]
impl OnlineGenerator for TemplateGenerator {
    async fn generate(&self, options: &ActivityOptions) -> SheetcraftResult<Value> {
        let bindings = template_bindings(options);
        self.store.test_prompt(&self.template, &bindings).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("topic".to_string(), "volcanoes".to_string()),
            ("item_count".to_string(), "4".to_string()),
        ])
    }

    #[test]
    fn renders_every_placeholder() {
        let template = PromptTemplate::new("quiz", "Quiz", "{{item_count}} questions on {{topic}}, {{topic}}!");
        assert_eq!(
            template.render(&bindings()).unwrap(),
            "4 questions on volcanoes, volcanoes!"
        );
    }

    #[test]
    fn unbound_variable_is_named() {
        let template = PromptTemplate::new("quiz", "Quiz", "About {{ subject }}");
        let err = template.render(&bindings()).unwrap_err();
        assert_eq!(
            err.kind,
            TemplateErrorKind::MissingVariable {
                template: "quiz".to_string(),
                variable: "subject".to_string(),
            }
        );
    }

    #[test]
    fn unterminated_placeholder() {
        let template = PromptTemplate::new("quiz", "Quiz", "About {{topic");
        let err = template.render(&bindings()).unwrap_err();
        assert_eq!(err.kind, TemplateErrorKind::Unterminated("quiz".to_string()));
    }

    #[test]
    fn duplicate_template_ids_are_rejected() {
        let toml = r#"
[[templates]]
id = "poem"
name = "Poem"
prompt = "Write a poem"

[[templates]]
id = "poem"
name = "Poem again"
prompt = "Write another poem"
"#;
        let err = parse_templates(toml).unwrap_err();
        assert!(err.message.contains("more than once"));
    }

    #[test]
    fn template_file_reads_optional_fields() {
        let toml = r#"
[[templates]]
id = "story_map"
name = "Story map"
prompt = "Map {{topic}}"
model_hint = "gemini-2.5-pro"
"#;
        let templates = parse_templates(toml).unwrap();
        assert_eq!(templates[0].model_hint().as_deref(), Some("gemini-2.5-pro"));
        assert!(templates[0].schema().is_none());
        assert!(parse_templates("").unwrap().is_empty());
    }

    #[test]
    fn bindings_cover_defaults() {
        let vars = template_bindings(&ActivityOptions::default());
        assert_eq!(vars["topic"], "general knowledge");
        assert_eq!(vars["difficulty"], "Medium");
        assert_eq!(vars["student_context"], "");
        assert_eq!(vars["worksheet_count"], "1");
    }
}
