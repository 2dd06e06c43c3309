//! Two-tier activity generator registry.
//!
//! The base table maps every compiled [`ActivityId`] to its generators and is
//! frozen once built. Custom template bindings live in an overlay that is
//! replaced wholesale on every change, so a reader holds either the old or
//! the new table and never a partially-built one. Resolution checks the
//! overlay first, then the base.

use crate::{
    ActivityId, GeneratorBinding, OfflineGenerator, OnlineGenerator, PromptTemplate,
    TemplateGenerator, TemplateStore,
};
use sheetcraft_error::{ActivityError, ActivityErrorKind, SheetcraftResult};
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// Custom bindings keyed by activity identifier.
#[derive(Debug, Clone, Default)]
pub struct Overlay {
    bindings: HashMap<String, GeneratorBinding>,
}

impl Overlay {
    /// An empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding, replacing any binding with the same identifier.
    pub fn with_binding(mut self, binding: GeneratorBinding) -> Self {
        self.bindings
            .insert(binding.activity_id().to_string(), binding);
        self
    }

    /// Look up a binding.
    pub fn get(&self, activity_id: &str) -> Option<&GeneratorBinding> {
        self.bindings.get(activity_id)
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the overlay holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Collects compiled bindings at startup.
#[derive(Default)]
pub struct RegistryBuilder {
    base: BTreeMap<ActivityId, GeneratorBinding>,
    templates: Option<Arc<dyn TemplateStore>>,
}

impl RegistryBuilder {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the generators for a compiled activity.
    ///
    /// Registering an identifier twice replaces the earlier binding.
    pub fn register(
        &mut self,
        id: ActivityId,
        online: Option<Arc<dyn OnlineGenerator>>,
        offline: Option<Arc<dyn OfflineGenerator>>,
    ) -> &mut Self {
        if online.is_none() && offline.is_none() {
            warn!(activity = %id, "Registering activity without generators");
        }
        let binding = GeneratorBinding::compiled(id.as_ref(), online, offline);
        if self.base.insert(id, binding).is_some() {
            warn!(activity = %id, "Replacing existing binding");
        }
        self
    }

    /// Template store consulted when an identifier is not in the overlay.
    pub fn template_store(&mut self, store: Arc<dyn TemplateStore>) -> &mut Self {
        self.templates = Some(store);
        self
    }

    /// Freeze the base table.
    pub fn build(self) -> GeneratorRegistry {
        info!(activities = self.base.len(), "Generator registry built");
        GeneratorRegistry {
            base: self.base,
            overlay: RwLock::new(Arc::new(Overlay::new())),
            templates: self.templates,
        }
    }
}

/// Maps activity identifiers to their generators.
pub struct GeneratorRegistry {
    base: BTreeMap<ActivityId, GeneratorBinding>,
    overlay: RwLock<Arc<Overlay>>,
    templates: Option<Arc<dyn TemplateStore>>,
}

impl GeneratorRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Resolve an identifier against the overlay, then the base table.
    ///
    /// # Errors
    ///
    /// [`ActivityErrorKind::Unknown`] when neither table has a binding.
    #[instrument(skip(self))]
    pub fn resolve(&self, activity_id: &str) -> SheetcraftResult<GeneratorBinding> {
        if let Some(binding) = self.overlay().get(activity_id) {
            debug!(source = %binding.source(), "Resolved from overlay");
            return Ok(binding.clone());
        }
        self.resolve_compiled(activity_id)
    }

    /// Like [`resolve`](Self::resolve), also consulting the template store
    /// on an overlay miss.
    ///
    /// Store templates are bound per call and never cached, so edits and
    /// removals in the store take effect on the next resolution. A store
    /// failure is logged and resolution continues with the base table.
    ///
    /// # Errors
    ///
    /// [`ActivityErrorKind::Unknown`] when no table or template matches.
    #[instrument(skip(self))]
    pub async fn resolve_with_templates(
        &self,
        activity_id: &str,
    ) -> SheetcraftResult<GeneratorBinding> {
        if let Some(binding) = self.overlay().get(activity_id) {
            return Ok(binding.clone());
        }
        if let Some(store) = &self.templates {
            match store.get_prompt_template(activity_id).await {
                Ok(Some(template)) => {
                    debug!(template = %template.name(), "Loaded custom template");
                    return Ok(Self::template_binding(template, store.clone()));
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(activity = activity_id, error = %err, "Template store lookup failed");
                }
            }
        }
        self.resolve_compiled(activity_id)
    }

    fn template_binding(template: PromptTemplate, store: Arc<dyn TemplateStore>) -> GeneratorBinding {
        GeneratorBinding::custom(
            template.id().clone(),
            Arc::new(TemplateGenerator::new(template, store)),
        )
    }

    fn resolve_compiled(&self, activity_id: &str) -> SheetcraftResult<GeneratorBinding> {
        ActivityId::from_str(activity_id)
            .ok()
            .and_then(|id| self.base.get(&id))
            .cloned()
            .ok_or_else(|| {
                warn!(activity = activity_id, "Unknown activity");
                ActivityError::new(ActivityErrorKind::Unknown(activity_id.to_string())).into()
            })
    }

    /// Current overlay snapshot.
    pub fn overlay(&self) -> Arc<Overlay> {
        match self.overlay.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Replace the whole overlay.
    pub fn install_overlay(&self, overlay: Overlay) {
        info!(bindings = overlay.len(), "Installing overlay");
        let next = Arc::new(overlay);
        match self.overlay.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    /// Bind a template under its identifier, copying the current overlay.
    ///
    /// The binding shadows any compiled binding with the same identifier and
    /// has no offline generator.
    pub fn register_custom(
        &self,
        template: PromptTemplate,
        store: Arc<dyn TemplateStore>,
    ) -> GeneratorBinding {
        let binding = Self::template_binding(template, store);
        let mut guard = match self.overlay.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let next = (**guard).clone().with_binding(binding.clone());
        *guard = Arc::new(next);
        info!(activity = binding.activity_id(), "Registered custom activity");
        binding
    }

    /// Compiled identifiers, in enum order.
    pub fn compiled_activities(&self) -> Vec<ActivityId> {
        self.base.keys().copied().collect()
    }

    /// Compiled identifiers with no binding at all.
    pub fn missing_activities(&self) -> Vec<ActivityId> {
        ActivityId::iter()
            .filter(|id| !self.base.contains_key(id))
            .collect()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("base", &self.base.keys().collect::<Vec<_>>())
            .field("overlay", &self.overlay().len())
            .field("templates", &self.templates.is_some())
            .finish()
    }
}
