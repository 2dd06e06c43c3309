//! Activity generators for Sheetcraft.
//!
//! Every activity is identified by a string key. Compiled activities are bound
//! at startup to an online generator (prompt plus page schema sent through a
//! [`Transport`](sheetcraft_transport::Transport)) and, where rules can stand
//! in for a model, an offline generator. User-authored prompt templates are
//! bound at runtime through the registry overlay and shadow compiled entries
//! with the same key.
//!
//! # Example
//!
//! ```
//! use sheetcraft_activities::{ActivityId, OfflineGenerator, WordSearch};
//! use sheetcraft_core::ActivityOptions;
//!
//! let options = ActivityOptions::default().with_topic("space");
//! let pages = WordSearch.generate(&options).unwrap();
//! assert_eq!(pages.len(), 1);
//! assert_eq!(ActivityId::WordSearch.to_string(), "word_search");
//! ```

#![warn(missing_docs)]

mod blueprint;
mod catalog;
mod generator;
mod id;
mod registry;
mod template;

pub use blueprint::{ActivityBlueprint, PromptedGenerator, build_request, compose_prompt};
pub use catalog::{
    CreativeWriting, LetterCancellation, MathDrill, MemoryMatch, NumberPattern, OddOneOut,
    ReadingComprehension, Sequencing, WordScramble, WordSearch, default_registry,
    register_catalog, words,
};
pub use generator::{BindingSource, GeneratorBinding, OfflineGenerator, OnlineGenerator};
pub use id::ActivityId;
pub use registry::{GeneratorRegistry, Overlay, RegistryBuilder};
pub use template::{
    InMemoryTemplateStore, PromptTemplate, TemplateGenerator, TemplateStore, load_templates,
    parse_templates, template_bindings,
};
