//! Command definitions.

use clap::{Args, Parser, Subcommand};
use sheetcraft::{ActivityOptions, Difficulty, GenerationMode};
use std::path::PathBuf;

/// Generate worksheet pages online, with offline fallback.
#[derive(Parser, Debug)]
#[command(name = "sheetcraft")]
#[command(about = "Resilient structured generation of worksheet pages")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the platform config dir)
    #[arg(short, long, global = true, env = "SHEETCRAFT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate pages for one activity and print them as JSON
    Generate(GenerateArgs),

    /// List the compiled activities
    Activities,

    /// Repair malformed generator output and print the parsed JSON
    Repair {
        /// File to read (stdin when omitted)
        file: Option<PathBuf>,
    },
}

/// Arguments of the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Activity identifier, e.g. word_search
    pub activity: String,

    /// Generation mode: ai or fast (defaults to the configured mode)
    #[arg(short, long)]
    pub mode: Option<GenerationMode>,

    /// Subject matter
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Difficulty: beginner, medium, hard or expert
    #[arg(short, long, default_value = "medium")]
    pub difficulty: Difficulty,

    /// Items per worksheet
    #[arg(long)]
    pub items: Option<u32>,

    /// Number of worksheets to produce
    #[arg(short, long)]
    pub worksheets: Option<u32>,

    /// Grid edge length for grid activities
    #[arg(long)]
    pub grid_size: Option<u32>,

    /// Language of the generated content
    #[arg(long)]
    pub language: Option<String>,

    /// Include answer fields
    #[arg(long)]
    pub answer_key: bool,

    /// Fixed seed for offline generation
    #[arg(long)]
    pub seed: Option<u64>,
}

impl GenerateArgs {
    /// Activity options for these arguments, using `default_mode` when no
    /// mode was given.
    pub fn options(&self, default_mode: GenerationMode) -> ActivityOptions {
        let mut options = ActivityOptions::default()
            .with_mode(self.mode.unwrap_or(default_mode))
            .with_difficulty(self.difficulty)
            .with_include_answer_key(self.answer_key);
        if let Some(topic) = &self.topic {
            options = options.with_topic(topic.clone());
        }
        if let Some(items) = self.items {
            options = options.with_item_count(items);
        }
        if let Some(worksheets) = self.worksheets {
            options = options.with_worksheet_count(worksheets);
        }
        if let Some(grid_size) = self.grid_size {
            options = options.with_grid_size(grid_size);
        }
        if let Some(language) = &self.language {
            options = options.with_language(language.clone());
        }
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        options
    }
}
