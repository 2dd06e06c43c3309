//! Repair command handler.

use sheetcraft::repair_with_report;
use std::io::Read;
use std::path::PathBuf;

/// Handles the repair command.
///
/// Reads `file` (or stdin), prints the repaired JSON on stdout and the
/// stage that succeeded on stderr.
#[tracing::instrument(skip_all, fields(file = ?file))]
pub fn handle_repair_command(file: Option<PathBuf>) -> anyhow::Result<()> {
    let raw = match &file {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let repaired = repair_with_report(&raw)?;
    eprintln!("repaired at stage: {}", repaired.stage);
    println!("{}", serde_json::to_string_pretty(&repaired.value)?);
    Ok(())
}
