//! Activities command handler.

use sheetcraft::Sheetcraft;

/// Handles the activities command.
///
/// One line per compiled activity: identifier, title, and whether it can be
/// generated offline.
#[tracing::instrument(skip_all)]
pub fn handle_activities_command(app: &Sheetcraft) -> anyhow::Result<()> {
    for id in app.activities() {
        let offline = app
            .registry()
            .resolve(id.as_ref())
            .map(|binding| binding.offline().is_some())?;
        println!(
            "{:<24} {:<24} {}",
            id,
            id.title(),
            if offline { "online + offline" } else { "online only" }
        );
    }
    Ok(())
}
