//! Generate command handler.

use super::GenerateArgs;
use sheetcraft::{ChannelObserver, Sheetcraft, SheetcraftConfig};
use std::sync::Arc;

/// Handles the generate command.
///
/// Prints the outcome as pretty JSON on stdout. A fallback notice, if any,
/// goes to stderr so piped output stays parseable.
#[tracing::instrument(skip_all, fields(activity = %args.activity))]
pub async fn handle_generate_command(
    config: SheetcraftConfig,
    args: GenerateArgs,
) -> anyhow::Result<()> {
    let options = args.options(*config.default_mode());
    let (observer, mut notices) = ChannelObserver::channel();
    let app = Sheetcraft::from_config(config)?.with_observer(Arc::new(observer));

    let outcome = match app.generate(&args.activity, &options).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "Generation failed");
            anyhow::bail!("{}", err.user_message());
        }
    };

    while let Ok(notice) = notices.try_recv() {
        eprintln!("{}", notice.message());
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
