//! Informational notices for degraded results.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// The offline path answered after the online path failed.
///
/// Delivered alongside a successful result; the caller still has usable
/// pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackNotice {
    /// Activity that was generated
    pub activity_id: String,
    /// Why the online attempt failed
    pub cause: String,
}

impl FallbackNotice {
    /// Short message for the person who requested the worksheet.
    pub fn message(&self) -> String {
        "The AI service is unavailable right now, so this worksheet was made \
         with the built-in generator."
            .to_string()
    }
}

/// Receives fallback notices. Implementations must not block.
pub trait FallbackObserver: Send + Sync {
    /// Called once per degraded result.
    fn notify(&self, notice: &FallbackNotice);
}

/// Logs notices at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingObserver;

impl FallbackObserver for LoggingObserver {
    fn notify(&self, notice: &FallbackNotice) {
        info!(
            activity = %notice.activity_id,
            cause = %notice.cause,
            "{}",
            notice.message()
        );
    }
}

/// Forwards notices to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<FallbackNotice>,
}

impl ChannelObserver {
    /// Create an observer and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<FallbackNotice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl FallbackObserver for ChannelObserver {
    fn notify(&self, notice: &FallbackNotice) {
        if self.sender.send(notice.clone()).is_err() {
            debug!(activity = %notice.activity_id, "Notice receiver dropped");
        }
    }
}
