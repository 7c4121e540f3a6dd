//! Seam over the Telegram Mini Apps bridge
//!
//! The real bridge lives in the host shell; this crate only needs to post
//! events to it and to obtain init-data once it is ready. Keeping it behind
//! a trait lets every consumer be exercised without a Telegram runtime.

use common::error::AuthError;

/// Events the client posts to the Telegram host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutgoingEvent {
    /// Show or hide the hardware back button
    SetupBackButton { is_visible: bool },
    /// Expand the web view to full height
    Expand,
    /// Open a URL in an external browser tab
    OpenLink { url: String },
}

/// Access to the Telegram WebApp bridge
pub trait TelegramBridge: Send + Sync {
    /// Post a fire-and-forget event to the host
    fn post_event(&self, event: OutgoingEvent);

    /// Resolve the signed init-data string once the bridge is ready.
    ///
    /// Implementations resolve only when the host has supplied init-data;
    /// callers are expected to bound the wait with a timeout.
    fn init_data(&self) -> impl Future<Output = Result<String, AuthError>> + Send;
}
