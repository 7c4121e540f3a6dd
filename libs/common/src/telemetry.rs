//! Logging initialization for the Mini App client
//!
//! Verbose output is gated behind the `debug_console` configuration flag
//! rather than being always-on in production.

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;

/// Initialize the global tracing subscriber.
///
/// Returns an error if a subscriber was already installed, which callers may
/// ignore in tests.
pub fn init_tracing(config: &AppConfig) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let level = if config.debug_console {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)
}
