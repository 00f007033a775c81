//! User-facing notification sink.
//!
//! Every auth and resource operation reports its outcome through this
//! trait; a UI shell implements it with a toast/snackbar, headless
//! contexts fall back to structured logging.

use tracing::{error, info};

/// Sink for one-line operation outcome messages.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Default sink that logs through `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }
}
