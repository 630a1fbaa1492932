use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};

/// Cooperative cancellation flag shared with the ctrl-c handler.
///
/// The executor checks the token at each iteration boundary and clears it
/// after acting on it, so an interrupt ends the current query's loop while the
/// remaining queries in a batch still run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Clears the flag so a later query in the batch can still run.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }

    /// Installs a ctrl-c handler that trips this token.
    pub fn install_handler(&self) -> Result<()> {
        let flag = Arc::clone(&self.flag);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::Relaxed);
        })
        .context("Failed to install ctrl-c handler")
    }
}
