use std::sync::Arc;

use log::{info, warn};

use crate::tui::backend::Backend;

/// Scoped ownership of the terminal's alternate screen.
///
/// Acquiring enters the alternate screen; dropping (or [`release`](Self::release))
/// leaves it exactly once, on every exit path including a panic unwinding out
/// of [`Interface::start`](crate::tui::Interface::start).
pub struct TerminalSession {
    backend: Arc<dyn Backend>,
    active: bool,
}

impl TerminalSession {
    pub fn acquire(backend: Arc<dyn Backend>) -> std::io::Result<Self> {
        backend.enter()?;
        info!("Terminal session acquired");
        Ok(Self {
            backend,
            active: true,
        })
    }

    /// Leave the alternate screen now, reporting any failure.
    pub fn release(mut self) -> std::io::Result<()> {
        self.active = false;
        self.backend.leave()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.active {
            self.active = false;
            if let Err(e) = self.backend.leave() {
                warn!("Failed to restore terminal: {}", e);
            }
        }
    }
}
