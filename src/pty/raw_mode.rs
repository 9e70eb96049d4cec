use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use parking_lot::Mutex;
use std::io::{self, IsTerminal};
use std::sync::Once;
use tracing::{debug, warn};

/// Pending terminal restoration, shared with the panic hook.
static CLEANUP: Mutex<Option<Box<dyn FnOnce() + Send + 'static>>> = Mutex::new(None);

static PANIC_HOOK: Once = Once::new();

/// Holds the host terminal in raw mode until dropped.
///
/// Restoration runs exactly once: on drop, or from the panic hook if the
/// process panics first. When stdin is not a terminal the guard is inert.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    pub fn enable() -> io::Result<Self> {
        if !io::stdin().is_terminal() {
            debug!("stdin is not a terminal, leaving terminal mode untouched");
            return Ok(Self { active: false });
        }

        enable_raw_mode()?;
        *CLEANUP.lock() = Some(Box::new(|| {
            if let Err(e) = disable_raw_mode() {
                warn!("Failed to restore terminal mode: {}", e);
            }
        }));
        install_panic_hook();
        Ok(Self { active: true })
    }

    fn restore(&self) {
        if !self.active {
            return;
        }
        run_cleanup();
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

fn run_cleanup() {
    let cleanup = CLEANUP.lock().take();
    if let Some(cleanup) = cleanup {
        cleanup();
    }
}

/// Chain the restoring hook in front of the current one, once per process.
///
/// Returns whether this call installed it.
fn install_panic_hook() -> bool {
    let mut installed = false;
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            run_cleanup();
            default_hook(info);
        }));
        installed = true;
    });
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panic_hook_is_chained_only_once() {
        install_panic_hook();
        assert!(!install_panic_hook());
        assert!(!install_panic_hook());
    }
}
