//! Session management: the child in a pty and the host-terminal plumbing
//! around it.

mod handle;
mod input;
mod raw_mode;
mod resize;
mod session;

pub use handle::PtyHandle;
pub use input::{forward, spawn_stdin_forwarder};
pub use raw_mode::RawModeGuard;
pub use resize::SignalWatcher;
pub use session::PtySession;
