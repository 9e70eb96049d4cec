use crate::pty::handle::PtyHandle;
use portable_pty::ChildKiller;
use std::io;

#[cfg(unix)]
use std::thread;
#[cfg(unix)]
use tracing::{debug, warn};
#[cfg(unix)]
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM, SIGWINCH};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Background listener for host signals that affect the session.
///
/// `SIGWINCH` copies the real terminal size onto the pty. `SIGTERM`,
/// `SIGHUP`, `SIGINT` and `SIGQUIT` sent from outside kill the child so the
/// session winds down through normal teardown. In raw mode Ctrl-C and Ctrl-\
/// reach the child as bytes, not as signals to this process.
pub struct SignalWatcher {
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: thread::JoinHandle<()>,
}

impl SignalWatcher {
    /// Start listening. Performs one resize immediately since the pty's
    /// initial size may not match the terminal.
    pub fn start(
        pty: PtyHandle,
        killer: Box<dyn ChildKiller + Send + Sync>,
    ) -> io::Result<Option<Self>> {
        pty.inherit_size();

        #[cfg(unix)]
        {
            let mut signals = Signals::new([SIGWINCH, SIGTERM, SIGHUP, SIGINT, SIGQUIT])?;
            let handle = signals.handle();
            let mut killer = killer;
            let thread = thread::Builder::new()
                .name("signal-watcher".to_string())
                .spawn(move || {
                    for signal in signals.forever() {
                        if signal == SIGWINCH {
                            pty.inherit_size();
                            continue;
                        }
                        debug!(signal, "Termination signal received, killing child");
                        if let Err(e) = killer.kill() {
                            warn!("Failed to kill child: {}", e);
                        }
                    }
                })?;
            return Ok(Some(Self { handle, thread }));
        }

        #[cfg(not(unix))]
        {
            let _ = killer;
            Ok(None)
        }
    }

    pub fn stop(self) {
        #[cfg(unix)]
        {
            self.handle.close();
            let _ = self.thread.join();
        }
    }
}
