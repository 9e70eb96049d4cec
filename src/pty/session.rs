use crate::error::{PrompterError, Result};
use crate::pty::handle::PtyHandle;
use portable_pty::{native_pty_system, Child, ChildKiller, CommandBuilder, PtySize};
use tracing::{debug, warn};

/// The wrapped child attached to a fresh pseudo-terminal.
///
/// Dropping the session reaps the child, killing it first if it is still
/// running, and closes the pty.
pub struct PtySession {
    handle: PtyHandle,
    child: Box<dyn Child + Send + Sync>,
    reaped: bool,
}

impl PtySession {
    pub fn spawn(command: &str, args: &[String]) -> Result<Self> {
        let spawn_error = |reason: String| PrompterError::Spawn {
            command: command.to_string(),
            reason,
        };

        let pty_system = native_pty_system();
        let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
        let pair = pty_system
            .openpty(PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|e| spawn_error(e.to_string()))?;

        let mut cmd = CommandBuilder::new(command);
        cmd.args(args);
        if let Ok(cwd) = std::env::current_dir() {
            cmd.cwd(cwd);
        }

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| spawn_error(e.to_string()))?;
        drop(pair.slave);

        let writer = pair
            .master
            .take_writer()
            .map_err(|e| spawn_error(e.to_string()))?;
        let handle = PtyHandle::new(writer, pair.master);
        debug!(command, pid = ?child.process_id(), "Spawned child in pty");

        Ok(Self {
            handle,
            child,
            reaped: false,
        })
    }

    pub fn handle(&self) -> PtyHandle {
        self.handle.clone()
    }

    pub fn killer(&self) -> Box<dyn ChildKiller + Send + Sync> {
        self.child.clone_killer()
    }

    /// Close the pty input and wait for the child; returns its exit code.
    pub fn wait(&mut self) -> Result<u32> {
        self.handle.close_writer();
        let status = self.child.wait()?;
        self.reaped = true;
        self.handle.close();
        debug!(code = status.exit_code(), "Child exited");
        Ok(status.exit_code())
    }
}

impl Drop for PtySession {
    fn drop(&mut self) {
        if self.reaped {
            return;
        }
        self.handle.close_writer();
        if let Ok(None) = self.child.try_wait() {
            if let Err(e) = self.child.kill() {
                warn!("Failed to kill child: {}", e);
            }
        }
        let _ = self.child.wait();
        self.handle.close();
    }
}
