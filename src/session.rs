//! Top-level session wiring.
//!
//! ```text
//! pty output → PromptDetector → stdout
//!                   │ events
//!                   ▼
//! stdin ──────► pty input ◄── AutoResponder
//! ```
//!
//! Fatal responder errors kill the child; the output loop then sees end of
//! data and every resource is released on the same path as a normal exit.

use std::io::{self, Read, Write};
use std::thread;

use tracing::{debug, error, warn};

use crate::args::CommandLine;
use crate::config::CredentialSet;
use crate::detect::PromptDetector;
use crate::error::{PrompterError, Result};
use crate::pty::{spawn_stdin_forwarder, PtySession, RawModeGuard, SignalWatcher};
use crate::responder::AutoResponder;

/// Everything a session needs once startup lookups have succeeded.
pub struct SessionPlan {
    pub line: CommandLine,
    pub credentials: CredentialSet,
    pub otp_offsets: Vec<i64>,
    pub announce: bool,
}

/// Run the wrapped command to completion. Returns the child's exit code.
pub fn run_session(plan: SessionPlan) -> Result<u32> {
    let SessionPlan {
        line,
        credentials,
        otp_offsets,
        announce,
    } = plan;

    let mut session = PtySession::spawn(&line.command, &line.args)?;
    let pty = session.handle();

    let watcher = scopeguard::guard(
        SignalWatcher::start(pty.clone(), session.killer())?,
        |watcher| {
            if let Some(watcher) = watcher {
                watcher.stop();
            }
        },
    );
    let raw_mode = RawModeGuard::enable()?;

    spawn_stdin_forwarder(pty.clone())?;

    let (mut detector, events) = PromptDetector::new(pty.try_clone_reader()?);

    let mut responder = AutoResponder::new(
        pty.clone(),
        credentials.password,
        credentials.otp,
        otp_offsets,
    );
    if announce {
        responder = responder.with_announcer(Box::new(io::stdout()));
    }
    let mut killer = session.killer();
    let responder_thread = thread::Builder::new()
        .name("auto-responder".to_string())
        .spawn(move || {
            let result = responder.run(events);
            if let Err(e) = &result {
                error!("Auto-responder failed: {}", e);
                if let Err(e) = killer.kill() {
                    warn!("Failed to kill child: {}", e);
                }
            }
            result
        })?;

    pump_output(&mut detector, &mut io::stdout());
    drop(detector);

    let responder_result = responder_thread
        .join()
        .unwrap_or_else(|_| Err(PrompterError::Io(io::Error::other("auto-responder panicked"))));
    let code = session.wait();

    drop(raw_mode);
    drop(watcher);

    responder_result?;
    code
}

/// Copy session output to the terminal until end of data.
///
/// Every chunk is flushed immediately so partial-line prompts are visible.
/// Read errors end the session: on Linux a closed pty reports `EIO`.
pub fn pump_output<R: Read, W: Write>(reader: &mut R, out: &mut W) {
    let mut buffer = [0u8; 8192];
    loop {
        let count = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(count) => count,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                debug!("Session output ended: {}", e);
                break;
            }
        };
        if let Err(e) = out.write_all(&buffer[..count]).and_then(|()| out.flush()) {
            warn!("Failed to write session output: {}", e);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::pump_output;
    use std::io::{self, Cursor, Read};

    struct FailAfter {
        data: Cursor<Vec<u8>>,
    }

    impl Read for FailAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::from_raw_os_error(5)),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn pump_copies_until_eof() {
        let mut out = Vec::new();
        pump_output(&mut Cursor::new(b"Password:".to_vec()), &mut out);
        assert_eq!(out, b"Password:");
    }

    #[test]
    fn pump_treats_read_error_as_end() {
        let mut reader = FailAfter {
            data: Cursor::new(b"bye\r\n".to_vec()),
        };
        let mut out = Vec::new();
        pump_output(&mut reader, &mut out);
        assert_eq!(out, b"bye\r\n");
    }
}
