//! Credential injection in response to detected prompts.
//!
//! OTP prompts that arrive back to back are read as rejections: each one
//! moves to the next clock-drift offset. Any other prompt ends the run.
//! Nothing ever signals that a credential was accepted.

use std::io::Write;
use std::sync::mpsc::Receiver;

use tracing::{debug, info};

use crate::config::SecureString;
use crate::detect::{PromptEvent, PromptKind};
use crate::error::{PrompterError, Result};
use crate::otp::CodeGenerator;

/// Retry bookkeeping, owned by the responder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryState {
    /// Kind of the previous classified prompt, `None` before the first one.
    pub last_kind: Option<PromptKind>,
    /// Index into the offset list for the current run of OTP prompts.
    pub otp_attempt: usize,
}

impl RetryState {
    /// Pick the offset index for a new OTP prompt.
    ///
    /// With `n` offsets, the first `n - 1` consecutive OTP prompts get
    /// offsets `0..n-1` in order; the `n`-th means every retry was used up.
    fn next_otp_attempt(&mut self, offsets: usize) -> Result<usize> {
        if self.last_kind == Some(PromptKind::Otp) {
            self.otp_attempt += 1;
        }
        if self.otp_attempt + 1 >= offsets {
            return Err(PrompterError::RetryExhausted {
                attempts: self.otp_attempt,
            });
        }
        self.last_kind = Some(PromptKind::Otp);
        Ok(self.otp_attempt)
    }

    fn interrupt(&mut self, kind: PromptKind) {
        self.last_kind = Some(kind);
        self.otp_attempt = 0;
    }
}

pub struct AutoResponder<W, G> {
    writer: W,
    password: SecureString,
    generator: G,
    offsets: Vec<i64>,
    state: RetryState,
    announcer: Option<Box<dyn Write + Send>>,
}

impl<W: Write, G: CodeGenerator> AutoResponder<W, G> {
    pub fn new(writer: W, password: SecureString, generator: G, offsets: Vec<i64>) -> Self {
        Self {
            writer,
            password,
            generator,
            offsets,
            state: RetryState::default(),
            announcer: None,
        }
    }

    /// Echo `{inserted <kind>}` to `announcer` before each injection.
    pub fn with_announcer(mut self, announcer: Box<dyn Write + Send>) -> Self {
        self.announcer = Some(announcer);
        self
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// React to one prompt. Returns the kind of credential written, if any.
    pub fn handle(&mut self, event: &PromptEvent) -> Result<Option<PromptKind>> {
        let line = match event.kind {
            PromptKind::Unknown => {
                debug!(tail = %event.raw_tail, "Ignoring unrecognised prompt");
                self.state.interrupt(PromptKind::Unknown);
                return Ok(None);
            }
            PromptKind::Password => {
                self.state.interrupt(PromptKind::Password);
                format!("{}\n", self.password.expose())
            }
            PromptKind::Otp => {
                let attempt = self.state.next_otp_attempt(self.offsets.len())?;
                let offset = self.offsets[attempt];
                debug!(attempt, offset, "Generating OTP code");
                format!("{}\n", self.generator.generate(offset)?)
            }
        };

        self.announce(event.kind);
        info!(kind = %event.kind, "Inserted credential");
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(Some(event.kind))
    }

    /// Handle events until the detector closes the stream or a fatal error.
    pub fn run(&mut self, events: Receiver<PromptEvent>) -> Result<()> {
        for event in events {
            self.handle(&event)?;
        }
        debug!("Prompt stream closed");
        Ok(())
    }

    fn announce(&mut self, kind: PromptKind) {
        if let Some(announcer) = self.announcer.as_mut() {
            let marker = format!("{{inserted {}}}", kind);
            if announcer
                .write_all(marker.as_bytes())
                .and_then(|()| announcer.flush())
                .is_err()
            {
                debug!("Failed to write injection marker");
            }
        }
    }
}
