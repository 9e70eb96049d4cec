//! Pass-through reader that reports prompts as a side effect.

use std::io::{self, Read};
use std::sync::mpsc::{channel, Receiver, Sender};

use tracing::{debug, trace};

use crate::detect::classify::{classify, PromptEvent};

/// Upper bound on the retained unterminated line.
const MAX_TAIL_BYTES: usize = 4096;

/// Wraps the session output. `read` returns exactly what the inner reader
/// returned; prompts found along the way are sent to the paired receiver.
///
/// The tail of the current unterminated line is kept across reads so a
/// prompt split over several reads is still seen once its terminator lands.
pub struct PromptDetector<R> {
    inner: R,
    tail: Vec<u8>,
    events: Option<Sender<PromptEvent>>,
}

impl<R: Read> PromptDetector<R> {
    pub fn new(inner: R) -> (Self, Receiver<PromptEvent>) {
        let (sender, receiver) = channel();
        let detector = Self {
            inner,
            tail: Vec::new(),
            events: Some(sender),
        };
        (detector, receiver)
    }

    fn observe(&mut self, chunk: &[u8]) {
        match chunk.iter().rposition(|&b| b == b'\n') {
            Some(pos) => {
                self.tail.clear();
                self.tail.extend_from_slice(&chunk[pos + 1..]);
            }
            None => self.tail.extend_from_slice(chunk),
        }
        if self.tail.len() > MAX_TAIL_BYTES {
            let excess = self.tail.len() - MAX_TAIL_BYTES;
            self.tail.drain(..excess);
        }

        let text = String::from_utf8_lossy(&self.tail);
        let Some(kind) = classify(&text) else {
            return;
        };
        let event = PromptEvent {
            raw_tail: text.into_owned(),
            kind,
        };
        self.tail.clear();
        debug!(kind = %event.kind, "Prompt detected");
        if let Some(sender) = &self.events {
            if sender.send(event).is_err() {
                trace!("Prompt event dropped (receiver gone)");
                self.events = None;
            }
        }
    }

    fn close(&mut self) {
        self.events = None;
    }
}

impl<R: Read> Read for PromptDetector<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(0) => {
                self.close();
                Ok(0)
            }
            Ok(count) => {
                self.observe(&buf[..count]);
                Ok(count)
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(e),
            Err(e) => {
                self.close();
                Err(e)
            }
        }
    }
}
