use parking_lot::Mutex;
use portable_pty::{MasterPty, PtySize};
use std::io::{self, Read, Write};
use std::sync::Arc;
use tracing::warn;

/// Shared access to the pty master: input writes and resizes.
///
/// Cloned into every task that writes to the session. Each
/// [`send_input`](Self::send_input) call holds the writer lock for the whole
/// byte sequence, so concurrent writers interleave only at call boundaries.
#[derive(Clone)]
pub struct PtyHandle {
    writer: Arc<Mutex<Option<Box<dyn Write + Send>>>>,
    master: Arc<Mutex<Option<Box<dyn MasterPty + Send>>>>,
}

impl PtyHandle {
    pub fn new(writer: Box<dyn Write + Send>, master: Box<dyn MasterPty + Send>) -> Self {
        Self {
            writer: Arc::new(Mutex::new(Some(writer))),
            master: Arc::new(Mutex::new(Some(master))),
        }
    }

    pub fn send_input(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock();
        let Some(writer) = writer.as_mut() else {
            return Err(closed());
        };
        writer.write_all(bytes)?;
        writer.flush()
    }

    pub fn try_clone_reader(&self) -> io::Result<Box<dyn Read + Send>> {
        let master = self.master.lock();
        let Some(master) = master.as_ref() else {
            return Err(closed());
        };
        master
            .try_clone_reader()
            .map_err(|e| io::Error::other(e.to_string()))
    }

    pub fn resize(&self, cols: u16, rows: u16) -> io::Result<()> {
        let size = PtySize {
            rows,
            cols,
            pixel_width: 0,
            pixel_height: 0,
        };
        let master = self.master.lock();
        let Some(master) = master.as_ref() else {
            return Err(closed());
        };
        master
            .resize(size)
            .map_err(|e| io::Error::other(e.to_string()))
    }

    /// Copy the real terminal's dimensions onto the pty.
    ///
    /// Failures are logged, never escalated.
    pub fn inherit_size(&self) {
        let (cols, rows) = match crossterm::terminal::size() {
            Ok(size) => size,
            Err(e) => {
                warn!("Failed to read terminal size: {}", e);
                return;
            }
        };
        if let Err(e) = self.resize(cols, rows) {
            warn!("Failed to resize pty to {}x{}: {}", cols, rows, e);
        }
    }

    pub fn close_writer(&self) {
        *self.writer.lock() = None;
    }

    /// Release the pty descriptor for every clone of this handle.
    pub fn close(&self) {
        self.close_writer();
        *self.master.lock() = None;
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "pty is closed")
}

impl Write for PtyHandle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.send_input(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
