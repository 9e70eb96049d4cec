use crate::pty::handle::PtyHandle;
use std::io::{self, Read, Write};
use std::thread;
use tracing::debug;

/// Copy `input` to `output` chunk by chunk until `input` closes.
///
/// Each chunk is a single `write_all`, so it reaches the pty as one unit.
pub fn forward<R: Read, W: Write>(mut input: R, mut output: W) -> io::Result<u64> {
    let mut buffer = [0u8; 1024];
    let mut total = 0u64;
    loop {
        let count = match input.read(&mut buffer) {
            Ok(0) => return Ok(total),
            Ok(count) => count,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        output.write_all(&buffer[..count])?;
        output.flush()?;
        total += count as u64;
    }
}

/// Forward the real terminal's keystrokes to the pty on a detached thread.
pub fn spawn_stdin_forwarder(pty: PtyHandle) -> io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("stdin-forwarder".to_string())
        .spawn(move || match forward(io::stdin(), pty) {
            Ok(total) => debug!(total, "stdin closed"),
            Err(e) => debug!("stdin forwarding stopped: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::forward;
    use std::io::Cursor;

    #[test]
    fn forwards_everything() {
        let data = b"ls -la\r\x03\x1b[A".to_vec();
        let mut output = Vec::new();
        let total = forward(Cursor::new(data.clone()), &mut output).unwrap();
        assert_eq!(total, data.len() as u64);
        assert_eq!(output, data);
    }
}
