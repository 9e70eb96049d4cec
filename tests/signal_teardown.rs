//! Termination signals aimed at the wrapper must end the child so the
//! session unwinds through its normal teardown.
//!
//! Kept in its own test binary: raising a signal reaches every watcher
//! registered in the process.

#[cfg(unix)]
mod signal_teardown {
    use prompter::pty::{PtySession, SignalWatcher};
    use prompter::session::pump_output;
    use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
    use std::error::Error;
    use std::time::{Duration, Instant};

    #[test]
    fn termination_signals_kill_the_child() -> Result<(), Box<dyn Error>> {
        for signal in [SIGTERM, SIGHUP, SIGINT, SIGQUIT] {
            let mut session =
                PtySession::spawn("sh", &["-c".to_string(), "exec sleep 30".to_string()])?;
            let pty = session.handle();
            let mut reader = pty.try_clone_reader()?;
            let watcher = SignalWatcher::start(pty, session.killer())?
                .expect("signal watcher is available on unix");

            let started = Instant::now();
            signal_hook::low_level::raise(signal)?;

            let mut sink = Vec::new();
            pump_output(&mut reader, &mut sink);
            let code = session.wait()?;
            watcher.stop();

            assert!(
                started.elapsed() < Duration::from_secs(10),
                "signal {} did not end the child",
                signal
            );
            assert_ne!(code, 0, "signal {}", signal);
        }
        Ok(())
    }
}
