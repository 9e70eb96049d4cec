//! Run an interactive command inside a pseudo-terminal and answer its
//! password and one-time-code prompts from the platform credential store.

pub mod args;
pub mod config;
pub mod detect;
pub mod error;
pub mod logging;
pub mod otp;
pub mod pty;
pub mod responder;
pub mod session;

pub use error::{PrompterError, Result};
