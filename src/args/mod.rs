//! Wrapped command line handling.
//!
//! ```text
//! Raw args → find {account} → substitute → CommandLine
//! ```

mod account;

pub use account::{find_account, placeholder, substitute};

use crate::error::{PrompterError, Result};

/// The wrapped command after placeholder substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Account name taken from the first `{account}` placeholder.
    pub account: String,
    pub command: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Build the command line to exec from the raw wrapped args.
    ///
    /// Fails with [`PrompterError::Config`] before anything is spawned when
    /// no argument carries a placeholder.
    pub fn parse(raw_args: &[String]) -> Result<Self> {
        let account = find_account(raw_args)
            .ok_or(PrompterError::Config)?
            .to_string();
        let mut exec = substitute(raw_args, &account).into_iter();
        let command = exec.next().ok_or(PrompterError::Config)?;
        Ok(Self {
            account,
            command,
            args: exec.collect(),
        })
    }
}
