//! Error taxonomy for the wrapper.
//!
//! Every variant is fatal at the point of detection. The only retry in the
//! system is the bounded OTP offset cycling inside the responder.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrompterError {
    /// No `{account}` placeholder in the wrapped command line.
    #[error("No account placeholder found: one argument must contain '{{account}}'")]
    Config,

    /// Configuration file could not be read.
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::config::Config`].
    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ConfigValidation { message: String },

    /// Credential store miss or malformed record.
    #[error("Credential lookup failed for account '{account}': {reason}")]
    CredentialLookup { account: String, reason: String },

    #[error("Invalid TOTP provisioning URI: {0}")]
    OtpParse(String),

    #[error("Failed to start '{command}': {reason}")]
    Spawn { command: String, reason: String },

    #[error("Failed to generate OTP code: {0}")]
    OtpGeneration(String),

    #[error("Tried all {attempts} OTP offsets without success")]
    RetryExhausted { attempts: usize },

    #[error("Session I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PrompterError>;
