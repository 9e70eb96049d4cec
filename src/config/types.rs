use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Credential-store service name the account is looked up under.
    #[serde(default = "default_service")]
    pub service: String,
    /// OTP offsets tried in order, in units of one TOTP period.
    #[serde(default = "default_otp_offsets")]
    pub otp_offsets: Vec<i64>,
    /// Echo `{inserted <kind>}` to the terminal after each injection.
    #[serde(default = "default_announce")]
    pub announce: bool,
    /// Write logs here instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: default_service(),
            otp_offsets: default_otp_offsets(),
            announce: default_announce(),
            log_file: None,
        }
    }
}

fn default_service() -> String {
    "prompter".to_string()
}

fn default_otp_offsets() -> Vec<i64> {
    vec![0, 1, -1, 2, -2]
}

fn default_announce() -> bool {
    true
}
