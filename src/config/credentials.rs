//! Credential lookup from the platform credential store.
//!
//! Records are stored as generic passwords under `(service, account)` with a
//! JSON body of the form `{"password": "...", "totp_url": "otpauth://..."}`.

use std::collections::HashMap;

use keyring::Entry;
use serde::Deserialize;
use tracing::debug;

use crate::error::{PrompterError, Result};
use crate::otp::Totp;

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when it is written to the session.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Raw JSON shape of a stored record.
#[derive(Deserialize)]
struct CredentialRecord {
    password: String,
    totp_url: String,
}

/// Password and OTP generator for one account. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct CredentialSet {
    pub password: SecureString,
    pub otp: Totp,
}

impl CredentialSet {
    /// Decode a stored record body.
    ///
    /// Shape mismatches are lookup errors; a bad `totp_url` is an OTP parse error.
    pub fn from_record(account: &str, data: &[u8]) -> Result<Self> {
        let record: CredentialRecord =
            serde_json::from_slice(data).map_err(|e| PrompterError::CredentialLookup {
                account: account.to_string(),
                reason: format!("malformed record: {}", e),
            })?;
        let otp = Totp::from_provisioning_uri(&record.totp_url)?;
        Ok(Self {
            password: SecureString::new(record.password),
            otp,
        })
    }
}

/// Where credential records come from.
pub trait CredentialSource {
    fn lookup(&self, account: &str) -> Result<CredentialSet>;
}

/// OS keychain backed source (macOS Keychain, Secret Service, Credential Manager).
pub struct KeyringSource {
    service: String,
}

impl KeyringSource {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }
}

impl CredentialSource for KeyringSource {
    fn lookup(&self, account: &str) -> Result<CredentialSet> {
        let lookup_error = |reason: String| PrompterError::CredentialLookup {
            account: account.to_string(),
            reason,
        };
        let entry = Entry::new(&self.service, account)
            .map_err(|e| lookup_error(format!("failed to access keyring: {}", e)))?;
        let data = match entry.get_secret() {
            Ok(data) => data,
            Err(keyring::Error::NoEntry) => {
                return Err(lookup_error(format!(
                    "no entry for service '{}'",
                    self.service
                )))
            }
            Err(e) => return Err(lookup_error(e.to_string())),
        };
        debug!(service = %self.service, account, "Retrieved credential record from keychain");
        CredentialSet::from_record(account, &data)
    }
}

/// In-memory source keyed by account, holding raw record bodies.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    records: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, account: impl Into<String>, body: impl Into<String>) -> Self {
        self.records.insert(account.into(), body.into());
        self
    }
}

impl CredentialSource for StaticSource {
    fn lookup(&self, account: &str) -> Result<CredentialSet> {
        let body = self
            .records
            .get(account)
            .ok_or_else(|| PrompterError::CredentialLookup {
                account: account.to_string(),
                reason: "no such record".to_string(),
            })?;
        CredentialSet::from_record(account, body.as_bytes())
    }
}
