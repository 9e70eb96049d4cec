//! Time-based one-time codes from `otpauth://` provisioning URIs.

use std::time::{SystemTime, UNIX_EPOCH};

use totp_rs::TOTP;

use crate::error::{PrompterError, Result};

/// Produces a code for "now" shifted by a whole number of periods.
pub trait CodeGenerator {
    fn generate(&self, offset: i64) -> Result<String>;
}

/// TOTP parameters (algorithm, digits, period, secret) from a provisioning URI.
#[derive(Clone)]
pub struct Totp {
    inner: TOTP,
}

impl Totp {
    /// Parse `otpauth://totp/<label>?secret=...`.
    ///
    /// Secrets shorter than 128 bits are accepted; many providers still issue them.
    pub fn from_provisioning_uri(uri: &str) -> Result<Self> {
        let inner =
            TOTP::from_url_unchecked(uri).map_err(|e| PrompterError::OtpParse(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Code validity window in seconds.
    pub fn period(&self) -> u64 {
        self.inner.step
    }

    /// Code for an absolute Unix timestamp.
    pub fn generate_at(&self, timestamp: u64) -> String {
        self.inner.generate(timestamp)
    }
}

impl CodeGenerator for Totp {
    fn generate(&self, offset: i64) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| PrompterError::OtpGeneration(e.to_string()))?
            .as_secs();
        let shift = i64::try_from(self.period())
            .ok()
            .and_then(|period| offset.checked_mul(period))
            .ok_or_else(|| PrompterError::OtpGeneration(format!("offset {} overflows", offset)))?;
        let timestamp = now.checked_add_signed(shift).ok_or_else(|| {
            PrompterError::OtpGeneration(format!("offset {} is out of range", offset))
        })?;
        Ok(self.generate_at(timestamp))
    }
}

impl std::fmt::Debug for Totp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Totp")
            .field("digits", &self.inner.digits)
            .field("period", &self.inner.step)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6238 SHA1 seed "12345678901234567890".
    const RFC_URI: &str =
        "otpauth://totp/Test:alice?secret=GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ&issuer=Test";

    #[test]
    fn rfc6238_vector() {
        let totp = Totp::from_provisioning_uri(RFC_URI).unwrap();
        assert_eq!(totp.period(), 30);
        assert_eq!(totp.generate_at(59), "287082");
        assert_eq!(totp.generate_at(1111111109), "081804");
    }

    #[test]
    fn offsets_move_by_whole_periods() {
        let totp = Totp::from_provisioning_uri(RFC_URI).unwrap();
        let code = totp.generate(0).unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
        assert!(totp.generate(-2).is_ok());
        assert!(totp.generate(2).is_ok());
    }

    #[test]
    fn overflowing_offset_is_generation_error() {
        let totp = Totp::from_provisioning_uri(RFC_URI).unwrap();
        assert!(matches!(
            totp.generate(i64::MIN),
            Err(PrompterError::OtpGeneration(_))
        ));
    }

    #[test]
    fn rejects_non_otpauth_uri() {
        assert!(matches!(
            Totp::from_provisioning_uri("https://example.com/?secret=ABC"),
            Err(PrompterError::OtpParse(_))
        ));
    }

    #[test]
    fn debug_hides_secret() {
        let totp = Totp::from_provisioning_uri(RFC_URI).unwrap();
        assert!(!format!("{:?}", totp).contains("GEZDG"));
    }
}
