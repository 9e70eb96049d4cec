use std::fs;
use std::path::{Path, PathBuf};

use crate::config::types::Config;
use crate::error::{PrompterError, Result};

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/prompter/config.toml` on Unix/macOS, or the platform
    /// equivalent via `dirs::config_dir()`.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("prompter").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// A missing default file is not an error: defaults are returned.
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from(&path)
    }

    /// Loads and validates configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| PrompterError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| PrompterError::ConfigParse {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Checks:
    /// - The service name is not empty
    /// - At least two OTP offsets are configured (the last slot marks exhaustion)
    pub fn validate(&self) -> Result<()> {
        if self.service.trim().is_empty() {
            return Err(PrompterError::ConfigValidation {
                message: "service must not be empty".to_string(),
            });
        }
        if self.otp_offsets.len() < 2 {
            return Err(PrompterError::ConfigValidation {
                message: "otp_offsets must contain at least two offsets".to_string(),
            });
        }
        Ok(())
    }
}
