mod credentials;
mod loader;
mod types;

pub use credentials::{CredentialSet, CredentialSource, KeyringSource, SecureString, StaticSource};
pub use types::Config;
