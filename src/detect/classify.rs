//! Prompt classification — text tail → prompt kind.

/// Trailing character that marks output as a prompt.
pub const PROMPT_TERMINATOR: u8 = b':';

const OTP_KEYWORDS: &[&str] = &["otp", "mfa"];
const PASSWORD_KEYWORDS: &[&str] = &["password"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Password,
    Otp,
    Unknown,
}

impl PromptKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PromptKind::Password => "password",
            PromptKind::Otp => "otp",
            PromptKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for PromptKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified prompt, in the order its bytes were read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptEvent {
    pub raw_tail: String,
    pub kind: PromptKind,
}

/// Classify `text` if it ends in the prompt terminator.
///
/// The trailing character is checked as-is; whitespace is not stripped.
pub fn classify(text: &str) -> Option<PromptKind> {
    if text.as_bytes().last() != Some(&PROMPT_TERMINATOR) {
        return None;
    }
    let lower = text.to_lowercase();
    let kind = if OTP_KEYWORDS.iter().any(|k| lower.contains(k)) {
        PromptKind::Otp
    } else if PASSWORD_KEYWORDS.iter().any(|k| lower.contains(k)) {
        PromptKind::Password
    } else {
        PromptKind::Unknown
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_and_mfa_prompts() {
        assert_eq!(classify("Enter OTP:"), Some(PromptKind::Otp));
        assert_eq!(classify("MFA code:"), Some(PromptKind::Otp));
        assert_eq!(classify("Verification (mfa):"), Some(PromptKind::Otp));
    }

    #[test]
    fn otp_beats_password() {
        assert_eq!(classify("Password + OTP:"), Some(PromptKind::Otp));
    }

    #[test]
    fn password_prompts() {
        assert_eq!(classify("Password:"), Some(PromptKind::Password));
        assert_eq!(classify("bob@host's PASSWORD:"), Some(PromptKind::Password));
    }

    #[test]
    fn other_terminated_text_is_unknown() {
        assert_eq!(classify("Username:"), Some(PromptKind::Unknown));
        assert_eq!(classify(":"), Some(PromptKind::Unknown));
    }

    #[test]
    fn no_terminator_no_prompt() {
        assert_eq!(classify("Password: "), None);
        assert_eq!(classify("password"), None);
        assert_eq!(classify(""), None);
    }
}
