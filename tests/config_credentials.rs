use prompter::config::{CredentialSource, StaticSource};
use prompter::PrompterError;

const RFC_URI: &str =
    "otpauth://totp/Test:bob?secret=GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ&issuer=Test";

fn record(password: &str, uri: &str) -> String {
    serde_json::json!({ "password": password, "totp_url": uri }).to_string()
}

#[test]
fn test_lookup_returns_password_and_generator() {
    let source = StaticSource::new().with_record("bob", record("hunter2", RFC_URI));
    let set = source.lookup("bob").unwrap();
    assert_eq!(set.password.expose(), "hunter2");
    assert_eq!(set.otp.generate_at(59), "287082");
}

#[test]
fn test_lookup_honours_uri_parameters() {
    let uri = "otpauth://totp/Test:bob?secret=GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ&issuer=Test&digits=8&period=60";
    let source = StaticSource::new().with_record("bob", record("x", uri));
    let set = source.lookup("bob").unwrap();
    assert_eq!(set.otp.period(), 60);
    assert_eq!(set.otp.generate_at(0).len(), 8);
}

#[test]
fn test_unknown_account_is_lookup_error() {
    let source = StaticSource::new().with_record("bob", record("x", RFC_URI));
    let err = source.lookup("alice").unwrap_err();
    assert!(matches!(err, PrompterError::CredentialLookup { ref account, .. } if account == "alice"));
}

#[test]
fn test_non_json_record_is_lookup_error() {
    let source = StaticSource::new().with_record("bob", "not json");
    assert!(matches!(
        source.lookup("bob"),
        Err(PrompterError::CredentialLookup { .. })
    ));
}

#[test]
fn test_bad_totp_url_is_parse_error() {
    let source = StaticSource::new().with_record("bob", record("x", "otpauth://hotp/x?secret=AAAA"));
    assert!(matches!(source.lookup("bob"), Err(PrompterError::OtpParse(_))));
}
