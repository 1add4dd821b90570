use ghcard::types::errors::*;

// === LookupError Tests ===

#[test]
fn lookup_error_not_found_display() {
    let err = LookupError::NotFound("notexists9873184".to_string());
    assert_eq!(err.to_string(), "GitHub user not found: notexists9873184");
}

#[test]
fn lookup_error_display_variants() {
    assert_eq!(
        LookupError::Status(502).to_string(),
        "GitHub API returned status 502"
    );
    assert_eq!(
        LookupError::Network("connection refused".to_string()).to_string(),
        "GitHub network error: connection refused"
    );
    assert_eq!(
        LookupError::Decode("missing field `login`".to_string()).to_string(),
        "GitHub response decode error: missing field `login`"
    );
    assert_eq!(
        LookupError::InvalidUrl("not a url".to_string()).to_string(),
        "Invalid GitHub API URL: not a url"
    );
}

#[test]
fn lookup_error_implements_error_trait() {
    let err: Box<dyn std::error::Error> = Box::new(LookupError::Status(500));
    assert!(err.source().is_none());
}

#[test]
fn lookup_error_is_comparable() {
    assert_eq!(LookupError::Status(404), LookupError::Status(404));
    assert_ne!(
        LookupError::NotFound("a".to_string()),
        LookupError::NotFound("b".to_string())
    );
}

// === SettingsError Tests ===

#[test]
fn settings_error_display_variants() {
    assert_eq!(
        SettingsError::IoError("disk full".to_string()).to_string(),
        "Settings I/O error: disk full"
    );
    assert_eq!(
        SettingsError::SerializationError("bad json".to_string()).to_string(),
        "Settings serialization error: bad json"
    );
    assert_eq!(
        SettingsError::InvalidKey("foo.bar".to_string()).to_string(),
        "Invalid settings key: foo.bar"
    );
    assert_eq!(
        SettingsError::InvalidValue("expected u64".to_string()).to_string(),
        "Invalid settings value: expected u64"
    );
}

// === ClientError Tests ===

#[test]
fn client_error_display_variants() {
    assert_eq!(
        ClientError::InvalidHeader("user agent: invalid".to_string()).to_string(),
        "Invalid HTTP header: user agent: invalid"
    );
    assert_eq!(
        ClientError::BuildFailed("no tls backend".to_string()).to_string(),
        "Failed to build HTTP client: no tls backend"
    );
}

#[test]
fn all_errors_are_debug() {
    let lookup = LookupError::Network("x".to_string());
    let settings = SettingsError::InvalidKey("y".to_string());
    let client = ClientError::BuildFailed("z".to_string());
    assert!(!format!("{:?}", lookup).is_empty());
    assert!(!format!("{:?}", settings).is_empty());
    assert!(!format!("{:?}", client).is_empty());
}
