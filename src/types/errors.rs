use std::fmt;

// === LookupError ===

/// Errors raised while talking to the GitHub REST API.
///
/// The widget collapses every variant into the same "not found" view; the
/// variants only exist so the cause can be logged and tested.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The API answered 404 for the given username.
    NotFound(String),
    /// The API answered with another non-success status code.
    Status(u16),
    /// The request never produced a response (DNS, TLS, timeout, ...).
    Network(String),
    /// The response body was not the JSON shape we expect.
    Decode(String),
    /// The configured API base URL cannot be used to build request URLs.
    InvalidUrl(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound(username) => write!(f, "GitHub user not found: {}", username),
            LookupError::Status(code) => write!(f, "GitHub API returned status {}", code),
            LookupError::Network(msg) => write!(f, "GitHub network error: {}", msg),
            LookupError::Decode(msg) => write!(f, "GitHub response decode error: {}", msg),
            LookupError::InvalidUrl(msg) => write!(f, "Invalid GitHub API URL: {}", msg),
        }
    }
}

impl std::error::Error for LookupError {}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LookupError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            LookupError::Status(status.as_u16())
        } else {
            LookupError::Network(err.to_string())
        }
    }
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

// === ClientError ===

/// Errors raised while building the HTTP client from settings.
#[derive(Debug)]
pub enum ClientError {
    /// A header value (user agent or token) contains invalid characters.
    InvalidHeader(String),
    /// The underlying HTTP client could not be constructed.
    BuildFailed(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::InvalidHeader(msg) => write!(f, "Invalid HTTP header: {}", msg),
            ClientError::BuildFailed(msg) => write!(f, "Failed to build HTTP client: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}
