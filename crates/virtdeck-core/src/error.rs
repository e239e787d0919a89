//! Error types shared across the access layer.

use std::fmt;

/// Categorised error kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum AccessErrorKind {
    /// Peer unreachable, refused, or the connection dropped mid-request
    ConnectionError,
    /// Request timed out
    Timeout,
    /// HTTP round trip completed with a non-success status
    TransportError(u16),
    /// Peer processed the action and reported a nonzero code
    ActionError(i64),
    /// Post-switch verification of a remote endpoint failed
    VerificationError,
    /// JSON parse / deserialization error
    ParseError,
    /// Malformed base address or derived URL
    InvalidEndpoint,
    /// Operation not available on this binding
    Unsupported,
    /// Generic
    Other,
}

/// Crate error type carrying a kind + human-readable message.
#[derive(Debug, Clone)]
pub struct AccessError {
    pub kind: AccessErrorKind,
    pub message: String,
}

impl AccessError {
    pub fn new(kind: AccessErrorKind, msg: impl Into<String>) -> Self {
        Self { kind, message: msg.into() }
    }

    pub fn connection(msg: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::ConnectionError, msg)
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::Timeout, msg)
    }

    pub fn transport(status: u16, msg: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::TransportError(status), msg)
    }

    pub fn action(code: i64, msg: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::ActionError(code), msg)
    }

    pub fn verification(msg: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::VerificationError, msg)
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::ParseError, msg)
    }

    pub fn invalid_endpoint(msg: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::InvalidEndpoint, msg)
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::new(AccessErrorKind::Unsupported, msg)
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.kind, self.message)
    }
}

impl std::error::Error for AccessError {}

impl From<AccessError> for String {
    fn from(e: AccessError) -> String {
        e.to_string()
    }
}

impl From<reqwest::Error> for AccessError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::timeout(format!("HTTP timeout: {e}"))
        } else if e.is_connect() {
            Self::connection(format!("Connection failed: {e}"))
        } else if e.is_decode() {
            Self::parse(format!("Response decode failed: {e}"))
        } else {
            Self::new(AccessErrorKind::Other, format!("HTTP error: {e}"))
        }
    }
}

impl From<serde_json::Error> for AccessError {
    fn from(e: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {e}"))
    }
}

impl From<url::ParseError> for AccessError {
    fn from(e: url::ParseError) -> Self {
        Self::invalid_endpoint(format!("Invalid URL: {e}"))
    }
}

/// Convenience alias.
pub type AccessResult<T> = Result<T, AccessError>;
