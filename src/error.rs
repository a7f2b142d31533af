use thiserror::Error;

/// Rejection of an inbound frame at the socket boundary.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid message format: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Binary messages are not supported")]
    BinaryFrame,
}

/// Configuration that parses but cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("UTC offset of {0} hours is out of range")]
    InvalidUtcOffset(i32),

    #[error("grace period of {0} ms is too large")]
    InvalidGracePeriod(u64),
}

impl From<ConfigError> for std::io::Error {
    fn from(err: ConfigError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    }
}
