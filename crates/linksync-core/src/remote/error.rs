//! Remote service errors

use thiserror::Error;

/// Errors returned by a [`LinkService`](super::LinkService)
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Transport failure, timeout, or undecodable body
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The domain is not registered with the service
    #[error("Domain not found on remote service: '{0}'")]
    UnknownDomain(String),

    /// The response was well-formed JSON but not what we expected
    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("API key not configured. Set LINKSYNC_API_KEY or run:\n  linksync config set api_key <key>")]
    MissingApiKey,
}

impl RemoteError {
    /// Whether the error came from the service rejecting a request
    pub fn is_client_error(&self) -> bool {
        matches!(self, RemoteError::Api { status, .. } if (400..500).contains(status))
    }
}

/// Result type for remote operations
pub type RemoteResult<T> = Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = RemoteError::Api {
            status: 409,
            message: "Link already exists".to_string(),
        };

        assert_eq!(err.to_string(), "API error (409): Link already exists");
        assert!(err.is_client_error());
    }

    #[test]
    fn test_server_error_is_not_client_error() {
        let err = RemoteError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(!err.is_client_error());
        assert!(!RemoteError::UnknownDomain("s.io".to_string()).is_client_error());
    }
}
