//! Error types for the Kudos SDK.

use thiserror::Error;

/// Errors raised while talking to the places proxy
///
/// These never reach the caller of `ReviewFetcher::fetch` directly; they are
/// folded into a `FetchResult::Failed` with a `NetworkError` kind.
#[derive(Debug, Error)]
pub enum SdkError {
    /// Proxy answered with a non-success HTTP status
    #[error("HTTP error! status: {0}")]
    HttpStatus(u16),

    /// Connection error (network, DNS, etc.)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request could not be completed for another transport reason
    #[error("Request error: {0}")]
    RequestError(String),

    /// Response body was not the expected JSON
    #[error("Invalid response body: {0}")]
    DecodeError(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            SdkError::ConnectionError(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::HttpStatus(status.as_u16())
        } else if e.is_decode() {
            SdkError::DecodeError(e.to_string())
        } else {
            SdkError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::DecodeError(e.to_string())
    }
}

/// Avatar image failed to load
///
/// Captured by the owning card's loader and discarded after logging.
#[derive(Debug, Error)]
pub enum ImageLoadError {
    /// Transport failure
    #[error("image request failed: {0}")]
    Request(String),

    /// Image host (or proxy) answered with a non-success status
    #[error("image request returned status {0}")]
    Status(u16),

    /// Response was not an image
    #[error("unexpected content type: {0}")]
    NotAnImage(String),
}

impl From<reqwest::Error> for ImageLoadError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ImageLoadError::Status(status.as_u16()),
            None => ImageLoadError::Request(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_message() {
        assert_eq!(SdkError::HttpStatus(502).to_string(), "HTTP error! status: 502");
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err: SdkError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, SdkError::DecodeError(_)));
    }
}
