//! Fetch cycle outcome

use crate::Review;

/// Classification of a failed fetch (or image load)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure, non-success HTTP status or unreadable body
    NetworkError,
    /// Credentials missing or rejected at the proxy/provider
    AuthError,
    /// The place identifier was rejected by the provider
    BadIdentifier,
    /// Any other non-OK provider status
    ProviderError,
    /// Avatar failed to load. Always swallowed by the owning card.
    ImageLoadError,
}

impl ErrorKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NetworkError => "network_error",
            ErrorKind::AuthError => "auth_error",
            ErrorKind::BadIdentifier => "bad_identifier",
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::ImageLoadError => "image_load_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one fetch cycle
///
/// `Empty` is a success with zero reviews; it is kept apart from
/// `Succeeded` so a populated list is never empty.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// Request in flight
    Loading,
    /// Reviews in provider order, at most five
    Succeeded(Vec<Review>),
    /// Terminal failure for this cycle
    Failed {
        /// Failure classification
        kind: ErrorKind,
        /// User-facing message
        message: String,
    },
    /// Provider answered but has no reviews
    Empty {
        /// User-facing message
        message: String,
    },
}

impl FetchResult {
    /// Build a failure
    pub fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        FetchResult::Failed {
            kind,
            message: message.into(),
        }
    }

    /// Whether the cycle has finished (successfully or not)
    pub fn is_settled(&self) -> bool {
        !matches!(self, FetchResult::Loading)
    }

    /// Reviews of a successful cycle, empty otherwise
    pub fn reviews(&self) -> &[Review] {
        match self {
            FetchResult::Succeeded(reviews) => reviews,
            _ => &[],
        }
    }

    /// Error kind of a failed cycle
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            FetchResult::Failed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
