//! Review fetcher: one request to the places proxy per fetch cycle.

use crate::error::SdkError;
use crate::normalize::{unix_now, ReviewNormalizer};
use crate::wire::PlaceDetailsResponse;
use crate::AvatarResolver;
use kudos_domain::{ErrorKind, FetchResult};
use tracing::{debug, info, warn};

/// Path of the places proxy endpoint
pub const PLACES_PROXY_PATH: &str = "/api/google-places";

/// Most reviews the provider returns; anything past this is dropped
pub const MAX_REVIEWS: usize = 5;

/// Message for a successful fetch with no reviews
pub const NO_REVIEWS_MESSAGE: &str = "No reviews found for this business";

/// Message for `REQUEST_DENIED`
pub const AUTH_ERROR_MESSAGE: &str =
    "API key is invalid or Places API is not enabled. Check your Google Cloud Console settings.";

/// Message for `INVALID_REQUEST`
pub const BAD_IDENTIFIER_MESSAGE: &str =
    "Invalid Place ID. Please check your Place ID is correct.";

/// Outcome of a fetch together with the business name, when known
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// `result.name` from the provider
    pub business_name: Option<String>,
    /// Fetch outcome
    pub result: FetchResult,
}

impl Listing {
    fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            business_name: None,
            result: FetchResult::failed(kind, message),
        }
    }
}

/// Fetches reviews for a place through the places proxy
///
/// Performs exactly one GET per call and never retries.
#[derive(Debug, Clone)]
pub struct ReviewFetcher {
    http: reqwest::Client,
    base_url: String,
    normalizer: ReviewNormalizer,
}

impl ReviewFetcher {
    /// Create a fetcher for a proxy at `base_url` (e.g. `http://localhost:8888`)
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a fetcher sharing an existing HTTP client
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            normalizer: ReviewNormalizer::default(),
        }
    }

    /// Use a different avatar resolver for normalized reviews
    pub fn with_resolver(mut self, resolver: AvatarResolver) -> Self {
        self.normalizer = ReviewNormalizer::new(resolver);
        self
    }

    /// Full URL of the places endpoint
    pub fn places_url(&self) -> String {
        format!("{}{}", self.base_url, PLACES_PROXY_PATH)
    }

    /// Fetch and normalize the reviews of `place_id`
    pub async fn fetch(&self, place_id: &str) -> FetchResult {
        self.fetch_listing(place_id).await.result
    }

    /// Like [`fetch`](Self::fetch), also reporting the business name
    pub async fn fetch_listing(&self, place_id: &str) -> Listing {
        info!("Fetching reviews for place {}", place_id);

        let payload = match self.request(place_id).await {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Error fetching reviews: {}", e);
                return Listing::failed(ErrorKind::NetworkError, e.to_string());
            }
        };

        let listing = classify(payload, &self.normalizer, unix_now());
        match &listing.result {
            FetchResult::Failed { kind, message } => {
                warn!("Reviews unavailable ({}): {}", kind, message)
            }
            result => debug!("Fetched {} review(s)", result.reviews().len()),
        }
        listing
    }

    async fn request(&self, place_id: &str) -> Result<PlaceDetailsResponse, SdkError> {
        let response = self
            .http
            .get(self.places_url())
            .query(&[("place_id", place_id)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SdkError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Interpret a decoded place-details payload
///
/// Kept free of I/O so every provider status can be exercised directly.
pub fn classify(payload: PlaceDetailsResponse, normalizer: &ReviewNormalizer, now: i64) -> Listing {
    let result = match (payload.status.as_str(), payload.result) {
        ("OK", Some(result)) => result,
        ("REQUEST_DENIED", _) => return Listing::failed(ErrorKind::AuthError, AUTH_ERROR_MESSAGE),
        ("INVALID_REQUEST", _) => {
            return Listing::failed(ErrorKind::BadIdentifier, BAD_IDENTIFIER_MESSAGE)
        }
        (status, _) => {
            let message = payload
                .error_message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("API Error: {}", status));
            return Listing::failed(ErrorKind::ProviderError, message);
        }
    };

    let reviews: Vec<_> = result
        .reviews
        .unwrap_or_default()
        .iter()
        .take(MAX_REVIEWS)
        .enumerate()
        .map(|(position, raw)| normalizer.normalize(raw, position, now))
        .collect();

    let result_state = if reviews.is_empty() {
        FetchResult::Empty {
            message: NO_REVIEWS_MESSAGE.to_string(),
        }
    } else {
        FetchResult::Succeeded(reviews)
    };

    Listing {
        business_name: result.name,
        result: result_state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{PlaceResult, RawReview};

    const NOW: i64 = 1_760_000_000;

    fn ok_payload(review_count: usize) -> PlaceDetailsResponse {
        let reviews = (0..review_count)
            .map(|i| RawReview {
                author_name: format!("Reviewer {}", i),
                rating: 5.0,
                time: Some(NOW - 86_400),
                text: format!("Review number {}", i),
                ..Default::default()
            })
            .collect();

        PlaceDetailsResponse {
            status: "OK".to_string(),
            result: Some(PlaceResult {
                name: Some("Bay Area Movers".to_string()),
                rating: Some(4.9),
                reviews: Some(reviews),
            }),
            error_message: None,
        }
    }

    fn status_payload(status: &str, error_message: Option<&str>) -> PlaceDetailsResponse {
        PlaceDetailsResponse {
            status: status.to_string(),
            result: None,
            error_message: error_message.map(str::to_string),
        }
    }

    fn classify_now(payload: PlaceDetailsResponse) -> Listing {
        classify(payload, &ReviewNormalizer::default(), NOW)
    }

    #[test]
    fn test_request_denied_is_auth_error() {
        let listing = classify_now(status_payload("REQUEST_DENIED", Some("bad key")));
        assert_eq!(
            listing.result,
            FetchResult::failed(ErrorKind::AuthError, AUTH_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_invalid_request_is_bad_identifier() {
        let listing = classify_now(status_payload("INVALID_REQUEST", None));
        assert_eq!(listing.result.error_kind(), Some(ErrorKind::BadIdentifier));
    }

    #[test]
    fn test_other_status_uses_provider_message() {
        let listing = classify_now(status_payload("OVER_QUERY_LIMIT", Some("You have exceeded your quota.")));
        assert_eq!(
            listing.result,
            FetchResult::failed(ErrorKind::ProviderError, "You have exceeded your quota.")
        );
    }

    #[test]
    fn test_other_status_without_message() {
        let listing = classify_now(status_payload("NOT_FOUND", None));
        assert_eq!(
            listing.result,
            FetchResult::failed(ErrorKind::ProviderError, "API Error: NOT_FOUND")
        );
    }

    #[test]
    fn test_ok_without_result_is_provider_error() {
        let listing = classify_now(status_payload("OK", None));
        assert_eq!(
            listing.result,
            FetchResult::failed(ErrorKind::ProviderError, "API Error: OK")
        );
    }

    #[test]
    fn test_ok_with_no_reviews_is_empty() {
        let listing = classify_now(ok_payload(0));
        assert_eq!(
            listing.result,
            FetchResult::Empty {
                message: NO_REVIEWS_MESSAGE.to_string()
            }
        );
        assert_eq!(listing.business_name.as_deref(), Some("Bay Area Movers"));
    }

    #[test]
    fn test_ok_with_missing_reviews_field_is_empty() {
        let mut payload = ok_payload(0);
        if let Some(result) = payload.result.as_mut() {
            result.reviews = None;
        }
        assert!(matches!(classify_now(payload).result, FetchResult::Empty { .. }));
    }

    #[test]
    fn test_truncates_to_five_in_order() {
        let listing = classify_now(ok_payload(7));
        let reviews = listing.result.reviews();
        assert_eq!(reviews.len(), MAX_REVIEWS);
        let authors: Vec<_> = reviews.iter().map(|r| r.author.as_str()).collect();
        assert_eq!(
            authors,
            ["Reviewer 0", "Reviewer 1", "Reviewer 2", "Reviewer 3", "Reviewer 4"]
        );
        assert_eq!(reviews[4].id, "Reviewer 44");
        assert_eq!(reviews[0].date, "1 day ago");
    }

    #[test]
    fn test_places_url() {
        let fetcher = ReviewFetcher::new("http://localhost:8888/");
        assert_eq!(fetcher.places_url(), "http://localhost:8888/api/google-places");
    }
}
