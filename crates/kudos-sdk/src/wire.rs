//! Wire types for the places proxy responses.
//!
//! The proxy forwards the provider's place-details JSON untouched, so these
//! mirror the provider's field names.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level place-details response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceDetailsResponse {
    /// Provider status: "OK", "REQUEST_DENIED", "INVALID_REQUEST", ...
    #[serde(default)]
    pub status: String,
    /// Present when the status is "OK"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<PlaceResult>,
    /// Provider explanation for non-OK statuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Place details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaceResult {
    /// Business name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Aggregate rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Up to five reviews, provider order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<RawReview>>,
}

/// One review as returned by the provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawReview {
    /// Reviewer display name
    #[serde(default, deserialize_with = "null_as_default")]
    pub author_name: String,
    /// Star rating
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    /// Unix seconds
    #[serde(default)]
    pub time: Option<i64>,
    /// Review body
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    /// Kept as raw JSON: the provider sometimes sends null or a non-string
    #[serde(default)]
    pub profile_photo_url: Option<serde_json::Value>,
    /// Provider wording such as "a month ago"
    #[serde(default)]
    pub relative_time_description: Option<String>,
}

/// Reads `null` as the type's default value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// `{ "error": "..." }` body returned by the proxies on failure paths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_details_parsing() {
        let json = r#"{
            "status": "OK",
            "result": {
                "name": "Bay Area Movers",
                "rating": 4.8,
                "reviews": [
                    {
                        "author_name": "Dana",
                        "rating": 5,
                        "time": 1700000000,
                        "text": "Careful and on time.",
                        "profile_photo_url": "https://lh3.googleusercontent.com/a/abc",
                        "relative_time_description": "a year ago"
                    },
                    {
                        "author_name": "Lee",
                        "rating": 4,
                        "time": 1710000000,
                        "text": ""
                    }
                ]
            }
        }"#;

        let response: PlaceDetailsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "OK");
        let result = response.result.unwrap();
        assert_eq!(result.name.as_deref(), Some("Bay Area Movers"));
        let reviews = result.reviews.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, 5.0);
        assert!(reviews[1].profile_photo_url.is_none());
        assert!(reviews[1].relative_time_description.is_none());
    }

    #[test]
    fn test_error_status_parsing() {
        let json = r#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."}"#;
        let response: PlaceDetailsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status, "REQUEST_DENIED");
        assert!(response.result.is_none());
        assert!(response.error_message.is_some());
    }

    #[test]
    fn test_non_string_photo_is_kept_raw() {
        let json = r#"{"author_name": "Sam", "rating": 3, "profile_photo_url": 42}"#;
        let review: RawReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.profile_photo_url, Some(serde_json::json!(42)));
        assert_eq!(review.time, None);
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let json = r#"{"author_name": null, "rating": null, "text": null, "time": null}"#;
        let review: RawReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.author_name, "");
        assert_eq!(review.rating, 0.0);
        assert_eq!(review.text, "");
        assert_eq!(review.time, None);
    }
}
