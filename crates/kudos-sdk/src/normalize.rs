//! Review normalization: provider records to domain reviews.

use crate::avatar::AvatarResolver;
use crate::wire::RawReview;
use kudos_domain::{format_relative_age, Review};
use std::time::{SystemTime, UNIX_EPOCH};

/// Current Unix time in seconds (0 if the clock is before the epoch)
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Maps [`RawReview`]s into [`Review`]s
#[derive(Debug, Clone, Default)]
pub struct ReviewNormalizer {
    resolver: AvatarResolver,
}

impl ReviewNormalizer {
    /// Create a normalizer using the given avatar resolver
    pub fn new(resolver: AvatarResolver) -> Self {
        Self { resolver }
    }

    /// Normalize one record at list position `position`
    ///
    /// Pure for a fixed `now`. The id is the author name with the position
    /// appended, which is not collision-free: "Al" at 11 and "Al1" at 1
    /// both become "Al11".
    pub fn normalize(&self, raw: &RawReview, position: usize, now: i64) -> Review {
        Review {
            id: format!("{}{}", raw.author_name, position),
            author: raw.author_name.clone(),
            rating: raw.rating,
            date: format_relative_age(raw.time, now),
            relative_time: raw.relative_time_description.clone().unwrap_or_default(),
            text: raw.text.clone(),
            avatar: self.resolver.resolve(raw.profile_photo_url.as_ref()),
        }
    }

    /// Normalize against the system clock
    pub fn normalize_now(&self, raw: &RawReview, position: usize) -> Review {
        self.normalize(raw, position, unix_now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kudos_domain::AvatarRef;
    use serde_json::json;

    const NOW: i64 = 1_760_000_000;

    fn raw_review() -> RawReview {
        RawReview {
            author_name: "Maria Lopez".to_string(),
            rating: 5.0,
            time: Some(NOW - 3 * 86_400),
            text: "Fast and friendly.".to_string(),
            profile_photo_url: Some(json!("https://example.com/p.jpg")),
            relative_time_description: Some("3 days ago".to_string()),
        }
    }

    #[test]
    fn test_normalize_fields() {
        let review = ReviewNormalizer::default().normalize(&raw_review(), 2, NOW);
        assert_eq!(review.id, "Maria Lopez2");
        assert_eq!(review.author, "Maria Lopez");
        assert_eq!(review.rating, 5.0);
        assert_eq!(review.date, "3 days ago");
        assert_eq!(review.relative_time, "3 days ago");
        assert_eq!(review.text, "Fast and friendly.");
        assert_eq!(
            review.avatar,
            AvatarRef::Proxied("/api/google-images?url=https%3A%2F%2Fexample.com%2Fp.jpg".to_string())
        );
    }

    #[test]
    fn test_missing_relative_time_falls_back_to_date() {
        let mut raw = raw_review();
        raw.relative_time_description = None;
        raw.time = Some(NOW - 40 * 86_400);

        let review = ReviewNormalizer::default().normalize(&raw, 0, NOW);
        assert_eq!(review.relative_time, "");
        assert_eq!(review.display_age(), "1 month ago");
    }

    #[test]
    fn test_missing_photo_uses_placeholder() {
        let mut raw = raw_review();
        raw.profile_photo_url = None;
        let review = ReviewNormalizer::default().normalize(&raw, 0, NOW);
        assert_eq!(review.avatar, AvatarRef::placeholder());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let normalizer = ReviewNormalizer::default();
        let raw = raw_review();
        assert_eq!(
            normalizer.normalize(&raw, 1, NOW),
            normalizer.normalize(&raw, 1, NOW)
        );
    }

    #[test]
    fn test_id_collision_is_not_guarded() {
        let normalizer = ReviewNormalizer::default();
        let mut first = raw_review();
        first.author_name = "Al".to_string();
        let mut second = raw_review();
        second.author_name = "Al1".to_string();

        assert_eq!(
            normalizer.normalize(&first, 11, NOW).id,
            normalizer.normalize(&second, 1, NOW).id
        );
    }
}
