//! Kudos Rust SDK
//!
//! Client side of the reviews section: fetches place details through the
//! places proxy, normalizes them into [`Review`]s and drives one staggered
//! avatar loader per review card.
//!
//! # Example
//!
//! ```no_run
//! use kudos_sdk::{HttpImageSource, ReviewBoard, ReviewFetcher};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let fetcher = ReviewFetcher::new("http://localhost:8888");
//! let images = Arc::new(HttpImageSource::new("http://localhost:8888"));
//! let mut board = ReviewBoard::new(fetcher, images);
//!
//! board.activate("ChIJp7me7laZj4AR1Voz18Q5NYs").await;
//! board.settle_images().await;
//! println!("{:?}", board.view());
//! # }
//! ```
//!
//! [`Review`]: kudos_domain::Review

#![warn(missing_docs)]

mod avatar;
mod board;
mod error;
mod fetcher;
mod images;
mod loader;
mod normalize;
mod wire;

pub use avatar::{AvatarResolver, IMAGE_PROXY_PATH};
pub use board::{
    more_reviews_url, CardView, ReviewBoard, ReviewCard, SectionView, CONFIG_HINT,
    LOADING_MESSAGE, MORE_REVIEWS_LABEL,
};
pub use error::{ImageLoadError, SdkError};
pub use fetcher::{
    classify, Listing, ReviewFetcher, AUTH_ERROR_MESSAGE, BAD_IDENTIFIER_MESSAGE,
    MAX_REVIEWS, NO_REVIEWS_MESSAGE, PLACES_PROXY_PATH,
};
pub use images::HttpImageSource;
pub use loader::{StaggeredImageLoader, DEFAULT_STAGGER};
pub use normalize::{unix_now, ReviewNormalizer};
pub use wire::{ErrorBody, PlaceDetailsResponse, PlaceResult, RawReview};
