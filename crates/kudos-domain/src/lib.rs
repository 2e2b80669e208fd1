//! Kudos Domain Layer
//!
//! This crate contains the value types and pure logic behind the reviews
//! section of the site. It has ZERO external dependencies and defines the
//! concepts every other crate in the workspace builds on.
//!
//! ## Key Concepts
//!
//! - **Review**: one normalized customer review, immutable once built
//! - **Avatar reference**: proxied URL, raw external URL, or a placeholder glyph
//! - **FetchResult**: outcome of one fetch cycle (loading, populated, empty, failed)
//! - **ImageLoadState**: forward-only state of a single card's avatar load
//! - **Formatting**: relative review age and star ratings
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure functions only; the clock is always passed in
//! - I/O lives in `kudos-sdk` behind the traits defined here

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fetch;
pub mod format;
pub mod image_state;
pub mod review;
pub mod traits;

// Re-exports for convenience
pub use fetch::{ErrorKind, FetchResult};
pub use format::{format_relative_age, render_stars, MAX_STARS, STAR_GLYPH};
pub use image_state::{AvatarDisplay, ImageLoadEvent, ImageLoadState};
pub use review::{AvatarRef, Review, PLACEHOLDER_GLYPH};
pub use traits::ImageSource;
