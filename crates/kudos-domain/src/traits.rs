//! Trait definitions for external interactions
//!
//! Infrastructure implementations live in other crates.

use std::future::Future;

/// Something that can load an avatar image
///
/// Implemented by the infrastructure layer (kudos-sdk's HTTP image source).
/// A successful return means the image is ready to be shown; the bytes
/// themselves are the renderer's business.
pub trait ImageSource: Send + Sync + 'static {
    /// Error type for load failures
    type Error: std::fmt::Display + Send;

    /// Load the image behind `reference` (a proxied path or an absolute URL)
    fn load(&self, reference: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
