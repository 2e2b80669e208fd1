//! Avatar resolution: decides how a reviewer's picture is referenced.

use kudos_domain::AvatarRef;
use serde_json::Value;
use tracing::debug;

/// Path of the image proxy endpoint
pub const IMAGE_PROXY_PATH: &str = "/api/google-images";

/// Turns a raw `profile_photo_url` into an [`AvatarRef`]
///
/// Never fails: anything unusable becomes the placeholder glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarResolver {
    proxy_path: Option<String>,
}

impl Default for AvatarResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AvatarResolver {
    /// Resolver routing image URLs through [`IMAGE_PROXY_PATH`]
    pub fn new() -> Self {
        Self::with_proxy_path(IMAGE_PROXY_PATH)
    }

    /// Resolver routing image URLs through a custom proxy path
    pub fn with_proxy_path(path: impl Into<String>) -> Self {
        Self {
            proxy_path: Some(path.into()),
        }
    }

    /// Resolver leaving image URLs pointed at the external host
    pub fn direct() -> Self {
        Self { proxy_path: None }
    }

    /// Resolve a raw avatar value
    ///
    /// - absent, non-string or empty: placeholder
    /// - `http://` / `https://` URL: proxied (or external for [`direct`](Self::direct))
    /// - any other string: passed through as a glyph
    pub fn resolve(&self, raw: Option<&Value>) -> AvatarRef {
        let url = match raw {
            Some(Value::String(s)) if !s.is_empty() => s,
            _ => return AvatarRef::placeholder(),
        };

        if !is_http_url(url) {
            return AvatarRef::Glyph(url.clone());
        }

        match &self.proxy_path {
            Some(path) => {
                // &str is always valid UTF-8, so percent-encoding cannot fail here.
                let proxied = format!("{}?url={}", path, urlencoding::encode(url));
                debug!("Proxying avatar image: {}", proxied);
                AvatarRef::Proxied(proxied)
            }
            None => AvatarRef::External(url.clone()),
        }
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}
