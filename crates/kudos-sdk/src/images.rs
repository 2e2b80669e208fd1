//! HTTP avatar image source.

use crate::error::ImageLoadError;
use kudos_domain::ImageSource;
use reqwest::header::CONTENT_TYPE;

/// Loads avatars over HTTP
///
/// Proxied references (`/api/google-images?...`) are relative to the proxy's
/// base URL; absolute URLs are requested as-is.
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpImageSource {
    /// Create an image source for a proxy at `base_url`
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create an image source sharing an existing HTTP client
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// URL actually requested for `reference`
    pub fn url_for(&self, reference: &str) -> String {
        if reference.starts_with('/') {
            format!("{}{}", self.base_url, reference)
        } else {
            reference.to_string()
        }
    }
}

impl ImageSource for HttpImageSource {
    type Error = ImageLoadError;

    async fn load(&self, reference: &str) -> Result<(), ImageLoadError> {
        let response = self.http.get(self.url_for(reference)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageLoadError::Status(status.as_u16()));
        }

        if let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        {
            if !content_type.starts_with("image/") {
                return Err(ImageLoadError::NotAnImage(content_type.to_string()));
            }
        }

        response.bytes().await?;
        Ok(())
    }
}
