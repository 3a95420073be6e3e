//! HTTP client for the Pollinations prompt endpoint.
//!
//! Wraps the single `GET /prompt/{prompt}` call using [`reqwest`]. The
//! relay trusts its caller: requests are expected to be validated already.

use async_trait::async_trait;
use imgx_core::image::GeneratedImage;
use imgx_core::request::GenerationRequest;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE, PRAGMA};

use crate::url::{build_url, DEFAULT_BASE_URL};

/// Errors from the relay layer.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Failed to generate image: {status_text}")]
    GenerationFailed {
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status, e.g. `Internal Server Error`.
        status_text: String,
    },
}

/// Anything that can turn a validated request into an image.
///
/// Implemented by [`PollinationsApi`]; the presentation layer depends on the
/// trait so it can run against a stub.
#[async_trait]
pub trait ImageRelay: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, RelayError>;
}

/// HTTP client for the Pollinations image service.
#[derive(Debug, Clone)]
pub struct PollinationsApi {
    client: reqwest::Client,
    base_url: String,
}

impl Default for PollinationsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PollinationsApi {
    /// Client for the public endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Client for another deployment of the same API, e.g. a local stub.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Client reusing an existing [`reqwest::Client`] (shared connection
    /// pool).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Provider URL this client would call for `request`.
    pub fn url_for(&self, request: &GenerationRequest) -> String {
        build_url(&self.base_url, request)
    }

    /// Fetch one image.
    ///
    /// Sends `GET /prompt/{prompt}?...` with `Accept: image/*` and headers
    /// that forbid any intermediary from answering from cache. Returns the
    /// whole body and the declared `Content-Type` (empty when absent).
    pub async fn fetch_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, RelayError> {
        let url = self.url_for(request);

        tracing::info!(
            model = %request.model,
            width = request.width,
            height = request.height,
            steps = request.steps,
            seed = request.seed,
            "Requesting image from provider",
        );
        tracing::debug!(prompt = %request.prompt, %url, "Provider request URL");

        let result = self.send(&url).await;
        if let Err(ref e) = result {
            tracing::error!(error = %e, model = %request.model, "Error generating image");
        }
        result
    }

    // ---- private helpers ----

    async fn send(&self, url: &str) -> Result<GeneratedImage, RelayError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "image/*")
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::GenerationFailed {
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("Unknown Status")
                    .to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let bytes = response.bytes().await?;

        tracing::info!(
            content_type = %content_type,
            size_bytes = bytes.len(),
            "Received image from provider",
        );

        Ok(GeneratedImage::new(bytes.to_vec(), content_type))
    }
}

#[async_trait]
impl ImageRelay for PollinationsApi {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, RelayError> {
        self.fetch_image(request).await
    }
}
