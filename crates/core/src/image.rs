//! The generated image as held in memory between the relay and the page.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Base name used when the image is saved by the user.
pub const DOWNLOAD_BASENAME: &str = "imgx";

/// Raw image bytes plus the content type the provider declared for them.
///
/// Lives only for the duration of one request or one page state; it is
/// replaced on every new submission and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl GeneratedImage {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Encode as a `data:` URL an `<img>` element can render directly.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type,
            STANDARD.encode(&self.bytes)
        )
    }

    /// Size of the image payload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension matching the content type. Unknown types fall back to
    /// `jpg`.
    pub fn extension(&self) -> &'static str {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/avif" => "avif",
            _ => "jpg",
        }
    }

    /// Suggested file name for saving the image, e.g. `imgx.png`.
    pub fn file_name(&self) -> String {
        format!("{DOWNLOAD_BASENAME}.{}", self.extension())
    }
}
