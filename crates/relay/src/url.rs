//! Provider URL construction.
//!
//! The URL is a pure function of the request: the prompt becomes a single
//! path segment, the numeric parameters and model follow as query pairs in a
//! fixed order, and the `nologo`/`enhance` flags are always appended with
//! the same values.

use imgx_core::request::GenerationRequest;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Public Pollinations image endpoint.
pub const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai";

/// Path under the base URL that takes the prompt as its next segment.
pub const PROMPT_PATH: &str = "/prompt/";

/// Fixed provider flags, never exposed to users.
pub const FIXED_FLAGS: &[(&str, &str)] = &[("nologo", "true"), ("enhance", "false")];

/// Characters left unescaped in a prompt: ASCII alphanumerics plus
/// `- _ . ! ~ * ' ( )`, the same set browsers keep in `encodeURIComponent`.
const PROMPT_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a prompt for use as one path segment.
pub fn encode_prompt(prompt: &str) -> String {
    utf8_percent_encode(prompt, PROMPT_SEGMENT).to_string()
}

/// Query pairs for a request, in the order they are sent.
pub fn query_pairs(request: &GenerationRequest) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("width", request.width.to_string()),
        ("height", request.height.to_string()),
        ("seed", request.seed.to_string()),
        ("model", request.model.as_str().to_string()),
        ("steps", request.steps.to_string()),
    ];
    pairs.extend(
        FIXED_FLAGS
            .iter()
            .map(|(key, value)| (*key, (*value).to_string())),
    );
    pairs
}

/// Full provider URL for `request` under `base_url`.
pub fn build_url(base_url: &str, request: &GenerationRequest) -> String {
    let query = query_pairs(request)
        .into_iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}{}{}?{}",
        base_url.trim_end_matches('/'),
        PROMPT_PATH,
        encode_prompt(&request.prompt),
        query
    )
}
