//! Relay to the Pollinations text-to-image HTTP API.
//!
//! Turns a validated [`GenerationRequest`](imgx_core::request::GenerationRequest)
//! into exactly one outbound GET and hands back the raw image bytes with the
//! provider's content type.

pub mod api;
pub mod url;

pub use api::{ImageRelay, PollinationsApi, RelayError};
