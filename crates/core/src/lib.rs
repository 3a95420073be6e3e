//! Domain types for imgx text-to-image generation.
//!
//! Holds the generation request and its validation rules, the fixed model
//! catalogue, the in-memory generated image, and the seed source used to
//! pre-fill the next form submission. Nothing here performs I/O.

pub mod error;
pub mod image;
pub mod model;
pub mod request;
pub mod seed;
