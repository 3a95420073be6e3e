//! Generation request model and its validation rules.
//!
//! [`GenerationForm`] is the loosely typed shape submitted by the form (the
//! model as a free string, numbers as wide integers). It becomes a
//! [`GenerationRequest`] only through [`GenerationForm::into_request`], so
//! every request handed to the relay has passed the same bounds.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;
use crate::model::ImageModel;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// Minimum prompt length, in characters.
pub const MIN_PROMPT_CHARS: u64 = 2;
/// Smallest accepted width or height, in pixels.
pub const MIN_DIMENSION: u32 = 256;
/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 1024;
/// Slider increment for width and height.
pub const DIMENSION_STEP: u32 = 64;
/// Fewest inference steps accepted.
pub const MIN_STEPS: u32 = 1;
/// Most inference steps accepted.
pub const MAX_STEPS: u32 = 50;
/// Upper bound of the seed slider. Larger seeds are still valid.
pub const SLIDER_MAX_SEED: u32 = 50_000;

/// Form defaults for a fresh session.
pub const DEFAULT_DIMENSION: u32 = 512;
pub const DEFAULT_STEPS: u32 = 20;

/// Field order used when reporting several violations at once.
const FIELD_ORDER: &[&str] = &["prompt", "model", "width", "height", "steps", "seed"];

// ---------------------------------------------------------------------------
// Validated request
// ---------------------------------------------------------------------------

/// A fully typed request for one generated image.
///
/// Only built by [`GenerationForm::into_request`], which enforces the bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: ImageModel,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub seed: u32,
}

impl GenerationRequest {
    /// Form values for the submission after this one succeeded: the prompt
    /// is cleared and the seed replaced, everything else carries over.
    pub fn next_form(&self, seed: u32) -> GenerationForm {
        GenerationForm {
            prompt: String::new(),
            seed: i64::from(seed),
            ..GenerationForm::from(self)
        }
    }
}

// ---------------------------------------------------------------------------
// Submitted form
// ---------------------------------------------------------------------------

/// Raw form values as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct GenerationForm {
    #[validate(length(min = 2, message = "Prompt must be at least 2 characters."))]
    pub prompt: String,
    pub model: String,
    #[validate(range(min = 256, max = 1024, message = "Width must be between 256 and 1024."))]
    pub width: i64,
    #[validate(range(min = 256, max = 1024, message = "Height must be between 256 and 1024."))]
    pub height: i64,
    #[validate(range(min = 1, max = 50, message = "Steps must be between 1 and 50."))]
    pub steps: i64,
    #[validate(range(min = 0, max = 4_294_967_295_i64, message = "Seed must be between 0 and 4294967295."))]
    pub seed: i64,
}

impl GenerationForm {
    /// Values a new form starts with.
    pub fn defaults(seed: u32) -> Self {
        Self {
            prompt: String::new(),
            model: ImageModel::default().as_str().to_string(),
            width: i64::from(DEFAULT_DIMENSION),
            height: i64::from(DEFAULT_DIMENSION),
            steps: i64::from(DEFAULT_STEPS),
            seed: i64::from(seed),
        }
    }

    /// Validate the submitted values and convert them into a typed request.
    pub fn into_request(self) -> Result<GenerationRequest, CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(describe_errors(&errors)))?;

        let model: ImageModel = self.model.parse()?;

        Ok(GenerationRequest {
            prompt: self.prompt,
            model,
            width: narrow("width", self.width)?,
            height: narrow("height", self.height)?,
            steps: narrow("steps", self.steps)?,
            seed: narrow("seed", self.seed)?,
        })
    }
}

impl From<&GenerationRequest> for GenerationForm {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            prompt: request.prompt.clone(),
            model: request.model.as_str().to_string(),
            width: i64::from(request.width),
            height: i64::from(request.height),
            steps: i64::from(request.steps),
            seed: i64::from(request.seed),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn narrow(field: &str, value: i64) -> Result<u32, CoreError> {
    u32::try_from(value)
        .map_err(|_| CoreError::Validation(format!("{field} is out of range (got {value})")))
}

/// Flatten validator output into one message, ordered by form field.
fn describe_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<(usize, String)> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = field.to_string();
            let rank = FIELD_ORDER
                .iter()
                .position(|known| *known == field)
                .unwrap_or(FIELD_ORDER.len());
            field_errors
                .iter()
                .map(move |error| (rank, describe_error(&field, error)))
        })
        .collect();

    messages.sort();
    messages
        .into_iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>()
        .join("; ")
}

fn describe_error(field: &str, error: &ValidationError) -> String {
    match &error.message {
        Some(message) => message.to_string(),
        None => format!("{field} is invalid ({})", error.code),
    }
}
