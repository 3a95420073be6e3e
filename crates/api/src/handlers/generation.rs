//! Handlers for image generation and the form metadata it depends on.
//!
//! Routes:
//! - `GET   /models`             model picker entries
//! - `GET   /form/defaults`      initial form values and slider limits
//! - `POST  /generate`           generate and return a data URL
//! - `POST  /generate/download`  generate and return the raw image file

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use imgx_core::image::GeneratedImage;
use imgx_core::model::ImageModel;
use imgx_core::request::{
    GenerationForm, DIMENSION_STEP, MAX_DIMENSION, MAX_STEPS, MIN_DIMENSION, MIN_PROMPT_CHARS,
    MIN_STEPS, SLIDER_MAX_SEED,
};
use imgx_core::seed::SeedGenerator;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::session::{FormSession, Notice};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response payloads
// ---------------------------------------------------------------------------

/// One entry of the model picker.
#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub id: ImageModel,
    pub label: &'static str,
}

/// Bounds the form controls should enforce.
#[derive(Debug, Serialize)]
pub struct FormLimits {
    pub min_prompt_chars: u64,
    pub min_dimension: u32,
    pub max_dimension: u32,
    pub dimension_step: u32,
    pub min_steps: u32,
    pub max_steps: u32,
    pub min_seed: u32,
    /// Upper end of the seed slider; the API accepts the full `u32` range.
    pub slider_max_seed: u32,
    pub max_seed: u32,
}

impl FormLimits {
    fn current() -> Self {
        Self {
            min_prompt_chars: MIN_PROMPT_CHARS,
            min_dimension: MIN_DIMENSION,
            max_dimension: MAX_DIMENSION,
            dimension_step: DIMENSION_STEP,
            min_steps: MIN_STEPS,
            max_steps: MAX_STEPS,
            min_seed: 0,
            slider_max_seed: SLIDER_MAX_SEED,
            max_seed: u32::MAX,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FormDefaults {
    pub values: GenerationForm,
    pub limits: FormLimits,
}

/// A generated image, ready for an `<img src>`.
#[derive(Debug, Serialize)]
pub struct ImagePayload {
    pub data_url: String,
    pub content_type: String,
    pub file_name: String,
    pub size_bytes: usize,
}

impl From<&GeneratedImage> for ImagePayload {
    fn from(image: &GeneratedImage) -> Self {
        Self {
            data_url: image.to_data_url(),
            content_type: image.content_type.clone(),
            file_name: image.file_name(),
            size_bytes: image.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub image: ImagePayload,
    /// Form values for the next submission.
    pub next: GenerationForm,
    pub notice: Option<Notice>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/models
pub async fn list_models() -> Json<DataResponse<Vec<ModelInfo>>> {
    let models = ImageModel::ALL
        .into_iter()
        .map(|model| ModelInfo {
            id: model,
            label: model.label(),
        })
        .collect();

    Json(DataResponse { data: models })
}

/// GET /api/v1/form/defaults
///
/// Returns the values a fresh form starts with, including a newly drawn seed.
pub async fn form_defaults() -> Json<DataResponse<FormDefaults>> {
    let session = FormSession::new(SeedGenerator::from_os_rng());

    Json(DataResponse {
        data: FormDefaults {
            values: session.values().clone(),
            limits: FormLimits::current(),
        },
    })
}

/// POST /api/v1/generate
///
/// Validates the submitted form, relays it to the provider and returns the
/// image as a data URL together with the values for the next submission.
pub async fn generate(
    State(state): State<AppState>,
    AppJson(input): AppJson<GenerationForm>,
) -> AppResult<impl IntoResponse> {
    let mut session = FormSession::with_values(input, SeedGenerator::from_os_rng());
    let image = ImagePayload::from(session.submit(state.relay.as_ref()).await?);

    Ok(Json(DataResponse {
        data: GenerateResponse {
            image,
            next: session.values().clone(),
            notice: session.notice().cloned(),
        },
    }))
}

/// POST /api/v1/generate/download
///
/// Same input as [`generate`], but responds with the image file itself so
/// the client's native save dialog can handle it.
pub async fn download(
    State(state): State<AppState>,
    AppJson(input): AppJson<GenerationForm>,
) -> AppResult<Response> {
    let mut session = FormSession::with_values(input, SeedGenerator::from_os_rng());
    session.submit(state.relay.as_ref()).await?;

    let image = session
        .into_image()
        .ok_or_else(|| AppError::InternalError("Generation finished without an image".into()))?;

    let disposition = format!("attachment; filename=\"{}\"", image.file_name());
    let content_type = if image.content_type.is_empty() {
        "application/octet-stream".to_string()
    } else {
        image.content_type
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
        image.bytes,
    )
        .into_response())
}
