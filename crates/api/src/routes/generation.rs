//! Route definitions for image generation.
//!
//! ```text
//! GET    /models                 list_models
//! GET    /form/defaults          form_defaults
//! POST   /generate               generate
//! POST   /generate/download      download
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::generation;
use crate::state::AppState;

/// Form metadata routes.
pub fn form_router() -> Router<AppState> {
    Router::new()
        .route("/models", get(generation::list_models))
        .route("/form/defaults", get(generation::form_defaults))
}

/// Generation routes.
pub fn generate_router() -> Router<AppState> {
    Router::new()
        .route("/generate", post(generation::generate))
        .route("/generate/download", post(generation::download))
}
