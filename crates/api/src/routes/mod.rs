pub mod generation;
pub mod health;
pub mod page;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /models                  model picker entries (GET)
/// /form/defaults           initial values and slider limits (GET)
/// /generate                generate, respond with a data URL (POST)
/// /generate/download       generate, respond with the image file (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(generation::form_router())
        .merge(generation::generate_router())
}
