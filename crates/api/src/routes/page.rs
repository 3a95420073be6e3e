use axum::{routing::get, Router};

use crate::handlers::page;
use crate::state::AppState;

/// Mount the form page at the site root.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(page::index))
}
