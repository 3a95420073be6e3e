use std::sync::Arc;

use imgx_relay::ImageRelay;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable and immutable; no handler mutates it, so
/// requests never share generation state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Relay to the image provider.
    pub relay: Arc<dyn ImageRelay>,
}
