#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use imgx_api::config::ServerConfig;
use imgx_api::router::build_app_router;
use imgx_api::state::AppState;
use imgx_core::image::GeneratedImage;
use imgx_core::request::GenerationRequest;
use imgx_relay::{ImageRelay, RelayError};

/// Bytes every successful stub generation returns.
pub const STUB_IMAGE: &[u8] = b"\x89PNG\r\n\x1a\nstub";

/// Relay stand-in that records requests and answers with a canned outcome.
pub struct StubRelay {
    failure: Option<(u16, &'static str)>,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerationRequest>>,
}

impl StubRelay {
    /// Always succeeds with [`STUB_IMAGE`] as `image/png`.
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            failure: None,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    /// Always fails as if the provider answered with `status`.
    pub fn failing(status: u16, status_text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some((status, status_text)),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<GenerationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageRelay for StubRelay {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedImage, RelayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match self.failure {
            None => Ok(GeneratedImage::new(STUB_IMAGE.to_vec(), "image/png")),
            Some((status, status_text)) => Err(RelayError::GenerationFailed {
                status,
                status_text: status_text.to_string(),
            }),
        }
    }
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        provider_url: "http://127.0.0.1:1".to_string(),
    }
}

/// Build the full application router around `relay`, with the same
/// middleware stack production uses.
pub fn build_test_app(relay: Arc<StubRelay>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        relay,
    };
    build_app_router(state, &config)
}

/// Send a GET request and return the response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a raw body and the JSON content type.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body into bytes.
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
