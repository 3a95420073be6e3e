//! Form session state machine for the generation page.
//!
//! A [`FormSession`] owns the current form values, the last generated image
//! and the user-facing notice. Submitting is split into [`begin`] (validate
//! and enter the loading state) and [`finish`] (apply the relay outcome), so
//! the loading state is observable between the two; [`submit`] runs both
//! around one relay call.
//!
//! The HTTP handlers are stateless: each request builds a session from the
//! submitted values, calls [`submit`] once and returns the `next` values for
//! the page to carry. The page mirrors the loading state itself (submit is
//! disabled while its request is pending). [`status`], [`image`] and
//! [`values_mut`] cover the multi-submission lifecycle and are exercised by
//! this module's unit tests.
//!
//! [`status`]: FormSession::status
//! [`image`]: FormSession::image
//! [`values_mut`]: FormSession::values_mut
//!
//! [`begin`]: FormSession::begin
//! [`finish`]: FormSession::finish
//! [`submit`]: FormSession::submit

use imgx_core::error::CoreError;
use imgx_core::image::GeneratedImage;
use imgx_core::request::{GenerationForm, GenerationRequest};
use imgx_core::seed::SeedGenerator;
use imgx_relay::{ImageRelay, RelayError};
use rand::Rng;
use serde::Serialize;

/// Shown after a successful generation.
pub const SUCCESS_NOTICE: &str = "Image generated successfully!";
/// Shown after any failed generation, whatever the cause.
pub const FAILURE_NOTICE: &str = "Failed to generate image. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// A toast-style message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    pub fn success() -> Self {
        Self {
            kind: NoticeKind::Success,
            message: SUCCESS_NOTICE,
        }
    }

    pub fn failure() -> Self {
        Self {
            kind: NoticeKind::Error,
            message: FAILURE_NOTICE,
        }
    }
}

/// What the output area shows.
#[derive(Debug, PartialEq, Eq)]
pub enum FormStatus<'a> {
    /// Nothing generated yet: placeholder.
    Idle,
    /// A request is in flight; submit is disabled.
    Loading,
    /// The last successfully generated image.
    Ready(&'a GeneratedImage),
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("A generation is already in progress")]
    Busy,

    #[error("No generation is in progress")]
    NotSubmitted,

    #[error(transparent)]
    Invalid(#[from] CoreError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// One user's form, from defaults through any number of submissions.
pub struct FormSession<R> {
    values: GenerationForm,
    image: Option<GeneratedImage>,
    in_flight: Option<GenerationRequest>,
    notice: Option<Notice>,
    seeds: SeedGenerator<R>,
}

impl<R: Rng> FormSession<R> {
    /// A fresh form with default values and a random starting seed.
    pub fn new(mut seeds: SeedGenerator<R>) -> Self {
        let values = GenerationForm::defaults(seeds.next_seed());
        Self::with_values(values, seeds)
    }

    /// A form pre-filled with submitted values.
    pub fn with_values(values: GenerationForm, seeds: SeedGenerator<R>) -> Self {
        Self {
            values,
            image: None,
            in_flight: None,
            notice: None,
            seeds,
        }
    }

    pub fn values(&self) -> &GenerationForm {
        &self.values
    }

    /// Edit the form. Edits made while loading apply to the next submission.
    pub fn values_mut(&mut self) -> &mut GenerationForm {
        &mut self.values
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn status(&self) -> FormStatus<'_> {
        if self.is_loading() {
            return FormStatus::Loading;
        }
        match &self.image {
            Some(image) => FormStatus::Ready(image),
            None => FormStatus::Idle,
        }
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        self.image.as_ref()
    }

    pub fn into_image(self) -> Option<GeneratedImage> {
        self.image
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Validate the current values and enter the loading state.
    ///
    /// Returns the request to hand to the relay. Fails without changing
    /// state if a request is already in flight or the values are invalid.
    pub fn begin(&mut self) -> Result<GenerationRequest, SessionError> {
        if self.is_loading() {
            return Err(SessionError::Busy);
        }

        let request = self.values.clone().into_request()?;
        self.in_flight = Some(request.clone());
        self.notice = None;
        Ok(request)
    }

    /// Leave the loading state with the relay's outcome.
    ///
    /// On success the image replaces the previous one, the prompt is cleared
    /// and a new seed is drawn; model, size and steps carry over. On failure
    /// the previous image (if any) stays as it was and the form values are
    /// left for the user to retry.
    pub fn finish(
        &mut self,
        outcome: Result<GeneratedImage, RelayError>,
    ) -> Result<&GeneratedImage, SessionError> {
        let request = self.in_flight.take().ok_or(SessionError::NotSubmitted)?;

        match outcome {
            Ok(image) => {
                self.values = request.next_form(self.seeds.next_seed());
                self.notice = Some(Notice::success());
                Ok(&*self.image.insert(image))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generation failed, keeping previous output");
                self.notice = Some(Notice::failure());
                Err(e.into())
            }
        }
    }

    /// Submit the current values through `relay` and wait for the result.
    pub async fn submit(
        &mut self,
        relay: &dyn ImageRelay,
    ) -> Result<&GeneratedImage, SessionError> {
        let request = self.begin()?;
        let outcome = relay.generate(&request).await;
        self.finish(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use imgx_core::seed::NEXT_SEED_RANGE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Relay that answers every call with the same canned outcome.
    struct CannedRelay {
        status: Option<u16>,
        calls: AtomicUsize,
    }

    impl CannedRelay {
        fn ok() -> Self {
            Self {
                status: None,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                status: Some(status),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ImageRelay for CannedRelay {
        async fn generate(
            &self,
            request: &GenerationRequest,
        ) -> Result<GeneratedImage, RelayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.status {
                None => Ok(GeneratedImage::new(
                    request.prompt.as_bytes().to_vec(),
                    "image/png",
                )),
                Some(status) => Err(RelayError::GenerationFailed {
                    status,
                    status_text: "Internal Server Error".to_string(),
                }),
            }
        }
    }

    fn session() -> FormSession<StdRng> {
        FormSession::new(SeedGenerator::new(StdRng::seed_from_u64(1)))
    }

    fn filled_session() -> FormSession<StdRng> {
        let mut s = session();
        let values = s.values_mut();
        values.prompt = "a red fox".to_string();
        values.model = "flux-anime".to_string();
        values.width = 768;
        values.height = 320;
        values.steps = 12;
        values.seed = 40_000;
        s
    }

    #[test]
    fn new_session_is_idle_with_defaults() {
        let s = session();
        assert_eq!(s.status(), FormStatus::Idle);
        assert!(!s.is_loading());
        assert_eq!(s.values().model, "flux");
        assert_eq!(s.values().width, 512);
        assert!(NEXT_SEED_RANGE.contains(&(s.values().seed as u32)));
        assert!(s.notice().is_none());
    }

    #[test]
    fn begin_enters_loading_state() {
        let mut s = filled_session();
        let request = s.begin().unwrap();

        assert_eq!(request.prompt, "a red fox");
        assert!(s.is_loading());
        assert_eq!(s.status(), FormStatus::Loading);
    }

    #[test]
    fn second_begin_while_loading_is_rejected() {
        let mut s = filled_session();
        s.begin().unwrap();
        assert_matches!(s.begin(), Err(SessionError::Busy));
        assert!(s.is_loading());
    }

    #[test]
    fn invalid_values_do_not_start_loading() {
        let mut s = session();
        assert_matches!(s.begin(), Err(SessionError::Invalid(CoreError::Validation(_))));
        assert!(!s.is_loading());
        assert!(s.notice().is_none());
    }

    #[test]
    fn finish_without_begin_is_rejected() {
        let mut s = session();
        let outcome = Ok(GeneratedImage::new(vec![1], "image/png"));
        assert_matches!(s.finish(outcome), Err(SessionError::NotSubmitted));
    }

    #[tokio::test]
    async fn success_resets_prompt_and_seed_but_keeps_settings() {
        let relay = CannedRelay::ok();
        let mut s = filled_session();

        let image = s.submit(&relay).await.unwrap();
        assert_eq!(image.bytes, b"a red fox");

        let values = s.values();
        assert_eq!(values.prompt, "");
        assert!(NEXT_SEED_RANGE.contains(&(values.seed as u32)));
        assert_eq!(values.model, "flux-anime");
        assert_eq!(values.width, 768);
        assert_eq!(values.height, 320);
        assert_eq!(values.steps, 12);

        assert_matches!(s.status(), FormStatus::Ready(img) if img.content_type == "image/png");
        assert_eq!(s.notice(), Some(&Notice::success()));
        assert_eq!(relay.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_without_previous_image_returns_to_idle() {
        let relay = CannedRelay::failing(500);
        let mut s = filled_session();

        let result = s.submit(&relay).await;
        assert_matches!(
            result,
            Err(SessionError::Relay(RelayError::GenerationFailed { status: 500, .. }))
        );

        assert_eq!(s.status(), FormStatus::Idle);
        assert_eq!(s.notice(), Some(&Notice::failure()));
        // Values stay so the user can retry.
        assert_eq!(s.values().prompt, "a red fox");
        assert_eq!(s.values().seed, 40_000);
    }

    #[tokio::test]
    async fn failure_keeps_last_successful_image() {
        let mut s = filled_session();
        s.submit(&CannedRelay::ok()).await.unwrap();

        s.values_mut().prompt = "a blue whale".to_string();
        let result = s.submit(&CannedRelay::failing(502)).await;

        assert!(result.is_err());
        assert!(!s.is_loading());
        assert_matches!(s.status(), FormStatus::Ready(img) if img.bytes == b"a red fox");
        assert_eq!(s.notice().map(|n| n.kind), Some(NoticeKind::Error));
    }

    #[tokio::test]
    async fn new_image_replaces_previous_one() {
        let relay = CannedRelay::ok();
        let mut s = filled_session();
        s.submit(&relay).await.unwrap();

        s.values_mut().prompt = "a second prompt".to_string();
        s.submit(&relay).await.unwrap();

        assert_eq!(s.image().unwrap().bytes, b"a second prompt");
        assert_eq!(relay.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn notice_serializes_kind_in_lowercase() {
        let json = serde_json::to_value(Notice::failure()).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["message"], FAILURE_NOTICE);
    }
}
