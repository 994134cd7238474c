//! State machine behind the hugfuse screen.
//!
//! A [`Session`] holds the two uploaded images (as data URLs), the last
//! generated image, the loading flag, and the error message shown to
//! the user. The UI layer keeps one in a signal and renders it through
//! [`Session::view`].
//!
//! At most one generation is in flight at a time: the loading flag
//! disables the generate control and [`Session::begin_generation`]
//! refuses to start while it is set.

use std::fmt;

use crate::data_url::parse_data_url;
use crate::generate::GenerateError;
use crate::types::{DataUrlError, ImageData};

/// Shown when reading an upload fails.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to load image. Please try another file.";

/// Which of the two people an upload belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The first person.
    First,
    /// The second person.
    Second,
}

impl Slot {
    /// Both slots in display order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    /// Heading shown above the slot's uploader.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::First => "First Person",
            Self::Second => "Second Person",
        }
    }

    /// DOM id of the slot's file input.
    #[must_use]
    pub const fn input_id(self) -> &'static str {
        match self {
            Self::First => "image1",
            Self::Second => "image2",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Reasons a generation cannot start.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// One or both slots are empty.
    #[error("Please upload both images before generating.")]
    MissingImages,

    /// A generation is already running.
    #[error("a generation is already in progress")]
    AlreadyGenerating,

    /// A stored data URL could not be split into MIME type and payload.
    #[error("Could not parse image data.")]
    UnparseableImage(#[source] DataUrlError),
}

/// The two images sent to the generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationInputs {
    /// Image of the first person.
    pub first: ImageData,
    /// Image of the second person.
    pub second: ImageData,
}

/// What the result area should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    /// A generation is running.
    Loading,
    /// The last operation failed with this message.
    Error(String),
    /// The generated image, as a data URL.
    Image(String),
    /// Nothing generated yet.
    Placeholder,
}

/// UI state for one page session. Discarded on reload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    first: Option<String>,
    second: Option<String>,
    generated: Option<String>,
    loading: bool,
    error: Option<String>,
}

impl Session {
    /// Data URL of the image in `slot`, if uploaded.
    #[must_use]
    pub fn image(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::First => self.first.as_deref(),
            Slot::Second => self.second.as_deref(),
        }
    }

    /// The last generated image, as a data URL.
    #[must_use]
    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// Whether a generation is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the generate control should be enabled.
    #[must_use]
    pub const fn can_generate(&self) -> bool {
        self.first.is_some() && self.second.is_some() && !self.loading
    }

    /// Start handling an upload. Clears any previous error.
    pub fn begin_upload(&mut self) {
        self.error = None;
    }

    /// Store the uploaded image for `slot`.
    pub fn set_image(&mut self, slot: Slot, data_url: String) {
        match slot {
            Slot::First => self.first = Some(data_url),
            Slot::Second => self.second = Some(data_url),
        }
    }

    /// Record that reading an upload failed.
    pub fn upload_failed(&mut self) {
        self.error = Some(UPLOAD_FAILED_MESSAGE.to_owned());
    }

    /// Try to start a generation.
    ///
    /// On success the session is loading, the error and the previous
    /// result are cleared, and the parsed images are returned for the
    /// caller to send.
    ///
    /// # Errors
    ///
    /// - [`SessionError::MissingImages`] if a slot is empty; the error
    ///   message is set.
    /// - [`SessionError::AlreadyGenerating`] if loading; nothing changes.
    /// - [`SessionError::UnparseableImage`] if a stored data URL is
    ///   malformed; the generation fails immediately with its message.
    pub fn begin_generation(&mut self) -> Result<GenerationInputs, SessionError> {
        if self.loading {
            return Err(SessionError::AlreadyGenerating);
        }
        let (Some(first), Some(second)) = (self.first.as_deref(), self.second.as_deref()) else {
            let err = SessionError::MissingImages;
            self.error = Some(err.to_string());
            return Err(err);
        };

        let parsed = parse_data_url(first).and_then(|first| {
            parse_data_url(second).map(|second| GenerationInputs { first, second })
        });

        self.loading = true;
        self.error = None;
        self.generated = None;

        match parsed {
            Ok(inputs) => Ok(inputs),
            Err(e) => {
                let err = SessionError::UnparseableImage(e);
                self.fail_generation(&err);
                Err(err)
            }
        }
    }

    /// Record the outcome of a generation and clear the loading flag.
    ///
    /// On success `outcome` holds the generated image as a data URL.
    pub fn finish_generation(&mut self, outcome: Result<String, GenerateError>) {
        match outcome {
            Ok(data_url) => {
                self.generated = Some(data_url);
                self.loading = false;
            }
            Err(e) => self.fail_generation(&e),
        }
    }

    fn fail_generation(&mut self, err: &dyn fmt::Display) {
        self.error = Some(format!("Generation failed: {err}"));
        self.loading = false;
    }

    /// What the result area shows, in precedence order: loading, error,
    /// generated image, placeholder.
    #[must_use]
    pub fn view(&self) -> ResultView {
        if self.loading {
            ResultView::Loading
        } else if let Some(err) = &self.error {
            ResultView::Error(err.clone())
        } else if let Some(url) = &self.generated {
            ResultView::Image(url.clone())
        } else {
            ResultView::Placeholder
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const FIRST: &str = "data:image/png;base64,Zmlyc3Q=";
    const SECOND: &str = "data:image/jpeg;base64,c2Vjb25k";

    fn with_both_images() -> Session {
        let mut session = Session::default();
        session.set_image(Slot::First, FIRST.into());
        session.set_image(Slot::Second, SECOND.into());
        session
    }

    #[test]
    fn fresh_session_shows_placeholder() {
        let session = Session::default();
        assert_eq!(session.view(), ResultView::Placeholder);
        assert!(!session.is_loading());
        assert!(session.error().is_none());
    }

    #[test]
    fn generate_disabled_until_both_images_present() {
        let mut session = Session::default();
        assert!(!session.can_generate());
        session.set_image(Slot::First, FIRST.into());
        assert!(!session.can_generate());
        session.set_image(Slot::Second, SECOND.into());
        assert!(session.can_generate());
    }

    #[test]
    fn missing_images_sets_message() {
        let mut session = Session::default();
        session.set_image(Slot::Second, SECOND.into());
        assert_eq!(session.begin_generation(), Err(SessionError::MissingImages));
        assert_eq!(
            session.view(),
            ResultView::Error("Please upload both images before generating.".into())
        );
        assert!(!session.is_loading());
    }

    #[test]
    fn begin_generation_returns_parsed_images() {
        let mut session = with_both_images();
        let inputs = session.begin_generation().unwrap();
        assert_eq!(inputs.first, ImageData::new("image/png", "Zmlyc3Q="));
        assert_eq!(inputs.second, ImageData::new("image/jpeg", "c2Vjb25k"));
        assert!(session.is_loading());
        assert!(!session.can_generate());
        assert_eq!(session.view(), ResultView::Loading);
    }

    #[test]
    fn second_generation_is_refused_while_loading() {
        let mut session = with_both_images();
        session.begin_generation().unwrap();
        let before = session.clone();
        assert_eq!(
            session.begin_generation(),
            Err(SessionError::AlreadyGenerating)
        );
        assert_eq!(session, before);
    }

    #[test]
    fn begin_generation_clears_previous_result_and_error() {
        let mut session = with_both_images();
        session.begin_generation().unwrap();
        session.finish_generation(Ok("data:image/png;base64,b2xk".into()));
        session.upload_failed();

        session.begin_generation().unwrap();
        assert!(session.generated().is_none());
        assert!(session.error().is_none());
    }

    #[test]
    fn unparseable_image_fails_immediately() {
        let mut session = Session::default();
        session.set_image(Slot::First, "not a data url".into());
        session.set_image(Slot::Second, SECOND.into());
        assert!(matches!(
            session.begin_generation(),
            Err(SessionError::UnparseableImage(DataUrlError::MissingScheme))
        ));
        assert!(!session.is_loading());
        assert_eq!(
            session.error(),
            Some("Generation failed: Could not parse image data.")
        );
    }

    #[test]
    fn successful_generation_shows_image() {
        let mut session = with_both_images();
        session.begin_generation().unwrap();
        session.finish_generation(Ok("data:image/png;base64,aHVn".into()));
        assert!(!session.is_loading());
        assert_eq!(
            session.view(),
            ResultView::Image("data:image/png;base64,aHVn".into())
        );
        assert!(session.can_generate());
    }

    #[test]
    fn failed_generation_shows_prefixed_message() {
        let mut session = with_both_images();
        session.begin_generation().unwrap();
        session.finish_generation(Err(GenerateError::Blocked("SAFETY".into())));
        assert!(!session.is_loading());
        assert_eq!(
            session.view(),
            ResultView::Error("Generation failed: the request was blocked (SAFETY)".into())
        );
    }

    #[test]
    fn upload_failure_and_recovery() {
        let mut session = Session::default();
        session.begin_upload();
        session.upload_failed();
        assert_eq!(session.error(), Some(UPLOAD_FAILED_MESSAGE));

        session.begin_upload();
        assert!(session.error().is_none());
        session.set_image(Slot::First, FIRST.into());
        assert_eq!(session.image(Slot::First), Some(FIRST));
        assert_eq!(session.image(Slot::Second), None);
    }

    #[test]
    fn picking_a_file_clears_error_before_the_read_finishes() {
        let mut session = with_both_images();
        session.begin_generation().unwrap();
        session.finish_generation(Err(GenerateError::Transport("offline".into())));
        assert!(session.error().is_some());

        // File chosen; bytes not read yet.
        session.begin_upload();
        assert!(session.error().is_none());
        assert_eq!(session.image(Slot::First), Some(FIRST));
        assert_eq!(session.view(), ResultView::Placeholder);
    }

    #[test]
    fn replacing_an_image_keeps_the_other_slot() {
        let mut session = with_both_images();
        session.set_image(Slot::First, SECOND.into());
        assert_eq!(session.image(Slot::First), Some(SECOND));
        assert_eq!(session.image(Slot::Second), Some(SECOND));
    }

    #[test]
    fn loading_takes_precedence_over_error() {
        let mut session = with_both_images();
        session.begin_generation().unwrap();
        session.upload_failed();
        assert_eq!(session.view(), ResultView::Loading);
    }

    #[test]
    fn error_hides_previous_image() {
        let mut session = with_both_images();
        session.begin_generation().unwrap();
        session.finish_generation(Ok("data:image/png;base64,aHVn".into()));
        session.upload_failed();
        assert_eq!(session.view(), ResultView::Error(UPLOAD_FAILED_MESSAGE.into()));
    }

    #[test]
    fn slot_labels() {
        assert_eq!(Slot::First.title(), "First Person");
        assert_eq!(Slot::Second.to_string(), "Second Person");
        assert_eq!(Slot::ALL.map(Slot::input_id), ["image1", "image2"]);
    }
}
