//! The lookup form: input text plus the request lifecycle.
//!
//! ```text
//!            submit (valid)             resolve
//!   Idle ───────────────────▶ Loading ──────────▶ Success | Error
//!     │                          ▲                     │
//!     │ submit (invalid)         └──── submit (valid) ─┘
//!     ▼
//!   Error
//! ```
//!
//! Only one request can be pending: `submit` is rejected while the state is
//! [`RequestState::Loading`], which is how the form's disabled submit control
//! is modelled.
use crate::newtypes::{GSTIN_LEN, Gstin, ValidationError, validate};
use crate::record::{LookupResult, normalize};
use crate::response::{LookupError, RawResponse};

/// The lifecycle state of one form.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last lookup succeeded.
    Success(LookupResult),
    /// The last submission failed; holds the user-visible message.
    Error(String),
}

impl RequestState {
    /// Returns `true` while a request is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Reasons a form operation is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// A lookup is already pending.
    #[error("a lookup is already in progress")]
    InFlight,
    /// The input is not a valid GSTIN. The form is now in the error state.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// `resolve` was called with no lookup pending.
    #[error("no lookup is pending")]
    NotPending,
}

/// A single lookup form instance.
#[derive(Debug, Clone, Default)]
pub struct LookupForm {
    input: String,
    state: RequestState,
}

impl LookupForm {
    /// Maximum number of characters the input accepts.
    pub const MAX_INPUT_LEN: usize = GSTIN_LEN;

    /// Creates an idle form with empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the input text, keeping at most [`Self::MAX_INPUT_LEN`]
    /// characters.
    pub fn set_input(&mut self, raw: &str) {
        self.input = raw.chars().take(Self::MAX_INPUT_LEN).collect();
    }

    /// The current input text.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The current request state.
    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.state.is_loading()
    }

    /// Submits the current input.
    ///
    /// On success the form moves to [`RequestState::Loading`] and the
    /// validated GSTIN is returned for the caller to look up.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::InFlight`] if a lookup is pending; state unchanged.
    /// - [`SubmitError::Invalid`] if the input is not a GSTIN; the form moves
    ///   to [`RequestState::Error`] and no request must be issued.
    pub fn submit(&mut self) -> Result<Gstin, SubmitError> {
        if !self.can_submit() {
            return Err(SubmitError::InFlight);
        }
        match validate(&self.input) {
            Ok(gstin) => {
                self.state = RequestState::Loading;
                Ok(gstin)
            }
            Err(e) => {
                self.state = RequestState::Error(e.to_string());
                Err(SubmitError::Invalid(e))
            }
        }
    }

    /// Records the outcome of the pending lookup.
    ///
    /// A successful response is normalized into the result record.
    ///
    /// # Errors
    ///
    /// [`SubmitError::NotPending`] if no lookup is in flight; state unchanged.
    pub fn resolve(
        &mut self,
        outcome: Result<RawResponse, LookupError>,
    ) -> Result<&RequestState, SubmitError> {
        if !self.state.is_loading() {
            return Err(SubmitError::NotPending);
        }
        self.state = match outcome {
            Ok(raw) => RequestState::Success(normalize(raw)),
            Err(e) => RequestState::Error(e.to_string()),
        };
        Ok(&self.state)
    }
}
