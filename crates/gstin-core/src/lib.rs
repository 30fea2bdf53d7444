#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod display;
pub mod newtypes;
pub mod record;
pub mod response;
pub mod serde_helpers;
pub mod session;

pub use display::{
    DisplayNode, EMPTY_NOTICE, FieldKind, FieldValue, Labeled, PLACEHOLDER, ResultView,
    format_address, format_key, format_list, render, render_result,
};
pub use newtypes::{Gstin, INVALID_GSTIN_MESSAGE, Pan, ValidationError, validate};
pub use record::{Address, LookupResult, PAN_KEY, PlaceOfBusiness, normalize};
pub use response::{LookupError, RawResponse, classify_response, select_payload};
pub use session::{LookupForm, RequestState, SubmitError};

/// Returns the current version of the gstin-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
