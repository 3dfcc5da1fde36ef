//! Errors raised while decoding raw option data.
//!
//! Only the decoding boundary can fail. Once data is in typed
//! [`RawEntry`](crate::option::RawEntry) form, normalization, default
//! selection and ranking are all infallible.

use thiserror::Error;

/// Errors that can occur while turning raw input into option entries.
#[derive(Error, Debug)]
pub enum OptionDataError {
    /// A node in the input could not be interpreted as an option or a
    /// header group.
    #[error("invalid option data at {path}: {reason}")]
    InvalidOptionData {
        /// JSON path of the offending node, e.g. `$[2].data[0]`.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The top-level input was not an array.
    #[error("option data must be an array, found {0}")]
    NotAnArray(&'static str),

    /// The input was not valid JSON.
    #[error("malformed option JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl OptionDataError {
    pub(crate) fn invalid(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOptionData {
            path: path.to_owned(),
            reason: reason.into(),
        }
    }
}
