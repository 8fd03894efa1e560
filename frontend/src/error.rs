//! Error taxonomy for the report engine.

use thiserror::Error;
use wasm_bindgen::JsValue;

use crate::pagination::PaginationMode;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// Transport failure, non-success status or malformed JSON.
    #[error("network failure: {0}")]
    NetworkFailure(String),

    /// The server has no such fundraiser (or page).
    #[error("fundraiser {0} was not found")]
    NotFound(String),

    /// Navigation past the first or last page.
    #[error("page {requested} is out of range")]
    OutOfRange { requested: u32 },

    /// The document backend rejected the content.
    #[error("export failed: {0}")]
    ExportFailure(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation requires {expected:?} pagination")]
    ModeMismatch { expected: PaginationMode },
}

impl ReportError {
    /// Text shown to the user through the notification collaborator.
    pub fn user_message(&self) -> String {
        match self {
            ReportError::NetworkFailure(_) => {
                "Could not load the contribution report. Check your connection and retry.".to_string()
            }
            ReportError::NotFound(_) => "This fundraiser could not be found.".to_string(),
            ReportError::ExportFailure(_) => "Could not generate the PDF report.".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ReportError> for JsValue {
    fn from(err: ReportError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
