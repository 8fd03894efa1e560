// frontend/src/messages.rs
//
// Events the report page reacts to, and the side effects `update` asks the
// executors to perform.
//
use crate::error::ReportError;
use crate::models::{Contribution, Fundraiser};
use crate::network::data_source::{FetchRequest, FetchedReport};
use crate::pagination::ControlState;
use crate::render::RowView;
use crate::toast::ToastKind;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Triggers from the host page
    LoadReport,
    Retry,
    NextPage,
    PreviousPage,
    GoToPage(u32),
    ExportRequested,

    // Async completions
    ReportFetched {
        seq: u64,
        result: Result<FetchedReport, ReportError>,
    },
    ExportFinished(Result<ExportSummary, ReportError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub filename: String,
    pub rows: usize,
}

/// Everything the DOM needs to show one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub rows: Vec<RowView>,
    pub page_label: String,
    pub controls: ControlState,
    /// False while an export is running.
    pub export_enabled: bool,
}

/// Snapshot handed to the exporter.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub fundraiser: Fundraiser,
    pub contributions: Vec<Contribution>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Issue a network fetch; the result comes back as `ReportFetched`.
    Fetch(FetchRequest),

    /// Replace the table body, page label and control affordances.
    Render(ReportView),

    /// Only refresh the prev/next affordances.
    SetControls(ControlState),

    /// Show the failure state (controls off, retry visible).
    ShowFailure(String),

    Notify { kind: ToastKind, text: String },

    /// Generate the PDF; the result comes back as `ExportFinished`.
    Export(ExportJob),
}
