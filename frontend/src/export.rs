//! PDF export of the contribution report.
//!
//! The exporter owns the fixed layout; drawing is delegated to a
//! [`DocumentBackend`] so the browser can use jsPDF (see [`crate::pdf`])
//! while tests record the calls.

use crate::constants::{
    PDF_FONT_FAMILY, PDF_FONT_SIZE, PDF_LINE_HEIGHT, PDF_MARGIN_X, PDF_SUMMARY_START_Y,
    PDF_TABLE_MARGIN_TOP, PDF_TABLE_START_Y, PDF_TITLE_Y,
};
use crate::error::ReportError;
use crate::models::{Contribution, Fundraiser};
use crate::render::{TableRenderer, COLUMN_HEADINGS};

/// Document primitives consumed by the exporter.
pub trait DocumentBackend {
    fn start_page(&mut self) -> Result<(), ReportError>;
    fn set_font(&mut self, family: &str, size: f64) -> Result<(), ReportError>;
    fn text(&mut self, text: &str, x: f64, y: f64) -> Result<(), ReportError>;
    fn table(
        &mut self,
        start_y: f64,
        margin_top: f64,
        head: &[&str],
        body: &[Vec<String>],
    ) -> Result<(), ReportError>;
    /// Finish the document and hand it to the user under `filename`.
    fn save(&mut self, filename: &str) -> Result<Vec<u8>, ReportError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

#[derive(Clone, Debug)]
pub struct ReportExporter {
    title: String,
    renderer: TableRenderer,
}

impl ReportExporter {
    pub fn new(title: impl Into<String>, renderer: TableRenderer) -> Self {
        Self {
            title: title.into(),
            renderer,
        }
    }

    /// Rows are written in the order supplied; the caller decides whether
    /// that is the current page or the full set.
    pub fn export<B: DocumentBackend>(
        &self,
        backend: &mut B,
        fundraiser: &Fundraiser,
        contributions: &[Contribution],
    ) -> Result<ExportedReport, ReportError> {
        let summary = self.summary_lines(fundraiser);
        let body = self.table_body(contributions);

        check_printable(&self.title)?;
        for line in &summary {
            check_printable(line)?;
        }
        for cell in body.iter().flatten() {
            check_printable(cell)?;
        }

        backend.start_page()?;
        backend.set_font(PDF_FONT_FAMILY, PDF_FONT_SIZE)?;
        backend.text(&self.title, PDF_MARGIN_X, PDF_TITLE_Y)?;
        for (i, line) in summary.iter().enumerate() {
            let y = PDF_SUMMARY_START_Y + PDF_LINE_HEIGHT * i as f64;
            backend.text(line, PDF_MARGIN_X, y)?;
        }
        backend.table(PDF_TABLE_START_Y, PDF_TABLE_MARGIN_TOP, &COLUMN_HEADINGS, &body)?;

        let filename = report_filename(&fundraiser.name);
        let bytes = backend.save(&filename)?;
        log::info!(
            "exported {} contribution(s) to {} ({} bytes)",
            body.len(),
            filename,
            bytes.len()
        );
        Ok(ExportedReport {
            filename,
            bytes,
            rows: body.len(),
        })
    }

    pub fn summary_lines(&self, fundraiser: &Fundraiser) -> Vec<String> {
        let format = self.renderer.format();
        vec![
            format!("Fundraiser: {}", fundraiser.name),
            format!("Description: {}", fundraiser.description),
            format!("End Date: {}", format.date(&fundraiser.end_date)),
            format!("Target Funds: {}", format.currency(&fundraiser.target_funds)),
            format!("Funds Raised: {}", format.currency(&fundraiser.funds_raised)),
        ]
    }

    pub fn table_body(&self, contributions: &[Contribution]) -> Vec<Vec<String>> {
        self.renderer
            .render(contributions)
            .into_iter()
            .map(|row| row.into_cells())
            .collect()
    }
}

/// `Fundraiser_Report_<name>.pdf`, restricted to `[A-Za-z0-9_-]`.
pub fn report_filename(fundraiser_name: &str) -> String {
    let mut stem = String::with_capacity(fundraiser_name.len());
    for ch in fundraiser_name.trim().chars() {
        let ch = if ch.is_ascii_alphanumeric() || ch == '-' { ch } else { '_' };
        if ch == '_' && stem.ends_with('_') {
            continue;
        }
        stem.push(ch);
    }
    let stem = stem.trim_matches('_');
    let stem = if stem.is_empty() { "report" } else { stem };
    format!("Fundraiser_Report_{}.pdf", stem)
}

fn check_printable(text: &str) -> Result<(), ReportError> {
    match text.chars().find(|c| c.is_control() && *c != '\t') {
        Some(bad) => Err(ReportError::ExportFailure(format!(
            "unsupported control character U+{:04X} in {:?}",
            bad as u32, text
        ))),
        None => Ok(()),
    }
}
