//! Projection of contributions into table rows.

use crate::format::LocaleFormat;
use crate::models::Contribution;

/// Column headings, shared by the HTML table and the PDF export.
pub const COLUMN_HEADINGS: [&str; 6] = ["Reference", "Name", "Amount", "Date", "Time", "Timestamp"];

/// One display row; every cell is already formatted text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView {
    pub reference: String,
    pub contributor_name: String,
    pub amount: String,
    pub date: String,
    pub time: String,
    pub timestamp: String,
}

impl RowView {
    /// Cells in [`COLUMN_HEADINGS`] order.
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.reference,
            &self.contributor_name,
            &self.amount,
            &self.date,
            &self.time,
            &self.timestamp,
        ]
    }

    pub fn into_cells(self) -> Vec<String> {
        vec![
            self.reference,
            self.contributor_name,
            self.amount,
            self.date,
            self.time,
            self.timestamp,
        ]
    }
}

/// Stateless: rendering the same slice twice yields the same rows.
#[derive(Clone, Debug, Default)]
pub struct TableRenderer {
    format: LocaleFormat,
}

impl TableRenderer {
    pub fn new(format: LocaleFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> &LocaleFormat {
        &self.format
    }

    pub fn render(&self, items: &[Contribution]) -> Vec<RowView> {
        items.iter().map(|c| self.render_row(c)).collect()
    }

    pub fn render_row(&self, contribution: &Contribution) -> RowView {
        RowView {
            reference: contribution.reference.clone(),
            contributor_name: contribution.contributor_name.clone(),
            amount: self.format.currency(&contribution.amount),
            date: self.format.date(&contribution.date),
            time: self.format.time(&contribution.time),
            timestamp: contribution.timestamp.clone(),
        }
    }
}
