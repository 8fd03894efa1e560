//! Report data structures matching the backend payloads.
//!
//! Values arrive raw from the server and are formatted on the client, so
//! monetary and calendar fields are kept in their textual wire form and
//! parsed lazily (see [`crate::format`]). One malformed record therefore
//! never fails the whole payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Fundraiser metadata shown in the report header and the exported summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundraiser {
    #[serde(default, deserialize_with = "de_text")]
    pub id: String,
    #[serde(default, deserialize_with = "de_text")]
    pub name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub description: String,
    #[serde(default, deserialize_with = "de_text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "de_text")]
    pub target_funds: String,
    #[serde(default, deserialize_with = "de_text")]
    pub funds_raised: String,
}

/// One donation record. Immutable once fetched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(default, deserialize_with = "de_text")]
    pub reference: String,
    #[serde(
        rename = "name",
        alias = "contributor_name",
        default,
        deserialize_with = "de_text"
    )]
    pub contributor_name: String,
    #[serde(default, deserialize_with = "de_text")]
    pub amount: String,
    #[serde(default, deserialize_with = "de_text")]
    pub date: String,
    #[serde(default, deserialize_with = "de_text")]
    pub time: String,
    #[serde(default, deserialize_with = "de_text")]
    pub timestamp: String,
}

/// A single server-side page of contributions.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportPage {
    pub items: Vec<Contribution>,
    pub page_number: u32,
    pub has_prev: bool,
    pub has_next: bool,
    pub prev_page_number: Option<u32>,
    pub next_page_number: Option<u32>,
}

// ---------------------------------------------------------------------------
// Wire payloads
// ---------------------------------------------------------------------------

/// `GET /report/{id}?format=json`
#[derive(Debug, PartialEq, Deserialize)]
pub struct BulkReportPayload {
    #[serde(deserialize_with = "de_items")]
    pub items: Vec<Contribution>,
    #[serde(default)]
    pub fundraiser: Option<Fundraiser>,
}

/// `GET /report/{id}/page/{n}`
#[derive(Debug, PartialEq, Deserialize)]
pub struct PagedReportPayload {
    #[serde(default)]
    pub fundraiser: Option<Fundraiser>,
    #[serde(deserialize_with = "de_items")]
    pub items: Vec<Contribution>,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub prev_num: Option<u32>,
    #[serde(default)]
    pub next_num: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
}

impl PagedReportPayload {
    /// Convert into a [`ReportPage`], falling back to `requested` when the
    /// server omits the page number.
    pub fn into_page(self, requested: u32) -> (Option<Fundraiser>, ReportPage) {
        let page_number = self.page.unwrap_or(requested).max(1);
        let page = ReportPage {
            items: self.items,
            page_number,
            has_prev: self.has_prev,
            has_next: self.has_next,
            prev_page_number: self.prev_num,
            next_page_number: self.next_num,
        };
        (self.fundraiser, page)
    }
}

/// Accept a JSON string, number, bool or null and keep its textual form.
/// Anything else becomes empty text, which renders as the placeholder.
fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => {
            log::warn!("expected a scalar value, got {}", other);
            String::new()
        }
    })
}

/// Keep every record that is an object; skip (and log) the rest.
fn de_items<'de, D>(deserializer: D) -> Result<Vec<Contribution>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    let mut items = Vec::with_capacity(raw.len());
    for (index, value) in raw.into_iter().enumerate() {
        match Contribution::deserialize(value) {
            Ok(contribution) => items.push(contribution),
            Err(e) => log::warn!("skipping contribution #{}: {}", index, e),
        }
    }
    Ok(items)
}
