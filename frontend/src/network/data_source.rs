//! Contribution fetching for one fundraiser.
//!
//! The pagination mode is fixed at construction: a ClientSide source only
//! answers `fetch_all`, a ServerSide source only answers `fetch_page`.

use serde::de::DeserializeOwned;

use super::api_client::Transport;
use super::config::ApiConfig;
use crate::error::ReportError;
use crate::models::{BulkReportPayload, Contribution, Fundraiser, PagedReportPayload, ReportPage};
use crate::pagination::PaginationMode;

/// What to fetch for a report request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchTarget {
    All,
    Page(u32),
}

/// A fetch tagged with the sequence number used by the staleness guard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub fundraiser_id: String,
    pub target: FetchTarget,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FetchedReport {
    All {
        fundraiser: Option<Fundraiser>,
        items: Vec<Contribution>,
    },
    Page {
        fundraiser: Option<Fundraiser>,
        page: ReportPage,
    },
}

pub struct ReportDataSource<T> {
    transport: T,
    api: ApiConfig,
    mode: PaginationMode,
}

impl<T: Transport> ReportDataSource<T> {
    pub fn new(transport: T, api: ApiConfig, mode: PaginationMode) -> Self {
        Self { transport, api, mode }
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchedReport, ReportError> {
        match request.target {
            FetchTarget::All => {
                let payload = self.fetch_all(&request.fundraiser_id).await?;
                Ok(FetchedReport::All {
                    fundraiser: payload.fundraiser,
                    items: payload.items,
                })
            }
            FetchTarget::Page(n) => {
                let (fundraiser, page) = self.fetch_page(&request.fundraiser_id, n).await?;
                Ok(FetchedReport::Page { fundraiser, page })
            }
        }
    }

    /// ClientSide: every contribution in one batch.
    pub async fn fetch_all(&self, fundraiser_id: &str) -> Result<BulkReportPayload, ReportError> {
        self.require(PaginationMode::ClientSide)?;
        let id = check_id(fundraiser_id)?;
        let url = self.api.report_url(id);
        let payload: BulkReportPayload = self.get_json(&url, id).await?;
        log::debug!("fetched {} contribution(s) for fundraiser {}", payload.items.len(), id);
        Ok(payload)
    }

    /// ServerSide: one page as the server paginates it.
    pub async fn fetch_page(
        &self,
        fundraiser_id: &str,
        page: u32,
    ) -> Result<(Option<Fundraiser>, ReportPage), ReportError> {
        self.require(PaginationMode::ServerSide)?;
        let id = check_id(fundraiser_id)?;
        if page == 0 {
            return Err(ReportError::InvalidInput("page numbers start at 1".to_string()));
        }
        let url = self.api.page_url(id, page);
        let payload: PagedReportPayload = self.get_json(&url, id).await?;
        log::debug!(
            "fetched page {} ({} item(s)) for fundraiser {}",
            page,
            payload.items.len(),
            id
        );
        Ok(payload.into_page(page))
    }

    fn require(&self, expected: PaginationMode) -> Result<(), ReportError> {
        if self.mode != expected {
            return Err(ReportError::ModeMismatch { expected });
        }
        Ok(())
    }

    async fn get_json<D: DeserializeOwned>(&self, url: &str, id: &str) -> Result<D, ReportError> {
        let response = self.transport.get(url).await?;
        if response.status == 404 {
            return Err(ReportError::NotFound(id.to_string()));
        }
        if !response.is_success() {
            return Err(ReportError::NetworkFailure(format!(
                "GET {} returned HTTP {}",
                url, response.status
            )));
        }
        serde_json::from_str(&response.body).map_err(|e| {
            ReportError::NetworkFailure(format!("malformed response from {}: {}", url, e))
        })
    }
}

fn check_id(fundraiser_id: &str) -> Result<&str, ReportError> {
    let id = fundraiser_id.trim();
    if id.is_empty() {
        return Err(ReportError::InvalidInput("fundraiser id is empty".to_string()));
    }
    Ok(id)
}
