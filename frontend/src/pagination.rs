//! Pagination state for the contribution table.
//!
//! ClientSide pagination slices one fully fetched list; ServerSide
//! pagination holds the last page the server returned and defers bounds to
//! the server's `has_prev` / `has_next` flags.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::models::{Contribution, ReportPage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaginationMode {
    ClientSide,
    ServerSide,
}

/// Data used to seed a [`PaginationController`].
#[derive(Clone, Debug)]
pub enum InitialData {
    Items(Vec<Contribution>),
    FirstPage(ReportPage),
}

/// Result of a successful navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// The held page changed locally; `current_items()` already reflects it.
    Moved,
    /// The caller must fetch this page and hand it to `replace_page`.
    Fetch(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSummary {
    pub current_page: u32,
    /// Only known in ClientSide mode.
    pub total_pages: Option<u32>,
}

impl PageSummary {
    pub fn label(&self) -> String {
        match self.total_pages {
            Some(total) => format!("Page {} of {}", self.current_page, total),
            None => format!("Page {}", self.current_page),
        }
    }
}

/// Enabled state of the previous / next affordances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Clone, Debug)]
enum Held {
    ClientSide {
        items: Vec<Contribution>,
        current_page: u32,
    },
    ServerSide {
        page: ReportPage,
    },
}

#[derive(Clone, Debug)]
pub struct PaginationController {
    page_size: usize,
    held: Held,
}

impl PaginationController {
    pub fn initialize(
        mode: PaginationMode,
        page_size: usize,
        data: InitialData,
    ) -> Result<Self, ReportError> {
        match (mode, data) {
            (PaginationMode::ClientSide, InitialData::Items(items)) => {
                Self::client_side(page_size, items)
            }
            (PaginationMode::ServerSide, InitialData::FirstPage(page)) => {
                Self::server_side(page_size, page)
            }
            (mode, _) => Err(ReportError::ModeMismatch { expected: mode }),
        }
    }

    pub fn client_side(page_size: usize, items: Vec<Contribution>) -> Result<Self, ReportError> {
        check_page_size(page_size)?;
        Ok(Self {
            page_size,
            held: Held::ClientSide {
                items,
                current_page: 1,
            },
        })
    }

    pub fn server_side(page_size: usize, page: ReportPage) -> Result<Self, ReportError> {
        check_page_size(page_size)?;
        Ok(Self {
            page_size,
            held: Held::ServerSide { page },
        })
    }

    pub fn mode(&self) -> PaginationMode {
        match self.held {
            Held::ClientSide { .. } => PaginationMode::ClientSide,
            Held::ServerSide { .. } => PaginationMode::ServerSide,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> Option<usize> {
        match &self.held {
            Held::ClientSide { items, .. } => Some(items.len()),
            Held::ServerSide { .. } => None,
        }
    }

    /// `ceil(total / page_size)`, with an empty list still counting as one page.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_items()
            .map(|total| total.div_ceil(self.page_size).max(1) as u32)
    }

    pub fn current_page(&self) -> u32 {
        match &self.held {
            Held::ClientSide { current_page, .. } => *current_page,
            Held::ServerSide { page } => page.page_number,
        }
    }

    pub fn current_items(&self) -> &[Contribution] {
        match &self.held {
            Held::ClientSide {
                items,
                current_page,
            } => {
                let start = (*current_page as usize - 1) * self.page_size;
                let end = (start + self.page_size).min(items.len());
                items.get(start..end).unwrap_or(&[])
            }
            Held::ServerSide { page } => &page.items,
        }
    }

    /// Everything currently held in memory: the full list in ClientSide
    /// mode, the last fetched page in ServerSide mode.
    pub fn held_items(&self) -> &[Contribution] {
        match &self.held {
            Held::ClientSide { items, .. } => items,
            Held::ServerSide { page } => &page.items,
        }
    }

    pub fn go_to_next(&mut self) -> Result<Navigation, ReportError> {
        let total_pages = self.total_pages();
        match &mut self.held {
            Held::ClientSide { current_page, .. } => {
                let requested = *current_page + 1;
                if Some(requested) > total_pages {
                    return Err(ReportError::OutOfRange { requested });
                }
                *current_page = requested;
                Ok(Navigation::Moved)
            }
            Held::ServerSide { page } => {
                let following = page.page_number.checked_add(1);
                let requested = page.next_page_number.or(following);
                match requested {
                    Some(requested) if page.has_next => Ok(Navigation::Fetch(requested)),
                    _ => Err(ReportError::OutOfRange {
                        requested: requested.unwrap_or(u32::MAX),
                    }),
                }
            }
        }
    }

    pub fn go_to_previous(&mut self) -> Result<Navigation, ReportError> {
        match &mut self.held {
            Held::ClientSide { current_page, .. } => {
                if *current_page <= 1 {
                    return Err(ReportError::OutOfRange { requested: 0 });
                }
                *current_page -= 1;
                Ok(Navigation::Moved)
            }
            Held::ServerSide { page } => {
                let requested = page
                    .prev_page_number
                    .unwrap_or(page.page_number.saturating_sub(1));
                if !page.has_prev || requested == 0 {
                    return Err(ReportError::OutOfRange { requested });
                }
                Ok(Navigation::Fetch(requested))
            }
        }
    }

    /// Jump straight to `requested`. ServerSide validity is left to the server.
    pub fn go_to_page(&mut self, requested: u32) -> Result<Navigation, ReportError> {
        if requested == 0 {
            return Err(ReportError::OutOfRange { requested });
        }
        let total_pages = self.total_pages();
        match &mut self.held {
            Held::ClientSide { current_page, .. } => {
                if Some(requested) > total_pages {
                    return Err(ReportError::OutOfRange { requested });
                }
                *current_page = requested;
                Ok(Navigation::Moved)
            }
            Held::ServerSide { .. } => Ok(Navigation::Fetch(requested)),
        }
    }

    /// Install a freshly fetched server page.
    pub fn replace_page(&mut self, new_page: ReportPage) -> Result<(), ReportError> {
        match &mut self.held {
            Held::ServerSide { page } => {
                *page = new_page;
                Ok(())
            }
            Held::ClientSide { .. } => Err(ReportError::ModeMismatch {
                expected: PaginationMode::ServerSide,
            }),
        }
    }

    pub fn page_summary(&self) -> PageSummary {
        PageSummary {
            current_page: self.current_page(),
            total_pages: self.total_pages(),
        }
    }

    pub fn controls(&self) -> ControlState {
        match &self.held {
            Held::ClientSide { current_page, .. } => {
                let total = self.total_pages().unwrap_or(1);
                ControlState {
                    prev_enabled: *current_page > 1,
                    next_enabled: *current_page < total,
                }
            }
            Held::ServerSide { page } => ControlState {
                prev_enabled: page.has_prev,
                next_enabled: page.has_next,
            },
        }
    }
}

fn check_page_size(page_size: usize) -> Result<(), ReportError> {
    if page_size == 0 {
        return Err(ReportError::InvalidInput(
            "page size must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
