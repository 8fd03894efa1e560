//! Report configuration.
//!
//! Defaults are compiled in; the host page can override any of them with
//! `data-*` attributes on the fundraiser-id element, e.g.
//! `<input id="fundraiser-id" value="7" data-pagination="server" data-page-size="25">`.

use crate::constants::{DEFAULT_CURRENCY, DEFAULT_LOCALE, DEFAULT_PAGE_SIZE, DEFAULT_REPORT_TITLE};
use crate::error::ReportError;
use crate::format::LocaleFormat;
use crate::network::config::ApiConfig;
use crate::pagination::PaginationMode;

/// Which contributions go into the exported document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportScope {
    /// Everything in memory: the full set in ClientSide mode, the current
    /// page in ServerSide mode.
    AllHeld,
    CurrentPage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportConfig {
    pub api: ApiConfig,
    pub mode: PaginationMode,
    pub page_size: usize,
    pub locale: String,
    pub currency: String,
    pub report_title: String,
    pub export_scope: ExportScope,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            mode: PaginationMode::ClientSide,
            page_size: DEFAULT_PAGE_SIZE,
            locale: DEFAULT_LOCALE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
            report_title: DEFAULT_REPORT_TITLE.to_string(),
            export_scope: ExportScope::AllHeld,
        }
    }
}

impl ReportConfig {
    /// Build a config from attribute lookups (`"pagination"` →
    /// `data-pagination`). Missing or blank attributes keep their default.
    pub fn from_attributes<F>(lookup: F) -> Result<Self, ReportError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();

        if let Some(base) = get("api-base") {
            cfg.api = ApiConfig::from_url(&base);
        }
        if let Some(mode) = get("pagination") {
            cfg.mode = match mode.to_ascii_lowercase().as_str() {
                "client" | "clientside" | "client-side" => PaginationMode::ClientSide,
                "server" | "serverside" | "server-side" => PaginationMode::ServerSide,
                other => {
                    return Err(ReportError::InvalidInput(format!(
                        "unknown pagination mode {:?}",
                        other
                    )))
                }
            };
        }
        if let Some(size) = get("page-size") {
            cfg.page_size = size
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ReportError::InvalidInput(format!("invalid page size {:?}", size)))?;
        }
        if let Some(locale) = get("locale") {
            cfg.locale = locale;
        }
        if let Some(currency) = get("currency") {
            cfg.currency = currency;
        }
        if let Some(title) = get("report-title") {
            cfg.report_title = title;
        }
        if let Some(scope) = get("export-scope") {
            cfg.export_scope = match scope.to_ascii_lowercase().as_str() {
                "all" | "held" => ExportScope::AllHeld,
                "page" | "current" => ExportScope::CurrentPage,
                other => {
                    return Err(ReportError::InvalidInput(format!(
                        "unknown export scope {:?}",
                        other
                    )))
                }
            };
        }
        Ok(cfg)
    }

    pub fn locale_format(&self) -> LocaleFormat {
        LocaleFormat::new(&self.locale, &self.currency)
    }
}
