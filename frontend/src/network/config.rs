use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Report endpoint configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    /// Uses the build-time `API_BASE_URL` when set, otherwise an empty base
    /// so requests go to the origin that served the page.
    fn default() -> Self {
        Self::from_url(option_env!("API_BASE_URL").unwrap_or(""))
    }
}

impl ApiConfig {
    /// Create a new ApiConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self { base_url: url.trim().trim_end_matches('/').to_string() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /report/{id}?format=json`
    pub fn report_url(&self, fundraiser_id: &str) -> String {
        format!("{}/report/{}?format=json", self.base_url, encode(fundraiser_id))
    }

    /// `GET /report/{id}/page/{n}`
    pub fn page_url(&self, fundraiser_id: &str, page: u32) -> String {
        format!("{}/report/{}/page/{}", self.base_url, encode(fundraiser_id), page)
    }
}

fn encode(segment: &str) -> String {
    utf8_percent_encode(segment.trim(), NON_ALPHANUMERIC).to_string()
}
