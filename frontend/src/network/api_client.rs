use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::error::ReportError;

/// Status and body of a completed HTTP request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP seam used by the report data source.
///
/// Futures are polled on the browser's single thread, so implementations
/// need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ReportError>;
}

/// Browser `fetch` transport.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, ReportError> {
        fetch_text(url, "GET")
            .await
            .map_err(|e| ReportError::NetworkFailure(format!("{:?}", e)))
    }
}

// Helper function to make fetch requests
async fn fetch_text(url: &str, method: &str) -> Result<HttpResponse, JsValue> {
    use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);

    let headers = Headers::new()?;
    headers.append("Accept", "application/json")?;
    opts.set_headers(&headers);

    let request = Request::new_with_str_and_init(url, &opts)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    // Body is read even for error statuses; the caller maps status codes.
    let text = JsFuture::from(resp.text()?).await?;
    Ok(HttpResponse {
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}
