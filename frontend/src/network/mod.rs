// Re-export network modules
pub mod api_client;
pub mod config;
pub mod data_source;

// Re-export commonly used items
pub use api_client::{FetchTransport, HttpResponse, Transport};
pub use config::ApiConfig;
pub use data_source::{FetchRequest, FetchTarget, FetchedReport, ReportDataSource};
