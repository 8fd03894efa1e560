// DOM binding points for the report page. Markup must provide these ids.
pub const FUNDRAISER_ID_INPUT: &str = "fundraiser-id";
pub const TABLE_BODY_ID: &str = "contributions-table-body";
pub const PREV_BUTTON_ID: &str = "prev-page";
pub const NEXT_BUTTON_ID: &str = "next-page";
pub const PAGE_INFO_ID: &str = "page-info";
pub const EXPORT_BUTTON_ID: &str = "download-pdf";
pub const RETRY_BUTTON_ID: &str = "report-retry"; // optional

// Report defaults
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_LOCALE: &str = "en-KE";
pub const DEFAULT_CURRENCY: &str = "KES";
pub const DEFAULT_REPORT_TITLE: &str = "Nijenge";
pub const EMPTY_TABLE_MESSAGE: &str = "No contributions yet.";

// PDF layout (jsPDF units, mm)
pub const PDF_FONT_FAMILY: &str = "times";
pub const PDF_FONT_SIZE: f64 = 14.0;
pub const PDF_MARGIN_X: f64 = 20.0;
pub const PDF_TITLE_Y: f64 = 20.0;
pub const PDF_SUMMARY_START_Y: f64 = 30.0;
pub const PDF_LINE_HEIGHT: f64 = 10.0;
pub const PDF_TABLE_START_Y: f64 = 90.0;
pub const PDF_TABLE_MARGIN_TOP: f64 = 10.0;
