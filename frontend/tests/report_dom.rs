//! Browser tests for the DOM projection of the report.
//!
//! Run with `wasm-pack test --headless --firefox frontend`.
#![cfg(target_arch = "wasm32")]

use fundraiser_report_frontend::constants::{
    EXPORT_BUTTON_ID, NEXT_BUTTON_ID, PAGE_INFO_ID, PREV_BUTTON_ID, RETRY_BUTTON_ID, TABLE_BODY_ID,
};
use fundraiser_report_frontend::messages::ReportView;
use fundraiser_report_frontend::models::Contribution;
use fundraiser_report_frontend::pagination::ControlState;
use fundraiser_report_frontend::render::TableRenderer;
use fundraiser_report_frontend::views;
use wasm_bindgen_test::*;
use web_sys::Document;

wasm_bindgen_test_configure!(run_in_browser);

/// Fresh report markup: table body, pager, export and retry buttons.
fn report_page() -> Document {
    let document = web_sys::window().unwrap().document().unwrap();
    let body = document.body().unwrap();
    body.set_inner_html(&format!(
        r#"<table><tbody id="{tbody}"></tbody></table>
           <button id="{prev}">Prev</button>
           <span id="{info}"></span>
           <button id="{next}">Next</button>
           <button id="{export}">PDF</button>
           <button id="{retry}" class="hidden">Retry</button>"#,
        tbody = TABLE_BODY_ID,
        prev = PREV_BUTTON_ID,
        info = PAGE_INFO_ID,
        next = NEXT_BUTTON_ID,
        export = EXPORT_BUTTON_ID,
        retry = RETRY_BUTTON_ID,
    ));
    document
}

fn is_disabled(document: &Document, id: &str) -> bool {
    document.get_element_by_id(id).unwrap().has_attribute("disabled")
}

fn sample_rows(n: usize) -> ReportView {
    let items: Vec<Contribution> = (0..n)
        .map(|i| Contribution {
            reference: format!("MP{}", i),
            contributor_name: "<b>Achieng</b>".to_string(),
            amount: "1250".to_string(),
            date: "2024-06-30".to_string(),
            time: "18:45".to_string(),
            timestamp: "2024-06-30 18:45:00".to_string(),
        })
        .collect();
    ReportView {
        rows: TableRenderer::default().render(&items),
        page_label: "Page 1 of 3".to_string(),
        controls: ControlState {
            prev_enabled: false,
            next_enabled: true,
        },
        export_enabled: true,
    }
}

#[wasm_bindgen_test]
fn renders_rows_label_and_controls() {
    let document = report_page();
    views::render_report(&document, &sample_rows(4)).unwrap();

    let tbody = document.get_element_by_id(TABLE_BODY_ID).unwrap();
    assert_eq!(tbody.child_element_count(), 4);
    let first = tbody.first_element_child().unwrap();
    assert_eq!(first.child_element_count(), 6);

    // Names are inserted as text, never as markup.
    let name_cell = first.children().item(1).unwrap();
    assert_eq!(name_cell.text_content().unwrap(), "<b>Achieng</b>");
    assert_eq!(name_cell.child_element_count(), 0);

    assert_eq!(
        document.get_element_by_id(PAGE_INFO_ID).unwrap().text_content().unwrap(),
        "Page 1 of 3"
    );
    assert!(is_disabled(&document, PREV_BUTTON_ID));
    assert!(!is_disabled(&document, NEXT_BUTTON_ID));
}

#[wasm_bindgen_test]
fn rerender_replaces_previous_rows() {
    let document = report_page();
    views::render_report(&document, &sample_rows(10)).unwrap();
    views::render_report(&document, &sample_rows(3)).unwrap();
    let tbody = document.get_element_by_id(TABLE_BODY_ID).unwrap();
    assert_eq!(tbody.child_element_count(), 3);
}

#[wasm_bindgen_test]
fn empty_page_shows_placeholder_row() {
    let document = report_page();
    let mut view = sample_rows(0);
    view.controls = ControlState::default();
    views::render_report(&document, &view).unwrap();

    let tbody = document.get_element_by_id(TABLE_BODY_ID).unwrap();
    assert_eq!(tbody.child_element_count(), 1);
    let cell = tbody.first_element_child().unwrap().first_element_child().unwrap();
    assert_eq!(cell.get_attribute("colspan").as_deref(), Some("6"));
    assert!(is_disabled(&document, PREV_BUTTON_ID));
    assert!(is_disabled(&document, NEXT_BUTTON_ID));
}

#[wasm_bindgen_test]
fn failure_disables_controls_and_offers_retry() {
    let document = report_page();
    views::render_failure(&document, "Could not load").unwrap();

    assert!(is_disabled(&document, PREV_BUTTON_ID));
    assert!(is_disabled(&document, NEXT_BUTTON_ID));
    assert!(is_disabled(&document, EXPORT_BUTTON_ID));
    let retry = document.get_element_by_id(RETRY_BUTTON_ID).unwrap();
    assert!(retry.class_list().contains("visible"));
    assert!(!retry.class_list().contains("hidden"));

    // A later successful render hides the retry again.
    views::render_report(&document, &sample_rows(1)).unwrap();
    assert!(retry.class_list().contains("hidden"));
    assert!(!is_disabled(&document, EXPORT_BUTTON_ID));
}

#[wasm_bindgen_test]
fn page_change_during_export_keeps_export_disabled() {
    let document = report_page();
    views::set_exporting(&document, true).unwrap();

    let mut view = sample_rows(2);
    view.export_enabled = false;
    views::render_report(&document, &view).unwrap();
    assert!(is_disabled(&document, EXPORT_BUTTON_ID));
}
