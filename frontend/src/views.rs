// frontend/src/views.rs
//
// Projects the controller's view-model onto the report page: the table
// body, the page label and the navigation affordances.
//
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{
    EMPTY_TABLE_MESSAGE, EXPORT_BUTTON_ID, NEXT_BUTTON_ID, PAGE_INFO_ID, PREV_BUTTON_ID,
    RETRY_BUTTON_ID, TABLE_BODY_ID,
};
use crate::dom_utils::{by_id, hide, set_disabled_by_id, show};
use crate::messages::ReportView;
use crate::pagination::ControlState;
use crate::render::{RowView, COLUMN_HEADINGS};

/// Replace the table body with `view.rows` and refresh the controls.
pub fn render_report(document: &Document, view: &ReportView) -> Result<(), JsValue> {
    let tbody = by_id(document, TABLE_BODY_ID)?;
    // Clear previous rows
    tbody.set_inner_html("");

    if view.rows.is_empty() {
        let row = message_row(document, EMPTY_TABLE_MESSAGE)?;
        tbody.append_child(&row)?;
    } else {
        for row in &view.rows {
            let tr = table_row(document, row)?;
            tbody.append_child(&tr)?;
        }
    }

    if let Some(info) = document.get_element_by_id(PAGE_INFO_ID) {
        info.set_text_content(Some(&view.page_label));
    }
    if let Some(retry) = document.get_element_by_id(RETRY_BUTTON_ID) {
        hide(&retry);
    }
    set_disabled_by_id(document, EXPORT_BUTTON_ID, !view.export_enabled)?;
    apply_controls(document, view.controls)
}

pub fn apply_controls(document: &Document, controls: ControlState) -> Result<(), JsValue> {
    set_disabled_by_id(document, PREV_BUTTON_ID, !controls.prev_enabled)?;
    set_disabled_by_id(document, NEXT_BUTTON_ID, !controls.next_enabled)
}

/// Failed state: navigation and export off, retry offered when the page
/// has a retry button. Rows already on screen are left alone.
pub fn render_failure(document: &Document, message: &str) -> Result<(), JsValue> {
    apply_controls(document, ControlState::default())?;
    set_disabled_by_id(document, EXPORT_BUTTON_ID, true)?;

    if let Some(retry) = document.get_element_by_id(RETRY_BUTTON_ID) {
        retry.set_attribute("title", message)?;
        show(&retry);
    }

    // Nothing rendered yet: put the message where the rows would be.
    if let Some(tbody) = document.get_element_by_id(TABLE_BODY_ID) {
        if tbody.child_element_count() == 0 {
            let row = message_row(document, message)?;
            tbody.append_child(&row)?;
        }
    }
    Ok(())
}

pub fn set_exporting(document: &Document, exporting: bool) -> Result<(), JsValue> {
    set_disabled_by_id(document, EXPORT_BUTTON_ID, exporting)
}

fn table_row(document: &Document, row: &RowView) -> Result<Element, JsValue> {
    let tr = document.create_element("tr")?;
    for cell in row.cells() {
        let td = document.create_element("td")?;
        // text only, contributor names are user supplied
        td.set_text_content(Some(cell));
        tr.append_child(&td)?;
    }
    Ok(tr)
}

fn message_row(document: &Document, text: &str) -> Result<Element, JsValue> {
    let tr = document.create_element("tr")?;
    tr.set_class_name("empty-row");
    let td = document.create_element("td")?;
    td.set_attribute("colspan", &COLUMN_HEADINGS.len().to_string())?;
    td.set_text_content(Some(text));
    tr.append_child(&td)?;
    Ok(tr)
}
