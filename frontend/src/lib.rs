use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, MouseEvent};

pub mod command_executors;
pub mod config;
pub mod constants; // DOM binding ids and layout constants
pub mod controller;
pub mod dom_utils;
pub mod error;
pub mod export;
pub mod format;
pub mod logging;
pub mod messages;
pub mod models;
pub mod network;
pub mod pagination;
pub mod pdf;
pub mod render;
pub mod state;
pub mod toast;
pub mod views;

use crate::config::ReportConfig;
use crate::constants::{
    EXPORT_BUTTON_ID, FUNDRAISER_ID_INPUT, NEXT_BUTTON_ID, PREV_BUTTON_ID, RETRY_BUTTON_ID,
};
use crate::controller::ReportController;
use crate::dom_utils::{data_attribute, input_value};
use crate::export::ReportExporter;
use crate::messages::Message;
use crate::models::Fundraiser;
use crate::network::{FetchTransport, ReportDataSource};
use crate::render::TableRenderer;
use crate::state::{dispatch_global_message, ReportApp};

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();
    logging::init();

    let document = dom_utils::document()?;

    // Pages without a report simply load the module.
    let Some(id_element) = document.get_element_by_id(FUNDRAISER_ID_INPUT) else {
        log::debug!("no #{} on this page, report not started", FUNDRAISER_ID_INPUT);
        return Ok(());
    };

    let config = ReportConfig::from_attributes(|key| data_attribute(&id_element, key))?;
    let fundraiser_id = input_value(&id_element);
    let fallback = fallback_fundraiser(&id_element, &fundraiser_id);
    log::info!(
        "starting report for fundraiser {:?} ({:?}, page size {})",
        fundraiser_id,
        config.mode,
        config.page_size
    );

    let renderer = TableRenderer::new(config.locale_format());
    state::install(ReportApp {
        controller: ReportController::new(&config, fundraiser_id, fallback),
        data_source: Rc::new(ReportDataSource::new(
            FetchTransport,
            config.api.clone(),
            config.mode,
        )),
        exporter: Rc::new(ReportExporter::new(config.report_title.clone(), renderer)),
    });

    bind_click(&document, PREV_BUTTON_ID, Message::PreviousPage)?;
    bind_click(&document, NEXT_BUTTON_ID, Message::NextPage)?;
    bind_click(&document, EXPORT_BUTTON_ID, Message::ExportRequested)?;
    bind_click(&document, RETRY_BUTTON_ID, Message::Retry)?;

    dispatch_global_message(Message::LoadReport);
    Ok(())
}

/// Show a flash message through the page's toast area.
#[wasm_bindgen(js_name = notify)]
pub fn notify_js(category: &str, text: &str) {
    toast::notify(category, text);
}

/// Jump to a page from host-page script (e.g. a page-number input).
#[wasm_bindgen(js_name = goToPage)]
pub fn go_to_page_js(page: u32) {
    dispatch_global_message(Message::GoToPage(page));
}

/// Metadata embedded in the page, used until the server sends its own.
fn fallback_fundraiser(el: &Element, fundraiser_id: &str) -> Fundraiser {
    let attr = |key: &str| data_attribute(el, key).unwrap_or_default();
    Fundraiser {
        id: fundraiser_id.trim().to_string(),
        name: attr("name"),
        description: attr("description"),
        end_date: attr("end-date"),
        target_funds: attr("target-funds"),
        funds_raised: attr("funds-raised"),
    }
}

// Missing optional controls are skipped
fn bind_click(document: &Document, id: &str, msg: Message) -> Result<(), JsValue> {
    let Some(el) = document.get_element_by_id(id) else {
        log::debug!("#{} not present, no handler bound", id);
        return Ok(());
    };
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        e.prevent_default();
        dispatch_global_message(msg.clone());
    }));
    el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}
