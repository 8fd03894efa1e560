// frontend/src/state.rs
//
// Page-wide slot owning the report controller and the services the command
// executors need.
//
use std::cell::RefCell;
use std::rc::Rc;

use crate::command_executors;
use crate::controller::ReportController;
use crate::error::ReportError;
use crate::export::ReportExporter;
use crate::messages::Message;
use crate::network::api_client::FetchTransport;
use crate::network::data_source::ReportDataSource;

pub type BrowserDataSource = ReportDataSource<FetchTransport>;

pub struct ReportApp {
    pub controller: ReportController,
    pub data_source: Rc<BrowserDataSource>,
    pub exporter: Rc<ReportExporter>,
}

// We use thread_local to store our app state
thread_local! {
    pub static REPORT_STATE: RefCell<Option<ReportApp>> = const { RefCell::new(None) };
}

/// Install the app for this page, replacing any previous one.
pub fn install(app: ReportApp) {
    REPORT_STATE.with(|slot| {
        *slot.borrow_mut() = Some(app);
    });
}

/// The installed data source. Without one every fetch fails as a network
/// failure, so the controller still leaves `Loading`.
pub fn data_source() -> Result<Rc<BrowserDataSource>, ReportError> {
    REPORT_STATE
        .with(|slot| slot.borrow().as_ref().map(|app| app.data_source.clone()))
        .ok_or_else(|| ReportError::NetworkFailure("no data source installed".to_string()))
}

pub fn exporter() -> Option<Rc<ReportExporter>> {
    REPORT_STATE.with(|slot| slot.borrow().as_ref().map(|app| app.exporter.clone()))
}

pub fn dispatch_global_message(msg: Message) {
    // The borrow must end before executors run: they read the slot again
    // and completions dispatch back into it.
    let commands = REPORT_STATE.with(|slot| match slot.borrow_mut().as_mut() {
        Some(app) => app.controller.update(msg),
        None => {
            log::warn!("report not initialised, dropping {:?}", msg);
            Vec::new()
        }
    });

    for cmd in commands {
        command_executors::execute(cmd);
    }
}
