use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsValue;

use crate::dom_utils;
use crate::error::ReportError;
use crate::messages::{Command, ExportJob, ExportSummary, Message};
use crate::pdf::JsPdfBackend;
use crate::state::{self, dispatch_global_message};
use crate::toast;
use crate::views;

pub fn execute(cmd: Command) {
    match cmd {
        Command::Fetch(request) => {
            let source = state::data_source();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match source {
                    Ok(source) => source.fetch(&request).await,
                    Err(e) => Err(e),
                };
                if let Err(e) = &result {
                    log::debug!("fetch #{} failed: {}", request.seq, e);
                }
                dispatch_global_message(Message::ReportFetched {
                    seq: request.seq,
                    result,
                });
            });
        }
        Command::Render(view) => {
            with_document("render report", |doc| views::render_report(doc, &view));
        }
        Command::SetControls(controls) => {
            with_document("update controls", |doc| views::apply_controls(doc, controls));
        }
        Command::ShowFailure(message) => {
            with_document("show failure", |doc| views::render_failure(doc, &message));
        }
        Command::Notify { kind, text } => toast::show(&text, kind),
        Command::Export(job) => execute_export(job),
    }
}

fn execute_export(job: ExportJob) {
    let Some(exporter) = state::exporter() else {
        dispatch_global_message(Message::ExportFinished(Err(ReportError::ExportFailure(
            "no exporter installed".to_string(),
        ))));
        return;
    };
    with_document("disable export", |doc| views::set_exporting(doc, true));

    wasm_bindgen_futures::spawn_local(async move {
        // Let the page repaint before the document is generated.
        TimeoutFuture::new(0).await;

        let result = JsPdfBackend::new()
            .and_then(|mut backend| exporter.export(&mut backend, &job.fundraiser, &job.contributions))
            .map(|report| ExportSummary {
                filename: report.filename,
                rows: report.rows,
            });

        with_document("enable export", |doc| views::set_exporting(doc, false));
        dispatch_global_message(Message::ExportFinished(result));
    });
}

fn with_document<F>(what: &str, f: F)
where
    F: FnOnce(&web_sys::Document) -> Result<(), JsValue>,
{
    if let Err(e) = dom_utils::document().and_then(|doc| f(&doc)) {
        log::error!("failed to {}: {:?}", what, e);
    }
}
