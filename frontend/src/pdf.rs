//! jsPDF + autoTable backend for the report exporter.
//!
//! The host page loads `jspdf.umd.min.js` and the autoTable plugin, which
//! expose the constructor as `window.jspdf.jsPDF`.

use js_sys::{Array, Function, Reflect, Uint8Array};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::ReportError;
use crate::export::DocumentBackend;

#[wasm_bindgen]
extern "C" {
    type JsPdf;

    #[wasm_bindgen(method, catch, js_name = setFont)]
    fn set_font(this: &JsPdf, family: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = setFontSize)]
    fn set_font_size(this: &JsPdf, size: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn text(this: &JsPdf, text: &str, x: f64, y: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = addPage)]
    fn add_page(this: &JsPdf) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = autoTable)]
    fn auto_table(this: &JsPdf, options: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch)]
    fn output(this: &JsPdf, kind: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn save(this: &JsPdf, filename: &str) -> Result<(), JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AutoTableOptions<'a> {
    start_y: f64,
    head: Vec<&'a [&'a str]>,
    body: &'a [Vec<String>],
    margin: Margin,
}

#[derive(Serialize)]
struct Margin {
    top: f64,
}

pub struct JsPdfBackend {
    doc: JsPdf,
    pages: u32,
}

impl JsPdfBackend {
    /// Fails when jsPDF is not loaded on the page.
    pub fn new() -> Result<Self, ReportError> {
        let window = web_sys::window()
            .ok_or_else(|| ReportError::ExportFailure("no global window exists".to_string()))?;
        let namespace = Reflect::get(&window, &JsValue::from_str("jspdf")).map_err(js_failure)?;
        if namespace.is_undefined() {
            return Err(ReportError::ExportFailure("jsPDF is not loaded".to_string()));
        }
        let ctor: Function = Reflect::get(&namespace, &JsValue::from_str("jsPDF"))
            .map_err(js_failure)?
            .dyn_into()
            .map_err(js_failure)?;
        let doc = Reflect::construct(&ctor, &Array::new()).map_err(js_failure)?;
        Ok(Self {
            doc: doc.unchecked_into(),
            pages: 0,
        })
    }
}

impl DocumentBackend for JsPdfBackend {
    fn start_page(&mut self) -> Result<(), ReportError> {
        // jsPDF opens with one blank page already.
        if self.pages > 0 {
            self.doc.add_page().map_err(js_failure)?;
        }
        self.pages += 1;
        Ok(())
    }

    fn set_font(&mut self, family: &str, size: f64) -> Result<(), ReportError> {
        self.doc.set_font(family).map_err(js_failure)?;
        self.doc.set_font_size(size).map_err(js_failure)
    }

    fn text(&mut self, text: &str, x: f64, y: f64) -> Result<(), ReportError> {
        self.doc.text(text, x, y).map_err(js_failure)
    }

    fn table(
        &mut self,
        start_y: f64,
        margin_top: f64,
        head: &[&str],
        body: &[Vec<String>],
    ) -> Result<(), ReportError> {
        let options = AutoTableOptions {
            start_y,
            head: vec![head],
            body,
            margin: Margin { top: margin_top },
        };
        let options = serde_wasm_bindgen::to_value(&options)
            .map_err(|e| ReportError::ExportFailure(e.to_string()))?;
        self.doc.auto_table(&options).map_err(js_failure)
    }

    fn save(&mut self, filename: &str) -> Result<Vec<u8>, ReportError> {
        let buffer = self.doc.output("arraybuffer").map_err(js_failure)?;
        let bytes = Uint8Array::new(&buffer).to_vec();
        self.doc.save(filename).map_err(js_failure)?;
        Ok(bytes)
    }
}

fn js_failure(err: JsValue) -> ReportError {
    let message = err
        .as_string()
        .or_else(|| {
            Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err));
    ReportError::ExportFailure(message)
}
