//! dom_utils.rs – thin helper layer for repetitive DOM operations on the
//! report page.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement};

/// The page document, or an error when running outside a browser window.
pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

/// Look up a required binding point.
pub fn by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{} not found", id)))
}

/// Remove the `hidden` class so the element becomes visible.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1("hidden");
    let _ = el.class_list().add_1("visible");
}

/// Hide the element by toggling CSS classes.
pub fn hide(el: &Element) {
    let _ = el.class_list().remove_1("visible");
    let _ = el.class_list().add_1("hidden");
}

/// Toggle the `disabled` attribute (and its aria mirror) on a control.
pub fn set_disabled(el: &Element, disabled: bool) -> Result<(), JsValue> {
    if disabled {
        el.set_attribute("disabled", "")?;
        el.set_attribute("aria-disabled", "true")?;
    } else {
        el.remove_attribute("disabled")?;
        el.set_attribute("aria-disabled", "false")?;
    }
    Ok(())
}

/// Same as [`set_disabled`] for an optional binding point.
pub fn set_disabled_by_id(document: &Document, id: &str, disabled: bool) -> Result<(), JsValue> {
    match document.get_element_by_id(id) {
        Some(el) => set_disabled(&el, disabled),
        None => Ok(()),
    }
}

/// Current value of an `<input>`, falling back to `data-value` for other
/// elements (e.g. a hidden `<span data-value="7">`).
pub fn input_value(el: &Element) -> String {
    match el.dyn_ref::<HtmlInputElement>() {
        Some(input) => input.value(),
        None => data_attribute(el, "value").unwrap_or_default(),
    }
}

/// Read `data-<key>` from an element; blank values count as missing.
pub fn data_attribute(el: &Element, key: &str) -> Option<String> {
    el.get_attribute(&format!("data-{}", key))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
