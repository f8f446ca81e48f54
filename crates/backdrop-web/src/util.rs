//! Shared utilities for the web crate
//!
//! Console bindings and JS error formatting used across modules.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

#[wasm_bindgen]
extern "C" {
    /// Console.log binding for WASM
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);

    /// Console.error binding for WASM
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn error(s: &str);
}

/// Render a thrown JS value as a readable message.
///
/// `Error` objects give `Name: message`, strings are used as-is and anything
/// else falls back to its debug form.
pub fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.to_string());
    }
    if let Some(s) = value.as_string() {
        return s;
    }
    format!("{:?}", value)
}
