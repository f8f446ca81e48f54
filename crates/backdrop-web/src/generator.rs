//! Adapter from an imported JS module to the `Generator` contract

use backdrop_core::{Generator, GeneratorError, RenderRequest};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::util::describe_js_error;

/// Generator backed by a function exported from a JS/wasm module
pub struct JsGenerator {
    module: JsValue,
    function: js_sys::Function,
}

impl JsGenerator {
    /// Look up `export` on `module`
    ///
    /// Fails if the export is missing or not callable.
    pub fn from_module(module: JsValue, export: &str) -> Result<Self, JsValue> {
        let value = js_sys::Reflect::get(&module, &JsValue::from_str(export))?;
        let function = value.dyn_into::<js_sys::Function>().map_err(|_| {
            JsValue::from_str(&format!(
                "generator module has no function named `{}`",
                export
            ))
        })?;
        Ok(Self { module, function })
    }
}

impl Generator for JsGenerator {
    fn generate(&self, request: &RenderRequest) -> Result<Option<Vec<u8>>, GeneratorError> {
        let args = js_sys::Array::of4(
            &JsValue::from_str(&request.id),
            &JsValue::from(request.width),
            &JsValue::from(request.height),
            // JS numbers carry seeds exactly up to 2^53
            &JsValue::from_f64(request.seed as f64),
        );
        let result = self
            .function
            .apply(&self.module, &args)
            .map_err(|e| GeneratorError::Threw(describe_js_error(&e)))?;
        bytes_from_js(&result)
    }
}

/// Convert a generator return value into bytes.
///
/// `undefined` and `null` mean "nothing produced". `Uint8Array`,
/// `ArrayBuffer` and plain arrays are accepted as bytes.
pub fn bytes_from_js(value: &JsValue) -> Result<Option<Vec<u8>>, GeneratorError> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    if let Some(array) = value.dyn_ref::<js_sys::Uint8Array>() {
        return Ok(Some(array.to_vec()));
    }
    if let Some(buffer) = value.dyn_ref::<js_sys::ArrayBuffer>() {
        return Ok(Some(js_sys::Uint8Array::new(buffer).to_vec()));
    }
    if js_sys::Array::is_array(value) {
        return Ok(Some(js_sys::Uint8Array::new(value).to_vec()));
    }
    Err(GeneratorError::InvalidOutput(format!("{:?}", value)))
}
