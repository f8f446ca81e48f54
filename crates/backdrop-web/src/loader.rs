//! One-shot dynamic import of the generator module
//!
//! There is no retry and no timeout: the import either settles or the
//! controller stays unloaded.

use backdrop_core::BackgroundConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::generator::JsGenerator;
use crate::util::log;

#[wasm_bindgen(inline_js = "export function import_module(url) { return import(url); }")]
extern "C" {
    #[wasm_bindgen(catch)]
    fn import_module(url: &str) -> Result<js_sys::Promise, JsValue>;
}

/// Resolve `path` against the document base URI.
///
/// Snippets live in their own directory, so a bare relative import would
/// resolve against the snippet file instead of the page.
pub fn resolve_module_url(path: &str) -> Result<String, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let base = document.base_uri()?.unwrap_or_default();
    Ok(web_sys::Url::new_with_base(path, &base)?.href())
}

/// Import the configured module and bind its generator export
pub async fn load_generator(config: &BackgroundConfig) -> Result<JsGenerator, JsValue> {
    let url = resolve_module_url(&config.module_path)?;
    log(&format!("[loader] Importing generator module from {}", url));

    let module = JsFuture::from(import_module(&url)?).await?;
    JsGenerator::from_module(module, &config.generator_export)
}
