//! Page-supplied configuration
//!
//! A host page may define `window.backdropConfig` before the module starts:
//!
//! ```js
//! window.backdropConfig = { default_id: "factorio", module_path: "./pkg/index.js" };
//! ```

use backdrop_core::BackgroundConfig;
use wasm_bindgen::prelude::*;

use crate::util::{describe_js_error, error};

/// Global property read for configuration
pub const CONFIG_GLOBAL: &str = "backdropConfig";

/// Read `window.backdropConfig`, falling back to defaults when it is absent
/// or invalid. Problems are logged, never fatal.
pub fn page_config() -> BackgroundConfig {
    let Some(window) = web_sys::window() else {
        return BackgroundConfig::default();
    };
    let value = match js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL)) {
        Ok(v) if !v.is_undefined() && !v.is_null() => v,
        _ => return BackgroundConfig::default(),
    };
    match config_from_js(&value) {
        Ok(config) => config,
        Err(reason) => {
            error(&format!(
                "[backdrop] Ignoring window.{}: {}",
                CONFIG_GLOBAL, reason
            ));
            BackgroundConfig::default()
        }
    }
}

/// Parse a JS config object through its JSON form
pub fn config_from_js(value: &JsValue) -> Result<BackgroundConfig, String> {
    let json: String = js_sys::JSON::stringify(value)
        .map_err(|e| describe_js_error(&e))?
        .into();
    BackgroundConfig::from_json(&json).map_err(|e| e.to_string())
}
