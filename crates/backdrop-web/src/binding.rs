//! Global `init_background(id?, seed?)` binding
//!
//! Installed on `window` so inline page scripts and the developer console can
//! trigger a render, and exported from the wasm module for bundled callers.
//! Calls bypass resize coalescing and render immediately.

use std::cell::RefCell;
use std::rc::Rc;

use backdrop_core::{BackgroundController, RenderOptions};
use wasm_bindgen::prelude::*;

use crate::hal::WebHal;
use crate::util::{error, log};

thread_local! {
    /// Controller served by the module-level `init_background` export
    static CONTROLLER: RefCell<Option<Rc<BackgroundController<WebHal>>>> = RefCell::new(None);
}

/// Interpret the binding's `id` argument; non-strings count as absent
pub fn id_from_js(value: &JsValue) -> Option<String> {
    value.as_string()
}

/// Interpret the binding's `seed` argument.
///
/// `undefined`, `null`, non-numbers and non-finite numbers count as absent.
/// Fractions are truncated toward zero and the sign is kept. Magnitudes past
/// the `i64` range saturate.
pub fn seed_from_js(value: &JsValue) -> Option<i64> {
    value
        .as_f64()
        .filter(|seed| seed.is_finite())
        .map(|seed| seed.trunc() as i64)
}

/// Build render options from raw binding arguments
pub fn options_from_js(id: &JsValue, seed: &JsValue) -> RenderOptions {
    RenderOptions::new(id_from_js(id), seed_from_js(seed))
}

/// Make `controller` the target of the exported `init_background`
pub fn register_controller(controller: &Rc<BackgroundController<WebHal>>) {
    CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller.clone()));
}

/// Render the background now with the given identifier and seed
///
/// Both arguments are optional; missing values fall back to the page
/// defaults. Logs an error if called before the module has started.
#[wasm_bindgen]
pub fn init_background(id: JsValue, seed: JsValue) {
    let controller = CONTROLLER.with(|slot| slot.borrow().clone());
    match controller {
        Some(controller) => {
            controller.render(&options_from_js(&id, &seed));
        }
        None => error("[backdrop] init_background called before startup"),
    }
}

/// Install the controller's render operation on `window`
pub fn install_global(controller: &Rc<BackgroundController<WebHal>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let name = controller.config().global_binding.clone();

    let target = controller.clone();
    let closure = Closure::wrap(Box::new(move |id: JsValue, seed: JsValue| {
        target.render(&options_from_js(&id, &seed));
    }) as Box<dyn FnMut(JsValue, JsValue)>);

    js_sys::Reflect::set(&window, &JsValue::from_str(&name), closure.as_ref())?;
    // Binding lives for the rest of the page
    closure.forget();

    log(&format!("[backdrop] Installed window.{}", name));
    Ok(())
}
