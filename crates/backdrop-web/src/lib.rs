//! Browser entry point for Backdrop
//!
//! This crate runs on the page's main thread. At startup it builds the
//! background controller on top of the browser HAL, installs the global
//! `init_background` binding, then imports the generator module. Once the
//! import resolves the controller renders once and starts following window
//! resizes.
//!
//! ## Module Structure
//!
//! - `hal` - Browser HAL implementation (body geometry, blobs, rAF, console)
//! - `loader` - Dynamic import of the generator module
//! - `generator` - `Generator` adapter over the imported JS function
//! - `binding` - `init_background` on `window` and as a module export
//! - `config` - `window.backdropConfig` reader
//! - `util` - Console bindings and JS error formatting

pub mod binding;
pub mod config;
pub mod generator;
pub mod hal;
pub mod loader;
pub(crate) mod util;

use std::rc::Rc;

use backdrop_core::BackgroundController;
use wasm_bindgen::prelude::*;

pub use binding::{
    id_from_js, init_background, install_global, options_from_js, register_controller,
    seed_from_js,
};
pub use config::config_from_js;
pub use generator::{bytes_from_js, JsGenerator};
pub use hal::WebHal;

use crate::util::{describe_js_error, log};

/// Module start: build the controller and kick off the generator import
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Set up panic hook for better error messages
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let config = config::page_config();
    let controller = Rc::new(BackgroundController::new(WebHal::new(), config));

    // Installed before loading so early callers get the not-ready path
    binding::register_controller(&controller);
    binding::install_global(&controller)?;

    wasm_bindgen_futures::spawn_local(async move {
        match loader::load_generator(controller.config()).await {
            Ok(generator) => {
                if let Err(e) = controller.on_generator_loaded(Box::new(generator)) {
                    log(&format!("[backdrop] Startup incomplete: {}", e));
                }
            }
            Err(e) => controller.on_generator_load_failed(&describe_js_error(&e)),
        }
    });

    Ok(())
}
