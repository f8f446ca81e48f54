//! WASM HAL implementation for browser environment
//!
//! Maps the HAL onto `document.body`, `Blob`/object URLs,
//! `requestAnimationFrame` and the console.

use backdrop_hal::{css_url, FrameCallback, HalError, ResizeCallback, Viewport, HAL};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlElement, Url};

use crate::util::{error, log};

/// Browser HAL. Stateless; every call goes straight to the page.
#[derive(Default)]
pub struct WebHal;

impl WebHal {
    pub fn new() -> Self {
        Self
    }
}

fn window() -> Result<web_sys::Window, HalError> {
    web_sys::window().ok_or(HalError::NoDocument)
}

fn body() -> Result<HtmlElement, HalError> {
    window()?
        .document()
        .and_then(|d| d.body())
        .ok_or(HalError::NoDocument)
}

impl HAL for WebHal {
    fn viewport(&self) -> Viewport {
        match body() {
            Ok(body) => Viewport::new(
                body.offset_width().max(0) as u32,
                body.offset_height().max(0) as u32,
            ),
            Err(e) => {
                log(&format!("[web-hal] Cannot read viewport: {}", e));
                Viewport::default()
            }
        }
    }

    fn wallclock_ms(&self) -> u64 {
        // Use Date.now() from js_sys
        js_sys::Date::now() as u64
    }

    fn create_image_url(&self, bytes: &[u8], media_type: &str) -> Result<String, HalError> {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let options = BlobPropertyBag::new();
        options.set_type(media_type);

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(|e| {
            log(&format!("[web-hal] Blob construction failed: {:?}", e));
            HalError::ResourceCreateFailed
        })?;

        Url::create_object_url_with_blob(&blob).map_err(|e| {
            log(&format!("[web-hal] createObjectURL failed: {:?}", e));
            HalError::ResourceCreateFailed
        })
    }

    fn revoke_image_url(&self, url: &str) {
        if let Err(e) = Url::revoke_object_url(url) {
            log(&format!("[web-hal] revokeObjectURL({}) failed: {:?}", url, e));
        }
    }

    fn set_background_image(&self, url: &str) -> Result<(), HalError> {
        body()?
            .style()
            .set_property("background-image", &css_url(url))
            .map_err(|e| {
                log(&format!("[web-hal] Failed to set background-image: {:?}", e));
                HalError::StyleUpdateFailed
            })
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<(), HalError> {
        // once_into_js frees the closure after its single invocation
        let closure = Closure::once_into_js(move || callback());
        window()?
            .request_animation_frame(closure.unchecked_ref())
            .map(|_| ())
            .map_err(|e| {
                log(&format!("[web-hal] requestAnimationFrame failed: {:?}", e));
                HalError::ScheduleFailed
            })
    }

    fn subscribe_resize(&self, callback: ResizeCallback) -> Result<(), HalError> {
        let closure = Closure::wrap(callback);
        window()?
            .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            .map_err(|e| {
                log(&format!("[web-hal] addEventListener(resize) failed: {:?}", e));
                HalError::SubscribeFailed
            })?;
        // Listener lives for the rest of the page
        closure.forget();
        Ok(())
    }

    fn debug_write(&self, msg: &str) {
        log(msg);
    }

    fn error_write(&self, msg: &str) {
        error(msg);
    }
}
