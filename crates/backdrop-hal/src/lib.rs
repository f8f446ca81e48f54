//! Hardware Abstraction Layer trait for Backdrop
//!
//! This crate defines the HAL trait that lets the background controller run
//! against different hosts by abstracting every platform service it consumes.
//!
//! # Platform Implementations
//!
//! - **Browser**: `document.body` geometry, `Blob` + object URLs for images,
//!   `requestAnimationFrame` for deferred work, `console` for logging
//! - **Mock**: In-memory simulation for native tests (`backdrop-hal-mock`)

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

/// Callback run once at the next display-refresh opportunity
pub type FrameCallback = Box<dyn FnOnce()>;

/// Callback run on every viewport resize notification
pub type ResizeCallback = Box<dyn FnMut()>;

/// Current page geometry in CSS pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Hardware Abstraction Layer trait
///
/// Implementations provide platform-specific functionality for:
/// - Page geometry and wall-clock time
/// - Image resources (creation and release of resource locators)
/// - Page background styling
/// - Event subscription and frame scheduling
/// - Debug and error output
///
/// Everything here runs on a single cooperative thread, so the trait carries
/// no `Send`/`Sync` bounds and callbacks are not required to be thread-safe.
pub trait HAL: 'static {
    // === Geometry & Time ===

    /// Get the current page geometry
    ///
    /// Read live on every call; implementations must not cache it.
    /// On browser: `document.body.offsetWidth` / `offsetHeight`
    fn viewport(&self) -> Viewport;

    /// Get wall-clock time in milliseconds since Unix epoch
    ///
    /// On browser: Uses `Date.now()`
    fn wallclock_ms(&self) -> u64;

    // === Image Resources ===

    /// Wrap bytes into an image resource and return its locator
    ///
    /// # Arguments
    /// * `bytes` - Encoded image data
    /// * `media_type` - Media type declared on the resource (e.g. `image/bmp`)
    ///
    /// # Returns
    /// * `Ok(url)` - Locator usable in a CSS `url(...)`
    /// * `Err(HalError::ResourceCreateFailed)` - The platform refused the resource
    fn create_image_url(&self, bytes: &[u8], media_type: &str) -> Result<String, HalError>;

    /// Release a locator previously returned by `create_image_url`
    ///
    /// Releasing an unknown locator is not an error.
    fn revoke_image_url(&self, url: &str);

    // === Display ===

    /// Set the page background image to the resource at `url`
    ///
    /// # Returns
    /// * `Ok(())` - Style updated
    /// * `Err(HalError::StyleUpdateFailed)` - No page body or style rejected
    fn set_background_image(&self, url: &str) -> Result<(), HalError>;

    // === Scheduling ===

    /// Schedule `callback` to run once before the next repaint
    ///
    /// The callback runs after all synchronous work of the current tick.
    /// Scheduled callbacks cannot be cancelled.
    ///
    /// # Returns
    /// * `Ok(())` - Callback queued
    /// * `Err(HalError::ScheduleFailed)` - Platform refused the request
    fn request_frame(&self, callback: FrameCallback) -> Result<(), HalError>;

    /// Register `callback` for every viewport resize notification
    ///
    /// Listeners live for the rest of the process; there is no unsubscribe.
    fn subscribe_resize(&self, callback: ResizeCallback) -> Result<(), HalError>;

    // === Debug ===

    /// Write a debug message to the platform's console/log
    ///
    /// On browser: Uses `console.log()`
    fn debug_write(&self, msg: &str);

    /// Write an error message to the platform's console/log
    ///
    /// On browser: Uses `console.error()`
    fn error_write(&self, msg: &str) {
        self.debug_write(msg);
    }
}

/// HAL errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalError {
    /// No window/document/body available
    NoDocument,
    /// Image resource or locator could not be created
    ResourceCreateFailed,
    /// Background style could not be applied
    StyleUpdateFailed,
    /// Frame callback could not be scheduled
    ScheduleFailed,
    /// Event listener could not be registered
    SubscribeFailed,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            HalError::NoDocument => "no document available",
            HalError::ResourceCreateFailed => "failed to create image resource",
            HalError::StyleUpdateFailed => "failed to update background style",
            HalError::ScheduleFailed => "failed to schedule frame callback",
            HalError::SubscribeFailed => "failed to subscribe to resize events",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for HalError {}

/// Format a CSS `background-image` value for a resource locator
pub fn css_url(url: &str) -> String {
    alloc::format!("url('{}')", url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_css_url() {
        assert_eq!(css_url("blob:http://x/1"), "url('blob:http://x/1')");
    }

    #[test]
    fn test_hal_error_display() {
        assert_eq!(
            HalError::ScheduleFailed.to_string(),
            "failed to schedule frame callback"
        );
        assert_eq!(HalError::NoDocument.to_string(), "no document available");
    }

    #[test]
    fn test_viewport_default_is_empty() {
        assert_eq!(Viewport::default(), Viewport::new(0, 0));
    }
}
