//! Mock HAL implementation for testing Backdrop
//!
//! This provides a mock implementation of the HAL trait that can be used
//! for unit testing the background controller without requiring a browser.
//! Frames and resize notifications are driven explicitly by the test.

#![no_std]
extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use backdrop_hal::{css_url, FrameCallback, HalError, ResizeCallback, Viewport, HAL};
use core::cell::{Cell, RefCell};

/// Mock HAL for unit testing
///
/// Provides simulated page geometry, time, image resources, background style,
/// frame scheduling and resize events.
pub struct MockHal {
    /// Simulated page geometry
    viewport: Cell<Viewport>,
    /// Simulated wall-clock time in milliseconds
    time_ms: Cell<u64>,
    /// Captured debug messages
    debug_log: RefCell<Vec<String>>,
    /// Captured error messages
    error_log: RefCell<Vec<String>>,
    /// Image resources in creation order (url, resource)
    resources: RefCell<Vec<(String, MockResource)>>,
    /// Next resource number for generated locators
    next_resource: Cell<u64>,
    /// Locators released via revoke_image_url
    revoked: RefCell<Vec<String>>,
    /// Current CSS background-image value
    background: RefCell<Option<String>>,
    /// Callbacks waiting for the next frame
    pending_frames: RefCell<Vec<FrameCallback>>,
    /// Total number of accepted frame requests
    frame_requests: Cell<usize>,
    /// Registered resize listeners
    resize_listeners: RefCell<Vec<ResizeCallback>>,
    /// Failure injection
    fail_frame_requests: Cell<bool>,
    fail_resource_creation: Cell<bool>,
    fail_style_updates: Cell<bool>,
}

/// Simulated image resource
struct MockResource {
    bytes: Vec<u8>,
    media_type: String,
}

impl MockHal {
    /// Create a new mock HAL with an empty viewport at time zero
    pub fn new() -> Self {
        Self::with_viewport(0, 0)
    }

    /// Create a mock HAL with a specific starting viewport
    pub fn with_viewport(width: u32, height: u32) -> Self {
        Self {
            viewport: Cell::new(Viewport::new(width, height)),
            time_ms: Cell::new(0),
            debug_log: RefCell::new(Vec::new()),
            error_log: RefCell::new(Vec::new()),
            resources: RefCell::new(Vec::new()),
            next_resource: Cell::new(1),
            revoked: RefCell::new(Vec::new()),
            background: RefCell::new(None),
            pending_frames: RefCell::new(Vec::new()),
            frame_requests: Cell::new(0),
            resize_listeners: RefCell::new(Vec::new()),
            fail_frame_requests: Cell::new(false),
            fail_resource_creation: Cell::new(false),
            fail_style_updates: Cell::new(false),
        }
    }

    // === Time ===

    /// Set the simulated wall-clock time
    pub fn set_time(&self, ms: u64) {
        self.time_ms.set(ms);
    }

    /// Advance the simulated wall-clock time
    pub fn advance_time(&self, ms: u64) {
        self.time_ms.set(self.time_ms.get() + ms);
    }

    // === Geometry & events ===

    /// Change the page geometry without firing a resize notification
    pub fn set_viewport(&self, width: u32, height: u32) {
        self.viewport.set(Viewport::new(width, height));
    }

    /// Change the page geometry and notify every resize listener
    pub fn resize(&self, width: u32, height: u32) {
        self.set_viewport(width, height);
        self.fire_resize();
    }

    /// Notify every resize listener once
    pub fn fire_resize(&self) {
        // Listeners are taken out for the call so they may register more listeners
        let mut listeners = core::mem::take(&mut *self.resize_listeners.borrow_mut());
        for listener in listeners.iter_mut() {
            listener();
        }
        let mut slot = self.resize_listeners.borrow_mut();
        listeners.append(&mut slot);
        *slot = listeners;
    }

    /// Get the number of registered resize listeners
    pub fn resize_listener_count(&self) -> usize {
        self.resize_listeners.borrow().len()
    }

    // === Frames ===

    /// Run one display refresh: every callback queued before this call runs once.
    ///
    /// Callbacks requested while the frame runs are deferred to the next frame.
    /// Returns the number of callbacks executed.
    pub fn run_frame(&self) -> usize {
        let callbacks = core::mem::take(&mut *self.pending_frames.borrow_mut());
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        count
    }

    /// Get the number of callbacks waiting for the next frame
    pub fn pending_frame_count(&self) -> usize {
        self.pending_frames.borrow().len()
    }

    /// Get the total number of accepted frame requests
    pub fn frame_request_count(&self) -> usize {
        self.frame_requests.get()
    }

    // === Resources & display ===

    /// Get the current CSS background-image value
    pub fn background_image(&self) -> Option<String> {
        self.background.borrow().clone()
    }

    /// Get every locator ever created, in creation order
    pub fn created_urls(&self) -> Vec<String> {
        self.resources
            .borrow()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    /// Get the bytes behind a locator (for testing)
    pub fn resource_bytes(&self, url: &str) -> Option<Vec<u8>> {
        self.resources
            .borrow()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, r)| r.bytes.clone())
    }

    /// Get the media type declared for a locator (for testing)
    pub fn resource_media_type(&self, url: &str) -> Option<String> {
        self.resources
            .borrow()
            .iter()
            .find(|(u, _)| u == url)
            .map(|(_, r)| r.media_type.clone())
    }

    /// Get every locator released so far, in release order
    pub fn revoked_urls(&self) -> Vec<String> {
        self.revoked.borrow().clone()
    }

    /// Get the number of created locators that have not been released
    pub fn live_resource_count(&self) -> usize {
        let revoked = self.revoked.borrow();
        self.resources
            .borrow()
            .iter()
            .filter(|(url, _)| !revoked.contains(url))
            .count()
    }

    // === Failure injection ===

    /// Make subsequent frame requests fail
    pub fn set_fail_frame_requests(&self, fail: bool) {
        self.fail_frame_requests.set(fail);
    }

    /// Make subsequent resource creation fail
    pub fn set_fail_resource_creation(&self, fail: bool) {
        self.fail_resource_creation.set(fail);
    }

    /// Make subsequent style updates fail
    pub fn set_fail_style_updates(&self, fail: bool) {
        self.fail_style_updates.set(fail);
    }

    // === Logs ===

    /// Get all captured debug messages
    pub fn get_debug_log(&self) -> Vec<String> {
        self.debug_log.borrow().clone()
    }

    /// Get all captured error messages
    pub fn get_error_log(&self) -> Vec<String> {
        self.error_log.borrow().clone()
    }

    /// Get the number of error messages
    pub fn error_count(&self) -> usize {
        self.error_log.borrow().len()
    }

    /// Check if a specific message was logged to either stream
    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.debug_log
            .borrow()
            .iter()
            .chain(self.error_log.borrow().iter())
            .any(|msg| msg.contains(substr))
    }

    /// Clear both logs
    pub fn clear_logs(&self) {
        self.debug_log.borrow_mut().clear();
        self.error_log.borrow_mut().clear();
    }
}

impl Default for MockHal {
    fn default() -> Self {
        Self::new()
    }
}

impl HAL for MockHal {
    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn wallclock_ms(&self) -> u64 {
        self.time_ms.get()
    }

    fn create_image_url(&self, bytes: &[u8], media_type: &str) -> Result<String, HalError> {
        if self.fail_resource_creation.get() {
            return Err(HalError::ResourceCreateFailed);
        }
        let n = self.next_resource.get();
        self.next_resource.set(n + 1);
        let url = format!("blob:mock/{}", n);
        self.resources.borrow_mut().push((
            url.clone(),
            MockResource {
                bytes: bytes.to_vec(),
                media_type: String::from(media_type),
            },
        ));
        Ok(url)
    }

    fn revoke_image_url(&self, url: &str) {
        self.revoked.borrow_mut().push(String::from(url));
    }

    fn set_background_image(&self, url: &str) -> Result<(), HalError> {
        if self.fail_style_updates.get() {
            return Err(HalError::StyleUpdateFailed);
        }
        *self.background.borrow_mut() = Some(css_url(url));
        Ok(())
    }

    fn request_frame(&self, callback: FrameCallback) -> Result<(), HalError> {
        if self.fail_frame_requests.get() {
            return Err(HalError::ScheduleFailed);
        }
        self.pending_frames.borrow_mut().push(callback);
        self.frame_requests.set(self.frame_requests.get() + 1);
        Ok(())
    }

    fn subscribe_resize(&self, callback: ResizeCallback) -> Result<(), HalError> {
        self.resize_listeners.borrow_mut().push(callback);
        Ok(())
    }

    fn debug_write(&self, msg: &str) {
        self.debug_log.borrow_mut().push(String::from(msg));
    }

    fn error_write(&self, msg: &str) {
        self.error_log.borrow_mut().push(String::from(msg));
    }
}
