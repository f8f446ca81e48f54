//! Background Refresh Controller
//!
//! Owns the generator handle, the resize coalescer and the currently
//! displayed resource locator. Two states:
//!
//! - `Unloaded`: no generator yet; renders log an error and do nothing
//! - `Ready`: generator attached; renders are fully functional
//!
//! The only transition is `Unloaded -> Ready`, taken once when the generator
//! module finishes loading. A failed load leaves the controller `Unloaded`
//! for the rest of the process.

use std::cell::RefCell;
use std::rc::Rc;

use backdrop_hal::{HalError, HAL};
use thiserror::Error;

use crate::coalesce::ResizeCoalescer;
use crate::config::BackgroundConfig;
use crate::generator::{Generator, GeneratorError};
use crate::request::{RenderDefaults, RenderOptions};

/// Controller lifecycle state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Unloaded,
    Ready,
}

/// What a render call did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The background now shows the resource at `url`
    Applied { url: String },
    /// The generator produced nothing; the page was left untouched
    Empty,
    /// No generator attached yet
    NotReady,
    /// Generation or display failed and was logged
    Failed,
}

/// Render errors (logged at the controller boundary, never propagated)
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("generator module is not yet ready")]
    NotReady,
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error("platform error: {0}")]
    Hal(#[from] HalError),
}

/// Controller lifecycle errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("generator already loaded")]
    AlreadyLoaded,
    #[error("failed to subscribe to resize events: {0}")]
    Subscribe(HalError),
}

pub struct BackgroundController<H: HAL> {
    hal: H,
    config: BackgroundConfig,
    defaults: RenderDefaults,
    generator: RefCell<Option<Box<dyn Generator>>>,
    coalescer: ResizeCoalescer,
    /// Locator currently assigned to the page background
    current_url: RefCell<Option<String>>,
}

impl<H: HAL> BackgroundController<H> {
    /// Create an unloaded controller. The startup seed is captured here.
    pub fn new(hal: H, config: BackgroundConfig) -> Self {
        let defaults = RenderDefaults {
            id: config.default_id.clone(),
            // Millisecond timestamps stay far below i64::MAX
            seed: hal.wallclock_ms() as i64,
        };
        hal.debug_write(&format!(
            "[backdrop] Controller created (default '{}', seed {})",
            defaults.id, defaults.seed
        ));
        Self {
            hal,
            config,
            defaults,
            generator: RefCell::new(None),
            coalescer: ResizeCoalescer::new(),
            current_url: RefCell::new(None),
        }
    }

    pub fn hal(&self) -> &H {
        &self.hal
    }

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn defaults(&self) -> &RenderDefaults {
        &self.defaults
    }

    pub fn state(&self) -> ControllerState {
        if self.generator.borrow().is_some() {
            ControllerState::Ready
        } else {
            ControllerState::Unloaded
        }
    }

    /// Locator currently shown as the page background
    pub fn current_url(&self) -> Option<String> {
        self.current_url.borrow().clone()
    }

    /// Resize notifications since the last deferred render completed
    pub fn pending_resizes(&self) -> u32 {
        self.coalescer.pending()
    }

    /// Store the generator handle. Allowed exactly once.
    pub fn attach_generator(&self, generator: Box<dyn Generator>) -> Result<(), ControllerError> {
        let mut slot = self.generator.borrow_mut();
        if slot.is_some() {
            return Err(ControllerError::AlreadyLoaded);
        }
        *slot = Some(generator);
        Ok(())
    }

    /// Finish startup after a successful module load: attach the generator,
    /// render once with defaults, then start listening for resizes.
    pub fn on_generator_loaded(
        self: &Rc<Self>,
        generator: Box<dyn Generator>,
    ) -> Result<(), ControllerError> {
        self.attach_generator(generator)?;
        self.hal.debug_write("[backdrop] Generator module loaded");

        self.render(&RenderOptions::default());

        let weak = Rc::downgrade(self);
        self.hal
            .subscribe_resize(Box::new(move || {
                if let Some(controller) = weak.upgrade() {
                    controller.handle_resize();
                }
            }))
            .map_err(|e| {
                self.hal
                    .error_write(&format!("[backdrop] Resize subscription failed: {}", e));
                ControllerError::Subscribe(e)
            })
    }

    /// Record a failed module load. The controller stays unloaded.
    pub fn on_generator_load_failed(&self, reason: &str) {
        self.hal.error_write(&format!(
            "[backdrop] Failed to load generator module: {}",
            reason
        ));
    }

    /// Resize notification handler
    ///
    /// Schedules one deferred render for the first notification of a burst;
    /// later notifications are absorbed until that render has run.
    pub fn handle_resize(self: &Rc<Self>) {
        if !self.coalescer.notify() {
            return;
        }

        let weak = Rc::downgrade(self);
        let scheduled = self.hal.request_frame(Box::new(move || {
            if let Some(controller) = weak.upgrade() {
                controller.run_deferred_render();
            }
        }));

        if let Err(e) = scheduled {
            self.hal.error_write(&format!(
                "[backdrop] Failed to schedule resize render: {}",
                e
            ));
            // Nothing is outstanding, so the next notification must be able to schedule
            self.coalescer.complete();
        }
    }

    /// Body of the deferred frame callback
    fn run_deferred_render(&self) {
        self.render(&RenderOptions::default());
        self.coalescer.complete();
    }

    /// Render immediately, bypassing the coalescer
    ///
    /// Failures are logged here and reported only through the outcome.
    pub fn render(&self, options: &RenderOptions) -> RenderOutcome {
        match self.try_render(options) {
            Ok(Some(url)) => RenderOutcome::Applied { url },
            Ok(None) => RenderOutcome::Empty,
            Err(RenderError::NotReady) => {
                self.hal
                    .error_write("[backdrop] Generator module is not yet ready");
                RenderOutcome::NotReady
            }
            Err(e) => {
                self.hal
                    .error_write(&format!("[backdrop] Render failed: {}", e));
                RenderOutcome::Failed
            }
        }
    }

    fn try_render(&self, options: &RenderOptions) -> Result<Option<String>, RenderError> {
        let (request, bytes) = {
            let generator = self.generator.borrow();
            let generator = generator.as_deref().ok_or(RenderError::NotReady)?;
            let request = options.resolve(&self.defaults, self.hal.viewport());
            match generator.generate(&request)? {
                Some(bytes) => (request, bytes),
                None => return Ok(None),
            }
        };

        let url = self.hal.create_image_url(&bytes, &self.config.media_type)?;
        if let Err(e) = self.hal.set_background_image(&url) {
            self.hal.revoke_image_url(&url);
            return Err(e.into());
        }
        self.hal.debug_write(&format!(
            "[backdrop] Background applied for {} ({} bytes)",
            request,
            bytes.len()
        ));

        let previous = self.current_url.replace(Some(url.clone()));
        if self.config.revoke_previous {
            if let Some(previous) = previous {
                self.hal.revoke_image_url(&previous);
            }
        }

        Ok(Some(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::RenderRequest;
    use backdrop_hal_mock::MockHal;

    struct FixedGenerator(Option<Vec<u8>>);

    impl Generator for FixedGenerator {
        fn generate(&self, _request: &RenderRequest) -> Result<Option<Vec<u8>>, GeneratorError> {
            Ok(self.0.clone())
        }
    }

    fn controller() -> BackgroundController<MockHal> {
        let hal = MockHal::with_viewport(320, 200);
        hal.set_time(1_234);
        BackgroundController::new(hal, BackgroundConfig::default())
    }

    #[test]
    fn test_new_controller_is_unloaded() {
        let c = controller();
        assert_eq!(c.state(), ControllerState::Unloaded);
        assert_eq!(c.defaults().seed, 1_234);
        assert_eq!(c.defaults().id, "factorio");
        assert_eq!(c.pending_resizes(), 0);
    }

    #[test]
    fn test_attach_transitions_to_ready_once() {
        let c = controller();
        c.attach_generator(Box::new(FixedGenerator(None))).unwrap();
        assert_eq!(c.state(), ControllerState::Ready);

        let err = c
            .attach_generator(Box::new(FixedGenerator(Some(vec![1]))))
            .unwrap_err();
        assert_eq!(err, ControllerError::AlreadyLoaded);
        // The first handle is kept
        assert_eq!(c.render(&RenderOptions::default()), RenderOutcome::Empty);
    }

    #[test]
    fn test_load_failure_stays_unloaded() {
        let c = controller();
        c.on_generator_load_failed("404");
        assert_eq!(c.state(), ControllerState::Unloaded);
        assert!(c.hal().has_log_containing("Failed to load generator module: 404"));
    }

    #[test]
    fn test_render_uses_configured_media_type() {
        let config = BackgroundConfig {
            media_type: "image/png".to_string(),
            ..Default::default()
        };
        let c = BackgroundController::new(MockHal::new(), config);
        c.attach_generator(Box::new(FixedGenerator(Some(vec![9, 9]))))
            .unwrap();

        let RenderOutcome::Applied { url } = c.render(&RenderOptions::default()) else {
            panic!("expected applied render");
        };
        assert_eq!(c.hal().resource_media_type(&url).as_deref(), Some("image/png"));
        assert_eq!(c.current_url(), Some(url));
    }

    #[test]
    fn test_applied_render_logs_request() {
        let c = controller();
        c.attach_generator(Box::new(FixedGenerator(Some(vec![1, 2, 3]))))
            .unwrap();

        c.render(&RenderOptions::default().with_id("demo").with_seed(-3));
        assert!(c
            .hal()
            .has_log_containing("Background applied for 'demo' 320x200 seed -3 (3 bytes)"));
    }

    #[test]
    fn test_style_failure_releases_new_resource() {
        let c = controller();
        c.attach_generator(Box::new(FixedGenerator(Some(vec![1]))))
            .unwrap();
        c.hal().set_fail_style_updates(true);

        assert_eq!(c.render(&RenderOptions::default()), RenderOutcome::Failed);
        assert_eq!(c.hal().live_resource_count(), 0);
        assert_eq!(c.current_url(), None);
        assert!(c.hal().has_log_containing("failed to update background style"));
    }

    #[test]
    fn test_resource_failure_is_logged() {
        let c = controller();
        c.attach_generator(Box::new(FixedGenerator(Some(vec![1]))))
            .unwrap();
        c.hal().set_fail_resource_creation(true);

        assert_eq!(c.render(&RenderOptions::default()), RenderOutcome::Failed);
        assert_eq!(c.hal().background_image(), None);
        assert_eq!(c.hal().error_count(), 1);
    }
}
