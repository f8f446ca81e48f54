//! Backdrop background refresh controller
//!
//! Platform-independent core of the page background loader. The controller
//! asks an external generator for image bytes, hands them to the platform as
//! an image resource and sets that resource as the page background. Resize
//! bursts are coalesced into one render per display refresh.
//!
//! ## Module Structure
//!
//! - `config` - Serde-backed controller configuration
//! - `request` - Render options and default resolution
//! - `generator` - External generator contract
//! - `coalesce` - Resize burst coalescing counter
//! - `controller` - The `Unloaded -> Ready` controller itself
//!
//! All platform services come through the `backdrop_hal::HAL` trait, so the
//! whole controller runs natively against `backdrop-hal-mock` in tests.

pub mod coalesce;
pub mod config;
pub mod controller;
pub mod generator;
pub mod request;

pub use backdrop_hal::{HalError, Viewport, HAL};
pub use coalesce::ResizeCoalescer;
pub use config::{BackgroundConfig, ConfigError, DEFAULT_BACKGROUND_ID, DEFAULT_MEDIA_TYPE};
pub use controller::{
    BackgroundController, ControllerError, ControllerState, RenderError, RenderOutcome,
};
pub use generator::{Generator, GeneratorError};
pub use request::{RenderDefaults, RenderOptions, RenderRequest};
