//! Render parameters and default resolution

use std::fmt;

use backdrop_hal::Viewport;

/// Caller-supplied render parameters; unset fields fall back to `RenderDefaults`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Background identifier. `None` and `Some("")` both mean "use the default".
    pub id: Option<String>,
    /// Generator seed. `None` means "use the startup seed".
    pub seed: Option<i64>,
}

impl RenderOptions {
    pub fn new(id: Option<String>, seed: Option<i64>) -> Self {
        Self { id, seed }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve against the process defaults and the live viewport
    pub fn resolve(&self, defaults: &RenderDefaults, viewport: Viewport) -> RenderRequest {
        let id = match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => defaults.id.clone(),
        };
        RenderRequest {
            id,
            width: viewport.width,
            height: viewport.height,
            seed: self.seed.unwrap_or(defaults.seed),
        }
    }
}

/// Values fixed once per process
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderDefaults {
    pub id: String,
    /// Wall-clock milliseconds captured when the controller was created
    pub seed: i64,
}

/// Fully resolved arguments for one generator call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub seed: i64,
}

impl fmt::Display for RenderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' {}x{} seed {}",
            self.id, self.width, self.height, self.seed
        )
    }
}
