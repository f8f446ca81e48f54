//! External generator contract

use thiserror::Error;

use crate::request::RenderRequest;

/// Generator errors
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// The generator raised instead of returning
    #[error("generator threw: {0}")]
    Threw(String),
    /// The generator returned something that is neither bytes nor empty
    #[error("generator returned unusable output: {0}")]
    InvalidOutput(String),
}

/// Turns a render request into encoded image bytes
///
/// `Ok(None)` is the defined "nothing produced" result and is not an error.
pub trait Generator {
    fn generate(&self, request: &RenderRequest) -> Result<Option<Vec<u8>>, GeneratorError>;
}
