//! Controller configuration
//!
//! Every field is optional in serialized form; missing fields take the
//! defaults below.

use serde::Deserialize;
use thiserror::Error;

/// Background identifier used when a render names none
pub const DEFAULT_BACKGROUND_ID: &str = "factorio";

/// Media type declared on generated image resources
pub const DEFAULT_MEDIA_TYPE: &str = "image/bmp";

/// Generator module location, relative to the document base URI
pub const DEFAULT_MODULE_PATH: &str = "./pkg/index.js";

/// Generator function exported by the module
pub const DEFAULT_GENERATOR_EXPORT: &str = "gen_background";

/// Property installed on `window` for manual renders
pub const DEFAULT_GLOBAL_BINDING: &str = "init_background";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config field `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Background controller configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackgroundConfig {
    /// Identifier used when a render passes none (or an empty one)
    pub default_id: String,
    /// Media type for the image resource wrapping generator output
    pub media_type: String,
    /// Where to import the generator module from
    pub module_path: String,
    /// Name of the generator function on the imported module
    pub generator_export: String,
    /// Name of the global render binding
    pub global_binding: String,
    /// Release the previous resource locator once a new one is displayed
    pub revoke_previous: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            default_id: DEFAULT_BACKGROUND_ID.to_string(),
            media_type: DEFAULT_MEDIA_TYPE.to_string(),
            module_path: DEFAULT_MODULE_PATH.to_string(),
            generator_export: DEFAULT_GENERATOR_EXPORT.to_string(),
            global_binding: DEFAULT_GLOBAL_BINDING.to_string(),
            revoke_previous: true,
        }
    }
}

impl BackgroundConfig {
    /// Parse and validate a JSON config object
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants the controller relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_id.is_empty() {
            return Err(ConfigError::Invalid {
                field: "default_id",
                reason: "must not be empty",
            });
        }
        if !self.media_type.starts_with("image/") {
            return Err(ConfigError::Invalid {
                field: "media_type",
                reason: "must be an image media type",
            });
        }
        if self.module_path.is_empty() {
            return Err(ConfigError::Invalid {
                field: "module_path",
                reason: "must not be empty",
            });
        }
        if self.generator_export.is_empty() {
            return Err(ConfigError::Invalid {
                field: "generator_export",
                reason: "must not be empty",
            });
        }
        if self.global_binding.is_empty() {
            return Err(ConfigError::Invalid {
                field: "global_binding",
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BackgroundConfig::default();
        assert_eq!(config.default_id, "factorio");
        assert_eq!(config.media_type, "image/bmp");
        assert_eq!(config.generator_export, "gen_background");
        assert_eq!(config.global_binding, "init_background");
        assert!(config.revoke_previous);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_default() {
        let config = BackgroundConfig::from_json("{}").unwrap();
        assert_eq!(config, BackgroundConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config =
            BackgroundConfig::from_json(r#"{"default_id":"mist","revoke_previous":false}"#)
                .unwrap();
        assert_eq!(config.default_id, "mist");
        assert!(!config.revoke_previous);
        assert_eq!(config.media_type, DEFAULT_MEDIA_TYPE);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = BackgroundConfig::from_json(r#"{"defaultId":"mist"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_non_image_media_type_rejected() {
        let err = BackgroundConfig::from_json(r#"{"media_type":"text/plain"}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "media_type",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_default_id_rejected() {
        let err = BackgroundConfig::from_json(r#"{"default_id":""}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config field `default_id`: must not be empty"
        );
    }
}
