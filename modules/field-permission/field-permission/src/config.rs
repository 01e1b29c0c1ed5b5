//! Configuration for the field permission extension.
//!
//! Sources are layered in this order, later ones winning:
//! built-in defaults, a YAML file, then `FIELD_PERMISSION__*` environment
//! variables (`FIELD_PERMISSION__CREATE__MESSAGE` sets `create.message`).
//!
//! ```yaml
//! create:
//!   message: "Only widget owners may create widgets"
//! interact:
//!   directive_description: "Restricted to the widget's owner"
//! ```

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment variable prefix; nested keys are separated by `__`.
pub const ENV_PREFIX: &str = "FIELD_PERMISSION__";

/// Overrides for a single permission strategy. Unset fields keep the
/// strategy's built-in text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionConfig {
    /// Message returned to the client when the check denies access.
    pub message: Option<String>,
    /// Description attached to the schema directive of guarded fields.
    pub directive_description: Option<String>,
}

/// Configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldPermissionConfig {
    pub create: ExtensionConfig,
    pub interact: ExtensionConfig,
}

/// The configuration sources could not be read or did not match the schema.
#[derive(Debug, thiserror::Error)]
#[error("invalid field permission configuration: {0}")]
pub struct ConfigError(#[source] Box<figment::Error>);

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self(Box::new(err))
    }
}

impl FieldPermissionConfig {
    /// Load defaults, then `path`, then the environment.
    ///
    /// A missing file contributes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is not valid YAML or a source sets an
    /// unknown key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::defaults()
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Parse an embedded YAML document on top of the defaults. The environment
    /// is not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the document is not valid YAML or sets an
    /// unknown key.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Self::defaults()
            .merge(Yaml::string(yaml))
            .extract()
            .map_err(ConfigError::from)
    }

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
    }
}
