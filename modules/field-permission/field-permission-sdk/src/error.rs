//! Error types for field permission checks.
//!
//! Only [`PermissionDenied`] is an expected outcome; the permission extension turns
//! it into a field-level "no permission" error. Everything else is a defect or an
//! upstream failure and propagates unchanged.

use field_guard_security::PrincipalLoadError;
use thiserror::Error;

/// The principal is not allowed to resolve the field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{}", .message.as_deref().unwrap_or("permission denied"))]
pub struct PermissionDenied {
    message: Option<String>,
}

impl PermissionDenied {
    /// Denial without a message; the extension supplies its default.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// A model, role set or case switcher is declared incorrectly.
///
/// Never converted into a denial: "not configured" and "not permitted" must stay
/// distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("CREATE_ALLOWED_ROLES not implemented for {model}")]
    MissingCreateAllowedRoles { model: String },

    #[error("no handler registered for case '{case}' in {switcher}")]
    MissingCaseHandler {
        switcher: &'static str,
        case: &'static str,
    },

    #[error("handler for case '{case}' registered more than once in {switcher}")]
    DuplicateCaseHandler {
        switcher: &'static str,
        case: &'static str,
    },

    #[error("no model registered for type '{type_name}'")]
    UnknownType { type_name: String },
}

/// Errors from the object lookup backend.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The backend is not reachable right now.
    #[error("lookup backend unavailable: {0}")]
    Unavailable(String),

    #[error("internal lookup error: {0}")]
    Internal(String),
}

/// Error from a permission strategy.
#[derive(Debug, Error)]
pub enum PermissionError {
    #[error(transparent)]
    Denied(#[from] PermissionDenied),

    #[error("permission configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("failed to load principal: {0}")]
    PrincipalLoad(#[from] PrincipalLoadError),

    #[error("object lookup failed for model '{model}': {source}")]
    Lookup {
        model: String,
        #[source]
        source: LookupError,
    },
}

impl PermissionError {
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }
}

/// Outcome of a protected field that did not produce a value.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Field-level "no permission" error shown to the client.
    #[error("{message}")]
    NoPermission { message: String },

    /// Configuration or upstream failure; surfaces as a server error.
    #[error(transparent)]
    Failed(#[from] PermissionError),
}
