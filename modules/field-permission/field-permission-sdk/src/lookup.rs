//! Outbound contracts used by the interaction check: resolving a reference to
//! its model, and fetching model instances in batches.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::arguments::ReferenceId;
use crate::error::{ConfigurationError, LookupError};
use crate::model::ModelType;

/// Batched fetch of model instances by id.
///
/// One call is made per model referenced by a field. Ids arrive de-duplicated
/// in encounter order; implementations may return objects in any order and may
/// omit ids that do not exist.
#[async_trait]
pub trait ObjectLookup<O: Send + 'static>: Send + Sync {
    /// Fetch without suspending.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when the backend fails.
    fn fetch_blocking(&self, model: &str, ids: &[String]) -> Result<Vec<O>, LookupError>;

    /// Fetch, yielding while the backend is busy. Defaults to the blocking form.
    ///
    /// # Errors
    ///
    /// Returns a [`LookupError`] when the backend fails.
    async fn fetch(&self, model: &str, ids: &[String]) -> Result<Vec<O>, LookupError> {
        self.fetch_blocking(model, ids)
    }
}

/// Maps a reference id to the name of the model it points at.
pub trait TypeResolver: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnknownType`] for type names with no model.
    fn model_for(&self, reference: &ReferenceId) -> Result<String, ConfigurationError>;
}

/// [`TypeResolver`] backed by a fixed table of type name to model name.
#[derive(Debug, Clone, Default)]
pub struct StaticTypeResolver {
    types: HashMap<String, String>,
}

impl StaticTypeResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, type_name: impl Into<String>, model: impl Into<String>) -> Self {
        self.types.insert(type_name.into(), model.into());
        self
    }

    /// Map `type_name` to the model declared by `M`.
    #[must_use]
    pub fn with_model<M: ModelType>(self, type_name: impl Into<String>) -> Self {
        self.with_type(type_name, M::NAME)
    }
}

impl TypeResolver for StaticTypeResolver {
    fn model_for(&self, reference: &ReferenceId) -> Result<String, ConfigurationError> {
        self.types
            .get(reference.type_name())
            .cloned()
            .ok_or_else(|| ConfigurationError::UnknownType {
                type_name: reference.type_name().to_owned(),
            })
    }
}
