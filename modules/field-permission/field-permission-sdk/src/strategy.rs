//! Strategy API consumed by the permission extension.

use async_trait::async_trait;

use crate::context::{FieldContext, PermissionContext};
use crate::error::PermissionError;

/// A permission rule the extension runs before a field resolver.
///
/// Strategies are built once at schema definition time and shared by every
/// request, so they must not keep per-request state.
///
/// ```ignore
/// let strategy: Arc<dyn PermissionStrategy> =
///     Arc::new(HasPermissionToCreate::for_model::<Widget>());
/// let extension = PermissionExtension::new(strategy);
/// ```
#[async_trait]
pub trait PermissionStrategy: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Message shown to the client when a denial carries none.
    fn message(&self) -> &str;

    /// Text attached to the field's schema directive.
    fn directive_description(&self) -> &str;

    /// Check the principal against the field without suspending.
    ///
    /// # Errors
    ///
    /// - [`PermissionError::Denied`] if the principal may not resolve the field
    /// - [`PermissionError::Configuration`] if the guarded model is misdeclared
    /// - [`PermissionError::Lookup`] if fetching the referenced objects fails
    fn check_for_user(
        &self,
        ctx: &PermissionContext<'_>,
        field: &FieldContext<'_>,
    ) -> Result<(), PermissionError>;

    /// Suspending form of [`PermissionStrategy::check_for_user`].
    ///
    /// Defaults to the blocking form; strategies that do I/O override it.
    ///
    /// # Errors
    ///
    /// Same as [`PermissionStrategy::check_for_user`].
    async fn check_for_user_async(
        &self,
        ctx: &PermissionContext<'_>,
        field: &FieldContext<'_>,
    ) -> Result<(), PermissionError> {
        self.check_for_user(ctx, field)
    }
}
