//! Field interception: run a permission strategy before the resolver.
//!
//! The host wires [`PermissionExtension`] around each guarded resolver. Both
//! entry points follow the same sequence: load the principal, run the strategy,
//! then call the resolver exactly once if nothing failed.
//!
//! ```ignore
//! let strategy = HasPermissionToCreate::for_model::<Widget>();
//! let extension = PermissionExtension::new(Arc::new(strategy));
//!
//! let widget = extension
//!     .resolve_async(|| create_widget(&db, &input), &request, "createWidget", &args)
//!     .await?;
//! ```

use std::future::Future;
use std::sync::Arc;

use field_guard_security::RequestContext;
use field_permission_sdk::{
    Arguments, FieldContext, FieldError, PermissionContext, PermissionDenied, PermissionError,
    PermissionStrategy,
};

use crate::config::ExtensionConfig;

pub struct PermissionExtension {
    strategy: Arc<dyn PermissionStrategy>,
    config: ExtensionConfig,
}

impl PermissionExtension {
    #[must_use]
    pub fn new(strategy: Arc<dyn PermissionStrategy>) -> Self {
        Self {
            strategy,
            config: ExtensionConfig::default(),
        }
    }

    /// Override the strategy's denial message and directive description.
    #[must_use]
    pub fn with_config(mut self, config: ExtensionConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn strategy(&self) -> &dyn PermissionStrategy {
        self.strategy.as_ref()
    }

    /// Message used when a denial carries none.
    #[must_use]
    pub fn message(&self) -> &str {
        self.config
            .message
            .as_deref()
            .unwrap_or_else(|| self.strategy.message())
    }

    /// Description for the schema directive of the guarded field.
    #[must_use]
    pub fn directive_description(&self) -> &str {
        self.config
            .directive_description
            .as_deref()
            .unwrap_or_else(|| self.strategy.directive_description())
    }

    /// Turn a denial into the field-level error returned to the client.
    #[must_use]
    pub fn handle_no_permission(&self, denial: &PermissionDenied) -> FieldError {
        FieldError::NoPermission {
            message: denial.message().unwrap_or_else(|| self.message()).to_owned(),
        }
    }

    /// Check permission, then call `next` and return its value unchanged.
    ///
    /// # Errors
    ///
    /// - [`FieldError::NoPermission`] when the strategy denies; `next` is not called
    /// - [`FieldError::Failed`] when the principal cannot be loaded or the strategy
    ///   fails for any other reason
    #[tracing::instrument(skip_all, fields(strategy = self.strategy.name(), field = field_name))]
    pub fn resolve<R, F>(
        &self,
        next: F,
        request: &RequestContext,
        field_name: &str,
        arguments: &Arguments,
    ) -> Result<R, FieldError>
    where
        F: FnOnce() -> R,
    {
        let ctx = PermissionContext::load_blocking(request)
            .map_err(|e| self.log_and_convert(e.into()))?;
        let field = FieldContext::new(field_name, arguments);

        self.strategy
            .check_for_user(&ctx, &field)
            .map_err(|e| self.log_and_convert(e))?;

        Ok(next())
    }

    /// Suspending form of [`PermissionExtension::resolve`]. The principal load
    /// and the strategy check are awaited before `next` is invoked.
    ///
    /// # Errors
    ///
    /// Same as [`PermissionExtension::resolve`].
    #[tracing::instrument(skip_all, fields(strategy = self.strategy.name(), field = field_name))]
    pub async fn resolve_async<R, F, Fut>(
        &self,
        next: F,
        request: &RequestContext,
        field_name: &str,
        arguments: &Arguments,
    ) -> Result<R, FieldError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = R>,
    {
        let ctx = PermissionContext::load(request)
            .await
            .map_err(|e| self.log_and_convert(e.into()))?;
        let field = FieldContext::new(field_name, arguments);

        self.strategy
            .check_for_user_async(&ctx, &field)
            .await
            .map_err(|e| self.log_and_convert(e))?;

        Ok(next().await)
    }

    fn log_and_convert(&self, err: PermissionError) -> FieldError {
        match err {
            PermissionError::Denied(denial) => {
                tracing::debug!(reason = %denial, "field access denied");
                self.handle_no_permission(&denial)
            }
            PermissionError::Configuration(ref e) => {
                tracing::error!(error = %e, "permission misconfigured");
                FieldError::Failed(err)
            }
            PermissionError::PrincipalLoad(_) | PermissionError::Lookup { .. } => {
                tracing::error!(error = %err, "permission check failed");
                FieldError::Failed(err)
            }
        }
    }
}

impl std::fmt::Debug for PermissionExtension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermissionExtension")
            .field("strategy", &self.strategy.name())
            .field("config", &self.config)
            .finish()
    }
}
