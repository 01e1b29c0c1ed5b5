//! Borrowed views handed to roles, case handlers and strategies.

use field_guard_security::{Principal, PrincipalLoadError, RequestContext};

use crate::arguments::Arguments;

/// Request context with a principal that is guaranteed to be loaded.
///
/// The extension builds it with [`PermissionContext::load`] or
/// [`PermissionContext::load_blocking`], which resolve the principal first.
/// [`PermissionContext::new`] takes a principal the caller already holds.
#[derive(Debug, Clone, Copy)]
pub struct PermissionContext<'a> {
    request: &'a RequestContext,
    principal: &'a Principal,
}

impl<'a> PermissionContext<'a> {
    #[must_use]
    pub fn new(request: &'a RequestContext, principal: &'a Principal) -> Self {
        Self { request, principal }
    }

    /// Load the request principal, suspending while the loader runs.
    ///
    /// # Errors
    ///
    /// Propagates the principal loader's error.
    pub async fn load(request: &'a RequestContext) -> Result<Self, PrincipalLoadError> {
        let principal = request.principal().ensure_loaded().await?;
        Ok(Self::new(request, principal))
    }

    /// Load the request principal without suspending.
    ///
    /// # Errors
    ///
    /// Propagates the principal loader's error.
    pub fn load_blocking(request: &'a RequestContext) -> Result<Self, PrincipalLoadError> {
        let principal = request.principal().ensure_loaded_blocking()?;
        Ok(Self::new(request, principal))
    }

    #[must_use]
    pub fn request(&self) -> &'a RequestContext {
        self.request
    }

    #[must_use]
    pub fn principal(&self) -> &'a Principal {
        self.principal
    }
}

/// The field being resolved.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    field_name: &'a str,
    arguments: &'a Arguments,
}

impl<'a> FieldContext<'a> {
    #[must_use]
    pub fn new(field_name: &'a str, arguments: &'a Arguments) -> Self {
        Self {
            field_name,
            arguments,
        }
    }

    #[must_use]
    pub fn field_name(&self) -> &'a str {
        self.field_name
    }

    #[must_use]
    pub fn arguments(&self) -> &'a Arguments {
        self.arguments
    }
}
