//! Per-object permission dispatch.
//!
//! A [`CaseResolver`] decides which case applies to a `(context, object)` pair;
//! the [`PermissionCaseSwitcher`] then runs the handler registered for that case.
//! Cases are a closed enum ([`CaseKey`]) and the handler table is checked when the
//! switcher is built, so a forgotten handler fails at schema setup instead of on
//! the first request that hits it.
//!
//! ```ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum WidgetCase { Owner, Shared }
//!
//! impl CaseKey for WidgetCase {
//!     const ALL: &'static [Self] = &[Self::Owner, Self::Shared];
//!     fn name(self) -> &'static str {
//!         match self { Self::Owner => "owner", Self::Shared => "shared" }
//!     }
//! }
//!
//! let switcher = PermissionCaseSwitcher::builder(WidgetCases)
//!     .case(WidgetCase::Owner, |input| {
//!         input.instance.owner_id == input.context.principal().subject_id()
//!     })
//!     .case(WidgetCase::Shared, |input| input.instance.shared)
//!     .build()?;
//! ```

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use crate::context::PermissionContext;
use crate::error::ConfigurationError;

/// Discriminator selecting which handler answers the permission question.
pub trait CaseKey: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every variant. The switcher requires a handler for each.
    const ALL: &'static [Self];

    fn name(self) -> &'static str;
}

/// Resolves the case that applies to an object for the current request.
pub trait CaseResolver<O>: Send + Sync {
    type Case: CaseKey;

    fn resolve_case(&self, ctx: &PermissionContext<'_>, instance: &O) -> Self::Case;
}

/// Everything a case handler gets to look at.
pub struct CaseInput<'a, C, O> {
    pub context: &'a PermissionContext<'a>,
    pub instance: &'a O,
    pub case: C,
}

pub type CaseHandler<C, O> = Box<dyn Fn(&CaseInput<'_, C, O>) -> bool + Send + Sync>;

/// Object-level permission check used by the interaction strategy.
pub trait ObjectPermission<O>: Send + Sync {
    /// Decide whether the principal may interact with `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingCaseHandler`] when the resolved
    /// case has no handler.
    fn check_obj_permissions(
        &self,
        ctx: &PermissionContext<'_>,
        instance: &O,
    ) -> Result<bool, ConfigurationError>;
}

pub struct PermissionCaseSwitcher<R, O>
where
    R: CaseResolver<O>,
{
    resolver: R,
    handlers: HashMap<R::Case, CaseHandler<R::Case, O>>,
}

impl<R, O> PermissionCaseSwitcher<R, O>
where
    R: CaseResolver<O>,
{
    #[must_use]
    pub fn builder(resolver: R) -> CaseSwitcherBuilder<R, O> {
        CaseSwitcherBuilder {
            resolver,
            handlers: HashMap::new(),
            duplicates: Vec::new(),
        }
    }

    /// Run the handler registered for `input.case`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingCaseHandler`] if no handler is
    /// registered for the case.
    pub fn switch(&self, input: &CaseInput<'_, R::Case, O>) -> Result<bool, ConfigurationError> {
        let handler = self.handlers.get(&input.case).ok_or_else(|| {
            ConfigurationError::MissingCaseHandler {
                switcher: std::any::type_name::<R>(),
                case: input.case.name(),
            }
        })?;
        Ok(handler(input))
    }
}

impl<R, O> ObjectPermission<O> for PermissionCaseSwitcher<R, O>
where
    R: CaseResolver<O>,
{
    fn check_obj_permissions(
        &self,
        ctx: &PermissionContext<'_>,
        instance: &O,
    ) -> Result<bool, ConfigurationError> {
        let case = self.resolver.resolve_case(ctx, instance);
        let allowed = self.switch(&CaseInput {
            context: ctx,
            instance,
            case,
        })?;
        tracing::trace!(case = case.name(), allowed, "object permission case evaluated");
        Ok(allowed)
    }
}

impl<R, O> fmt::Debug for PermissionCaseSwitcher<R, O>
where
    R: CaseResolver<O>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionCaseSwitcher")
            .field("resolver", &std::any::type_name::<R>())
            .field("cases", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub struct CaseSwitcherBuilder<R, O>
where
    R: CaseResolver<O>,
{
    resolver: R,
    handlers: HashMap<R::Case, CaseHandler<R::Case, O>>,
    duplicates: Vec<R::Case>,
}

impl<R, O> CaseSwitcherBuilder<R, O>
where
    R: CaseResolver<O>,
{
    /// Register the handler for `case`.
    #[must_use]
    pub fn case<F>(mut self, case: R::Case, handler: F) -> Self
    where
        F: Fn(&CaseInput<'_, R::Case, O>) -> bool + Send + Sync + 'static,
    {
        if self.handlers.insert(case, Box::new(handler)).is_some() {
            self.duplicates.push(case);
        }
        self
    }

    /// Finish registration.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError::DuplicateCaseHandler`] if a case was registered twice
    /// - [`ConfigurationError::MissingCaseHandler`] if any variant of the case enum
    ///   has no handler
    pub fn build(self) -> Result<PermissionCaseSwitcher<R, O>, ConfigurationError> {
        let switcher = std::any::type_name::<R>();

        if let Some(case) = self.duplicates.first() {
            return Err(ConfigurationError::DuplicateCaseHandler {
                switcher,
                case: case.name(),
            });
        }

        if let Some(case) = R::Case::ALL
            .iter()
            .find(|case| !self.handlers.contains_key(*case))
        {
            return Err(ConfigurationError::MissingCaseHandler {
                switcher,
                case: case.name(),
            });
        }

        Ok(PermissionCaseSwitcher {
            resolver: self.resolver,
            handlers: self.handlers,
        })
    }
}
