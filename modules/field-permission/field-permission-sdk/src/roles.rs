//! Roles: stateless permission predicates evaluated against the request.
//!
//! A role is a plain value implementing [`Role`]. Models attach an ordered
//! [`AllowedRoles`] list; access is granted when any role in the list grants it.
//!
//! ```ignore
//! struct IsOwner;
//!
//! impl Role for IsOwner {
//!     fn has_permission(&self, ctx: &PermissionContext<'_>) -> bool {
//!         ctx.principal().has_role("owner")
//!     }
//! }
//!
//! let roles = AllowedRoles::new().with(IsOwner).with(IsAuthenticated);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::context::PermissionContext;

/// A named permission predicate.
///
/// Implementations must not hold per-request state: one instance serves every
/// concurrent request.
pub trait Role: Send + Sync {
    /// Name used in logs. Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Whether the request's principal holds this role.
    fn has_permission(&self, ctx: &PermissionContext<'_>) -> bool;
}

/// Grants everyone, including anonymous principals.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAny;

impl Role for AllowAny {
    fn name(&self) -> &str {
        "AllowAny"
    }

    fn has_permission(&self, _ctx: &PermissionContext<'_>) -> bool {
        true
    }
}

/// Grants any authenticated principal.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsAuthenticated;

impl Role for IsAuthenticated {
    fn name(&self) -> &str {
        "IsAuthenticated"
    }

    fn has_permission(&self, ctx: &PermissionContext<'_>) -> bool {
        ctx.principal().is_authenticated()
    }
}

/// Grants principals that were assigned the named role.
#[derive(Debug, Clone)]
pub struct HasRole {
    role: String,
}

impl HasRole {
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

impl Role for HasRole {
    fn name(&self) -> &str {
        &self.role
    }

    fn has_permission(&self, ctx: &PermissionContext<'_>) -> bool {
        ctx.principal().has_role(&self.role)
    }
}

/// Ordered list of roles allowed to perform an action on a model.
#[derive(Clone, Default)]
pub struct AllowedRoles {
    roles: Vec<Arc<dyn Role>>,
}

impl AllowedRoles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, role: impl Role + 'static) -> Self {
        self.roles.push(Arc::new(role));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Role> {
        self.roles.iter().map(AsRef::as_ref)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Name of the first role that grants permission, if any.
    ///
    /// Stops at the first grant; an empty list never grants.
    #[must_use]
    pub fn first_granting(&self, ctx: &PermissionContext<'_>) -> Option<&str> {
        self.iter()
            .find(|role| role.has_permission(ctx))
            .map(Role::name)
    }

    #[must_use]
    pub fn any_grants(&self, ctx: &PermissionContext<'_>) -> bool {
        self.first_granting(ctx).is_some()
    }
}

impl fmt::Debug for AllowedRoles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.roles.iter().map(|r| r.name()))
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use field_guard_security::{Principal, RequestContext};
    use uuid::Uuid;

    use super::*;

    struct Never;

    impl Role for Never {
        fn has_permission(&self, _ctx: &PermissionContext<'_>) -> bool {
            false
        }
    }

    struct Counting(Arc<AtomicUsize>, bool);

    impl Role for Counting {
        fn has_permission(&self, _ctx: &PermissionContext<'_>) -> bool {
            self.0.fetch_add(1, Ordering::SeqCst);
            self.1
        }
    }

    fn owner() -> Principal {
        Principal::builder()
            .subject_id(Uuid::from_u128(1))
            .role("owner")
            .build()
    }

    #[test]
    fn builtin_roles() {
        let request = RequestContext::anonymous();
        let anonymous = Principal::anonymous();
        let owner = owner();
        let anon_ctx = PermissionContext::new(&request, &anonymous);
        let owner_ctx = PermissionContext::new(&request, &owner);

        assert!(AllowAny.has_permission(&anon_ctx));
        assert!(!IsAuthenticated.has_permission(&anon_ctx));
        assert!(IsAuthenticated.has_permission(&owner_ctx));
        assert!(HasRole::new("owner").has_permission(&owner_ctx));
        assert!(!HasRole::new("admin").has_permission(&owner_ctx));
    }

    #[test]
    fn default_name_is_type_name() {
        assert!(Never.name().ends_with("Never"));
        assert_eq!(HasRole::new("owner").name(), "owner");
    }

    #[test]
    fn any_grants_is_or_over_roles() {
        let request = RequestContext::anonymous();
        let principal = owner();
        let ctx = PermissionContext::new(&request, &principal);

        assert!(!AllowedRoles::new().any_grants(&ctx));
        assert!(!AllowedRoles::new().with(Never).any_grants(&ctx));
        assert!(
            AllowedRoles::new()
                .with(Never)
                .with(HasRole::new("owner"))
                .any_grants(&ctx)
        );
        assert_eq!(
            AllowedRoles::new()
                .with(Never)
                .with(HasRole::new("owner"))
                .first_granting(&ctx),
            Some("owner")
        );
    }

    #[test]
    fn any_grants_short_circuits() {
        let request = RequestContext::anonymous();
        let principal = owner();
        let ctx = PermissionContext::new(&request, &principal);
        let calls = Arc::new(AtomicUsize::new(0));

        let roles = AllowedRoles::new()
            .with(Counting(calls.clone(), true))
            .with(Counting(calls.clone(), true));

        assert!(roles.any_grants(&ctx));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn debug_lists_role_names() {
        let roles = AllowedRoles::new().with(AllowAny).with(HasRole::new("owner"));
        assert_eq!(format!("{roles:?}"), r#"["AllowAny", "owner"]"#);
        assert_eq!(roles.len(), 2);
    }
}
