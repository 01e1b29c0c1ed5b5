//! Model declarations consumed by the creation check.

use crate::roles::AllowedRoles;

/// A creatable model type.
///
/// Every model guarded by a creation check must override
/// [`ModelType::create_allowed_roles`]. Leaving the default in place is a
/// configuration error reported when the check runs, not a denial.
///
/// ```ignore
/// struct Widget;
///
/// impl ModelType for Widget {
///     const NAME: &'static str = "Widget";
///
///     fn create_allowed_roles() -> Option<AllowedRoles> {
///         Some(AllowedRoles::new().with(IsOwner))
///     }
/// }
/// ```
pub trait ModelType {
    /// Model name used for lookups and diagnostics.
    const NAME: &'static str;

    /// Roles allowed to create instances of this model.
    #[must_use]
    fn create_allowed_roles() -> Option<AllowedRoles> {
        None
    }
}

/// Object-safe snapshot of a model declaration.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    name: String,
    create_allowed_roles: Option<AllowedRoles>,
}

impl ModelDescriptor {
    /// Descriptor for a model declared without any allowed roles.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            create_allowed_roles: None,
        }
    }

    #[must_use]
    pub fn of<M: ModelType>() -> Self {
        Self {
            name: M::NAME.to_owned(),
            create_allowed_roles: M::create_allowed_roles(),
        }
    }

    #[must_use]
    pub fn with_create_allowed_roles(mut self, roles: AllowedRoles) -> Self {
        self.create_allowed_roles = Some(roles);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn create_allowed_roles(&self) -> Option<&AllowedRoles> {
        self.create_allowed_roles.as_ref()
    }
}
