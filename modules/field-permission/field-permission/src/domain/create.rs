//! Creation check: may the principal create an instance of a model?

use field_permission_sdk::{
    ConfigurationError, FieldContext, ModelDescriptor, ModelType, PermissionContext,
    PermissionDenied, PermissionError, PermissionStrategy,
};

use crate::config::ExtensionConfig;

pub const DEFAULT_ERROR_MESSAGE: &str = "You are not authorized to create this object";
pub const SCHEMA_DIRECTIVE_DESCRIPTION: &str =
    "Can only create objects that the user has permission to create";

/// Whether any of the model's allowed roles grants creation.
///
/// Roles are tried in declaration order and the first grant wins.
///
/// # Errors
///
/// Returns [`ConfigurationError::MissingCreateAllowedRoles`] if the model never
/// declared its allowed roles. An empty declaration is valid and denies everyone.
pub fn has_permission_to_create(
    model: &ModelDescriptor,
    ctx: &PermissionContext<'_>,
) -> Result<bool, ConfigurationError> {
    let roles = model
        .create_allowed_roles()
        .ok_or_else(|| ConfigurationError::MissingCreateAllowedRoles {
            model: model.name().to_owned(),
        })?;

    match roles.first_granting(ctx) {
        Some(role) => {
            tracing::debug!(model = model.name(), role, "create granted");
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Strategy guarding mutations that create a model instance.
///
/// Denials carry no message; the extension fills in its override or
/// [`PermissionStrategy::message`].
#[derive(Debug, Clone)]
pub struct HasPermissionToCreate {
    model: ModelDescriptor,
    message: String,
    directive_description: String,
}

impl HasPermissionToCreate {
    #[must_use]
    pub fn new(model: ModelDescriptor) -> Self {
        Self {
            model,
            message: DEFAULT_ERROR_MESSAGE.to_owned(),
            directive_description: SCHEMA_DIRECTIVE_DESCRIPTION.to_owned(),
        }
    }

    #[must_use]
    pub fn for_model<M: ModelType>() -> Self {
        Self::new(ModelDescriptor::of::<M>())
    }

    /// Apply message and directive overrides; unset fields keep the defaults.
    #[must_use]
    pub fn with_config(mut self, config: &ExtensionConfig) -> Self {
        if let Some(message) = &config.message {
            self.message.clone_from(message);
        }
        if let Some(description) = &config.directive_description {
            self.directive_description.clone_from(description);
        }
        self
    }

    #[must_use]
    pub fn model(&self) -> &ModelDescriptor {
        &self.model
    }
}

impl PermissionStrategy for HasPermissionToCreate {
    fn name(&self) -> &str {
        "HasPermissionToCreate"
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn directive_description(&self) -> &str {
        &self.directive_description
    }

    #[tracing::instrument(skip_all, fields(model = self.model.name(), field = field.field_name()))]
    fn check_for_user(
        &self,
        ctx: &PermissionContext<'_>,
        field: &FieldContext<'_>,
    ) -> Result<(), PermissionError> {
        if has_permission_to_create(&self.model, ctx)? {
            Ok(())
        } else {
            tracing::debug!("no allowed role granted create");
            Err(PermissionDenied::empty().into())
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use field_guard_security::{Principal, RequestContext};
    use field_permission_sdk::{AllowedRoles, Arguments, HasRole, IsAuthenticated, Role};
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;

    struct Widget;

    impl ModelType for Widget {
        const NAME: &'static str = "Widget";

        fn create_allowed_roles() -> Option<AllowedRoles> {
            Some(AllowedRoles::new().with(HasRole::new("owner")))
        }
    }

    struct Undeclared;

    impl ModelType for Undeclared {
        const NAME: &'static str = "Undeclared";
    }

    struct Deny;

    impl Role for Deny {
        fn has_permission(&self, _ctx: &PermissionContext<'_>) -> bool {
            false
        }
    }

    fn member(role: &str) -> Principal {
        Principal::builder()
            .subject_id(Uuid::from_u128(3))
            .role(role)
            .build()
    }

    #[test]
    fn granted_when_any_role_grants() {
        let request = RequestContext::anonymous();
        let principal = member("viewer");
        let ctx = PermissionContext::new(&request, &principal);

        let model = ModelDescriptor::new("Widget")
            .with_create_allowed_roles(AllowedRoles::new().with(Deny).with(IsAuthenticated));
        assert!(has_permission_to_create(&model, &ctx).unwrap());

        let model = ModelDescriptor::new("Widget")
            .with_create_allowed_roles(AllowedRoles::new().with(Deny).with(Deny));
        assert!(!has_permission_to_create(&model, &ctx).unwrap());
    }

    #[test]
    fn empty_roles_deny() {
        let request = RequestContext::anonymous();
        let principal = member("owner");
        let ctx = PermissionContext::new(&request, &principal);
        let model = ModelDescriptor::new("Locked").with_create_allowed_roles(AllowedRoles::new());

        assert!(!has_permission_to_create(&model, &ctx).unwrap());
    }

    #[test]
    fn missing_roles_is_a_configuration_error() {
        let request = RequestContext::anonymous();
        let principal = member("owner");
        let ctx = PermissionContext::new(&request, &principal);

        let err = has_permission_to_create(&ModelDescriptor::of::<Undeclared>(), &ctx).unwrap_err();
        assert_eq!(
            err.to_string(),
            "CREATE_ALLOWED_ROLES not implemented for Undeclared"
        );

        let args = Arguments::new();
        let strategy = HasPermissionToCreate::for_model::<Undeclared>();
        let err = strategy
            .check_for_user(&ctx, &FieldContext::new("createUndeclared", &args))
            .unwrap_err();
        assert!(matches!(err, PermissionError::Configuration(_)));
    }

    #[test]
    #[traced_test]
    fn strategy_denies_and_reports_configured_message() {
        let request = RequestContext::anonymous();
        let principal = member("viewer");
        let ctx = PermissionContext::new(&request, &principal);
        let args = Arguments::new();
        let field = FieldContext::new("createWidget", &args);

        let strategy = HasPermissionToCreate::for_model::<Widget>().with_config(&ExtensionConfig {
            message: Some("Owners only".to_owned()),
            directive_description: None,
        });

        let err = strategy.check_for_user(&ctx, &field).unwrap_err();
        match err {
            PermissionError::Denied(denial) => assert_eq!(denial.message(), None),
            other => panic!("expected denial, got {other}"),
        }
        assert_eq!(strategy.message(), "Owners only");
        assert_eq!(strategy.directive_description(), SCHEMA_DIRECTIVE_DESCRIPTION);
        assert!(logs_contain("no allowed role granted create"));
    }

    #[test]
    #[traced_test]
    fn strategy_allows_owner() {
        let request = RequestContext::anonymous();
        let principal = member("owner");
        let ctx = PermissionContext::new(&request, &principal);
        let args = Arguments::new();

        let strategy = HasPermissionToCreate::for_model::<Widget>();
        strategy
            .check_for_user(&ctx, &FieldContext::new("createWidget", &args))
            .unwrap();

        assert_eq!(strategy.message(), DEFAULT_ERROR_MESSAGE);
        assert!(logs_contain("create granted"));
    }
}
