#![allow(clippy::unwrap_used, clippy::expect_used)]

use field_permission_sdk::{
    ArgumentValue, Arguments, CaseKey, CaseResolver, ConfigurationError, ModelDescriptor,
    ModelType, ObjectPermission, PermissionCaseSwitcher, PermissionContext, Principal,
    ReferenceId, RequestContext, Role, AllowedRoles, extract_reference_ids,
};
use uuid::Uuid;

struct Widget {
    owner: Uuid,
}

impl ModelType for Widget {
    const NAME: &'static str = "widget";

    fn create_allowed_roles() -> Option<AllowedRoles> {
        Some(AllowedRoles::new().with(IsOwner))
    }
}

struct IsOwner;

impl Role for IsOwner {
    fn has_permission(&self, ctx: &PermissionContext<'_>) -> bool {
        ctx.principal().has_role("owner")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum WidgetCase {
    Mine,
    Theirs,
}

impl CaseKey for WidgetCase {
    const ALL: &'static [Self] = &[Self::Mine, Self::Theirs];

    fn name(self) -> &'static str {
        match self {
            Self::Mine => "mine",
            Self::Theirs => "theirs",
        }
    }
}

struct WidgetCases;

impl CaseResolver<Widget> for WidgetCases {
    type Case = WidgetCase;

    fn resolve_case(&self, ctx: &PermissionContext<'_>, instance: &Widget) -> WidgetCase {
        if instance.owner == ctx.principal().subject_id() {
            WidgetCase::Mine
        } else {
            WidgetCase::Theirs
        }
    }
}

#[test]
fn arguments_feed_extraction_in_encounter_order() {
    let input = Arguments::new()
        .with("widgetId", ArgumentValue::reference("Widget", "1"))
        .with("label", "blue")
        .with(
            "extra",
            vec![
                ArgumentValue::reference("Widget", "2"),
                ArgumentValue::reference("Widget", "3"),
            ],
        );
    let args = Arguments::new().with("input", input);

    let ids: Vec<String> = extract_reference_ids(&args)
        .into_iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(ids, vec!["Widget:1", "Widget:2", "Widget:3"]);
    assert_eq!("Widget:1".parse::<ReferenceId>().unwrap(), ReferenceId::new("Widget", "1"));
}

#[test]
fn model_roles_and_switcher_work_together() {
    let me = Uuid::from_u128(5);
    let principal = Principal::builder().subject_id(me).role("owner").build();
    let request = RequestContext::for_principal(principal.clone());
    let ctx = PermissionContext::new(&request, &principal);

    let descriptor = ModelDescriptor::of::<Widget>();
    assert!(descriptor.create_allowed_roles().unwrap().any_grants(&ctx));

    let switcher = PermissionCaseSwitcher::builder(WidgetCases)
        .case(WidgetCase::Mine, |_| true)
        .case(WidgetCase::Theirs, |input| input.context.principal().has_role("admin"))
        .build()
        .unwrap();

    assert!(switcher.check_obj_permissions(&ctx, &Widget { owner: me }).unwrap());
    assert!(
        !switcher
            .check_obj_permissions(&ctx, &Widget { owner: Uuid::from_u128(6) })
            .unwrap()
    );
}

#[test]
fn incomplete_switcher_is_a_configuration_error() {
    let err = PermissionCaseSwitcher::builder(WidgetCases)
        .case(WidgetCase::Mine, |_| true)
        .build()
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::MissingCaseHandler { case: "theirs", .. }));
    assert!(err.to_string().contains("no handler registered for case 'theirs'"));
}

#[tokio::test]
async fn permission_context_requires_loaded_principal() {
    let request = RequestContext::anonymous();
    let ctx = PermissionContext::load(&request).await.unwrap();

    assert!(ctx.principal().is_anonymous());
    assert!(ctx.request().principal().is_loaded());
}
