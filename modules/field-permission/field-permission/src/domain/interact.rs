//! Interaction check: may the principal touch every object the field references?

use std::sync::Arc;

use async_trait::async_trait;
use field_permission_sdk::{
    ConfigurationError, FieldContext, LookupError, ObjectLookup, ObjectPermission,
    PermissionContext, PermissionDenied, PermissionError, PermissionStrategy, ReferenceId,
    TypeResolver, extract_reference_ids,
};

use crate::config::ExtensionConfig;

pub const DEFAULT_ERROR_MESSAGE: &str = "You are not authorized to interact with this object";
pub const SCHEMA_DIRECTIVE_DESCRIPTION: &str =
    "Can only interact with objects that the user has permission to interact with";

/// Referenced ids grouped by model, both in encounter order, ids de-duplicated.
type ModelGroups = Vec<(String, Vec<String>)>;

/// Strategy guarding fields whose arguments reference existing objects.
///
/// Every referenced object is fetched (one batched lookup per model) and passed
/// to the object permission check. The field is allowed only if every object is;
/// a field that references nothing is always allowed.
pub struct HasPermissionToInteract<O: Send + 'static> {
    types: Arc<dyn TypeResolver>,
    lookup: Arc<dyn ObjectLookup<O>>,
    permission: Arc<dyn ObjectPermission<O>>,
    message: String,
    directive_description: String,
}

impl<O: Send + Sync + 'static> HasPermissionToInteract<O> {
    #[must_use]
    pub fn new(
        types: Arc<dyn TypeResolver>,
        lookup: Arc<dyn ObjectLookup<O>>,
        permission: Arc<dyn ObjectPermission<O>>,
    ) -> Self {
        Self {
            types,
            lookup,
            permission,
            message: DEFAULT_ERROR_MESSAGE.to_owned(),
            directive_description: SCHEMA_DIRECTIVE_DESCRIPTION.to_owned(),
        }
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

    fn group_by_model(
        &self,
        references: &[&ReferenceId],
    ) -> Result<ModelGroups, ConfigurationError> {
        let mut groups: ModelGroups = Vec::new();
        for reference in references {
            let model = self.types.model_for(reference)?;
            let id = reference.node_id();
            match groups.iter_mut().find(|(name, _)| *name == model) {
                Some((_, ids)) => {
                    if !ids.iter().any(|known| known == id) {
                        ids.push(id.to_owned());
                    }
                }
                None => groups.push((model, vec![id.to_owned()])),
            }
        }
        Ok(groups)
    }

    /// Run the object check on every object, then require all of them to pass.
    fn decide(&self, ctx: &PermissionContext<'_>, objects: &[O]) -> Result<(), PermissionError> {
        let decisions = objects
            .iter()
            .map(|object| self.permission.check_obj_permissions(ctx, object))
            .collect::<Result<Vec<bool>, _>>()?;

        let denied = decisions.iter().filter(|allowed| !**allowed).count();
        if denied == 0 {
            tracing::debug!(objects = decisions.len(), "interact granted");
            Ok(())
        } else {
            tracing::debug!(objects = decisions.len(), denied, "interact denied");
            Err(PermissionDenied::empty().into())
        }
    }
}

fn lookup_failed(model: &str) -> impl FnOnce(LookupError) -> PermissionError {
    move |source| PermissionError::Lookup {
        model: model.to_owned(),
        source,
    }
}

#[async_trait]
impl<O: Send + Sync + 'static> PermissionStrategy for HasPermissionToInteract<O> {
    fn name(&self) -> &str {
        "HasPermissionToInteract"
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn directive_description(&self) -> &str {
        &self.directive_description
    }

    #[tracing::instrument(skip_all, fields(field = field.field_name()))]
    fn check_for_user(
        &self,
        ctx: &PermissionContext<'_>,
        field: &FieldContext<'_>,
    ) -> Result<(), PermissionError> {
        let references = extract_reference_ids(field.arguments());
        if references.is_empty() {
            tracing::debug!("no referenced objects");
            return Ok(());
        }

        let mut objects = Vec::with_capacity(references.len());
        for (model, ids) in self.group_by_model(&references)? {
            objects.extend(
                self.lookup
                    .fetch_blocking(&model, &ids)
                    .map_err(lookup_failed(&model))?,
            );
        }
        self.decide(ctx, &objects)
    }

    #[tracing::instrument(skip_all, fields(field = field.field_name()))]
    async fn check_for_user_async(
        &self,
        ctx: &PermissionContext<'_>,
        field: &FieldContext<'_>,
    ) -> Result<(), PermissionError> {
        let references = extract_reference_ids(field.arguments());
        if references.is_empty() {
            tracing::debug!("no referenced objects");
            return Ok(());
        }

        let mut objects = Vec::with_capacity(references.len());
        for (model, ids) in self.group_by_model(&references)? {
            objects.extend(
                self.lookup
                    .fetch(&model, &ids)
                    .await
                    .map_err(lookup_failed(&model))?,
            );
        }
        self.decide(ctx, &objects)
    }
}

impl<O: Send + 'static> std::fmt::Debug for HasPermissionToInteract<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HasPermissionToInteract")
            .field("message", &self.message)
            .field("directive_description", &self.directive_description)
            .finish_non_exhaustive()
    }
}
