use std::collections::HashMap;

use secrecy::SecretString;
use uuid::Uuid;

/// `Principal` is the actor of the current request.
///
/// Built by the host's authentication layer and owned by the request context.
/// Permission predicates only ever read it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Principal {
    /// Subject ID of the authenticated user or service. Nil for anonymous actors.
    subject_id: Uuid,
    /// Subject type classification (e.g., "user", "service").
    subject_type: Option<String>,
    /// Set when no subject was authenticated for this request.
    anonymous: bool,
    /// Role names granted to the subject, in the order the host assigned them.
    #[serde(default)]
    roles: Vec<String>,
    /// Free-form attributes consumed by concrete roles and case handlers.
    #[serde(default)]
    attributes: HashMap<String, serde_json::Value>,
    /// Original bearer token. Never serialized/persisted.
    /// Wrapped in `SecretString` so `Debug` redacts the value automatically.
    #[serde(skip)]
    bearer_token: Option<SecretString>,
}

impl Principal {
    /// Create a new `Principal` builder
    #[must_use]
    pub fn builder() -> PrincipalBuilder {
        PrincipalBuilder::default()
    }

    /// Create an anonymous `Principal` with no subject, roles, or attributes
    #[must_use]
    pub fn anonymous() -> Self {
        PrincipalBuilder::default().build()
    }

    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    /// Get the subject type classification (e.g., "user", "service").
    #[must_use]
    pub fn subject_type(&self) -> Option<&str> {
        self.subject_type.as_deref()
    }

    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.anonymous
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.anonymous
    }

    #[must_use]
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Whether the principal was granted the role `name`.
    #[must_use]
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r == name)
    }

    /// Look up a host-provided attribute (e.g. `"department"`).
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    #[must_use]
    pub fn bearer_token(&self) -> Option<&SecretString> {
        self.bearer_token.as_ref()
    }
}

#[derive(Default)]
pub struct PrincipalBuilder {
    subject_id: Option<Uuid>,
    subject_type: Option<String>,
    roles: Vec<String>,
    attributes: HashMap<String, serde_json::Value>,
    bearer_token: Option<SecretString>,
}

impl PrincipalBuilder {
    /// Setting a subject marks the principal as authenticated.
    #[must_use]
    pub fn subject_id(mut self, subject_id: Uuid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn subject_type(mut self, subject_type: &str) -> Self {
        self.subject_type = Some(subject_type.to_owned());
        self
    }

    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    #[must_use]
    pub fn roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    #[must_use]
    pub fn attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn bearer_token(mut self, token: impl Into<SecretString>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn build(self) -> Principal {
        Principal {
            anonymous: self.subject_id.is_none(),
            subject_id: self.subject_id.unwrap_or_default(),
            subject_type: self.subject_type,
            roles: self.roles,
            attributes: self.attributes,
            bearer_token: self.bearer_token,
        }
    }
}
