use std::collections::HashMap;
use std::sync::Arc;

use crate::lazy::{LazyPrincipal, PrincipalLoader};
use crate::principal::Principal;

/// `RequestContext` carries the per-request state permission checks read.
///
/// Created by the host for every GraphQL request and dropped with it. It owns the
/// (possibly not yet loaded) principal and any ambient request attributes the host
/// wants roles and case handlers to see, such as the client's tenant or locale.
#[derive(Debug)]
pub struct RequestContext {
    principal: LazyPrincipal,
    attributes: HashMap<String, String>,
}

impl RequestContext {
    #[must_use]
    pub fn new(principal: LazyPrincipal) -> Self {
        Self {
            principal,
            attributes: HashMap::new(),
        }
    }

    /// Context whose principal is loaded on first use.
    #[must_use]
    pub fn with_loader(loader: Arc<dyn PrincipalLoader>) -> Self {
        Self::new(LazyPrincipal::new(loader))
    }

    /// Context for an already materialized principal.
    #[must_use]
    pub fn for_principal(principal: Principal) -> Self {
        Self::new(LazyPrincipal::ready(principal))
    }

    #[must_use]
    pub fn anonymous() -> Self {
        Self::for_principal(Principal::anonymous())
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn principal(&self) -> &LazyPrincipal {
        &self.principal
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}
