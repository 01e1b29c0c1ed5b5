//! Lazily materialized principal.
//!
//! Loading the principal may hit a session store or an identity provider, so the
//! request context holds a [`LazyPrincipal`] and permission checks call one of the
//! `ensure_loaded*` methods before any predicate runs. The loader is invoked at
//! most once per request on success; a failed load is retried on the next call.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::principal::Principal;

/// Errors raised while materializing the principal.
#[derive(Debug, thiserror::Error)]
pub enum PrincipalLoadError {
    /// The context was created without a loader and without a principal.
    #[error("no principal loader configured")]
    NotConfigured,

    /// Another task is still loading the principal for this request.
    #[error("principal is being loaded concurrently")]
    Busy,

    /// The loader itself failed (session store, identity provider, ...).
    #[error("principal load failed: {0}")]
    Failed(String),
}

/// Source of the request principal.
///
/// Hosts with async session backends override [`PrincipalLoader::load`];
/// the default forwards to the blocking form.
#[async_trait]
pub trait PrincipalLoader: Send + Sync {
    /// Load the principal without suspending.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalLoadError::Failed`] when the backing store fails.
    fn load_blocking(&self) -> Result<Principal, PrincipalLoadError>;

    /// Load the principal, yielding to the scheduler while I/O is pending.
    ///
    /// # Errors
    ///
    /// Returns [`PrincipalLoadError::Failed`] when the backing store fails.
    async fn load(&self) -> Result<Principal, PrincipalLoadError> {
        self.load_blocking()
    }
}

pub struct LazyPrincipal {
    cell: OnceCell<Principal>,
    loader: Option<Arc<dyn PrincipalLoader>>,
}

impl LazyPrincipal {
    #[must_use]
    pub fn new(loader: Arc<dyn PrincipalLoader>) -> Self {
        Self {
            cell: OnceCell::new(),
            loader: Some(loader),
        }
    }

    /// Wrap a principal that is already materialized.
    #[must_use]
    pub fn ready(principal: Principal) -> Self {
        Self {
            cell: OnceCell::new_with(Some(principal)),
            loader: None,
        }
    }

    /// The principal, if it has been loaded already.
    #[must_use]
    pub fn get(&self) -> Option<&Principal> {
        self.cell.get()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Make sure the principal is loaded, suspending while the loader runs.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error, or [`PrincipalLoadError::NotConfigured`]
    /// when there is nothing to load from.
    pub async fn ensure_loaded(&self) -> Result<&Principal, PrincipalLoadError> {
        self.cell
            .get_or_try_init(|| async {
                let loader = self
                    .loader
                    .as_ref()
                    .ok_or(PrincipalLoadError::NotConfigured)?;
                loader.load().await
            })
            .await
    }

    /// Make sure the principal is loaded without suspending.
    ///
    /// # Errors
    ///
    /// Propagates the loader's error, [`PrincipalLoadError::NotConfigured`]
    /// when there is nothing to load from, or [`PrincipalLoadError::Busy`] if an
    /// async load of the same context is in flight.
    pub fn ensure_loaded_blocking(&self) -> Result<&Principal, PrincipalLoadError> {
        if let Some(principal) = self.cell.get() {
            return Ok(principal);
        }

        let loader = self
            .loader
            .as_ref()
            .ok_or(PrincipalLoadError::NotConfigured)?;
        let principal = loader.load_blocking()?;

        if let Err(err) = self.cell.set(principal) {
            tracing::debug!(error = %err, "principal materialized by another caller");
        }
        self.cell.get().ok_or(PrincipalLoadError::Busy)
    }
}

impl std::fmt::Debug for LazyPrincipal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyPrincipal")
            .field("principal", &self.cell.get())
            .field("has_loader", &self.loader.is_some())
            .finish()
    }
}
