#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
pub mod context;
pub mod lazy;
pub mod principal;

pub use context::RequestContext;
pub use lazy::{LazyPrincipal, PrincipalLoadError, PrincipalLoader};
pub use principal::{Principal, PrincipalBuilder};
