#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Field permission SDK
//!
//! Public contracts for the `field_permission` module:
//!
//! - [`Arguments`], [`ArgumentValue`], [`ReferenceId`] - resolver arguments
//! - [`extract_reference_ids`] - collect referenced objects from arguments
//! - [`Role`], [`AllowedRoles`] - creation predicates
//! - [`ModelType`], [`ModelDescriptor`] - model declarations
//! - [`PermissionCaseSwitcher`], [`CaseResolver`], [`CaseKey`] - per-object dispatch
//! - [`ObjectLookup`], [`TypeResolver`] - outbound lookups
//! - [`PermissionStrategy`] - the rule interface run by the extension
//! - [`PermissionDenied`], [`PermissionError`], [`FieldError`] - error types
//!
//! ## Usage
//!
//! ```ignore
//! use field_permission_sdk::{AllowedRoles, HasRole, ModelType};
//!
//! struct Widget;
//!
//! impl ModelType for Widget {
//!     const NAME: &'static str = "widget";
//!
//!     fn create_allowed_roles() -> Option<AllowedRoles> {
//!         Some(AllowedRoles::new().with(HasRole::new("owner")))
//!     }
//! }
//! ```

pub mod arguments;
pub mod case_switcher;
pub mod context;
pub mod error;
pub mod extract;
pub mod lookup;
pub mod model;
pub mod roles;
pub mod strategy;

pub use arguments::{ArgumentValue, Arguments, ParseReferenceIdError, ReferenceId};
pub use case_switcher::{
    CaseHandler, CaseInput, CaseKey, CaseResolver, CaseSwitcherBuilder, ObjectPermission,
    PermissionCaseSwitcher,
};
pub use context::{FieldContext, PermissionContext};
pub use error::{ConfigurationError, FieldError, LookupError, PermissionDenied, PermissionError};
pub use extract::extract_reference_ids;
pub use lookup::{ObjectLookup, StaticTypeResolver, TypeResolver};
pub use model::{ModelDescriptor, ModelType};
pub use roles::{AllowAny, AllowedRoles, HasRole, IsAuthenticated, Role};
pub use strategy::PermissionStrategy;

pub use field_guard_security::{
    LazyPrincipal, Principal, PrincipalLoadError, PrincipalLoader, RequestContext,
};
