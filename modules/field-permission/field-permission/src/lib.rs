//! Field Permission Module
//!
//! Guards GraphQL field resolvers with per-request permission checks. A
//! [`PermissionExtension`] wraps the resolver and runs one of the built-in
//! strategies before it:
//!
//! - [`HasPermissionToCreate`] - the model's allowed roles decide creation
//! - [`HasPermissionToInteract`] - every object referenced by the arguments must
//!   pass the object permission check
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod extension;

pub use config::{ConfigError, ExtensionConfig, FieldPermissionConfig};
pub use domain::{HasPermissionToCreate, HasPermissionToInteract, has_permission_to_create};
pub use extension::PermissionExtension;
