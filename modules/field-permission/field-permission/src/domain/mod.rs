//! Built-in permission strategies.

pub mod create;
pub mod interact;

pub use create::{HasPermissionToCreate, has_permission_to_create};
pub use interact::HasPermissionToInteract;
