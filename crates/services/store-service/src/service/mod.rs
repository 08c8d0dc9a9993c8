//! Service layer - business logic over the repositories.

mod catalog_service;
mod user_service;

pub use catalog_service::{CatalogManager, CatalogService};
pub use user_service::{UserManager, UserService};
