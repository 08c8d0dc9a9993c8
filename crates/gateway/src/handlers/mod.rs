//! HTTP handlers grouped by resource.

pub mod auth_handler;
pub mod health_handler;
pub mod page_handler;
pub mod product_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use health_handler::health_routes;
pub use page_handler::page_routes;
pub use product_handler::product_routes;
pub use user_handler::user_routes;
