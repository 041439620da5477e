//! HTTP request handlers for API endpoints.

pub mod create;
pub mod health;
pub mod reduce;
pub mod resolve;

pub use create::create_link_handler;
pub use health::health_handler;
pub use reduce::reduce_link_handler;
pub use resolve::resolve_link_handler;
