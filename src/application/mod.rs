//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::link_service::LinkService`] - Short code resolution and visit tracking

pub mod services;
