//! HTTP layer translating requests into service calls.
//!
//! - [`dto`] - Request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Tracing and request deadlines
//! - [`routes`] - Route table

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
