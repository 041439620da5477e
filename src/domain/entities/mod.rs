//! Core domain entities.
//!
//! Entities are plain data structures without business logic. The service has
//! a single one: [`Link`].

pub mod link;

pub use link::Link;
