//! REST API layer: handlers and wire models.

pub mod extractors;
pub mod handlers;
pub mod models;
