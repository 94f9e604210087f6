//! Database layer: error categorization, row models, and repositories.

pub mod errors;
pub mod handlers;
pub mod models;
