//! Axum handlers for the REST API.

pub mod application_windows;
pub mod applications;
pub mod companies;
pub mod notifications;
pub mod off_campus;
pub mod reports;
pub mod rounds;
pub mod search;
pub mod students;
pub mod users;
