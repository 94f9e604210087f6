//! Wire-format request and response types for the REST API.

pub mod application_windows;
pub mod applications;
pub mod companies;
pub mod envelope;
pub mod notifications;
pub mod off_campus;
pub mod pagination;
pub mod reports;
pub mod rounds;
pub mod search;
pub mod students;
pub mod users;
