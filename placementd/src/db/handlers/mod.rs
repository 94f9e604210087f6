//! Repositories over the postgres tables.

pub mod analytics;
pub mod application_windows;
pub mod applications;
pub mod companies;
pub mod notifications;
pub mod off_campus;
pub mod repository;
pub mod rounds;
pub mod students;
pub mod users;

pub use repository::Repository;
