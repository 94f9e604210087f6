//! Database-layer request and response types.
//!
//! These mirror table rows exactly; the API layer converts them to and from
//! its own wire models.

pub mod application_windows;
pub mod applications;
pub mod companies;
pub mod notifications;
pub mod off_campus;
pub mod rounds;
pub mod students;
pub mod users;
