//! Common type definitions.
//!
//! All entity IDs are UUIDs wrapped in type aliases for readability at the
//! seams between the API layer and the repositories:
//!
//! - [`UserId`]: account identifier (students, recruiters and placement staff)
//! - [`StudentId`]: student profile identifier
//! - [`CompanyId`]: recruiting company identifier
//! - [`ApplicationId`]: application identifier
//! - [`WindowId`]: application window identifier
//! - [`RoundId`]: recruitment round identifier
//! - [`OpportunityId`]: off-campus opportunity identifier
//! - [`NotificationId`]: notification identifier

use uuid::Uuid;

pub type UserId = Uuid;
pub type StudentId = Uuid;
pub type CompanyId = Uuid;
pub type ApplicationId = Uuid;
pub type WindowId = Uuid;
pub type RoundId = Uuid;
pub type OpportunityId = Uuid;
pub type NotificationId = Uuid;

/// Abbreviate a UUID to its first 8 characters for more readable logs and traces
/// Example: "550e8400-e29b-41d4-a716-446655440000" -> "550e8400"
pub fn abbrev_uuid(uuid: &Uuid) -> String {
    uuid.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbrev_uuid() {
        let id: Uuid = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert_eq!(abbrev_uuid(&id), "550e8400");
    }
}
