pub use super::movement_records::Entity as MovementRecords;
pub use super::tracked_cases::Entity as TrackedCases;
