pub mod prelude;

pub mod movement_records;
pub mod tracked_cases;
