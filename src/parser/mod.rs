pub mod date;
pub mod movements;
