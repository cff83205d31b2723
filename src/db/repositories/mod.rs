pub mod cases;
pub mod movements;
