pub mod case_service;
pub mod case_service_impl;
pub use case_service::{CaseError, CaseService, NewCase};
pub use case_service_impl::SeaOrmCaseService;

pub mod digest;
pub mod notification;

pub mod sync;
pub use sync::{CaseReport, SyncError, SyncRunReport, SyncService};

pub mod scheduler;
pub use scheduler::Scheduler;
