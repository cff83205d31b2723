pub mod datajud;
pub mod email;

pub use datajud::{CaseSearch, DatajudClient, SearchError, SearchResponse};
pub use email::{EmailError, Mailer, ResendMailer};
