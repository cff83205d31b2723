//! Registration and lookup of tracked cases.

use crate::api::types::{MovementDto, TrackedCaseDto};
use crate::constants::limits::{MAX_CASE_NUMBER_LEN, MAX_EMAIL_LEN, MAX_TRIBUNAL_ALIAS_LEN};
use crate::domain::CaseId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaseError {
    #[error("Case not found: {0}")]
    NotFound(CaseId),

    #[error("Case {case_number} is already tracked in {tribunal_alias}")]
    Conflict {
        case_number: String,
        tribunal_alias: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CaseError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CaseError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Input for registering a case. Use [`NewCase::normalized`] before storing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCase {
    pub case_number: String,
    pub tribunal_alias: String,
    pub recipient_email: String,
}

impl NewCase {
    pub fn new(
        case_number: impl Into<String>,
        tribunal_alias: impl Into<String>,
        recipient_email: impl Into<String>,
    ) -> Self {
        Self {
            case_number: case_number.into(),
            tribunal_alias: tribunal_alias.into(),
            recipient_email: recipient_email.into(),
        }
    }

    /// Trims every field and checks it against the column limits.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Validation`] naming the first offending field.
    pub fn normalized(&self) -> Result<Self, CaseError> {
        let case_number = self.case_number.trim();
        let tribunal_alias = self.tribunal_alias.trim();
        let recipient_email = self.recipient_email.trim();

        if case_number.is_empty() {
            return Err(CaseError::Validation("case_number cannot be empty".into()));
        }
        if case_number.chars().count() > MAX_CASE_NUMBER_LEN {
            return Err(CaseError::Validation(format!(
                "case_number exceeds {MAX_CASE_NUMBER_LEN} characters"
            )));
        }

        if tribunal_alias.is_empty() {
            return Err(CaseError::Validation(
                "tribunal_alias cannot be empty".into(),
            ));
        }
        if tribunal_alias.len() > MAX_TRIBUNAL_ALIAS_LEN {
            return Err(CaseError::Validation(format!(
                "tribunal_alias exceeds {MAX_TRIBUNAL_ALIAS_LEN} characters"
            )));
        }
        if !tribunal_alias
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
        {
            return Err(CaseError::Validation(
                "tribunal_alias may only contain a-z, 0-9, '_' and '-'".into(),
            ));
        }

        if !is_plausible_email(recipient_email) {
            return Err(CaseError::Validation(
                "recipient_email is not a valid address".into(),
            ));
        }
        if recipient_email.chars().count() > MAX_EMAIL_LEN {
            return Err(CaseError::Validation(format!(
                "recipient_email exceeds {MAX_EMAIL_LEN} characters"
            )));
        }

        Ok(Self::new(case_number, tribunal_alias, recipient_email))
    }
}

fn is_plausible_email(address: &str) -> bool {
    match address.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !address.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[async_trait::async_trait]
pub trait CaseService: Send + Sync {
    /// Starts tracking a case.
    ///
    /// # Errors
    ///
    /// - [`CaseError::Validation`] for malformed input
    /// - [`CaseError::Conflict`] if the pair is already tracked
    async fn create_case(&self, input: NewCase) -> Result<TrackedCaseDto, CaseError>;

    /// All tracked cases in registration order.
    async fn list_cases(&self) -> Result<Vec<TrackedCaseDto>, CaseError>;

    /// Recorded movements of a case, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::NotFound`] for an unknown case.
    async fn list_movements(
        &self,
        case_id: CaseId,
        limit: u64,
    ) -> Result<Vec<MovementDto>, CaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_trims_fields() {
        let input = NewCase::new("  0001  ", " api_publica_tjsp ", " a@b.com ");
        let clean = input.normalized().unwrap();
        assert_eq!(clean, NewCase::new("0001", "api_publica_tjsp", "a@b.com"));
    }

    #[test]
    fn rejects_bad_alias() {
        for alias in ["", "TJSP", "api publica", "tj/sp"] {
            let err = NewCase::new("1", alias, "a@b.com").normalized().unwrap_err();
            assert!(matches!(err, CaseError::Validation(_)), "{alias}");
        }
    }

    #[test]
    fn rejects_bad_email() {
        for email in ["", "no-at", "@b.com", "a@", "a@b@c", "a b@c.d"] {
            let err = NewCase::new("1", "tjsp", email).normalized().unwrap_err();
            assert!(matches!(err, CaseError::Validation(_)), "{email}");
        }
    }

    #[test]
    fn enforces_length_limits() {
        let long_number = "9".repeat(MAX_CASE_NUMBER_LEN + 1);
        assert!(NewCase::new(long_number, "tjsp", "a@b.c").normalized().is_err());

        let max_number = "9".repeat(MAX_CASE_NUMBER_LEN);
        assert!(NewCase::new(max_number, "tjsp", "a@b.c").normalized().is_ok());
    }
}
