//! `SeaORM` implementation of [`CaseService`].

use sea_orm::{DbErr, SqlErr};

use crate::api::types::{MovementDto, TrackedCaseDto};
use crate::db::Store;
use crate::domain::CaseId;
use crate::services::case_service::{CaseError, CaseService, NewCase};

pub struct SeaOrmCaseService {
    store: Store,
}

impl SeaOrmCaseService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<DbErr>()
        .and_then(DbErr::sql_err)
        .is_some_and(|e| matches!(e, SqlErr::UniqueConstraintViolation(_)))
}

#[async_trait::async_trait]
impl CaseService for SeaOrmCaseService {
    async fn create_case(&self, input: NewCase) -> Result<TrackedCaseDto, CaseError> {
        let input = input.normalized()?;
        let conflict = || CaseError::Conflict {
            case_number: input.case_number.clone(),
            tribunal_alias: input.tribunal_alias.clone(),
        };

        if self
            .store
            .find_case(&input.case_number, &input.tribunal_alias)
            .await?
            .is_some()
        {
            return Err(conflict());
        }

        // The unique index still catches a concurrent insert of the same pair.
        match self
            .store
            .add_case(
                &input.case_number,
                &input.tribunal_alias,
                &input.recipient_email,
            )
            .await
        {
            Ok(model) => Ok(model.into()),
            Err(e) if is_unique_violation(&e) => Err(conflict()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_cases(&self) -> Result<Vec<TrackedCaseDto>, CaseError> {
        let cases = self.store.list_cases().await?;
        Ok(cases.into_iter().map(TrackedCaseDto::from).collect())
    }

    async fn list_movements(
        &self,
        case_id: CaseId,
        limit: u64,
    ) -> Result<Vec<MovementDto>, CaseError> {
        if self.store.get_case(case_id.value()).await?.is_none() {
            return Err(CaseError::NotFound(case_id));
        }

        let records = self.store.list_movements(case_id.value(), limit).await?;
        Ok(records.into_iter().map(MovementDto::from).collect())
    }
}
