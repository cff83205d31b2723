use crate::entities::{prelude::*, tracked_cases};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

pub struct CaseRepository {
    conn: DatabaseConnection,
}

impl CaseRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(
        &self,
        case_number: &str,
        tribunal_alias: &str,
        recipient_email: &str,
    ) -> Result<tracked_cases::Model> {
        let active_model = tracked_cases::ActiveModel {
            case_number: Set(case_number.to_string()),
            tribunal_alias: Set(tribunal_alias.to_string()),
            recipient_email: Set(recipient_email.to_string()),
            last_fingerprint: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model.insert(&self.conn).await?;
        info!(
            "Tracking case {} ({}) for {}",
            model.case_number, model.tribunal_alias, model.recipient_email
        );
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<tracked_cases::Model>> {
        Ok(TrackedCases::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn find(
        &self,
        case_number: &str,
        tribunal_alias: &str,
    ) -> Result<Option<tracked_cases::Model>> {
        let row = TrackedCases::find()
            .filter(tracked_cases::Column::CaseNumber.eq(case_number))
            .filter(tracked_cases::Column::TribunalAlias.eq(tribunal_alias))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    /// All cases in insertion order.
    pub async fn list_all(&self) -> Result<Vec<tracked_cases::Model>> {
        let rows = TrackedCases::find()
            .order_by_asc(tracked_cases::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn update_fingerprint<C: ConnectionTrait>(
        db: &C,
        id: i32,
        fingerprint: &str,
    ) -> Result<()> {
        TrackedCases::update_many()
            .col_expr(
                tracked_cases::Column::LastFingerprint,
                sea_orm::sea_query::Expr::value(fingerprint),
            )
            .filter(tracked_cases::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(())
    }
}
