use crate::domain::Movement;
use crate::entities::{movement_records, prelude::*};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

/// A movement ready to be stored: date parsed, title cut to the column width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovementRecord {
    pub occurred_at: Option<DateTime<Utc>>,
    pub title: String,
    pub description: String,
    pub source_fingerprint: String,
}

impl NewMovementRecord {
    #[must_use]
    pub fn from_movement(movement: &Movement, fingerprint: &str) -> Self {
        Self {
            occurred_at: movement.occurred_at(),
            title: movement.stored_title(),
            description: movement.description.clone(),
            source_fingerprint: fingerprint.to_string(),
        }
    }
}

pub struct MovementRepository {
    conn: DatabaseConnection,
}

impl MovementRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert<C: ConnectionTrait>(
        db: &C,
        case_id: i32,
        record: &NewMovementRecord,
    ) -> Result<i32> {
        let active_model = movement_records::ActiveModel {
            case_id: Set(case_id),
            occurred_at: Set(record.occurred_at),
            title: Set(record.title.clone()),
            description: Set(record.description.clone()),
            source_fingerprint: Set(record.source_fingerprint.clone()),
            ..Default::default()
        };

        let res = MovementRecords::insert(active_model).exec(db).await?;
        Ok(res.last_insert_id)
    }

    /// Most recent first.
    pub async fn list_for_case(
        &self,
        case_id: i32,
        limit: u64,
    ) -> Result<Vec<movement_records::Model>> {
        let rows = MovementRecords::find()
            .filter(movement_records::Column::CaseId.eq(case_id))
            .order_by_desc(movement_records::Column::Id)
            .limit(limit)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn count_for_case(&self, case_id: i32) -> Result<u64> {
        let count = MovementRecords::find()
            .filter(movement_records::Column::CaseId.eq(case_id))
            .count(&self.conn)
            .await?;
        Ok(count)
    }
}
