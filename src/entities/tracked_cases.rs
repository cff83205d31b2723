use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tracked_cases")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub case_number: String,
    pub tribunal_alias: String,
    pub recipient_email: String,
    /// Fingerprint of the newest movement seen; only the synchronizer writes it.
    pub last_fingerprint: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movement_records::Entity")]
    MovementRecords,
}

impl Related<super::movement_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovementRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
