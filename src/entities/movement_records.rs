use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "movement_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub case_id: i32,
    pub occurred_at: Option<DateTimeUtc>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub source_fingerprint: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tracked_cases::Entity",
        from = "Column::CaseId",
        to = "super::tracked_cases::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TrackedCases,
}

impl Related<super::tracked_cases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TrackedCases.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
