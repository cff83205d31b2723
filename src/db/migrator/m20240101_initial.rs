use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackedCases::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackedCases::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TrackedCases::CaseNumber).string_len(30).not_null())
                    .col(ColumnDef::new(TrackedCases::TribunalAlias).string_len(80).not_null())
                    .col(ColumnDef::new(TrackedCases::RecipientEmail).string_len(255).not_null())
                    .col(ColumnDef::new(TrackedCases::LastFingerprint).string_len(64).null())
                    .col(
                        ColumnDef::new(TrackedCases::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tracked_cases_case_number")
                    .table(TrackedCases::Table)
                    .col(TrackedCases::CaseNumber)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // A case number is only unique within its tribunal
        manager
            .create_index(
                Index::create()
                    .name("idx_tracked_cases_number_tribunal")
                    .table(TrackedCases::Table)
                    .col(TrackedCases::CaseNumber)
                    .col(TrackedCases::TribunalAlias)
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MovementRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MovementRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MovementRecords::CaseId).integer().not_null())
                    .col(
                        ColumnDef::new(MovementRecords::OccurredAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(MovementRecords::Title).string_len(500).not_null())
                    .col(ColumnDef::new(MovementRecords::Description).text().not_null())
                    .col(
                        ColumnDef::new(MovementRecords::SourceFingerprint)
                            .string_len(64)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movement_records_case")
                            .from(MovementRecords::Table, MovementRecords::CaseId)
                            .to(TrackedCases::Table, TrackedCases::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::NoAction),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movement_records_case_id")
                    .table(MovementRecords::Table)
                    .col(MovementRecords::CaseId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MovementRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TrackedCases::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum TrackedCases {
    Table,
    Id,
    CaseNumber,
    TribunalAlias,
    RecipientEmail,
    LastFingerprint,
    CreatedAt,
}

#[derive(Iden)]
enum MovementRecords {
    Table,
    Id,
    CaseId,
    OccurredAt,
    Title,
    Description,
    SourceFingerprint,
}
