use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, Statement,
    TransactionTrait,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::GeneralConfig;

pub mod migrator;
pub mod repositories;

pub use crate::entities::movement_records::Model as MovementRecord;
pub use crate::entities::tracked_cases::Model as TrackedCase;
pub use repositories::movements::NewMovementRecord;

use repositories::cases::CaseRepository;
use repositories::movements::MovementRepository;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn from_config(general: &GeneralConfig) -> Result<Self> {
        Self::with_pool_options(
            &general.database_path,
            general.max_db_connections,
            general.min_db_connections,
        )
        .await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn case_repo(&self) -> CaseRepository {
        CaseRepository::new(self.conn.clone())
    }

    fn movement_repo(&self) -> MovementRepository {
        MovementRepository::new(self.conn.clone())
    }

    pub async fn add_case(
        &self,
        case_number: &str,
        tribunal_alias: &str,
        recipient_email: &str,
    ) -> Result<TrackedCase> {
        self.case_repo()
            .add(case_number, tribunal_alias, recipient_email)
            .await
    }

    pub async fn get_case(&self, id: i32) -> Result<Option<TrackedCase>> {
        self.case_repo().get(id).await
    }

    pub async fn find_case(
        &self,
        case_number: &str,
        tribunal_alias: &str,
    ) -> Result<Option<TrackedCase>> {
        self.case_repo().find(case_number, tribunal_alias).await
    }

    pub async fn list_cases(&self) -> Result<Vec<TrackedCase>> {
        self.case_repo().list_all().await
    }

    pub async fn list_movements(&self, case_id: i32, limit: u64) -> Result<Vec<MovementRecord>> {
        self.movement_repo().list_for_case(case_id, limit).await
    }

    pub async fn count_movements(&self, case_id: i32) -> Result<u64> {
        self.movement_repo().count_for_case(case_id).await
    }

    pub async fn begin(&self) -> Result<DatabaseTransaction> {
        Ok(self.conn.begin().await?)
    }

    /// Inserts the movement and moves the case's fingerprint inside `txn`.
    /// Nothing is visible to other connections until the caller commits.
    pub async fn stage_movement(
        &self,
        txn: &DatabaseTransaction,
        case_id: i32,
        record: &NewMovementRecord,
    ) -> Result<i32> {
        let id = MovementRepository::insert(txn, case_id, record).await?;
        CaseRepository::update_fingerprint(txn, case_id, &record.source_fingerprint).await?;
        Ok(id)
    }
}
