use std::sync::Arc;

use crate::clients::{CaseSearch, DatajudClient, Mailer, ResendMailer};
use crate::config::Config;
use crate::db::Store;
use crate::services::{CaseService, SeaOrmCaseService, SyncService};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub sync_service: Arc<SyncService>,

    pub case_service: Arc<dyn CaseService>,
}

impl SharedState {
    /// Opens the database and builds the production clients from `config`.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let search: Arc<dyn CaseSearch> = Arc::new(DatajudClient::new(&config.datajud)?);
        let mailer: Arc<dyn Mailer> = Arc::new(ResendMailer::new(&config.email)?);
        let store = Store::from_config(&config.general).await?;

        Ok(Self::with_clients(config, store, search, mailer))
    }

    #[must_use]
    pub fn with_clients(
        config: Config,
        store: Store,
        search: Arc<dyn CaseSearch>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let sync_service = Arc::new(SyncService::new(store.clone(), search, mailer));
        let case_service: Arc<dyn CaseService> = Arc::new(SeaOrmCaseService::new(store.clone()));

        Self {
            config: Arc::new(config),
            store,
            sync_service,
            case_service,
        }
    }
}
