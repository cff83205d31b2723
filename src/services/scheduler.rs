use anyhow::Result;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::{Duration, interval};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};

use crate::config::SchedulerConfig;
use crate::services::sync::{SyncError, SyncRunReport, SyncService};

pub struct Scheduler {
    sync: Arc<SyncService>,
    config: SchedulerConfig,
    running: Arc<RwLock<bool>>,
}

async fn run_sync_job(sync: &SyncService) -> Result<SyncRunReport, SyncError> {
    let start = std::time::Instant::now();
    info!(event = "job_started", job_name = "sync_cases", "Starting case sync job");

    let result = sync.sync_all().await;
    match &result {
        Ok(report) => info!(
            event = "job_finished",
            job_name = "sync_cases",
            changed = report.changed,
            cases = report.cases.len(),
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Case sync job finished"
        ),
        Err(e) => {
            error!(event = "job_failed", job_name = "sync_cases", error = %e, "Case sync job failed");
        }
    }
    result
}

impl Scheduler {
    pub fn new(sync: Arc<SyncService>, config: SchedulerConfig) -> Self {
        Self {
            sync,
            config,
            running: Arc::new(RwLock::new(false)),
        }
    }

    /// Runs until [`Scheduler::stop`] is called. Returns immediately when
    /// disabled.
    pub async fn start(&self) -> Result<()> {
        if !self.config.enabled {
            info!("Scheduler is disabled in config");
            return Ok(());
        }

        *self.running.write().await = true;
        info!("Starting background scheduler");

        if let Some(cron_expr) = &self.config.cron_expression {
            self.run_with_cron(cron_expr).await
        } else {
            self.run_with_interval().await
        }
    }

    async fn run_with_cron(&self, cron_expr: &str) -> Result<()> {
        let mut sched = JobScheduler::new().await?;

        let sync = Arc::clone(&self.sync);
        let running = Arc::clone(&self.running);

        let job = Job::new_async(cron_expr, move |_uuid, _lock| {
            let sync = Arc::clone(&sync);
            let running = Arc::clone(&running);
            Box::pin(async move {
                if !*running.read().await {
                    return;
                }
                let _ = run_sync_job(&sync).await;
            })
        })?;

        sched.add(job).await?;
        sched.start().await?;

        info!("Scheduler running with cron: {}", cron_expr);

        loop {
            if !*self.running.read().await {
                break;
            }
            tokio::time::sleep(Duration::from_secs(1)).await;
        }

        sched.shutdown().await?;
        Ok(())
    }

    async fn run_with_interval(&self) -> Result<()> {
        let interval_mins = self.config.check_interval_minutes.max(1);
        info!("Scheduler running every {} minutes", interval_mins);

        let mut check_interval = interval(Duration::from_secs(u64::from(interval_mins) * 60));
        // The first tick completes immediately; skip it so the first sync
        // happens one interval after startup.
        check_interval.tick().await;

        loop {
            check_interval.tick().await;
            if !*self.running.read().await {
                break;
            }
            let _ = run_sync_job(&self.sync).await;
        }

        Ok(())
    }

    /// Runs one sync job now, outside the schedule. Works even when the
    /// scheduler is disabled.
    pub async fn run_once(&self) -> Result<SyncRunReport, SyncError> {
        run_sync_job(&self.sync).await
    }

    pub async fn stop(&self) {
        info!("Stopping scheduler...");
        *self.running.write().await = false;
    }
}
