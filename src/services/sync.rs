//! Fetch, compare, persist, notify.
//!
//! One case is processed at a time. The per-case email for a changed
//! movement goes out first; the movement and the new fingerprint are then
//! written in one short transaction. A failed alert stores nothing, so the
//! movement is picked up again on the next run. No write lock is held while
//! the mail provider is being called.

use chrono::Local;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::clients::{CaseSearch, EmailError, Mailer, SearchError};
use crate::db::{NewMovementRecord, Store, TrackedCase};
use crate::domain::{CaseId, SyncOutcome};
use crate::parser::movements::latest_movement;
use crate::services::digest::{DigestBook, digest_body, digest_line, digest_subject};
use crate::services::notification::new_movement_message;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Search failed: {0}")]
    Search(#[from] SearchError),

    #[error("Notification failed: {0}")]
    Notification(#[from] EmailError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for SyncError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for SyncError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct CaseReport {
    pub case_id: CaseId,
    pub case_number: String,
    pub tribunal_alias: String,
    pub outcome: SyncOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct SyncRunReport {
    pub changed: usize,
    pub cases: Vec<CaseReport>,
    pub digests_sent: usize,
    pub digest_failures: usize,
}

pub struct SyncService {
    store: Store,
    search: Arc<dyn CaseSearch>,
    mailer: Arc<dyn Mailer>,
    run_lock: Mutex<()>,
}

impl SyncService {
    #[must_use]
    pub fn new(store: Store, search: Arc<dyn CaseSearch>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            store,
            search,
            mailer,
            run_lock: Mutex::new(()),
        }
    }

    /// Synchronizes a single case. Errors propagate and leave the case's
    /// stored state untouched.
    pub async fn sync_case(&self, case: &TrackedCase) -> Result<SyncOutcome, SyncError> {
        let response = self
            .search
            .search(&case.tribunal_alias, &case.case_number)
            .await?;

        let Some(source) = response.first_hit() else {
            return Ok(SyncOutcome::NoHits);
        };

        let Some(movement) = latest_movement(source) else {
            return Ok(SyncOutcome::NoMovements);
        };

        let fingerprint = movement.fingerprint();
        if case.last_fingerprint.as_deref() == Some(fingerprint.as_str()) {
            debug!(case_id = case.id, "Latest movement unchanged");
            return Ok(SyncOutcome::Unchanged(movement));
        }

        let record = NewMovementRecord::from_movement(&movement, &fingerprint);
        let message = new_movement_message(case, &movement);

        self.mailer
            .send(&message.to, &message.subject, &message.body)
            .await?;

        let txn = self.store.begin().await?;
        if let Err(e) = self.store.stage_movement(&txn, case.id, &record).await {
            if let Err(rollback_err) = txn.rollback().await {
                error!(case_id = case.id, error = %rollback_err, "Rollback failed");
            }
            error!(
                case_id = case.id,
                error = %e,
                "Alert sent but movement could not be stored"
            );
            return Err(e.into());
        }
        txn.commit().await?;

        info!(
            event = "movement_recorded",
            case_id = case.id,
            case_number = %case.case_number,
            tribunal = %case.tribunal_alias,
            "New movement recorded"
        );

        Ok(SyncOutcome::Changed(movement))
    }

    /// Synchronizes every tracked case and sends one digest per recipient.
    ///
    /// Only a failure to list the cases aborts the run. Concurrent callers
    /// wait for the run in progress to finish.
    pub async fn sync_all(&self) -> Result<SyncRunReport, SyncError> {
        let _guard = self.run_lock.lock().await;

        let start = std::time::Instant::now();
        let cases = self.store.list_cases().await?;
        info!(event = "sync_started", cases = cases.len(), "Starting sync run");

        let mut report = SyncRunReport::default();
        let mut digests = DigestBook::new();

        for case in &cases {
            let outcome = match self.sync_case(case).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(
                        case_id = case.id,
                        case_number = %case.case_number,
                        error = %e,
                        "Case sync failed"
                    );
                    SyncOutcome::Failed(e.to_string())
                }
            };

            metrics::counter!("sync_cases_total", "status" => outcome.label()).increment(1);

            if outcome.is_changed() {
                report.changed += 1;
            }

            digests.push(&case.recipient_email, digest_line(case, &outcome));
            report.cases.push(CaseReport {
                case_id: CaseId::new(case.id),
                case_number: case.case_number.clone(),
                tribunal_alias: case.tribunal_alias.clone(),
                outcome,
            });
        }

        let subject = digest_subject(Local::now().date_naive(), report.changed);
        for (recipient, lines) in digests.iter() {
            match self
                .mailer
                .send(recipient, &subject, &digest_body(lines))
                .await
            {
                Ok(()) => report.digests_sent += 1,
                Err(e) => {
                    report.digest_failures += 1;
                    warn!(recipient, error = %e, "Digest email failed");
                }
            }
        }

        metrics::counter!("sync_runs_total").increment(1);
        info!(
            event = "sync_finished",
            cases = cases.len(),
            changed = report.changed,
            digests_sent = report.digests_sent,
            digest_failures = report.digest_failures,
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Sync run finished"
        );

        Ok(report)
    }
}
