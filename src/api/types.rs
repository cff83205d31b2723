use serde::{Deserialize, Serialize};

use crate::db::{MovementRecord, TrackedCase};
use crate::services::sync::{CaseReport, SyncRunReport};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateCaseRequest {
    pub case_number: String,
    pub tribunal_alias: String,
    pub recipient_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackedCaseDto {
    pub id: i32,
    pub case_number: String,
    pub tribunal_alias: String,
    pub recipient_email: String,
    pub last_fingerprint: Option<String>,
    pub created_at: String,
}

impl From<TrackedCase> for TrackedCaseDto {
    fn from(model: TrackedCase) -> Self {
        Self {
            id: model.id,
            case_number: model.case_number,
            tribunal_alias: model.tribunal_alias,
            recipient_email: model.recipient_email,
            last_fingerprint: model.last_fingerprint,
            created_at: model.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovementDto {
    pub id: i32,
    pub case_id: i32,
    pub occurred_at: Option<String>,
    pub title: String,
    pub description: String,
    pub source_fingerprint: String,
}

impl From<MovementRecord> for MovementDto {
    fn from(model: MovementRecord) -> Self {
        Self {
            id: model.id,
            case_id: model.case_id,
            occurred_at: model.occurred_at.map(|dt| dt.to_rfc3339()),
            title: model.title,
            description: model.description,
            source_fingerprint: model.source_fingerprint,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    pub admin_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseOutcomeDto {
    pub case_id: i32,
    pub case_number: String,
    pub tribunal_alias: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&CaseReport> for CaseOutcomeDto {
    fn from(report: &CaseReport) -> Self {
        let latest = report.outcome.latest();
        Self {
            case_id: report.case_id.value(),
            case_number: report.case_number.clone(),
            tribunal_alias: report.tribunal_alias.clone(),
            status: report.outcome.label().to_string(),
            latest_date: latest.map(|m| m.date.clone()),
            latest_title: latest.map(|m| m.title.clone()),
            error: report.outcome.error().map(ToString::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncRunDto {
    pub changed: usize,
    pub cases: Vec<CaseOutcomeDto>,
    pub digests_sent: usize,
    pub digest_failures: usize,
}

impl From<&SyncRunReport> for SyncRunDto {
    fn from(report: &SyncRunReport) -> Self {
        Self {
            changed: report.changed,
            cases: report.cases.iter().map(CaseOutcomeDto::from).collect(),
            digests_sent: report.digests_sent,
            digest_failures: report.digest_failures,
        }
    }
}
