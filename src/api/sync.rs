use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
};
use std::sync::Arc;
use tracing::warn;

use super::{ApiError, ApiResponse, AppState, SyncQuery, SyncRunDto};

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// `POST /v1/sync?admin_token=...`
///
/// Runs a full sync inline. The token may also be sent as `X-Admin-Token`.
pub async fn run_sync(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SyncQuery>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<SyncRunDto>>, ApiError> {
    let presented = query.admin_token.or_else(|| {
        headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    });

    let expected = &state.config().server.admin_token;
    let authorized = presented
        .as_deref()
        .is_some_and(|token| !expected.is_empty() && constant_time_eq(token, expected));

    if !authorized {
        warn!(event = "sync_unauthorized", "Rejected sync request with bad admin token");
        return Err(ApiError::unauthorized("Invalid admin token"));
    }

    let report = state.sync_service().sync_all().await?;
    Ok(Json(ApiResponse::success(SyncRunDto::from(&report))))
}

fn constant_time_eq(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
