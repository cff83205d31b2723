use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{validate_case_id, validate_limit};
use super::{
    ApiError, ApiResponse, AppState, CreateCaseRequest, HistoryQuery, MovementDto, TrackedCaseDto,
};
use crate::domain::CaseId;
use crate::services::NewCase;

/// `POST /v1/cases`
pub async fn create_case(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCaseRequest>,
) -> Result<Json<ApiResponse<TrackedCaseDto>>, ApiError> {
    let input = NewCase::new(
        request.case_number,
        request.tribunal_alias,
        request.recipient_email,
    );
    let case = state.case_service().create_case(input).await?;
    Ok(Json(ApiResponse::success(case)))
}

/// `GET /v1/cases`
pub async fn list_cases(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<TrackedCaseDto>>>, ApiError> {
    let cases = state.case_service().list_cases().await?;
    Ok(Json(ApiResponse::success(cases)))
}

/// `GET /v1/cases/{id}/movements?limit=N`
pub async fn list_movements(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<Vec<MovementDto>>>, ApiError> {
    let id = validate_case_id(id)?;
    let limit = validate_limit(query.limit)?;

    let movements = state
        .case_service()
        .list_movements(CaseId::new(id), limit)
        .await?;
    Ok(Json(ApiResponse::success(movements)))
}
