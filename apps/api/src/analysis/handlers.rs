//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::analysis::validation::{parse_insert, parse_submission};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisResult, InsertResumeAnalysis, ResumeAnalysis};
use crate::state::AppState;

const DEFAULT_LIST_LIMIT: i64 = 20;
const MAX_LIST_LIMIT: i64 = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

impl ListQuery {
    fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyses
///
/// Validates an insert payload and stores it. `id` and `createdAt` in the body are ignored.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<ResumeAnalysis>), AppError> {
    let insert = parse_insert(&payload)?;
    let stored = state.analyses.insert(&insert).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// POST /api/v1/analyses/results
///
/// Body: `{filename, fileType, content, jobDescription?, result}`. Maps the
/// `AnalysisResult` into a record and stores it.
pub async fn handle_submit_result(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<ResumeAnalysis>), AppError> {
    let (upload, result) = parse_submission(&payload)?;
    let insert = InsertResumeAnalysis::from_result(upload, result);
    insert.validate()?;
    let stored = state.analyses.insert(&insert).await?;
    Ok((StatusCode::CREATED, Json(stored)))
}

/// GET /api/v1/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ResumeAnalysis>, AppError> {
    state
        .analyses
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Resume analysis {id} not found")))
}

/// GET /api/v1/analyses/:id/result
///
/// Only the scoring portion of a stored record, in the shape the scoring engine submitted.
pub async fn handle_get_analysis_result(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<AnalysisResult>, AppError> {
    state
        .analyses
        .get(id)
        .await?
        .map(|record| Json(record.result()))
        .ok_or_else(|| AppError::NotFound(format!("Resume analysis {id} not found")))
}

/// GET /api/v1/analyses?limit=N
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ResumeAnalysis>>, AppError> {
    let rows = state.analyses.list_recent(query.effective_limit()).await?;
    Ok(Json(rows))
}
