//! Allotment generation and retrieval handlers.

use axum::Json;
use axum::extract::{Path, State};

use examhall_service::ExamAllotmentView;

use crate::dto::request::CreateAllotmentRequest;
use crate::dto::response::GenerateAllotmentResponse;
use crate::error::ApiError;
use crate::extractors::{ValidatedJson, parse_exam_id};
use crate::state::AppState;

/// POST /api/allotments
pub async fn generate(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateAllotmentRequest>,
) -> Result<Json<GenerateAllotmentResponse>, ApiError> {
    let outcome = state
        .allotment_service
        .generate(req.into_generate_request())
        .await?;

    Ok(Json(outcome.into()))
}

/// GET /api/allotments/{exam_id}
pub async fn find_by_exam(
    State(state): State<AppState>,
    Path(exam_id): Path<String>,
) -> Result<Json<ExamAllotmentView>, ApiError> {
    let exam_id = parse_exam_id(&exam_id)?;
    let view = state.allotment_service.find_by_exam(exam_id).await?;
    Ok(Json(view))
}
