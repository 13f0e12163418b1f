// handlers/students.rs - /api/students and /api/students/:id handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;

use crate::api::{ApiResponse, ApiResult};
use crate::error::ApiError;
use crate::models::{NewStudent, RatingsUpdate, StudentSummary};
use crate::services::DeletionOutcome;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StudentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub student: StudentSummary,
}

#[derive(Debug, Serialize)]
pub struct DeleteBody {
    pub message: String,
    #[serde(flatten)]
    pub outcome: DeletionOutcome,
}

/// POST /api/students - Register a new student
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewStudent>, JsonRejection>,
) -> ApiResult<StudentBody> {
    let Json(payload) = payload?;
    let student = state.roster.create_member(payload).await?.summary();

    Ok(ApiResponse::created(StudentBody {
        message: Some(format!("Student {} created", student.id)),
        student,
    }))
}

/// GET /api/students/:id - Fetch one student
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StudentBody> {
    let student = state.roster.get_member(&id).await?;

    Ok(ApiResponse::success(StudentBody {
        message: None,
        student: student.summary(),
    }))
}

/// PUT /api/students/:id - Update one or more ratings
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    update: Result<Json<RatingsUpdate>, JsonRejection>,
) -> ApiResult<StudentBody> {
    let Json(update) = update?;
    let student = state.roster.update_ratings(&id, update).await?.summary();

    Ok(ApiResponse::success(StudentBody {
        message: Some(format!("Ratings updated for student {}", student.id)),
        student,
    }))
}

/// DELETE /api/students/:id - Remove a student account
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<DeleteBody> {
    let outcome = state.roster.delete_member(&id).await?;

    Ok(ApiResponse::success(DeleteBody {
        message: format!("Student {} deleted successfully", outcome.deleted_student.id),
        outcome,
    }))
}

/// DELETE /api/students - No id segment in the path
pub async fn delete_without_id() -> ApiError {
    ApiError::bad_request("Student ID is required")
}
