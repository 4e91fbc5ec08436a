use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{CalendarEvent, Exam, NewExamRequest, UpdateExamRequest};
use crate::schedule;
use crate::state::AppState;
use crate::validation;

pub(super) async fn list_exams(State(state): State<AppState>) -> Result<Json<Vec<Exam>>, AppError> {
    let exams = repository::fetch_exams(&state.db).await?;
    Ok(Json(exams))
}

pub(super) async fn get_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Exam>, AppError> {
    let exam = repository::find_exam_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exam".to_string()))?;
    Ok(Json(exam))
}

pub(super) async fn create_exam(
    State(state): State<AppState>,
    Json(req): Json<NewExamRequest>,
) -> Result<(StatusCode, Json<CalendarEvent>), AppError> {
    let exam = validation::validate_new_exam(req)?;

    if repository::find_course_by_id(&state.db, &exam.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Course not found".to_string()));
    }

    repository::insert_exam(&state.db, &exam).await?;

    info!("created exam '{}' ({})", exam.title, exam.id);
    Ok((StatusCode::CREATED, Json(schedule::exam_event(&exam))))
}

pub(super) async fn update_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateExamRequest>,
) -> Result<Json<CalendarEvent>, AppError> {
    let current = repository::find_exam_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Exam".to_string()))?;
    let exam = validation::apply_exam_update(current, req)?;

    if repository::find_course_by_id(&state.db, &exam.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Course not found".to_string()));
    }

    repository::update_exam(&state.db, &exam).await?;

    info!("updated exam '{}' ({})", exam.title, exam.id);
    Ok(Json(schedule::exam_event(&exam)))
}

pub(super) async fn delete_exam(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ok = repository::delete_exam(&state.db, &id).await?;
    if ok {
        info!("deleted exam {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Exam".to_string()))
    }
}
