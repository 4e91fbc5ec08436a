use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{Assignment, CalendarEvent, NewAssignmentRequest, UpdateAssignmentRequest};
use crate::schedule;
use crate::state::AppState;
use crate::validation;

pub(super) async fn list_assignments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Assignment>>, AppError> {
    let assignments = repository::fetch_assignments(&state.db).await?;
    Ok(Json(assignments))
}

pub(super) async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Assignment>, AppError> {
    let assignment = repository::find_assignment_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment".to_string()))?;
    Ok(Json(assignment))
}

pub(super) async fn create_assignment(
    State(state): State<AppState>,
    Json(req): Json<NewAssignmentRequest>,
) -> Result<(StatusCode, Json<CalendarEvent>), AppError> {
    let assignment = validation::validate_new_assignment(req)?;

    if repository::find_course_by_id(&state.db, &assignment.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Course not found".to_string()));
    }
    if repository::find_assignment_by_title(&state.db, &assignment.assignment_title)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Assignment with this title already exists".to_string(),
        ));
    }

    repository::insert_assignment(&state.db, &assignment).await?;

    info!("created assignment '{}' ({})", assignment.assignment_title, assignment.id);
    Ok((StatusCode::CREATED, Json(schedule::assignment_event(&assignment))))
}

pub(super) async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateAssignmentRequest>,
) -> Result<Json<CalendarEvent>, AppError> {
    let current = repository::find_assignment_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment".to_string()))?;
    let assignment = validation::apply_assignment_update(current, req)?;

    if repository::find_course_by_id(&state.db, &assignment.course_id)
        .await?
        .is_none()
    {
        return Err(AppError::BadRequest("Course not found".to_string()));
    }
    if let Some(other) =
        repository::find_assignment_by_title(&state.db, &assignment.assignment_title).await?
    {
        if other.id != assignment.id {
            return Err(AppError::BadRequest(
                "Assignment with this title already exists".to_string(),
            ));
        }
    }

    repository::update_assignment(&state.db, &assignment).await?;

    info!("updated assignment '{}' ({})", assignment.assignment_title, assignment.id);
    Ok(Json(schedule::assignment_event(&assignment)))
}

pub(super) async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ok = repository::delete_assignment(&state.db, &id).await?;
    if ok {
        info!("deleted assignment {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Assignment".to_string()))
    }
}
