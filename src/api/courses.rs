use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::{info, warn};

use crate::db::repository;
use crate::error::AppError;
use crate::models::{CalendarEvent, Course, NewCourseRequest, UpdateCourseRequest};
use crate::schedule::{self, ScheduleConflict};
use crate::state::AppState;
use crate::validation;

const BEGIN_WRITE: &str = "BEGIN IMMEDIATE";

pub(super) async fn list_courses(State(state): State<AppState>) -> Result<Json<Vec<Course>>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    Ok(Json(courses))
}

pub(super) async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Course>, AppError> {
    let course = repository::find_course_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course".to_string()))?;
    Ok(Json(course))
}

pub(super) async fn course_events(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let course = repository::find_course_by_id(&state.db, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course".to_string()))?;
    Ok(Json(schedule::expand(&course).collect()))
}

/// Stores a new course unless it would clash with one already on the
/// schedule, answering with the expanded sessions.
pub(super) async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<(StatusCode, Json<Vec<CalendarEvent>>), AppError> {
    let course = validation::validate_new_course(req)?;

    // The check and the insert share a write transaction, taken up front so a
    // concurrent create waits for it instead of failing on lock upgrade.
    let mut tx = state.db.begin_with(BEGIN_WRITE).await?;

    if repository::find_course_by_name(&mut *tx, &course.course_name)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Course with this name already exists".to_string(),
        ));
    }

    let existing = repository::fetch_courses(&mut *tx).await?;
    if let Some(clash) = schedule::check_overlap(&course, &existing) {
        warn!("rejected course '{}': clashes with '{}'", course.course_name, clash.course_name);
        return Err(ScheduleConflict::from(clash).into());
    }

    repository::insert_course(&mut *tx, &course).await?;
    tx.commit().await?;

    info!("created course '{}' ({})", course.course_name, course.id);
    Ok((StatusCode::CREATED, Json(schedule::expand(&course).collect())))
}

pub(super) async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCourseRequest>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let mut tx = state.db.begin_with(BEGIN_WRITE).await?;

    let current = repository::find_course_by_id(&mut *tx, &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course".to_string()))?;
    let course = validation::apply_course_update(current, req)?;

    if let Some(other) = repository::find_course_by_name(&mut *tx, &course.course_name).await? {
        if other.id != course.id {
            return Err(AppError::BadRequest(
                "Course with this name already exists".to_string(),
            ));
        }
    }

    let existing = repository::fetch_courses(&mut *tx).await?;
    let others = existing.iter().filter(|c| c.id != course.id);
    if let Some(clash) = schedule::check_overlap(&course, others) {
        warn!("rejected update of '{}': clashes with '{}'", course.course_name, clash.course_name);
        return Err(ScheduleConflict::from(clash).into());
    }

    repository::update_course(&mut *tx, &course).await?;
    tx.commit().await?;

    info!("updated course '{}' ({})", course.course_name, course.id);
    Ok(Json(schedule::expand(&course).collect()))
}

pub(super) async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ok = repository::delete_course(&state.db, &id).await?;
    if ok {
        info!("deleted course {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Course".to_string()))
    }
}
