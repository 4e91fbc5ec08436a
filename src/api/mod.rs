mod assignments;
mod courses;
mod exams;
mod students;

use axum::Json;
use axum::extract::Query;
use axum::{Router, extract::State, http::StatusCode, routing::{delete, get, post}};
use chrono::{Duration, Local};
use serde::Deserialize;

use crate::db::repository;
use crate::error::AppError;
use crate::models::CalendarEvent;
use crate::schedule;
use crate::state::AppState;

const DEFAULT_UPCOMING_DAYS: u32 = 7;
const MAX_UPCOMING_DAYS: u32 = 366;

#[derive(Deserialize)]
struct UpcomingQueryParams {
    days: Option<u32>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/all", get(all_events))
        .route("/api/upcoming", get(upcoming_events))
        .route("/api/courses", get(courses::list_courses).post(courses::create_course))
        .route(
            "/api/courses/{id}",
            get(courses::get_course)
                .patch(courses::update_course)
                .delete(courses::delete_course),
        )
        .route("/api/courses/{id}/events", get(courses::course_events))
        .route(
            "/api/assignments",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route(
            "/api/assignments/{id}",
            get(assignments::get_assignment)
                .patch(assignments::update_assignment)
                .delete(assignments::delete_assignment),
        )
        .route("/api/exams", get(exams::list_exams).post(exams::create_exam))
        .route(
            "/api/exams/{id}",
            get(exams::get_exam)
                .patch(exams::update_exam)
                .delete(exams::delete_exam),
        )
        .route(
            "/api/students",
            get(students::list_students).post(students::create_student),
        )
        .route(
            "/api/students/{id}",
            get(students::get_student)
                .patch(students::update_student)
                .delete(students::delete_student),
        )
        .route("/api/students/{id}/courses", get(students::student_courses))
        .route("/api/students/{id}/enroll", post(students::enroll_student))
        .route(
            "/api/students/{id}/courses/{course_id}",
            delete(students::unenroll_student),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn load_all_events(state: &AppState) -> Result<Vec<CalendarEvent>, AppError> {
    let courses = repository::fetch_courses(&state.db).await?;
    let assignments = repository::fetch_assignments(&state.db).await?;
    let exams = repository::fetch_exams(&state.db).await?;
    Ok(schedule::all_events(&courses, &assignments, &exams))
}

async fn all_events(State(state): State<AppState>) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    Ok(Json(load_all_events(&state).await?))
}

async fn upcoming_events(
    State(state): State<AppState>,
    Query(params): Query<UpcomingQueryParams>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    let days = params.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    if days > MAX_UPCOMING_DAYS {
        return Err(AppError::BadRequest(format!(
            "days must be at most {}",
            MAX_UPCOMING_DAYS
        )));
    }

    let events = load_all_events(&state).await?;
    let now = Local::now().naive_local();
    Ok(Json(schedule::upcoming(events, now, Duration::days(days.into()))))
}
