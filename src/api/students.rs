use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Local;
use tracing::info;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{
    Course, CourseSummary, EnrollmentRequest, NewStudentRequest, Student, StudentCourse,
    StudentResponse, UpdateStudentRequest,
};
use crate::state::AppState;
use crate::validation;

async fn require_student(state: &AppState, id: &str) -> Result<Student, AppError> {
    repository::find_student_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Student".to_string()))
}

pub(super) async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, AppError> {
    let students = repository::fetch_students(&state.db).await?;
    Ok(Json(students.into_iter().map(StudentResponse::from).collect()))
}

/// The student with the names of the courses they are enrolled in.
pub(super) async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentResponse>, AppError> {
    let student = require_student(&state, &id).await?;
    let courses = repository::fetch_student_courses(&state.db, &id).await?;

    let mut response = StudentResponse::from(student);
    response.courses = Some(
        courses
            .into_iter()
            .map(|c| CourseSummary {
                id: c.id,
                course_name: c.course_name,
            })
            .collect(),
    );
    Ok(Json(response))
}

pub(super) async fn create_student(
    State(state): State<AppState>,
    Json(req): Json<NewStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), AppError> {
    let student = validation::validate_new_student(req)?;

    if repository::find_student_by_user_id(&state.db, student.user_id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "User already has a student record".to_string(),
        ));
    }

    repository::insert_student(&state.db, &student).await?;

    info!("created student '{}' ({})", student.full_name(), student.id);
    Ok((StatusCode::CREATED, Json(StudentResponse::from(student))))
}

pub(super) async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStudentRequest>,
) -> Result<Json<StudentResponse>, AppError> {
    let current = require_student(&state, &id).await?;
    let student = validation::apply_student_update(current, req)?;

    repository::update_student(&state.db, &student).await?;

    info!("updated student '{}' ({})", student.full_name(), student.id);
    Ok(Json(StudentResponse::from(student)))
}

pub(super) async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let ok = repository::delete_student(&state.db, &id).await?;
    if ok {
        info!("deleted student {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Student".to_string()))
    }
}

pub(super) async fn student_courses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Course>>, AppError> {
    require_student(&state, &id).await?;
    let courses = repository::fetch_student_courses(&state.db, &id).await?;
    Ok(Json(courses))
}

pub(super) async fn enroll_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<EnrollmentRequest>,
) -> Result<(StatusCode, Json<StudentCourse>), AppError> {
    require_student(&state, &id).await?;
    let course = repository::find_course_by_id(&state.db, &req.course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course".to_string()))?;

    if repository::find_enrollment(&state.db, &id, &course.id)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Already enrolled in this course".to_string(),
        ));
    }

    let enrollment = validation::new_enrollment(&id, &course.id, Local::now().naive_local());
    repository::insert_enrollment(&state.db, &enrollment).await?;

    info!("enrolled student {} in '{}'", id, course.course_name);
    Ok((StatusCode::CREATED, Json(enrollment)))
}

pub(super) async fn unenroll_student(
    State(state): State<AppState>,
    Path((id, course_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let ok = repository::delete_enrollment(&state.db, &id, &course_id).await?;
    if ok {
        info!("unenrolled student {} from course {}", id, course_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound("Enrollment".to_string()))
    }
}
