//! Turns wire requests into checked domain records.
//!
//! Everything downstream (the schedule code and the store) assumes the
//! records built here are well formed, so every rule lives in this module.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{
    Assignment, Course, Exam, NewAssignmentRequest, NewCourseRequest, NewExamRequest,
    NewStudentRequest, Student, StudentCourse, UpdateAssignmentRequest, UpdateCourseRequest,
    UpdateExamRequest, UpdateStudentRequest,
};
use crate::schedule::DaySet;

const MIN_CREDITS: i32 = 1;
const MAX_CREDITS: i32 = 6;
const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_NAME_LEN: usize = 255;

pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("{} must be in YYYY-MM-DD format", field)))
}

/// Accepts `HH:MM:SS` and the shorter `HH:MM` sent by browser time inputs.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, AppError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| AppError::BadRequest(format!("{} must be in HH:MM:SS format", field)))
}

pub fn parse_days(value: &str) -> Result<DaySet, AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest("daysOfWeek cannot be empty".to_string()));
    }
    DaySet::parse_strict(value).map_err(|e| AppError::BadRequest(e.to_string()))
}

fn non_empty(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::BadRequest(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn check_name(field: &str, value: &str) -> Result<String, AppError> {
    let name = non_empty(field, value)?;
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::BadRequest(format!(
            "{} cannot exceed {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(name)
}

fn check_credits(credits: i32) -> Result<i32, AppError> {
    if !(MIN_CREDITS..=MAX_CREDITS).contains(&credits) {
        return Err(AppError::BadRequest(format!(
            "credits must be between {} and {}",
            MIN_CREDITS, MAX_CREDITS
        )));
    }
    Ok(credits)
}

fn check_description(description: Option<String>) -> Result<Option<String>, AppError> {
    match description {
        Some(d) if d.chars().count() > MAX_DESCRIPTION_LEN => Err(AppError::BadRequest(format!(
            "description cannot exceed {} characters",
            MAX_DESCRIPTION_LEN
        ))),
        other => Ok(other),
    }
}

fn check_weight(weight: f64) -> Result<f64, AppError> {
    if !(0.0..=100.0).contains(&weight) {
        return Err(AppError::BadRequest(
            "weight must be a number between 0 and 100".to_string(),
        ));
    }
    Ok(weight)
}

/// A single-day course is allowed; a session must have positive length.
pub fn check_course_order(course: &Course) -> Result<(), AppError> {
    if course.end_date < course.start_date {
        return Err(AppError::BadRequest(
            "End date must not be before start date".to_string(),
        ));
    }
    if course.end_time <= course.start_time {
        return Err(AppError::BadRequest(
            "End time must be after start time".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_new_course(req: NewCourseRequest) -> Result<Course, AppError> {
    let course = Course {
        id: Uuid::new_v4().to_string(),
        course_name: non_empty("courseName", &req.course_name)?,
        credits: check_credits(req.credits)?,
        start_date: parse_date("startDate", &req.start_date)?,
        end_date: parse_date("endDate", &req.end_date)?,
        days_of_week: parse_days(&req.days_of_week)?,
        start_time: parse_time("startTime", &req.start_time)?,
        end_time: parse_time("endTime", &req.end_time)?,
        filename: None,
        file_path: None,
        content_type: None,
    };
    check_course_order(&course)?;
    Ok(course)
}

/// Merges the supplied fields into `current` and re-checks the result as a whole.
pub fn apply_course_update(mut current: Course, req: UpdateCourseRequest) -> Result<Course, AppError> {
    if let Some(name) = req.course_name {
        current.course_name = non_empty("courseName", &name)?;
    }
    if let Some(credits) = req.credits {
        current.credits = check_credits(credits)?;
    }
    if let Some(start_date) = req.start_date {
        current.start_date = parse_date("startDate", &start_date)?;
    }
    if let Some(end_date) = req.end_date {
        current.end_date = parse_date("endDate", &end_date)?;
    }
    if let Some(days) = req.days_of_week {
        current.days_of_week = parse_days(&days)?;
    }
    if let Some(start_time) = req.start_time {
        current.start_time = parse_time("startTime", &start_time)?;
    }
    if let Some(end_time) = req.end_time {
        current.end_time = parse_time("endTime", &end_time)?;
    }
    check_course_order(&current)?;
    Ok(current)
}

pub fn validate_new_assignment(req: NewAssignmentRequest) -> Result<Assignment, AppError> {
    Ok(Assignment {
        id: Uuid::new_v4().to_string(),
        assignment_title: non_empty("assignmentTitle", &req.assignment_title)?,
        description: check_description(req.description)?,
        course_id: non_empty("courseId", &req.course_id)?,
        due_date: parse_date("dueDate", &req.due_date)?,
        due_time: parse_time("dueTime", &req.due_time)?,
        worth: req.worth,
        filename: None,
        file_path: None,
        content_type: None,
    })
}

pub fn apply_assignment_update(
    mut current: Assignment,
    req: UpdateAssignmentRequest,
) -> Result<Assignment, AppError> {
    if let Some(title) = req.assignment_title {
        current.assignment_title = non_empty("assignmentTitle", &title)?;
    }
    if req.description.is_some() {
        current.description = check_description(req.description)?;
    }
    if let Some(course_id) = req.course_id {
        current.course_id = non_empty("courseId", &course_id)?;
    }
    if let Some(due_date) = req.due_date {
        current.due_date = parse_date("dueDate", &due_date)?;
    }
    if let Some(due_time) = req.due_time {
        current.due_time = parse_time("dueTime", &due_time)?;
    }
    if req.worth.is_some() {
        current.worth = req.worth;
    }
    Ok(current)
}

pub fn validate_new_exam(req: NewExamRequest) -> Result<Exam, AppError> {
    Ok(Exam {
        id: Uuid::new_v4().to_string(),
        title: non_empty("title", &req.title)?,
        date_of: parse_date("dateOf", &req.date_of)?,
        weight: check_weight(req.weight)?,
        course_id: non_empty("courseId", &req.course_id)?,
    })
}

pub fn apply_exam_update(mut current: Exam, req: UpdateExamRequest) -> Result<Exam, AppError> {
    if let Some(title) = req.title {
        current.title = non_empty("title", &title)?;
    }
    if let Some(date_of) = req.date_of {
        current.date_of = parse_date("dateOf", &date_of)?;
    }
    if let Some(weight) = req.weight {
        current.weight = check_weight(weight)?;
    }
    if let Some(course_id) = req.course_id {
        current.course_id = non_empty("courseId", &course_id)?;
    }
    Ok(current)
}

pub fn validate_new_student(req: NewStudentRequest) -> Result<Student, AppError> {
    if req.user_id <= 0 {
        return Err(AppError::BadRequest("userId must be a positive number".to_string()));
    }
    Ok(Student {
        id: Uuid::new_v4().to_string(),
        first_name: check_name("firstName", &req.first_name)?,
        last_name: check_name("lastName", &req.last_name)?,
        user_id: req.user_id,
    })
}

pub fn apply_student_update(mut current: Student, req: UpdateStudentRequest) -> Result<Student, AppError> {
    if let Some(first_name) = req.first_name {
        current.first_name = check_name("firstName", &first_name)?;
    }
    if let Some(last_name) = req.last_name {
        current.last_name = check_name("lastName", &last_name)?;
    }
    Ok(current)
}

pub fn new_enrollment(student_id: &str, course_id: &str, enrolled_at: NaiveDateTime) -> StudentCourse {
    StudentCourse {
        id: Uuid::new_v4().to_string(),
        student_id: student_id.to_string(),
        course_id: course_id.to_string(),
        enrolled_at,
    }
}
