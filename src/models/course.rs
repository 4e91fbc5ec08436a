use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::schedule::DaySet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub course_name: String,
    pub credits: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub days_of_week: DaySet,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub filename: Option<String>,
    #[serde(skip_serializing, default)]
    pub file_path: Option<String>,
    pub content_type: Option<String>,
}

impl Course {
    pub fn has_file(&self) -> bool {
        self.file_path.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub course_name: String,
    pub credits: i32,
    pub start_date: String,
    pub end_date: String,
    pub days_of_week: String,
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub course_name: Option<String>,
    pub credits: Option<i32>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub days_of_week: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}
