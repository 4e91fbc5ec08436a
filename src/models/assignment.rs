use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub assignment_title: String,
    pub description: Option<String>,
    pub course_id: String,
    pub due_date: NaiveDate,
    pub due_time: NaiveTime,
    pub worth: Option<f64>,
    pub filename: Option<String>,
    #[serde(skip_serializing, default)]
    pub file_path: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignmentRequest {
    pub assignment_title: String,
    pub description: Option<String>,
    pub course_id: String,
    pub due_date: String,
    pub due_time: String,
    pub worth: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    pub assignment_title: Option<String>,
    pub description: Option<String>,
    pub course_id: Option<String>,
    pub due_date: Option<String>,
    pub due_time: Option<String>,
    pub worth: Option<f64>,
}
