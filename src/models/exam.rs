use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: String,
    pub title: String,
    pub date_of: NaiveDate,
    pub weight: f64,
    pub course_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExamRequest {
    pub title: String,
    pub date_of: String,
    pub weight: f64,
    pub course_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExamRequest {
    pub title: Option<String>,
    pub date_of: Option<String>,
    pub weight: Option<f64>,
    pub course_id: Option<String>,
}
