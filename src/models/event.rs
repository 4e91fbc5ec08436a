use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::schedule::DaySet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Course,
    Assignment,
    Exam,
}

/// One entry on the front-end calendar. Derived on every request, never stored.
///
/// Besides the common calendar fields, each kind carries its record's own
/// fields so the edit form can be filled from the event alone. Fields a kind
/// does not have are left out of the JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub course_id: String,
    pub filename: Option<String>,
    #[serde(rename = "has_file")]
    pub has_file: bool,

    // course
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_of_week: Option<DaySet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,

    // assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worth: Option<f64>,

    // exam
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl CalendarEvent {
    /// An event with only the common calendar fields set.
    pub fn new(
        kind: EventKind,
        id: &str,
        title: &str,
        course_id: &str,
        (start, end): (NaiveDateTime, NaiveDateTime),
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            start,
            end,
            all_day: false,
            kind,
            course_id: course_id.to_string(),
            filename: None,
            has_file: false,
            credits: None,
            days_of_week: None,
            start_date: None,
            end_date: None,
            start_time: None,
            end_time: None,
            description: None,
            worth: None,
            date: None,
            weight: None,
        }
    }
}
