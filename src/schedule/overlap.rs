use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::models::Course;
use crate::schedule::DaySet;

/// Closed interval test: sharing a single boundary date counts.
pub fn dates_overlap(a: &Course, b: &Course) -> bool {
    a.start_date <= b.end_date && a.end_date >= b.start_date
}

pub fn days_overlap(a: &Course, b: &Course) -> bool {
    a.days_of_week.intersects(&b.days_of_week)
}

/// Strict test: a session ending at 10:00 does not clash with one starting at 10:00.
pub fn times_overlap(a: &Course, b: &Course) -> bool {
    a.start_time < b.end_time && a.end_time > b.start_time
}

/// Two weekly courses meet at the same moment exactly when their date ranges,
/// meeting days and daily time windows all intersect.
pub fn conflicts(candidate: &Course, existing: &Course) -> bool {
    dates_overlap(candidate, existing)
        && days_overlap(candidate, existing)
        && times_overlap(candidate, existing)
}

/// Returns the first course in `existing` that clashes with `candidate`.
///
/// The scan stops at the first hit, so callers control which course gets
/// reported through the iteration order they pass in.
pub fn check_overlap<'a, I>(candidate: &Course, existing: I) -> Option<&'a Course>
where
    I: IntoIterator<Item = &'a Course>,
{
    existing
        .into_iter()
        .find(|course| conflicts(candidate, course))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "This course conflicts with '{course_name}' (Dates: {start_date} to {end_date}, Days: {days_of_week}, Time: {start_time} to {end_time})"
)]
pub struct ScheduleConflict {
    pub course_id: String,
    pub course_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days_of_week: DaySet,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl From<&Course> for ScheduleConflict {
    fn from(course: &Course) -> Self {
        Self {
            course_id: course.id.clone(),
            course_name: course.course_name.clone(),
            start_date: course.start_date,
            end_date: course.end_date,
            days_of_week: course.days_of_week,
            start_time: course.start_time,
            end_time: course.end_time,
        }
    }
}
