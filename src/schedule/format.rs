use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::{Assignment, CalendarEvent, Course, EventKind, Exam};
use crate::schedule::expand;

const EXAM_START_HOUR: i64 = 9;
const EXAM_LENGTH_HOURS: i64 = 1;

/// Exams carry only a date, so they are shown in a fixed morning slot.
fn exam_window(date: NaiveDate) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(NaiveTime::MIN) + Duration::hours(EXAM_START_HOUR);
    (start, start + Duration::hours(EXAM_LENGTH_HOURS))
}

/// Assignments are a point in time: the event starts and ends at the deadline.
pub fn assignment_event(assignment: &Assignment) -> CalendarEvent {
    let due = assignment.due_date.and_time(assignment.due_time);
    CalendarEvent {
        filename: assignment.filename.clone(),
        has_file: assignment.file_path.is_some(),
        description: assignment.description.clone(),
        worth: assignment.worth,
        ..CalendarEvent::new(
            EventKind::Assignment,
            &assignment.id,
            &assignment.assignment_title,
            &assignment.course_id,
            (due, due),
        )
    }
}

pub fn exam_event(exam: &Exam) -> CalendarEvent {
    CalendarEvent {
        date: Some(exam.date_of),
        weight: Some(exam.weight),
        ..CalendarEvent::new(
            EventKind::Exam,
            &exam.id,
            &exam.title,
            &exam.course_id,
            exam_window(exam.date_of),
        )
    }
}

/// Every calendar entry: course sessions first, then assignments, then exams.
pub fn all_events(courses: &[Course], assignments: &[Assignment], exams: &[Exam]) -> Vec<CalendarEvent> {
    courses
        .iter()
        .flat_map(expand)
        .chain(assignments.iter().map(assignment_event))
        .chain(exams.iter().map(exam_event))
        .collect()
}

/// Events starting within `[now, now + horizon]`, soonest first.
pub fn upcoming<I>(events: I, now: NaiveDateTime, horizon: Duration) -> Vec<CalendarEvent>
where
    I: IntoIterator<Item = CalendarEvent>,
{
    let until = now.checked_add_signed(horizon).unwrap_or(NaiveDateTime::MAX);
    let mut soon: Vec<CalendarEvent> = events
        .into_iter()
        .filter(|e| e.start >= now && e.start <= until)
        .collect();
    soon.sort_by_key(|e| e.start);
    soon
}
