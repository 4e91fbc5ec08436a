use chrono::{Datelike, NaiveDate};

use crate::models::{CalendarEvent, Course, EventKind};

/// Lazily walks a course's date range one day at a time, yielding an event
/// for every date whose weekday is one of the course's meeting days.
///
/// Events come out in ascending date order. The walk has no side effects, so
/// calling [`expand`] again always yields the same sequence.
#[derive(Debug, Clone)]
pub struct CourseEvents<'a> {
    course: &'a Course,
    next: Option<NaiveDate>,
}

pub fn expand(course: &Course) -> CourseEvents<'_> {
    CourseEvents {
        course,
        next: Some(course.start_date),
    }
}

impl Iterator for CourseEvents<'_> {
    type Item = CalendarEvent;

    fn next(&mut self) -> Option<CalendarEvent> {
        loop {
            // An inverted range ends here on the first call.
            let date = self.next.filter(|d| *d <= self.course.end_date)?;
            self.next = date.succ_opt();

            if self.course.days_of_week.contains_weekday(date.weekday()) {
                return Some(session_event(self.course, date));
            }
        }
    }
}

fn session_event(course: &Course, date: NaiveDate) -> CalendarEvent {
    let window = (date.and_time(course.start_time), date.and_time(course.end_time));
    CalendarEvent {
        filename: course.filename.clone(),
        has_file: course.has_file(),
        credits: Some(course.credits),
        days_of_week: Some(course.days_of_week),
        start_date: Some(course.start_date),
        end_date: Some(course.end_date),
        start_time: Some(course.start_time),
        end_time: Some(course.end_time),
        ..CalendarEvent::new(EventKind::Course, &course.id, &course.course_name, &course.id, window)
    }
}
