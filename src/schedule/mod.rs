//! Weekly course schedules: expanding a course into calendar events and
//! detecting when two courses would meet at the same time.

pub mod days;
pub mod expand;
pub mod format;
pub mod overlap;

pub use days::{DaySet, DayTag, UnknownDayTag};
pub use expand::{CourseEvents, expand};
pub use format::{all_events, assignment_event, exam_event, upcoming};
pub use overlap::{ScheduleConflict, check_overlap, conflicts};
