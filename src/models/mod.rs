pub mod assignment;
pub mod course;
pub mod event;
pub mod exam;
pub mod student;

pub use assignment::{Assignment, NewAssignmentRequest, UpdateAssignmentRequest};
pub use course::{Course, NewCourseRequest, UpdateCourseRequest};
pub use event::{CalendarEvent, EventKind};
pub use exam::{Exam, NewExamRequest, UpdateExamRequest};
pub use student::{
    CourseSummary, EnrollmentRequest, NewStudentRequest, Student, StudentCourse, StudentResponse,
    UpdateStudentRequest,
};
