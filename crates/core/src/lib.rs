#![forbid(unsafe_code)]

pub mod model;
pub mod time;

pub use model::{
    CompletionCounts, CourseError, CourseId, CourseProgressRecord, CourseStatus, EnrolledCourse,
    ParseIdError, UserId,
};
