mod course;
mod ids;
mod progress;
mod record;
mod status;

pub use course::{CourseError, EnrolledCourse};
pub use ids::{CourseId, ParseIdError, UserId};
pub use progress::CompletionCounts;
pub use record::{CourseProgressRecord, course_view_url};
pub use status::CourseStatus;
