use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::course::EnrolledCourse;
use crate::model::ids::CourseId;
use crate::model::status::CourseStatus;

/// Canonical link to a course page, built from its id.
#[must_use]
pub fn course_view_url(course_id: CourseId) -> String {
    format!("/course/view.php?id={course_id}")
}

//
// ─── COURSE PROGRESS RECORD ────────────────────────────────────────────────────
//

/// Presentation-agnostic dashboard entry for one enrolled course.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted timestamps
/// - no localization assumptions beyond the status label
///
/// Built fresh per render request and discarded afterwards; nothing here
/// is cached or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseProgressRecord {
    pub course_id: CourseId,
    pub title: String,
    pub category: String,
    pub time_started: Option<DateTime<Utc>>,
    pub time_completed: Option<DateTime<Utc>>,

    pub status: CourseStatus,
    pub status_label: &'static str,
    pub icon: &'static str,
    pub percentage: u8,
    pub link: String,
}

impl CourseProgressRecord {
    /// Builds the record for a course from its computed progress.
    ///
    /// The course-level completion timestamp overrides the computed
    /// percentage: a completed course always reports `Completed` at 100%.
    #[must_use]
    pub fn from_course(course: &EnrolledCourse, percentage: u8) -> Self {
        let status = CourseStatus::classify(percentage, course.is_completed());
        let percentage = if course.is_completed() { 100 } else { percentage };

        Self {
            course_id: course.course_id(),
            title: course.title().to_owned(),
            category: course.category().to_owned(),
            time_started: course.time_started(),
            time_completed: course.time_completed(),
            status,
            status_label: status.label(),
            icon: status.icon(),
            percentage,
            link: course_view_url(course.course_id()),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
