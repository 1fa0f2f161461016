use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::CourseId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error("course category cannot be empty")]
    EmptyCategory,
}

//
// ─── ENROLLED COURSE ───────────────────────────────────────────────────────────
//

/// Snapshot of one course the user is enrolled in.
///
/// Produced by the enrollment query: course metadata joined with the
/// category name and the optional course-level completion row. Immutable
/// once built; this component never writes it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    course_id: CourseId,
    title: String,
    category: String,
    time_started: Option<DateTime<Utc>>,
    time_completed: Option<DateTime<Utc>>,
}

impl EnrolledCourse {
    /// Creates a new `EnrolledCourse` snapshot.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` or `CourseError::EmptyCategory`
    /// if the respective field is empty or whitespace-only.
    pub fn new(
        course_id: CourseId,
        title: impl Into<String>,
        category: impl Into<String>,
        time_started: Option<DateTime<Utc>>,
        time_completed: Option<DateTime<Utc>>,
    ) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::EmptyTitle);
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(CourseError::EmptyCategory);
        }

        Ok(Self {
            course_id,
            title: title.trim().to_owned(),
            category: category.trim().to_owned(),
            time_started,
            time_completed,
        })
    }

    // Accessors
    #[must_use]
    pub fn course_id(&self) -> CourseId {
        self.course_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn time_started(&self) -> Option<DateTime<Utc>> {
        self.time_started
    }

    #[must_use]
    pub fn time_completed(&self) -> Option<DateTime<Utc>> {
        self.time_completed
    }

    /// True when the platform has recorded a course-level completion.
    ///
    /// Set by a separate completion-tracking subsystem; it always wins
    /// over any percentage computed from criteria or activities.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.time_completed.is_some()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
