use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use mylearning_core::model::{CourseProgressRecord, UserId};
use storage::repository::{EnrollmentRepository, Storage};

use crate::error::DashboardError;
use crate::progress_service::ProgressService;

/// Template context for the "My Learning" widget.
///
/// This is the full outbound surface of the dashboard core: the renderer
/// maps it onto a template and owns everything visual. `show` is true iff
/// the user has at least one enrolled course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub user_id: UserId,
    pub show: bool,
    pub courses: Vec<CourseProgressRecord>,
}

/// Builds the per-user course list with progress and status.
///
/// Recomputes everything on every call: records are request-scoped and
/// never cached or persisted.
#[derive(Clone)]
pub struct DashboardService {
    enrollments: Arc<dyn EnrollmentRepository>,
    progress: ProgressService,
}

impl DashboardService {
    #[must_use]
    pub fn new(enrollments: Arc<dyn EnrollmentRepository>, progress: ProgressService) -> Self {
        Self {
            enrollments,
            progress,
        }
    }

    /// Wire the service against a `Storage` aggregate.
    #[must_use]
    pub fn from_storage(storage: &Storage) -> Self {
        Self::new(
            Arc::clone(&storage.enrollments),
            ProgressService::new(Arc::clone(&storage.completion)),
        )
    }

    /// One progress record per enrolled course, in store order.
    ///
    /// Per course: the computed percentage decides between NotStarted and
    /// InProgress, and a course-level completion timestamp overrides both
    /// with Completed at 100%. No pagination or filtering; the sequence
    /// may be empty.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` when the enrollment query or any progress
    /// computation fails; there are no partial results.
    pub async fn list_courses_for_user(
        &self,
        user: UserId,
    ) -> Result<Vec<CourseProgressRecord>, DashboardError> {
        let enrolled = self.enrollments.enrolled_courses(user).await?;

        let mut records = Vec::with_capacity(enrolled.len());
        for course in &enrolled {
            let percentage = self
                .progress
                .course_progress(course.course_id(), user)
                .await?;
            records.push(CourseProgressRecord::from_course(course, percentage));
        }

        debug!(user = %user, courses = records.len(), "built course list");
        Ok(records)
    }

    /// Full widget context for the renderer.
    ///
    /// # Errors
    ///
    /// Returns `DashboardError` when building the course list fails.
    pub async fn dashboard(&self, user: UserId) -> Result<DashboardView, DashboardError> {
        let courses = self.list_courses_for_user(user).await?;
        Ok(DashboardView {
            user_id: user,
            show: !courses.is_empty(),
            courses,
        })
    }
}
