use std::sync::Arc;

use mylearning_core::model::{CourseId, UserId};
use storage::repository::CompletionRepository;

use crate::error::ProgressError;

/// The two sources a completion percentage can be computed from, in
/// strict priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    /// Explicit completion criteria configured on the course.
    Criteria,
    /// Completion-tracked activities/modules.
    Activity,
}

/// First applicable tier wins; a tier with zero eligible units does not
/// apply and falls through to the next one.
const TIERS: [Tier; 2] = [Tier::Criteria, Tier::Activity];

/// Computes per-course completion percentages for a user.
///
/// Read-only against the store; a query failure propagates unchanged,
/// with no retries and no partial results.
#[derive(Clone)]
pub struct ProgressService {
    completion: Arc<dyn CompletionRepository>,
}

impl ProgressService {
    #[must_use]
    pub fn new(completion: Arc<dyn CompletionRepository>) -> Self {
        Self { completion }
    }

    /// Completion percentage in `[0, 100]` for the course/user pair.
    ///
    /// Criteria take priority whenever any exist, even when the result is
    /// 0%. Courses with neither criteria nor tracked activities report 0.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` when a count query fails.
    pub async fn course_progress(
        &self,
        course: CourseId,
        user: UserId,
    ) -> Result<u8, ProgressError> {
        for tier in TIERS {
            if let Some(percent) = self.tier_progress(tier, course, user).await? {
                return Ok(percent);
            }
        }
        Ok(0)
    }

    /// Percentage for one tier, or `None` when the tier does not apply.
    async fn tier_progress(
        &self,
        tier: Tier,
        course: CourseId,
        user: UserId,
    ) -> Result<Option<u8>, ProgressError> {
        let counts = match tier {
            Tier::Criteria => self.completion.criteria_counts(course, user).await?,
            Tier::Activity => self.completion.module_counts(course, user).await?,
        };
        Ok((!counts.is_empty()).then(|| counts.percent()))
    }
}
