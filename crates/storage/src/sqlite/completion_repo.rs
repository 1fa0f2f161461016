use mylearning_core::model::{CompletionCounts, CourseId, UserId};

use super::SqliteRepository;
use super::mapping::{id_to_i64, map_counts_row};
use crate::repository::{CompletionRepository, StorageError};

#[async_trait::async_trait]
impl CompletionRepository for SqliteRepository {
    async fn criteria_counts(
        &self,
        course: CourseId,
        user: UserId,
    ) -> Result<CompletionCounts, StorageError> {
        // Two scalar counts: criteria configured on the course, and the
        // user's fulfilment rows with a recorded completion timestamp.
        let row = sqlx::query(
            r"
            SELECT
                (SELECT COUNT(*)
                 FROM course_completion_criteria
                 WHERE course_id = ?1) AS total,
                (SELECT COUNT(*)
                 FROM course_completion_crit_compl
                 WHERE course_id = ?1
                   AND user_id = ?2
                   AND time_completed IS NOT NULL) AS completed
            ",
        )
        .bind(id_to_i64("course_id", course.value())?)
        .bind(id_to_i64("user_id", user.value())?)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        map_counts_row(&row)
    }

    async fn module_counts(
        &self,
        course: CourseId,
        user: UserId,
    ) -> Result<CompletionCounts, StorageError> {
        // Single aggregate over tracked modules outer-joined with the
        // user's completion rows. When the course has no tracked modules
        // both counts come back 0, which the percentage arithmetic treats
        // as 0% rather than a division error.
        let row = sqlx::query(
            r"
            SELECT
                COUNT(cmc.id) AS completed,
                COUNT(cm.id) AS total
            FROM course_modules cm
            LEFT OUTER JOIN course_modules_completion cmc
                ON cmc.module_id = cm.id
                AND cmc.user_id = ?2
            WHERE cm.course_id = ?1
              AND cm.completion = 1
            ",
        )
        .bind(id_to_i64("course_id", course.value())?)
        .bind(id_to_i64("user_id", user.value())?)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        map_counts_row(&row)
    }
}
