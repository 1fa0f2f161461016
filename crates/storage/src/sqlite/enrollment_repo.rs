use mylearning_core::model::{EnrolledCourse, UserId};

use super::SqliteRepository;
use super::mapping::{id_to_i64, map_enrolled_course_row};
use crate::repository::{EnrollmentRepository, StorageError};

#[async_trait::async_trait]
impl EnrollmentRepository for SqliteRepository {
    async fn enrolled_courses(&self, user: UserId) -> Result<Vec<EnrolledCourse>, StorageError> {
        // Active enrolments only (status 0). The completion row is outer
        // joined: most courses have none. No ORDER BY, so the sequence is
        // the store's iteration order. DISTINCT collapses a user enrolled
        // in the same course through several enrolment methods into one
        // row; the joined columns are identical for each method.
        let rows = sqlx::query(
            r"
            SELECT DISTINCT
                c.id AS course_id,
                c.fullname AS title,
                cat.name AS category,
                cc.time_started,
                cc.time_completed
            FROM enrol_methods e
            INNER JOIN user_enrolments ue ON ue.enrol_id = e.id
            INNER JOIN courses c ON c.id = e.course_id
            INNER JOIN course_categories cat ON cat.id = c.category
            LEFT OUTER JOIN course_completions cc
                ON cc.course_id = e.course_id
                AND cc.user_id = ue.user_id
            WHERE ue.user_id = ?1
              AND ue.status = 0
            ",
        )
        .bind(id_to_i64("user_id", user.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut courses = Vec::with_capacity(rows.len());
        for row in rows {
            courses.push(map_enrolled_course_row(&row)?);
        }
        Ok(courses)
    }
}
