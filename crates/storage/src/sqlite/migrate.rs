use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs a single, consolidated migration for the current schema.
///
/// Creates the full enrollment/completion schema: categories, courses,
/// enrolment methods, user enrolments, course completions, completion
/// criteria (with per-user fulfilment rows), tracked modules and module
/// completion rows, plus the indexes the dashboard queries rely on.
#[allow(clippy::too_many_lines)]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS course_categories (
                    id INTEGER PRIMARY KEY,
                    name TEXT NOT NULL
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS courses (
                    id INTEGER PRIMARY KEY,
                    fullname TEXT NOT NULL,
                    category INTEGER NOT NULL,
                    FOREIGN KEY (category) REFERENCES course_categories(id)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS enrol_methods (
                    id INTEGER PRIMARY KEY,
                    course_id INTEGER NOT NULL,
                    FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        // status 0 = active, anything else suspended.
        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS user_enrolments (
                    id INTEGER PRIMARY KEY,
                    enrol_id INTEGER NOT NULL,
                    user_id INTEGER NOT NULL,
                    status INTEGER NOT NULL DEFAULT 0,
                    UNIQUE (enrol_id, user_id),
                    FOREIGN KEY (enrol_id) REFERENCES enrol_methods(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS course_completions (
                    id INTEGER PRIMARY KEY,
                    course_id INTEGER NOT NULL,
                    user_id INTEGER NOT NULL,
                    time_started TEXT,
                    time_completed TEXT,
                    UNIQUE (course_id, user_id),
                    FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS course_completion_criteria (
                    id INTEGER PRIMARY KEY,
                    course_id INTEGER NOT NULL,
                    FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS course_completion_crit_compl (
                    id INTEGER PRIMARY KEY,
                    course_id INTEGER NOT NULL,
                    user_id INTEGER NOT NULL,
                    criteria_id INTEGER NOT NULL,
                    time_completed TEXT,
                    UNIQUE (criteria_id, user_id),
                    FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE,
                    FOREIGN KEY (criteria_id) REFERENCES course_completion_criteria(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        // completion 1 = the module reports per-user completion.
        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS course_modules (
                    id INTEGER PRIMARY KEY,
                    course_id INTEGER NOT NULL,
                    completion INTEGER NOT NULL DEFAULT 0,
                    FOREIGN KEY (course_id) REFERENCES courses(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS course_modules_completion (
                    id INTEGER PRIMARY KEY,
                    module_id INTEGER NOT NULL,
                    user_id INTEGER NOT NULL,
                    UNIQUE (module_id, user_id),
                    FOREIGN KEY (module_id) REFERENCES course_modules(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_user_enrolments_user_status
                    ON user_enrolments (user_id, status);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_crit_compl_course_user
                    ON course_completion_crit_compl (course_id, user_id);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_course_modules_course_completion
                    ON course_modules (course_id, completion);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
