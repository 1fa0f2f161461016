use mylearning_core::model::{CompletionCounts, CourseId, EnrolledCourse};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn course_id_from_i64(v: i64) -> Result<CourseId, StorageError> {
    Ok(CourseId::new(i64_to_u64("course_id", v)?))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn map_enrolled_course_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<EnrolledCourse, StorageError> {
    EnrolledCourse::new(
        course_id_from_i64(row.try_get::<i64, _>("course_id").map_err(ser)?)?,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("category").map_err(ser)?,
        row.try_get("time_started").map_err(ser)?,
        row.try_get("time_completed").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_counts_row(
    row: &sqlx::sqlite::SqliteRow,
) -> Result<CompletionCounts, StorageError> {
    let completed = i64_to_u64(
        "completed",
        row.try_get::<i64, _>("completed").map_err(ser)?,
    )?;
    let total = i64_to_u64("total", row.try_get::<i64, _>("total").map_err(ser)?)?;
    Ok(CompletionCounts::new(completed, total))
}
