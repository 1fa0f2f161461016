use async_trait::async_trait;
use mylearning_core::model::{CompletionCounts, CourseId, EnrolledCourse, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for enrollment queries.
///
/// All queries are read-only; this component never writes enrollment or
/// completion data.
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Fetch every course the user is enrolled in through an active
    /// enrollment, joined with category name and the optional
    /// course-level completion row.
    ///
    /// The returned order is the store's iteration order; callers must
    /// preserve it.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn enrolled_courses(&self, user: UserId) -> Result<Vec<EnrolledCourse>, StorageError>;
}

/// Repository contract for completion count queries.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Count completion criteria configured on the course and how many of
    /// them the user has completed (completion timestamp recorded).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn criteria_counts(
        &self,
        course: CourseId,
        user: UserId,
    ) -> Result<CompletionCounts, StorageError>;

    /// Count completion-tracked modules in the course and how many carry
    /// a completion record for the user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the query fails.
    async fn module_counts(
        &self,
        course: CourseId,
        user: UserId,
    ) -> Result<CompletionCounts, StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    enrollments: Arc<Mutex<HashMap<UserId, Vec<EnrolledCourse>>>>,
    criteria_totals: Arc<Mutex<HashMap<CourseId, u64>>>,
    criteria_completed: Arc<Mutex<HashMap<(CourseId, UserId), u64>>>,
    module_totals: Arc<Mutex<HashMap<CourseId, u64>>>,
    module_completed: Arc<Mutex<HashMap<(CourseId, UserId), u64>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an enrollment; insertion order per user is preserved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn record_enrollment(
        &self,
        user: UserId,
        course: EnrolledCourse,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .enrollments
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.entry(user).or_default().push(course);
        Ok(())
    }

    /// Set the criteria counts reported for a course/user pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if a lock is poisoned.
    pub fn set_criteria(
        &self,
        course: CourseId,
        user: UserId,
        completed: u64,
        total: u64,
    ) -> Result<(), StorageError> {
        self.criteria_totals
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .insert(course, total);
        self.criteria_completed
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .insert((course, user), completed);
        Ok(())
    }

    /// Set the tracked-module counts reported for a course/user pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if a lock is poisoned.
    pub fn set_modules(
        &self,
        course: CourseId,
        user: UserId,
        completed: u64,
        total: u64,
    ) -> Result<(), StorageError> {
        self.module_totals
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .insert(course, total);
        self.module_completed
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?
            .insert((course, user), completed);
        Ok(())
    }
}

fn counts_from_maps(
    totals: &Mutex<HashMap<CourseId, u64>>,
    completed: &Mutex<HashMap<(CourseId, UserId), u64>>,
    course: CourseId,
    user: UserId,
) -> Result<CompletionCounts, StorageError> {
    let total = *totals
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .get(&course)
        .unwrap_or(&0);
    let completed = *completed
        .lock()
        .map_err(|e| StorageError::Connection(e.to_string()))?
        .get(&(course, user))
        .unwrap_or(&0);
    Ok(CompletionCounts::new(completed, total))
}

#[async_trait]
impl EnrollmentRepository for InMemoryRepository {
    async fn enrolled_courses(&self, user: UserId) -> Result<Vec<EnrolledCourse>, StorageError> {
        let guard = self
            .enrollments
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&user).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn criteria_counts(
        &self,
        course: CourseId,
        user: UserId,
    ) -> Result<CompletionCounts, StorageError> {
        counts_from_maps(&self.criteria_totals, &self.criteria_completed, course, user)
    }

    async fn module_counts(
        &self,
        course: CourseId,
        user: UserId,
    ) -> Result<CompletionCounts, StorageError> {
        counts_from_maps(&self.module_totals, &self.module_completed, course, user)
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub enrollments: Arc<dyn EnrollmentRepository>,
    pub completion: Arc<dyn CompletionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let enrollments: Arc<dyn EnrollmentRepository> = Arc::new(repo.clone());
        let completion: Arc<dyn CompletionRepository> = Arc::new(repo);
        Self {
            enrollments,
            completion,
        }
    }
}
