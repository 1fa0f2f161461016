use std::sync::Arc;

use mylearning_core::model::{CourseId, CourseStatus, EnrolledCourse, UserId};
use mylearning_core::time::fixed_now;
use services::DashboardService;
use storage::repository::{InMemoryRepository, Storage};

fn storage_with(repo: &InMemoryRepository) -> Storage {
    Storage {
        enrollments: Arc::new(repo.clone()),
        completion: Arc::new(repo.clone()),
    }
}

#[tokio::test]
async fn dashboard_mixes_all_three_statuses() {
    let repo = InMemoryRepository::new();
    let user = UserId::new(7);

    // Course A: 3 criteria, 1 completed, no completion timestamp.
    repo.record_enrollment(
        user,
        EnrolledCourse::new(CourseId::new(1), "Course A", "Science", Some(fixed_now()), None)
            .unwrap(),
    )
    .unwrap();
    repo.set_criteria(CourseId::new(1), user, 1, 3).unwrap();

    // Course B: no criteria, 4 tracked modules all completed, completion
    // timestamp set.
    repo.record_enrollment(
        user,
        EnrolledCourse::new(
            CourseId::new(2),
            "Course B",
            "Science",
            Some(fixed_now()),
            Some(fixed_now()),
        )
        .unwrap(),
    )
    .unwrap();
    repo.set_modules(CourseId::new(2), user, 4, 4).unwrap();

    // Course C: nothing configured, nothing done.
    repo.record_enrollment(
        user,
        EnrolledCourse::new(CourseId::new(3), "Course C", "Humanities", None, None).unwrap(),
    )
    .unwrap();

    let service = DashboardService::from_storage(&storage_with(&repo));
    let view = service.dashboard(user).await.unwrap();

    assert!(view.show);
    assert_eq!(view.user_id, user);
    assert_eq!(view.courses.len(), 3);

    let a = &view.courses[0];
    assert_eq!(a.title, "Course A");
    assert_eq!(a.percentage, 33);
    assert_eq!(a.status, CourseStatus::InProgress);

    let b = &view.courses[1];
    assert_eq!(b.percentage, 100);
    assert_eq!(b.status, CourseStatus::Completed);
    assert_eq!(b.icon, "completed");

    let c = &view.courses[2];
    assert_eq!(c.percentage, 0);
    assert_eq!(c.status, CourseStatus::NotStarted);
    assert_eq!(c.link, "/course/view.php?id=3");
}

#[tokio::test]
async fn empty_enrollments_hide_the_widget() {
    let repo = InMemoryRepository::new();
    let service = DashboardService::from_storage(&storage_with(&repo));

    let view = service.dashboard(UserId::new(1)).await.unwrap();
    assert!(!view.show);
    assert!(view.courses.is_empty());
}
