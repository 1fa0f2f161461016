use chrono::{DateTime, Duration, Utc};
use mylearning_core::model::{CompletionCounts, CourseId, UserId};
use mylearning_core::time::fixed_now;
use sqlx::SqlitePool;
use storage::repository::{CompletionRepository, EnrollmentRepository};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

async fn insert_category(pool: &SqlitePool, id: i64, name: &str) {
    sqlx::query("INSERT INTO course_categories (id, name) VALUES (?1, ?2)")
        .bind(id)
        .bind(name)
        .execute(pool)
        .await
        .expect("insert category");
}

async fn insert_course(pool: &SqlitePool, id: i64, fullname: &str, category: i64) {
    sqlx::query("INSERT INTO courses (id, fullname, category) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(fullname)
        .bind(category)
        .execute(pool)
        .await
        .expect("insert course");
}

async fn enrol(pool: &SqlitePool, course_id: i64, user_id: i64, status: i64) {
    sqlx::query("INSERT OR IGNORE INTO enrol_methods (id, course_id) VALUES (?1, ?1)")
        .bind(course_id)
        .execute(pool)
        .await
        .expect("insert enrol method");
    sqlx::query("INSERT INTO user_enrolments (enrol_id, user_id, status) VALUES (?1, ?2, ?3)")
        .bind(course_id)
        .bind(user_id)
        .bind(status)
        .execute(pool)
        .await
        .expect("insert user enrolment");
}

async fn insert_completion(
    pool: &SqlitePool,
    course_id: i64,
    user_id: i64,
    time_started: Option<DateTime<Utc>>,
    time_completed: Option<DateTime<Utc>>,
) {
    sqlx::query(
        r"
        INSERT INTO course_completions (course_id, user_id, time_started, time_completed)
        VALUES (?1, ?2, ?3, ?4)
        ",
    )
    .bind(course_id)
    .bind(user_id)
    .bind(time_started)
    .bind(time_completed)
    .execute(pool)
    .await
    .expect("insert completion");
}

async fn insert_criterion(
    pool: &SqlitePool,
    id: i64,
    course_id: i64,
    fulfilled_by: Option<(i64, Option<DateTime<Utc>>)>,
) {
    sqlx::query("INSERT INTO course_completion_criteria (id, course_id) VALUES (?1, ?2)")
        .bind(id)
        .bind(course_id)
        .execute(pool)
        .await
        .expect("insert criterion");

    if let Some((user_id, time_completed)) = fulfilled_by {
        sqlx::query(
            r"
            INSERT INTO course_completion_crit_compl
                (course_id, user_id, criteria_id, time_completed)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(course_id)
        .bind(user_id)
        .bind(id)
        .bind(time_completed)
        .execute(pool)
        .await
        .expect("insert crit compl");
    }
}

async fn insert_module(
    pool: &SqlitePool,
    id: i64,
    course_id: i64,
    tracked: bool,
    completed_by: Option<i64>,
) {
    sqlx::query("INSERT INTO course_modules (id, course_id, completion) VALUES (?1, ?2, ?3)")
        .bind(id)
        .bind(course_id)
        .bind(i64::from(tracked))
        .execute(pool)
        .await
        .expect("insert module");

    if let Some(user_id) = completed_by {
        sqlx::query("INSERT INTO course_modules_completion (module_id, user_id) VALUES (?1, ?2)")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await
            .expect("insert module completion");
    }
}

#[tokio::test]
async fn enrolled_courses_joins_category_and_completion() {
    let repo = connect("memdb_enrolments").await;
    let pool = repo.pool();
    let now = fixed_now();

    insert_category(pool, 1, "Science").await;
    insert_course(pool, 10, "Algebra 101", 1).await;
    insert_course(pool, 11, "Biology Basics", 1).await;
    enrol(pool, 10, 1, 0).await;
    enrol(pool, 11, 1, 0).await;
    insert_completion(pool, 11, 1, Some(now - Duration::days(7)), Some(now)).await;

    let courses = repo.enrolled_courses(UserId::new(1)).await.expect("query");
    assert_eq!(courses.len(), 2);

    assert_eq!(courses[0].course_id(), CourseId::new(10));
    assert_eq!(courses[0].title(), "Algebra 101");
    assert_eq!(courses[0].category(), "Science");
    assert_eq!(courses[0].time_completed(), None);

    assert_eq!(courses[1].course_id(), CourseId::new(11));
    assert_eq!(courses[1].time_started(), Some(now - Duration::days(7)));
    assert_eq!(courses[1].time_completed(), Some(now));
    assert!(courses[1].is_completed());
}

#[tokio::test]
async fn enrolled_courses_skips_suspended_and_other_users() {
    let repo = connect("memdb_enrolment_filter").await;
    let pool = repo.pool();

    insert_category(pool, 1, "Science").await;
    insert_course(pool, 10, "Algebra 101", 1).await;
    insert_course(pool, 11, "Biology Basics", 1).await;
    insert_course(pool, 12, "Chemistry", 1).await;
    enrol(pool, 10, 1, 0).await;
    enrol(pool, 11, 1, 1).await; // suspended
    enrol(pool, 12, 2, 0).await; // someone else

    let courses = repo.enrolled_courses(UserId::new(1)).await.expect("query");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].course_id(), CourseId::new(10));

    let none = repo.enrolled_courses(UserId::new(99)).await.expect("query");
    assert!(none.is_empty());
}

#[tokio::test]
async fn multiple_enrol_methods_yield_one_record_per_course() {
    let repo = connect("memdb_enrol_methods").await;
    let pool = repo.pool();

    insert_category(pool, 1, "Science").await;
    insert_course(pool, 10, "Algebra 101", 1).await;

    // Same course reachable through two enrolment methods (e.g. manual
    // and self enrolment), user actively enrolled in both.
    for method_id in [50_i64, 51] {
        sqlx::query("INSERT INTO enrol_methods (id, course_id) VALUES (?1, 10)")
            .bind(method_id)
            .execute(pool)
            .await
            .expect("insert enrol method");
        sqlx::query("INSERT INTO user_enrolments (enrol_id, user_id, status) VALUES (?1, 1, 0)")
            .bind(method_id)
            .execute(pool)
            .await
            .expect("insert user enrolment");
    }

    let courses = repo.enrolled_courses(UserId::new(1)).await.expect("query");
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].course_id(), CourseId::new(10));
}

#[tokio::test]
async fn criteria_counts_require_completion_timestamp() {
    let repo = connect("memdb_criteria").await;
    let pool = repo.pool();
    let now = fixed_now();

    insert_category(pool, 1, "Science").await;
    insert_course(pool, 10, "Algebra 101", 1).await;
    insert_criterion(pool, 100, 10, Some((1, Some(now)))).await;
    insert_criterion(pool, 101, 10, Some((1, None))).await; // started, never finished
    insert_criterion(pool, 102, 10, None).await;

    let counts = repo
        .criteria_counts(CourseId::new(10), UserId::new(1))
        .await
        .expect("query");
    assert_eq!(counts, CompletionCounts::new(1, 3));

    // Another user shares the totals but none of the fulfilments.
    let counts = repo
        .criteria_counts(CourseId::new(10), UserId::new(2))
        .await
        .expect("query");
    assert_eq!(counts, CompletionCounts::new(0, 3));
}

#[tokio::test]
async fn criteria_counts_zero_when_course_has_none() {
    let repo = connect("memdb_no_criteria").await;
    let pool = repo.pool();

    insert_category(pool, 1, "Science").await;
    insert_course(pool, 10, "Algebra 101", 1).await;

    let counts = repo
        .criteria_counts(CourseId::new(10), UserId::new(1))
        .await
        .expect("query");
    assert!(counts.is_empty());
    assert_eq!(counts.percent(), 0);
}

#[tokio::test]
async fn module_counts_only_consider_tracked_modules() {
    let repo = connect("memdb_modules").await;
    let pool = repo.pool();

    insert_category(pool, 1, "Science").await;
    insert_course(pool, 10, "Algebra 101", 1).await;
    insert_module(pool, 200, 10, true, Some(1)).await;
    insert_module(pool, 201, 10, true, None).await;
    insert_module(pool, 202, 10, false, Some(1)).await; // untracked, ignored

    let counts = repo
        .module_counts(CourseId::new(10), UserId::new(1))
        .await
        .expect("query");
    assert_eq!(counts, CompletionCounts::new(1, 2));
}

#[tokio::test]
async fn module_counts_zero_rows_yield_empty_counts() {
    let repo = connect("memdb_no_modules").await;
    let pool = repo.pool();

    insert_category(pool, 1, "Science").await;
    insert_course(pool, 10, "Algebra 101", 1).await;

    // No tracked modules at all: the aggregate must come back {0, 0}
    // rather than failing, and the percentage is a defined 0.
    let counts = repo
        .module_counts(CourseId::new(10), UserId::new(1))
        .await
        .expect("query");
    assert_eq!(counts, CompletionCounts::new(0, 0));
    assert_eq!(counts.percent(), 0);
}
