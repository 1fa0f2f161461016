use std::fmt;

use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;
use storage::sqlite::SqliteRepository;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    user_id: u64,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidUserId { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidUserId { raw } => write!(f, "invalid --user-id value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("MYLEARNING_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut user_id = std::env::var("MYLEARNING_USER_ID")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(1);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--user-id" => {
                    let value = require_value(&mut args, "--user-id")?;
                    user_id = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidUserId { raw: value })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value })?;
                    now = Some(parsed.with_timezone(&Utc));
                }
                "-h" | "--help" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => return Err(ArgsError::UnknownArg(other.to_string())),
            }
        }

        Ok(Self {
            db_url,
            user_id,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --user-id <id>            User to enrol in the demo courses (default: 1)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  MYLEARNING_DB_URL, MYLEARNING_USER_ID");
}

struct DemoCourse {
    id: i64,
    fullname: &'static str,
    category_id: i64,
    criteria: u32,
    criteria_completed: u32,
    tracked_modules: u32,
    modules_completed: u32,
    completed: bool,
}

// Three courses mirroring the canonical dashboard states: one in
// progress through criteria, one completed through activities, one
// untouched.
const DEMO_COURSES: [DemoCourse; 3] = [
    DemoCourse {
        id: 1,
        fullname: "Algebra 101",
        category_id: 1,
        criteria: 3,
        criteria_completed: 1,
        tracked_modules: 0,
        modules_completed: 0,
        completed: false,
    },
    DemoCourse {
        id: 2,
        fullname: "Biology Basics",
        category_id: 1,
        criteria: 0,
        criteria_completed: 0,
        tracked_modules: 4,
        modules_completed: 4,
        completed: true,
    },
    DemoCourse {
        id: 3,
        fullname: "History Intro",
        category_id: 2,
        criteria: 0,
        criteria_completed: 0,
        tracked_modules: 0,
        modules_completed: 0,
        completed: false,
    },
];

async fn seed_categories(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for (id, name) in [(1_i64, "Science"), (2_i64, "Humanities")] {
        sqlx::query("INSERT OR IGNORE INTO course_categories (id, name) VALUES (?1, ?2)")
            .bind(id)
            .bind(name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn seed_course(
    pool: &SqlitePool,
    course: &DemoCourse,
    user_id: i64,
    now: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT OR IGNORE INTO courses (id, fullname, category) VALUES (?1, ?2, ?3)")
        .bind(course.id)
        .bind(course.fullname)
        .bind(course.category_id)
        .execute(pool)
        .await?;

    sqlx::query("INSERT OR IGNORE INTO enrol_methods (id, course_id) VALUES (?1, ?1)")
        .bind(course.id)
        .execute(pool)
        .await?;

    sqlx::query(
        "INSERT OR IGNORE INTO user_enrolments (enrol_id, user_id, status) VALUES (?1, ?2, 0)",
    )
    .bind(course.id)
    .bind(user_id)
    .execute(pool)
    .await?;

    for i in 0..course.criteria {
        let criteria_id = course.id * 100 + i64::from(i);
        sqlx::query(
            "INSERT OR IGNORE INTO course_completion_criteria (id, course_id) VALUES (?1, ?2)",
        )
        .bind(criteria_id)
        .bind(course.id)
        .execute(pool)
        .await?;

        if i < course.criteria_completed {
            sqlx::query(
                r"
                INSERT OR IGNORE INTO course_completion_crit_compl
                    (course_id, user_id, criteria_id, time_completed)
                VALUES (?1, ?2, ?3, ?4)
                ",
            )
            .bind(course.id)
            .bind(user_id)
            .bind(criteria_id)
            .bind(now - Duration::days(i64::from(i) + 1))
            .execute(pool)
            .await?;
        }
    }

    for i in 0..course.tracked_modules {
        let module_id = course.id * 100 + i64::from(i);
        sqlx::query(
            "INSERT OR IGNORE INTO course_modules (id, course_id, completion) VALUES (?1, ?2, 1)",
        )
        .bind(module_id)
        .bind(course.id)
        .execute(pool)
        .await?;

        if i < course.modules_completed {
            sqlx::query(
                "INSERT OR IGNORE INTO course_modules_completion (module_id, user_id) VALUES (?1, ?2)",
            )
            .bind(module_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        }
    }

    // Untouched courses get no completion row at all, so they render as
    // NotStarted rather than started-but-idle.
    let has_activity =
        course.completed || course.criteria_completed > 0 || course.modules_completed > 0;
    if has_activity {
        let time_completed = course.completed.then(|| now - Duration::days(1));
        sqlx::query(
            r"
            INSERT OR IGNORE INTO course_completions
                (course_id, user_id, time_started, time_completed)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(course.id)
        .bind(user_id)
        .bind(now - Duration::days(7))
        .bind(time_completed)
        .execute(pool)
        .await?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let repo = SqliteRepository::connect(&args.db_url).await?;
    repo.migrate().await?;
    let now = args.now.unwrap_or_else(Utc::now);
    let user_id = i64::try_from(args.user_id)?;

    seed_categories(repo.pool()).await?;
    for course in &DEMO_COURSES {
        seed_course(repo.pool(), course, user_id, now).await?;
    }

    println!(
        "Seeded {} demo courses for user {} into {}",
        DEMO_COURSES.len(),
        args.user_id,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
