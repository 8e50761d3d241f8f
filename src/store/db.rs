//! Pool setup, schema migration and fixture loading

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::{debug, info};

use super::errors::StoreResult;
use super::grade::GradeStore;
use super::models::{NewStudent, Student, Subject};
use super::student::StudentStore;

/// Embedded schema migrations
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// URL of a private in-memory database
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Fixture grade value inserted for each subject by [`seed`]
pub const SEED_GRADE: f64 = 100.00;

/// How long a writer waits for the database lock before failing
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Open a connection pool for `url`
///
/// In-memory databases live only as long as their connection, so they get a
/// single connection that is never reaped. File databases run in WAL mode so
/// readers never block the single writer.
pub async fn connect(url: &str, max_connections: u32) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    let (options, pool_options) = if is_in_memory(url) {
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        (options, pool_options)
    } else {
        let options = options.journal_mode(SqliteJournalMode::Wal);
        (options, SqlitePoolOptions::new().max_connections(max_connections))
    };

    let pool = pool_options.connect_with(options).await?;
    debug!(url, "database pool opened");
    Ok(pool)
}

/// Open a write transaction
///
/// `BEGIN IMMEDIATE` takes the write lock up front. A deferred transaction
/// that reads first and writes later can fail on lock upgrade with
/// `SQLITE_BUSY` without ever waiting on the busy timeout.
pub async fn begin_write(pool: &SqlitePool) -> sqlx::Result<Transaction<'static, Sqlite>> {
    pool.begin_with("BEGIN IMMEDIATE").await
}

/// Create or upgrade the schema
pub async fn init_db(pool: &SqlitePool) -> StoreResult<()> {
    MIGRATOR.run(pool).await?;
    info!("schema ready");
    Ok(())
}

/// Fresh, migrated in-memory database
pub async fn connect_in_memory() -> StoreResult<SqlitePool> {
    let pool = connect(IN_MEMORY_URL, 1).await?;
    init_db(&pool).await?;
    Ok(pool)
}

/// The fixture student inserted by [`seed`]
pub fn seed_student() -> NewStudent {
    NewStudent::new("Eric", "Roby", "eric.roby@luv2code_school.com")
}

/// Load the fixture student with one grade per subject
///
/// Idempotent: when a student with the fixture email already exists it is
/// returned unchanged and nothing is inserted.
pub async fn seed(pool: &SqlitePool) -> StoreResult<Student> {
    let fixture = seed_student();
    let students = StudentStore::new();
    let mut tx = begin_write(pool).await?;

    if let Some(existing) = students.find_by_email(&mut tx, &fixture.email_address).await? {
        tx.commit().await?;
        info!(student_id = existing.id, "seed data already present");
        return Ok(existing);
    }

    let student = students.insert(&mut tx, &fixture).await?;
    for subject in Subject::ALL {
        GradeStore::new(subject)
            .insert(&mut tx, student.id, SEED_GRADE)
            .await?;
    }
    tx.commit().await?;

    info!(student_id = student.id, "seed data inserted");
    Ok(student)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory(IN_MEMORY_URL));
        assert!(is_in_memory("sqlite:file:gradebook?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://gradebook.db?mode=rwc"));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = connect_in_memory().await.unwrap();

        let first = seed(&pool).await.unwrap();
        let second = seed(&pool).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.id, 1);

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(StudentStore::new().find_all(&mut conn).await.unwrap().len(), 1);
        for subject in Subject::ALL {
            let grades = GradeStore::new(subject)
                .find_by_student(&mut conn, first.id)
                .await
                .unwrap();
            assert_eq!(grades.len(), 1);
            assert_eq!(grades[0].id, 1);
        }
    }

    #[tokio::test]
    async fn test_migrations_are_rerunnable() {
        let pool = connect_in_memory().await.unwrap();
        init_db(&pool).await.unwrap();
    }
}
