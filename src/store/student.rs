//! Student record store

use sqlx::SqliteConnection;

use super::errors::StoreResult;
use super::models::{NewStudent, Student};

/// Persistence gateway for the `student` table
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentStore;

impl StudentStore {
    pub fn new() -> Self {
        Self
    }

    /// All students ordered by id
    pub async fn find_all(&self, conn: &mut SqliteConnection) -> StoreResult<Vec<Student>> {
        let students = sqlx::query_as::<_, Student>(
            "SELECT id, firstname, lastname, email_address FROM student ORDER BY id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(students)
    }

    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> StoreResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, firstname, lastname, email_address FROM student WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(student)
    }

    /// First student (lowest id) with the given email address
    pub async fn find_by_email(
        &self,
        conn: &mut SqliteConnection,
        email_address: &str,
    ) -> StoreResult<Option<Student>> {
        let student = sqlx::query_as::<_, Student>(
            "SELECT id, firstname, lastname, email_address FROM student \
             WHERE email_address = ? ORDER BY id LIMIT 1",
        )
        .bind(email_address)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(student)
    }

    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> StoreResult<bool> {
        let found: Option<i64> = sqlx::query_scalar("SELECT id FROM student WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(found.is_some())
    }

    /// Insert a student and return it with its assigned id
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        new: &NewStudent,
    ) -> StoreResult<Student> {
        let result = sqlx::query(
            "INSERT INTO student (firstname, lastname, email_address) VALUES (?, ?, ?)",
        )
        .bind(&new.firstname)
        .bind(&new.lastname)
        .bind(&new.email_address)
        .execute(&mut *conn)
        .await?;

        Ok(Student {
            id: result.last_insert_rowid(),
            firstname: new.firstname.clone(),
            lastname: new.lastname.clone(),
            email_address: new.email_address.clone(),
        })
    }

    /// Delete a student row. Returns false when no row matched.
    ///
    /// Grades are not touched; callers remove them first.
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM student WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
