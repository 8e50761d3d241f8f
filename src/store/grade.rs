//! Grade record stores

use sqlx::SqliteConnection;

use super::errors::StoreResult;
use super::models::{Grade, Subject};

/// Persistence gateway for one subject's grade table
///
/// The table name comes from [`Subject::table`], never from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeStore {
    subject: Subject,
}

impl GradeStore {
    pub fn new(subject: Subject) -> Self {
        Self { subject }
    }

    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> StoreResult<Option<Grade>> {
        let sql = format!(
            "SELECT id, student_id, grade FROM {} WHERE id = ?",
            self.subject.table()
        );
        let grade = sqlx::query_as::<_, Grade>(&sql)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(grade)
    }

    /// Grades owned by a student, ordered by id
    pub async fn find_by_student(
        &self,
        conn: &mut SqliteConnection,
        student_id: i64,
    ) -> StoreResult<Vec<Grade>> {
        let sql = format!(
            "SELECT id, student_id, grade FROM {} WHERE student_id = ? ORDER BY id",
            self.subject.table()
        );
        let grades = sqlx::query_as::<_, Grade>(&sql)
            .bind(student_id)
            .fetch_all(&mut *conn)
            .await?;
        Ok(grades)
    }

    pub async fn exists(&self, conn: &mut SqliteConnection, id: i64) -> StoreResult<bool> {
        Ok(self.find_by_id(conn, id).await?.is_some())
    }

    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        student_id: i64,
        grade: f64,
    ) -> StoreResult<Grade> {
        let sql = format!(
            "INSERT INTO {} (student_id, grade) VALUES (?, ?)",
            self.subject.table()
        );
        let result = sqlx::query(&sql)
            .bind(student_id)
            .bind(grade)
            .execute(&mut *conn)
            .await?;

        Ok(Grade {
            id: result.last_insert_rowid(),
            student_id,
            grade,
        })
    }

    /// Returns false when no row matched
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> StoreResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.subject.table());
        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every grade a student owns; returns the number removed
    pub async fn delete_by_student(
        &self,
        conn: &mut SqliteConnection,
        student_id: i64,
    ) -> StoreResult<u64> {
        let sql = format!("DELETE FROM {} WHERE student_id = ?", self.subject.table());
        let result = sqlx::query(&sql)
            .bind(student_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
