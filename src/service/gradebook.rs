//! Gradebook service

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::store::{db, GradeStore, NewStudent, Student, StudentStore, Subject};

use super::errors::{ServiceError, ServiceResult};
use super::profile::{StudentGrades, StudentProfile};

/// Orchestrates student and grade operations
///
/// Each mutating operation runs in one transaction.
#[derive(Debug, Clone)]
pub struct GradebookService {
    pool: SqlitePool,
    students: StudentStore,
}

impl GradebookService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            students: StudentStore::new(),
        }
    }

    fn grades(&self, subject: Subject) -> GradeStore {
        GradeStore::new(subject)
    }

    /// All students ordered by id
    pub async fn list_students(&self) -> ServiceResult<Vec<Student>> {
        let mut conn = self.pool.acquire().await?;
        Ok(self.students.find_all(&mut conn).await?)
    }

    /// Persist a new student. Duplicate email addresses are accepted.
    pub async fn create_student(&self, new: NewStudent) -> ServiceResult<()> {
        let mut conn = self.pool.acquire().await?;
        let student = self.students.insert(&mut conn, &new).await?;
        info!(student_id = student.id, "student created");
        Ok(())
    }

    /// Delete a student together with all of its grades
    pub async fn delete_student(&self, id: i64) -> ServiceResult<()> {
        let mut tx = db::begin_write(&self.pool).await?;

        if !self.students.exists(&mut tx, id).await? {
            debug!(student_id = id, "delete of missing student");
            return Err(ServiceError::NotFound);
        }

        let mut removed = 0;
        for subject in Subject::ALL {
            removed += self.grades(subject).delete_by_student(&mut tx, id).await?;
        }
        self.students.delete(&mut tx, id).await?;
        tx.commit().await?;

        info!(student_id = id, grades_removed = removed, "student deleted");
        Ok(())
    }

    pub async fn student_profile(&self, id: i64) -> ServiceResult<StudentProfile> {
        let mut conn = self.pool.acquire().await?;
        self.load_profile(&mut conn, id).await
    }

    /// Add a grade and return the refreshed profile of its student
    pub async fn create_grade(
        &self,
        student_id: i64,
        grade_type: &str,
        grade: f64,
    ) -> ServiceResult<StudentProfile> {
        let subject: Subject = grade_type.parse().map_err(|_| {
            debug!(grade_type, "create of grade with unknown type");
            ServiceError::NotFound
        })?;

        let mut tx = db::begin_write(&self.pool).await?;
        if !self.students.exists(&mut tx, student_id).await? {
            debug!(student_id, "create of grade for missing student");
            return Err(ServiceError::NotFound);
        }

        let created = self.grades(subject).insert(&mut tx, student_id, grade).await?;
        let profile = self.load_profile(&mut tx, student_id).await?;
        tx.commit().await?;

        info!(
            grade_id = created.id,
            student_id,
            subject = %subject,
            "grade created"
        );
        Ok(profile)
    }

    /// Delete a grade and return the refreshed profile of its owner
    pub async fn delete_grade(&self, id: i64, grade_type: &str) -> ServiceResult<StudentProfile> {
        let subject: Subject = grade_type.parse().map_err(|_| {
            debug!(grade_type, "delete of grade with unknown type");
            ServiceError::NotFound
        })?;
        let store = self.grades(subject);

        let mut tx = db::begin_write(&self.pool).await?;
        let grade = match store.find_by_id(&mut tx, id).await? {
            Some(grade) => grade,
            None => {
                debug!(grade_id = id, subject = %subject, "delete of missing grade");
                return Err(ServiceError::NotFound);
            }
        };

        store.delete(&mut tx, id).await?;
        let profile = self.load_profile(&mut tx, grade.student_id).await?;
        tx.commit().await?;

        info!(
            grade_id = id,
            student_id = grade.student_id,
            subject = %subject,
            "grade deleted"
        );
        Ok(profile)
    }

    pub async fn student_exists(&self, id: i64) -> ServiceResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(self.students.exists(&mut conn, id).await?)
    }

    pub async fn grade_exists(&self, id: i64, subject: Subject) -> ServiceResult<bool> {
        let mut conn = self.pool.acquire().await?;
        Ok(self.grades(subject).exists(&mut conn, id).await?)
    }

    pub async fn find_student_by_email(&self, email_address: &str) -> ServiceResult<Option<Student>> {
        let mut conn = self.pool.acquire().await?;
        Ok(self.students.find_by_email(&mut conn, email_address).await?)
    }

    async fn load_profile(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> ServiceResult<StudentProfile> {
        let student = self
            .students
            .find_by_id(conn, id)
            .await?
            .ok_or(ServiceError::NotFound)?;

        let math = self.grades(Subject::Math).find_by_student(conn, id).await?;
        let science = self.grades(Subject::Science).find_by_student(conn, id).await?;
        let history = self.grades(Subject::History).find_by_student(conn, id).await?;

        Ok(StudentProfile {
            student,
            student_grades: StudentGrades::new(math, science, history),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_service() -> GradebookService {
        let pool = db::connect_in_memory().await.unwrap();
        db::seed(&pool).await.unwrap();
        GradebookService::new(pool)
    }

    #[tokio::test]
    async fn test_create_student_grows_listing() {
        let service = seeded_service().await;
        let before = service.list_students().await.unwrap().len();

        service
            .create_student(NewStudent::new("Chad", "Darby", "chad.darby@luv2code.com"))
            .await
            .unwrap();

        assert_eq!(service.list_students().await.unwrap().len(), before + 1);
        let created = service
            .find_student_by_email("chad.darby@luv2code.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(created.full_name(), "Chad Darby");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_accepted() {
        let service = seeded_service().await;

        service.create_student(db::seed_student()).await.unwrap();

        assert_eq!(service.list_students().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_student_cascades_grades() {
        let service = seeded_service().await;
        assert!(service.grade_exists(1, Subject::Math).await.unwrap());

        service.delete_student(1).await.unwrap();

        assert!(!service.student_exists(1).await.unwrap());
        for subject in Subject::ALL {
            assert!(!service.grade_exists(1, subject).await.unwrap());
        }
        assert!(matches!(
            service.student_profile(1).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_student() {
        let service = seeded_service().await;
        assert!(matches!(
            service.delete_student(100).await,
            Err(ServiceError::NotFound)
        ));
        assert_eq!(service.list_students().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_grade_touches_one_subject() {
        let service = seeded_service().await;

        let profile = service.create_grade(1, "science", 85.0).await.unwrap();

        let grades = &profile.student_grades;
        assert_eq!(grades.results(Subject::Science).len(), 2);
        assert_eq!(grades.results(Subject::Math).len(), 1);
        assert_eq!(grades.results(Subject::History).len(), 1);
        assert_eq!(grades.science_grade_average, 92.5);
    }

    #[tokio::test]
    async fn test_create_grade_not_found_cases() {
        let service = seeded_service().await;

        assert!(matches!(
            service.create_grade(100, "math", 85.0).await,
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            service.create_grade(1, "literature", 85.0).await,
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            service.create_grade(100, "literature", 85.0).await,
            Err(ServiceError::NotFound)
        ));

        let profile = service.student_profile(1).await.unwrap();
        assert_eq!(profile.student_grades.math_grade_results.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_grade_returns_owner_profile() {
        let service = seeded_service().await;

        let profile = service.delete_grade(1, "history").await.unwrap();

        assert_eq!(profile.student.id, 1);
        assert!(profile.student_grades.history_grade_results.is_empty());
        assert_eq!(profile.student_grades.history_grade_average, 0.0);
        assert_eq!(profile.student_grades.math_grade_results.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_grade_not_found_cases() {
        let service = seeded_service().await;

        assert!(matches!(
            service.delete_grade(100, "math").await,
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            service.delete_grade(1, "literature").await,
            Err(ServiceError::NotFound)
        ));
        assert!(service.grade_exists(1, Subject::Math).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_grade_writes_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("gradebook.db").display());
        let pool = db::connect(&url, 5).await.unwrap();
        db::init_db(&pool).await.unwrap();
        db::seed(&pool).await.unwrap();
        let service = GradebookService::new(pool);

        let handles: Vec<_> = (0..40)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.create_grade(1, "math", 80.0).await })
            })
            .collect();

        let mut failures = Vec::new();
        for handle in handles {
            if let Err(e) = handle.await.unwrap() {
                failures.push(e.to_string());
            }
        }
        assert!(failures.is_empty(), "failed writes: {:?}", failures);

        let profile = service.student_profile(1).await.unwrap();
        assert_eq!(profile.student_grades.math_grade_results.len(), 41);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_student_deletes_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("gradebook.db").display());
        let pool = db::connect(&url, 5).await.unwrap();
        db::init_db(&pool).await.unwrap();
        db::seed(&pool).await.unwrap();
        let service = GradebookService::new(pool);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.delete_student(1).await })
            })
            .collect();

        let mut deleted = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => deleted += 1,
                Err(ServiceError::NotFound) => {}
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!(deleted, 1);
        assert!(!service.student_exists(1).await.unwrap());
    }

    #[tokio::test]
    async fn test_profile_round_trip() {
        let service = seeded_service().await;
        service
            .create_student(NewStudent::new("Chad", "Darby", "chad.darby@luv2code.com"))
            .await
            .unwrap();
        let id = service
            .find_student_by_email("chad.darby@luv2code.com")
            .await
            .unwrap()
            .unwrap()
            .id;

        let empty = service.student_profile(id).await.unwrap();
        for subject in Subject::ALL {
            assert!(empty.student_grades.results(subject).is_empty());
        }

        for subject in Subject::ALL {
            service.create_grade(id, subject.as_str(), 75.0).await.unwrap();
        }

        let filled = service.student_profile(id).await.unwrap();
        for subject in Subject::ALL {
            assert_eq!(filled.student_grades.results(subject).len(), 1);
        }
    }
}
