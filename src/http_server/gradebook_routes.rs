//! Gradebook HTTP Routes
//!
//! Student and grade endpoints backed by [`GradebookService`].

use std::sync::Arc;

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, Path, Query, Request, State,
    },
    http::header::CONTENT_TYPE,
    routing::{delete, get, post},
    Form, Json, Router,
};
use serde::Deserialize;

use crate::service::{GradebookService, StudentProfile};
use crate::store::{NewStudent, Student};

use super::errors::{ApiError, ApiResult};

/// Shared handler state
pub type GradebookState = Arc<GradebookService>;

/// Parameters of `POST /grades`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeParams {
    pub grade: f64,
    pub grade_type: String,
    pub student_id: i64,
}

/// Read from an urlencoded form body, otherwise from the query string
#[async_trait]
impl<S> FromRequest<S> for GradeParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        let params = if is_form {
            let Form(params) = Form::<GradeParams>::from_request(req, state).await?;
            params
        } else {
            let Query(params) = Query::<GradeParams>::try_from_uri(req.uri())?;
            params
        };

        params.validate()?;
        Ok(params)
    }
}

impl GradeParams {
    /// Rejects NaN and infinities, which neither the `grade` column nor JSON
    /// can hold
    pub fn validate(&self) -> ApiResult<()> {
        if !self.grade.is_finite() {
            return Err(ApiError::BadRequest(format!(
                "grade must be a finite number, got {}",
                self.grade
            )));
        }
        Ok(())
    }
}

/// Create gradebook routes
pub fn gradebook_routes(state: GradebookState) -> Router {
    Router::new()
        .route("/", get(list_students_handler).post(create_student_handler))
        .route("/student/:id", delete(delete_student_handler))
        .route("/studentInformation/:id", get(student_information_handler))
        .route("/grades", post(create_grade_handler))
        .route("/grades/:id/:grade_type", delete(delete_grade_handler))
        .with_state(state)
}

async fn list_students_handler(
    State(service): State<GradebookState>,
) -> ApiResult<Json<Vec<Student>>> {
    Ok(Json(service.list_students().await?))
}

async fn create_student_handler(
    State(service): State<GradebookState>,
    body: Result<Json<NewStudent>, JsonRejection>,
) -> ApiResult<Json<Vec<Student>>> {
    let Json(new) = body?;
    service.create_student(new).await?;
    Ok(Json(service.list_students().await?))
}

async fn delete_student_handler(
    State(service): State<GradebookState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<Student>>> {
    let Path(id) = id?;
    service.delete_student(id).await?;
    Ok(Json(service.list_students().await?))
}

async fn student_information_handler(
    State(service): State<GradebookState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<StudentProfile>> {
    let Path(id) = id?;
    Ok(Json(service.student_profile(id).await?))
}

async fn create_grade_handler(
    State(service): State<GradebookState>,
    params: GradeParams,
) -> ApiResult<Json<StudentProfile>> {
    let profile = service
        .create_grade(params.student_id, &params.grade_type, params.grade)
        .await?;
    Ok(Json(profile))
}

async fn delete_grade_handler(
    State(service): State<GradebookState>,
    path: Result<Path<(i64, String)>, PathRejection>,
) -> ApiResult<Json<StudentProfile>> {
    let Path((id, grade_type)) = path?;
    Ok(Json(service.delete_grade(id, &grade_type).await?))
}
