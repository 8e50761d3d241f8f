//! # Gradebook HTTP Server Module
//!
//! Axum router exposing the gradebook over JSON.
//!
//! # Endpoints
//!
//! - `GET /` / `POST /` - List and create students
//! - `DELETE /student/{id}` - Delete a student and its grades
//! - `GET /studentInformation/{id}` - Student profile
//! - `POST /grades` - Add a grade
//! - `DELETE /grades/{id}/{gradeType}` - Delete a grade
//! - `/health` - Health check

pub mod config;
pub mod errors;
pub mod gradebook_routes;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use server::HttpServer;
