//! # Gradebook Store
//!
//! Persistence gateways over the relational schema in `migrations/`.
//!
//! - [`StudentStore`] reads and writes the `student` table
//! - [`GradeStore`] reads and writes one subject's grade table
//! - [`db`] opens the pool, applies migrations and loads fixtures
//!
//! Store methods take a `&mut SqliteConnection` so the caller decides whether
//! they run on a pooled connection or inside a transaction.

pub mod db;
mod errors;
mod grade;
mod models;
mod student;

pub use errors::{StoreError, StoreResult};
pub use grade::GradeStore;
pub use models::{Grade, NewStudent, Student, Subject, UnknownSubject};
pub use student::StudentStore;
