//! gradebook - student and grade tracking REST backend
//!
//! Students and their math, science and history grades live in a SQLite
//! database reached through `sqlx`. The [`service`] layer assembles student
//! profiles and routes grade operations by subject; [`http_server`] exposes
//! it as JSON over axum.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod service;
pub mod store;
