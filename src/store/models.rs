//! Row types and the subject selector.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A student row
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email_address: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Fields accepted when creating a student
///
/// Unknown fields in the request body (an `id`, for instance) are ignored;
/// ids are always assigned by the store.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub firstname: String,
    pub lastname: String,
    pub email_address: String,
}

impl NewStudent {
    pub fn new(
        firstname: impl Into<String>,
        lastname: impl Into<String>,
        email_address: impl Into<String>,
    ) -> Self {
        Self {
            firstname: firstname.into(),
            lastname: lastname.into(),
            email_address: email_address.into(),
        }
    }
}

/// A grade row. Every subject table shares this shape.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: i64,
    pub student_id: i64,
    pub grade: f64,
}

/// Subject selector routing a grade operation to its table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    Math,
    Science,
    History,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::Science, Subject::History];

    /// Selector string as it appears in requests
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::Science => "science",
            Subject::History => "history",
        }
    }

    /// Backing table name
    pub fn table(&self) -> &'static str {
        match self {
            Subject::Math => "math_grade",
            Subject::Science => "science_grade",
            Subject::History => "history_grade",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a selector names no known subject
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown grade type: {0}")]
pub struct UnknownSubject(pub String);

impl FromStr for Subject {
    type Err = UnknownSubject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "math" => Ok(Subject::Math),
            "science" => Ok(Subject::Science),
            "history" => Ok(Subject::History),
            other => Err(UnknownSubject(other.to_string())),
        }
    }
}
