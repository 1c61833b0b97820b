use crate::model::{bump_timestamp, generate_id, now, FormData, Id, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const INVALID_STATUS_MESSAGE: &str = "Status must be either OPEN or RESOLVED";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryStatus {
    #[default]
    Open,
    Resolved,
}

impl QueryStatus {
    pub const ALL: [QueryStatus; 2] = [QueryStatus::Open, QueryStatus::Resolved];

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Open => "OPEN",
            QueryStatus::Resolved => "RESOLVED",
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (got '{}')", INVALID_STATUS_MESSAGE, self.0)
    }
}

impl std::error::Error for InvalidStatus {}

/// Exact, case-sensitive match. No trimming.
impl FromStr for QueryStatus {
    type Err = InvalidStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "OPEN" => Ok(QueryStatus::Open),
            "RESOLVED" => Ok(QueryStatus::Resolved),
            other => Err(InvalidStatus(other.to_string())),
        }
    }
}

/// A clarification request attached to one FormData entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    pub id: Id,
    pub title: String,
    pub description: Option<String>,
    pub status: QueryStatus,
    pub form_data_id: Id,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Query {
    /// Build a fresh row from validated input; both timestamps are set to now.
    pub fn from_new(new_query: NewQuery) -> Self {
        let created_at = now();
        Self {
            id: generate_id(),
            title: new_query.title,
            description: new_query.description,
            status: new_query.status,
            form_data_id: new_query.form_data_id,
            created_at,
            updated_at: created_at,
        }
    }

    /// Apply a partial update in place. `updated_at` becomes `at`, or one
    /// microsecond past the stored value when `at` is not later.
    pub fn apply(&mut self, changes: &QueryChanges, at: Timestamp) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = bump_timestamp(self.updated_at, at);
    }
}

/// Query as returned by create/update: the row plus its owning FormData.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryWithFormData {
    #[serde(flatten)]
    pub query: Query,
    pub form_data: FormData,
}

/// Validated creation input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewQuery {
    pub title: String,
    pub description: Option<String>,
    pub status: QueryStatus,
    pub form_data_id: Id,
}

/// Validated partial update. `description: Some(None)` clears the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<QueryStatus>,
}

impl QueryChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}
