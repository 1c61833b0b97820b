use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ApiError;
use crate::model::{is_valid_id, Id, NewQuery, QueryChanges, QueryStatus, INVALID_STATUS_MESSAGE};

/// True iff `value` is exactly `OPEN` or `RESOLVED`.
pub fn is_valid_status(value: &str) -> bool {
    value.parse::<QueryStatus>().is_ok()
}

pub fn parse_status(value: &str) -> Result<QueryStatus, ApiError> {
    value
        .parse::<QueryStatus>()
        .map_err(|_| ApiError::validation(INVALID_STATUS_MESSAGE))
}

/// Path identifiers must be UUIDs; anything else is rejected before lookup.
pub fn parse_id(value: &str, what: &str) -> Result<Id, ApiError> {
    if is_valid_id(value) {
        Ok(value.to_string())
    } else {
        Err(ApiError::validation(format!("{} must be a valid UUID", what)))
    }
}

/// Raw body of `POST /query`. Every field is optional here so that a missing
/// field surfaces as a validation error instead of a deserializer rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQueryRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub form_data_id: Option<String>,
}

/// Raw body of `PATCH /query/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQueryRequest {
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    pub status: Option<String>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn deserialize_nullable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

impl CreateQueryRequest {
    pub fn validate(self) -> Result<NewQuery, ApiError> {
        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            Some(_) => return Err(ApiError::validation("title must not be empty")),
            None => return Err(ApiError::validation("title is required")),
        };

        let form_data_id = match self.form_data_id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(ApiError::validation("formDataId is required")),
        };

        let status = match self.status.as_deref() {
            Some(status) => parse_status(status)?,
            None => QueryStatus::default(),
        };

        Ok(NewQuery {
            title,
            description: self.description,
            status,
            form_data_id,
        })
    }
}

impl UpdateQueryRequest {
    /// Title is taken as given, an empty string included.
    pub fn validate(self) -> Result<QueryChanges, ApiError> {
        let status = self.status.as_deref().map(parse_status).transpose()?;

        Ok(QueryChanges {
            title: self.title,
            description: self.description,
            status,
        })
    }
}
