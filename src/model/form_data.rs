use crate::model::{Id, Query};
use serde::{Deserialize, Serialize};

/// A single patient question/answer pair. Seeded, never mutated through the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormData {
    pub id: Id,
    pub question: String,
    pub answer: String,
}

impl FormData {
    pub fn new_with_id(id: impl Into<Id>, question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// FormData read together with its owned queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDataWithQueries {
    #[serde(flatten)]
    pub form_data: FormData,
    pub queries: Vec<Query>,
}

/// Payload of `GET /form-data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountedFormData {
    pub total: usize,
    pub form_data: Vec<FormDataWithQueries>,
}

impl From<Vec<FormDataWithQueries>> for CountedFormData {
    fn from(form_data: Vec<FormDataWithQueries>) -> Self {
        Self {
            total: form_data.len(),
            form_data,
        }
    }
}
