use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode, Uri},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;

use crate::api::envelope::{envelope, envelope_with_message, Enveloped, MessageResponse};
use crate::error::ApiError;
use crate::logic::{
    parse_id, CreateQueryRequest, FormDataReader, QueryLifecycle, UpdateQueryRequest,
};
use crate::model::{CountedFormData, QueryWithFormData};
use crate::store::traits::Store;

pub type AppState<S> = Arc<S>;

/// Simple health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

pub async fn health_check() -> Enveloped<HealthResponse> {
    envelope(
        StatusCode::OK,
        HealthResponse {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        },
    )
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::validation(rejection.body_text()))
}

// GET /form-data
pub async fn list_form_data<S: Store>(
    State(store): State<AppState<S>>,
) -> Result<Enveloped<CountedFormData>, ApiError> {
    log::debug!("get form data");
    let form_data = FormDataReader::list_all(&*store).await?;
    Ok(envelope(StatusCode::OK, form_data))
}

// POST /query
pub async fn create_query<S: Store>(
    State(store): State<AppState<S>>,
    payload: Result<Json<CreateQueryRequest>, JsonRejection>,
) -> Result<Enveloped<QueryWithFormData>, ApiError> {
    let request = body(payload)?;
    log::debug!("create query: {:?}", request);

    let new_query = request.validate()?;
    let created = QueryLifecycle::create(&*store, new_query).await?;
    Ok(envelope(StatusCode::CREATED, created))
}

// PATCH /query/:id
pub async fn update_query<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateQueryRequest>, JsonRejection>,
) -> Result<Enveloped<QueryWithFormData>, ApiError> {
    log::debug!("update query {}", id);
    let id = parse_id(&id, "id")?;
    let changes = body(payload)?.validate()?;

    let updated = QueryLifecycle::update(&*store, &id, changes).await?;
    Ok(envelope(StatusCode::OK, updated))
}

// DELETE /query/:id
pub async fn delete_query<S: Store>(
    State(store): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Enveloped<MessageResponse>, ApiError> {
    log::debug!("delete query {}", id);
    let id = parse_id(&id, "id")?;

    let message = QueryLifecycle::delete(&*store, &id).await?;
    Ok(envelope_with_message(
        StatusCode::OK,
        MessageResponse {
            message: message.to_string(),
        },
        message,
    ))
}

pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("Route {} not found", uri.path()))
}

/// Fallback for a known path hit with a method it does not route.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!("Method {} not allowed on {}", method, uri.path()))
}
