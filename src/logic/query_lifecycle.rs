use crate::error::ApiError;
use crate::model::{now, Id, NewQuery, Query, QueryChanges, QueryWithFormData};
use crate::store::traits::Store;

pub const FORM_DATA_NOT_FOUND: &str = "FormData not found";
pub const QUERY_NOT_FOUND: &str = "Query not found";
pub const QUERY_DELETED: &str = "Query deleted successfully";

/// Create, update and delete for queries. Inputs arrive already validated;
/// every existence check happens here, before the mutating store call.
///
/// Status transitions are unrestricted: either status may be set from either
/// status.
pub struct QueryLifecycle;

impl QueryLifecycle {
    /// The FormData lookup and the insert are two separate store calls. A
    /// FormData removed in between makes the insert fail on the foreign key,
    /// which surfaces as a persistence error.
    pub async fn create<S: Store>(store: &S, new_query: NewQuery) -> Result<QueryWithFormData, ApiError> {
        let form_data = store
            .find_form_data(&new_query.form_data_id)
            .await
            .map_err(|e| ApiError::persistence("Failed to create query", e))?;

        if form_data.is_none() {
            return Err(ApiError::not_found(FORM_DATA_NOT_FOUND));
        }

        let created = store
            .create_query(Query::from_new(new_query))
            .await
            .map_err(|e| ApiError::persistence("Failed to create query", e))?;

        log::info!(
            "created query {} on form data {}",
            created.query.id,
            created.query.form_data_id
        );
        Ok(created)
    }

    pub async fn update<S: Store>(
        store: &S,
        id: &Id,
        changes: QueryChanges,
    ) -> Result<QueryWithFormData, ApiError> {
        store
            .find_query(id)
            .await
            .map_err(|e| ApiError::persistence("Failed to update query", e))?
            .ok_or_else(|| ApiError::not_found(QUERY_NOT_FOUND))?;

        // The store bumps past the stored value inside its own write, so
        // overlapping updates never move updatedAt backwards.
        let updated = store
            .update_query(id, &changes, now())
            .await
            .map_err(|e| ApiError::persistence("Failed to update query", e))?
            // Deleted between the existence check and the write.
            .ok_or_else(|| ApiError::not_found(QUERY_NOT_FOUND))?;

        log::info!("updated query {} (status {})", id, updated.query.status);
        Ok(updated)
    }

    pub async fn delete<S: Store>(store: &S, id: &Id) -> Result<&'static str, ApiError> {
        let existing = store
            .find_query(id)
            .await
            .map_err(|e| ApiError::persistence("Failed to delete query", e))?;

        if existing.is_none() {
            return Err(ApiError::not_found(QUERY_NOT_FOUND));
        }

        let deleted = store
            .delete_query(id)
            .await
            .map_err(|e| ApiError::persistence("Failed to delete query", e))?;

        if !deleted {
            return Err(ApiError::not_found(QUERY_NOT_FOUND));
        }

        log::info!("deleted query {}", id);
        Ok(QUERY_DELETED)
    }
}
