use crate::model::{FormData, FormDataWithQueries, Id, Query, QueryChanges, QueryWithFormData, Timestamp};
use anyhow::Result;

#[async_trait::async_trait]
pub trait FormDataStore: Send + Sync {
    async fn find_form_data(&self, id: &Id) -> Result<Option<FormData>>;
    /// Every FormData row with its queries included.
    async fn list_form_data_with_queries(&self) -> Result<Vec<FormDataWithQueries>>;
    /// Bulk insert used by the seed utility. Returns the number of rows written.
    async fn insert_form_data(&self, form_data: Vec<FormData>) -> Result<u64>;
    /// Bulk delete used by the seed utility. Queries must be removed first.
    async fn delete_all_form_data(&self) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait QueryStore: Send + Sync {
    async fn find_query(&self, id: &Id) -> Result<Option<Query>>;
    /// Insert a fully built row and return it with its FormData included.
    async fn create_query(&self, query: Query) -> Result<QueryWithFormData>;
    /// Write only the supplied fields. `updated_at` is set to `at`, or to one
    /// microsecond past the stored value if that is later, within the same
    /// write. `None` when the row no longer exists.
    async fn update_query(
        &self,
        id: &Id,
        changes: &QueryChanges,
        at: Timestamp,
    ) -> Result<Option<QueryWithFormData>>;
    async fn delete_query(&self, id: &Id) -> Result<bool>;
    async fn delete_all_queries(&self) -> Result<u64>;
}

pub trait Store: FormDataStore + QueryStore + Send + Sync {}
impl<T: FormDataStore + QueryStore + Send + Sync> Store for T {}
