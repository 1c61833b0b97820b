use crate::error::ApiError;
use crate::model::CountedFormData;
use crate::store::traits::Store;

pub struct FormDataReader;

impl FormDataReader {
    /// Every FormData entry with its queries. No filtering, sorting or paging.
    pub async fn list_all<S: Store>(store: &S) -> Result<CountedFormData, ApiError> {
        let form_data = store
            .list_form_data_with_queries()
            .await
            .map_err(|e| ApiError::persistence("Failed to fetch form data", e))?;

        log::debug!("listed {} form data entries", form_data.len());
        Ok(CountedFormData::from(form_data))
    }
}
