use crate::model::FormData;
use crate::store::traits::Store;
use anyhow::{Context, Result};

/// Sample intake answers. Ids are fixed so tests and clients can refer to them.
pub fn seed_form_data() -> Vec<FormData> {
    [
        (
            "e82ed0aa-e99d-4318-a346-898de9f8a529",
            "What is your date of birth?",
            "1985-04-12",
        ),
        (
            "3a7c9a4e-6a1f-4c56-9d0b-2f0a51b8f2c1",
            "Are you currently taking any medications?",
            "Lisinopril 10mg daily",
        ),
        (
            "b5d0e1f2-8c34-4e7a-a1b2-c3d4e5f60718",
            "Do you have any known allergies?",
            "Penicillin",
        ),
        (
            "c1f2e3d4-5b6a-4798-8a9b-0c1d2e3f4a5b",
            "Have you had any surgeries in the past five years?",
            "Appendectomy in 2021",
        ),
        (
            "d4e5f6a7-b8c9-4d0e-9f1a-2b3c4d5e6f70",
            "How would you rate your pain today on a scale of 0 to 10?",
            "4",
        ),
        (
            "f0e1d2c3-b4a5-4968-8776-655443322110",
            "Do you smoke or use tobacco products?",
            "No",
        ),
    ]
    .into_iter()
    .map(|(id, question, answer)| FormData::new_with_id(id, question, answer))
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub queries_deleted: u64,
    pub form_data_deleted: u64,
    pub form_data_created: u64,
}

/// Bulk reset: remove every query, then every FormData row, then insert the
/// sample set. Queries go first because of the foreign key.
pub async fn run_seed<S: Store>(store: &S) -> Result<SeedSummary> {
    let queries_deleted = store
        .delete_all_queries()
        .await
        .context("Failed to clear queries")?;
    let form_data_deleted = store
        .delete_all_form_data()
        .await
        .context("Failed to clear form data")?;
    log::info!(
        "All records deleted ({} queries, {} form data)",
        queries_deleted,
        form_data_deleted
    );

    let form_data_created = store
        .insert_form_data(seed_form_data())
        .await
        .context("Failed to insert seed form data")?;
    log::info!("All records created ({} form data)", form_data_created);

    Ok(SeedSummary {
        queries_deleted,
        form_data_deleted,
        form_data_created,
    })
}
