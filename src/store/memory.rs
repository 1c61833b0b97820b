use anyhow::{anyhow, Result};
use itertools::Itertools;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::model::{FormData, FormDataWithQueries, Id, Query, QueryChanges, QueryWithFormData, Timestamp};
use crate::store::traits::{FormDataStore, QueryStore};

#[derive(Debug, Clone)]
struct StoredQuery {
    /// Insertion counter, the tie-breaker for equal `created_at`.
    seq: u64,
    query: Query,
}

#[derive(Debug, Default)]
struct MemoryState {
    /// Insertion order is the read order.
    form_data: Vec<FormData>,
    queries: HashMap<Id, StoredQuery>,
    next_seq: u64,
}

impl MemoryState {
    fn form_data(&self, id: &Id) -> Option<&FormData> {
        self.form_data.iter().find(|fd| &fd.id == id)
    }

    fn with_form_data(&self, query: Query) -> Result<QueryWithFormData> {
        let form_data = self
            .form_data(&query.form_data_id)
            .cloned()
            .ok_or_else(|| anyhow!("Query {} references missing FormData {}", query.id, query.form_data_id))?;
        Ok(QueryWithFormData { query, form_data })
    }
}

/// Process-local store. Used for tests and for running without PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form_data(form_data: Vec<FormData>) -> Self {
        Self {
            state: RwLock::new(MemoryState {
                form_data,
                ..Default::default()
            }),
        }
    }

    pub fn query_count(&self) -> usize {
        self.state.read().queries.len()
    }
}

#[async_trait::async_trait]
impl FormDataStore for InMemoryStore {
    async fn find_form_data(&self, id: &Id) -> Result<Option<FormData>> {
        Ok(self.state.read().form_data(id).cloned())
    }

    async fn list_form_data_with_queries(&self) -> Result<Vec<FormDataWithQueries>> {
        let state = self.state.read();

        let mut by_form_data = state
            .queries
            .values()
            .sorted_by(|a, b| {
                a.query
                    .created_at
                    .cmp(&b.query.created_at)
                    .then_with(|| a.seq.cmp(&b.seq))
            })
            .map(|stored| stored.query.clone())
            .into_group_map_by(|query| query.form_data_id.clone());

        Ok(state
            .form_data
            .iter()
            .map(|form_data| FormDataWithQueries {
                form_data: form_data.clone(),
                queries: by_form_data.remove(&form_data.id).unwrap_or_default(),
            })
            .collect())
    }

    async fn insert_form_data(&self, form_data: Vec<FormData>) -> Result<u64> {
        let mut state = self.state.write();
        if let Some(duplicate) = form_data
            .iter()
            .find(|fd| state.form_data(&fd.id).is_some())
        {
            return Err(anyhow!("FormData {} already exists", duplicate.id));
        }

        let inserted = form_data.len() as u64;
        state.form_data.extend(form_data);
        Ok(inserted)
    }

    async fn delete_all_form_data(&self) -> Result<u64> {
        let mut state = self.state.write();
        if !state.queries.is_empty() {
            return Err(anyhow!(
                "cannot delete FormData while {} queries still reference it",
                state.queries.len()
            ));
        }
        let deleted = state.form_data.len() as u64;
        state.form_data.clear();
        Ok(deleted)
    }
}

#[async_trait::async_trait]
impl QueryStore for InMemoryStore {
    async fn find_query(&self, id: &Id) -> Result<Option<Query>> {
        Ok(self.state.read().queries.get(id).map(|stored| stored.query.clone()))
    }

    async fn create_query(&self, query: Query) -> Result<QueryWithFormData> {
        let mut state = self.state.write();
        if state.queries.contains_key(&query.id) {
            return Err(anyhow!("Query {} already exists", query.id));
        }
        // Mirrors the foreign key constraint of the relational schema.
        let created = state.with_form_data(query)?;
        let seq = state.next_seq;
        state.next_seq += 1;
        state.queries.insert(
            created.query.id.clone(),
            StoredQuery {
                seq,
                query: created.query.clone(),
            },
        );
        Ok(created)
    }

    async fn update_query(
        &self,
        id: &Id,
        changes: &QueryChanges,
        at: Timestamp,
    ) -> Result<Option<QueryWithFormData>> {
        let mut state = self.state.write();
        let Some(stored) = state.queries.get_mut(id) else {
            return Ok(None);
        };
        // Bumped against the stored value while the write lock is held.
        stored.query.apply(changes, at);
        let query = stored.query.clone();
        state.with_form_data(query).map(Some)
    }

    async fn delete_query(&self, id: &Id) -> Result<bool> {
        Ok(self.state.write().queries.remove(id).is_some())
    }

    async fn delete_all_queries(&self) -> Result<u64> {
        let mut state = self.state.write();
        let deleted = state.queries.len() as u64;
        state.queries.clear();
        Ok(deleted)
    }
}
