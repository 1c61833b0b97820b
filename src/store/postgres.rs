use anyhow::{anyhow, Context, Result};
use itertools::Itertools;
use sqlx::{
    postgres::{PgPoolOptions, PgRow},
    PgPool, Row,
};

use crate::model::{
    FormData, FormDataWithQueries, Id, Query, QueryChanges, QueryStatus, QueryWithFormData,
    Timestamp,
};
use crate::store::traits::{FormDataStore, QueryStore};

const QUERY_WITH_FORM_DATA_COLUMNS: &str = "q.id, q.title, q.description, q.status, q.form_data_id, q.created_at, q.updated_at, f.question, f.answer";

#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Run the embedded schema migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn query_from_row(row: &PgRow) -> Result<Query> {
    let status: String = row.try_get("status")?;
    let status = status
        .parse::<QueryStatus>()
        .map_err(|e| anyhow!("Corrupt status column: {}", e))?;

    Ok(Query {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        status,
        form_data_id: row.try_get("form_data_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn form_data_from_row(row: &PgRow) -> Result<FormData> {
    Ok(FormData {
        id: row.try_get("id")?,
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
    })
}

fn query_with_form_data_from_row(row: &PgRow) -> Result<QueryWithFormData> {
    let query = query_from_row(row)?;
    let form_data = FormData {
        id: query.form_data_id.clone(),
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
    };
    Ok(QueryWithFormData { query, form_data })
}

#[async_trait::async_trait]
impl FormDataStore for PostgresStore {
    async fn find_form_data(&self, id: &Id) -> Result<Option<FormData>> {
        let row = sqlx::query("SELECT id, question, answer FROM form_data WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch form data")?;

        row.as_ref().map(form_data_from_row).transpose()
    }

    async fn list_form_data_with_queries(&self) -> Result<Vec<FormDataWithQueries>> {
        let form_data_rows = sqlx::query("SELECT id, question, answer FROM form_data ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .context("Failed to list form data")?;

        let query_rows = sqlx::query(
            r#"
            SELECT id, title, description, status, form_data_id, created_at, updated_at
            FROM queries
            ORDER BY created_at, seq
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list queries")?;

        let queries = query_rows
            .iter()
            .map(query_from_row)
            .collect::<Result<Vec<_>>>()?;
        let mut by_form_data = queries
            .into_iter()
            .into_group_map_by(|query| query.form_data_id.clone());

        form_data_rows
            .iter()
            .map(|row| -> Result<FormDataWithQueries> {
                let form_data = form_data_from_row(row)?;
                let queries = by_form_data.remove(&form_data.id).unwrap_or_default();
                Ok(FormDataWithQueries { form_data, queries })
            })
            .collect()
    }

    async fn insert_form_data(&self, form_data: Vec<FormData>) -> Result<u64> {
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;
        let mut inserted = 0;

        for entry in form_data {
            let result = sqlx::query("INSERT INTO form_data (id, question, answer) VALUES ($1, $2, $3)")
                .bind(&entry.id)
                .bind(&entry.question)
                .bind(&entry.answer)
                .execute(&mut *tx)
                .await
                .with_context(|| format!("Failed to insert form data {}", entry.id))?;
            inserted += result.rows_affected();
        }

        tx.commit().await.context("Failed to commit form data insert")?;
        Ok(inserted)
    }

    async fn delete_all_form_data(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM form_data")
            .execute(&self.pool)
            .await
            .context("Failed to delete form data")?;

        Ok(result.rows_affected())
    }
}

#[async_trait::async_trait]
impl QueryStore for PostgresStore {
    async fn find_query(&self, id: &Id) -> Result<Option<Query>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, description, status, form_data_id, created_at, updated_at
            FROM queries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch query")?;

        row.as_ref().map(query_from_row).transpose()
    }

    async fn create_query(&self, query: Query) -> Result<QueryWithFormData> {
        let sql = format!(
            r#"
            WITH q AS (
                INSERT INTO queries (id, title, description, status, form_data_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT {}
            FROM q
            JOIN form_data f ON f.id = q.form_data_id
            "#,
            QUERY_WITH_FORM_DATA_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(&query.id)
            .bind(&query.title)
            .bind(&query.description)
            .bind(query.status.as_str())
            .bind(&query.form_data_id)
            .bind(query.created_at)
            .bind(query.updated_at)
            .fetch_one(&self.pool)
            .await
            .context("Failed to create query")?;

        query_with_form_data_from_row(&row)
    }

    async fn update_query(
        &self,
        id: &Id,
        changes: &QueryChanges,
        at: Timestamp,
    ) -> Result<Option<QueryWithFormData>> {
        let sql = format!(
            r#"
            WITH q AS (
                UPDATE queries SET
                    title = COALESCE($2, title),
                    description = CASE WHEN $3 THEN $4 ELSE description END,
                    status = COALESCE($5, status),
                    updated_at = GREATEST($6, updated_at + INTERVAL '1 microsecond')
                WHERE id = $1
                RETURNING *
            )
            SELECT {}
            FROM q
            JOIN form_data f ON f.id = q.form_data_id
            "#,
            QUERY_WITH_FORM_DATA_COLUMNS
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&changes.title)
            .bind(changes.description.is_some())
            .bind(changes.description.clone().flatten())
            .bind(changes.status.map(|status| status.as_str()))
            .bind(at)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to update query")?;

        row.as_ref().map(query_with_form_data_from_row).transpose()
    }

    async fn delete_query(&self, id: &Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM queries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete query")?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_queries(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM queries")
            .execute(&self.pool)
            .await
            .context("Failed to delete queries")?;

        Ok(result.rows_affected())
    }
}
