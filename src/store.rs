use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::prelude::FromRow;
use sqlx::SqlitePool;

use crate::error::Result;

/// A stored record pairing a URL with generated text content.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Summary {
    pub id: i64,
    pub url: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SummaryStore {
    pool: SqlitePool,
}

impl SummaryStore {
    pub fn new(pool: SqlitePool) -> Self {
        SummaryStore { pool }
    }

    pub async fn create(&self, url: &str, summary: &str) -> Result<Summary> {
        let record = sqlx::query_as::<_, Summary>(
            "INSERT INTO summaries (url, summary, created_at) VALUES (?1, ?2, ?3) \
             RETURNING id, url, summary, created_at",
        )
        .bind(url)
        .bind(summary)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Summary>> {
        let record = sqlx::query_as::<_, Summary>(
            "SELECT id, url, summary, created_at FROM summaries WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<Summary>> {
        let records = sqlx::query_as::<_, Summary>(
            "SELECT id, url, summary, created_at FROM summaries ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn update(&self, id: i64, url: &str, summary: &str) -> Result<Option<Summary>> {
        let record = sqlx::query_as::<_, Summary>(
            "UPDATE summaries SET url = ?1, summary = ?2 WHERE id = ?3 \
             RETURNING id, url, summary, created_at",
        )
        .bind(url)
        .bind(summary)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Replace only the summary text. Used by the background generation task;
    /// a row deleted in the meantime is not an error.
    pub async fn set_summary(&self, id: i64, summary: &str) -> Result<()> {
        sqlx::query("UPDATE summaries SET summary = ?1 WHERE id = ?2")
            .bind(summary)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<Option<Summary>> {
        let record = sqlx::query_as::<_, Summary>(
            "DELETE FROM summaries WHERE id = ?1 \
             RETURNING id, url, summary, created_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_store() -> SummaryStore {
        let pool = db::connect_in_memory().await.unwrap();
        SummaryStore::new(pool)
    }

    #[tokio::test]
    async fn create_assigns_positive_ids() {
        let store = test_store().await;

        let first = store.create("http://foo.bar", "pending").await.unwrap();
        let second = store.create("http://foo2.bar", "pending").await.unwrap();

        assert!(first.id > 0);
        assert!(second.id > first.id);
        assert_eq!(first.url, "http://foo.bar");
    }

    #[tokio::test]
    async fn get_missing_row_is_none() {
        let store = test_store().await;
        assert!(store.get(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_returns_new_values() {
        let store = test_store().await;
        let record = store.create("http://foo.bar", "pending").await.unwrap();

        let updated = store
            .update(record.id, "http://bar.baz", "updated text")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, record.id);
        assert_eq!(updated.url, "http://bar.baz");
        assert_eq!(updated.summary, "updated text");
        assert_eq!(updated.created_at, record.created_at);
    }

    #[tokio::test]
    async fn update_missing_row_is_none() {
        let store = test_store().await;
        let result = store.update(999, "http://foo.bar", "text").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = test_store().await;
        let record = store.create("http://foo.bar", "pending").await.unwrap();

        let deleted = store.delete(record.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, record.id);
        assert!(store.get(record.id).await.unwrap().is_none());
        assert!(store.delete(record.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_summary_replaces_text_only() {
        let store = test_store().await;
        let record = store.create("http://foo.bar", "pending").await.unwrap();

        store.set_summary(record.id, "generated text").await.unwrap();

        let fetched = store.get(record.id).await.unwrap().unwrap();
        assert_eq!(fetched.summary, "generated text");
        assert_eq!(fetched.url, "http://foo.bar");
    }
}
