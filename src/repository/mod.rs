mod embedded;
mod memory;

use embedded::migrations;
pub use memory::MemRepository;

use async_trait::async_trait;
use tokio_postgres::{Client, NoTls, Row};

use crate::{
    error::StoreError,
    models::{Nota, Tarea},
};

/// Storage operations for notas. Implementations report row absence as
/// `None` (single-row reads) or an affected-row count of zero (writes);
/// turning either into a not-found condition is up to the caller.
#[async_trait]
pub trait NotaStore: Send + Sync {
    async fn insert(&self, title: String, content: String) -> Result<Nota, StoreError>;
    async fn fetch_all(&self) -> Result<Vec<Nota>, StoreError>;
    async fn fetch_one(&self, id: i64) -> Result<Option<Nota>, StoreError>;
    /// Applies only the provided fields; returns the number of rows the
    /// UPDATE statement matched.
    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<u64, StoreError>;
    /// Returns the number of rows deleted.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
    /// Rows whose title contains `title` as a literal substring.
    /// `%` and `_` in the query are not wildcards.
    async fn fetch_by_title(&self, title: &str) -> Result<Vec<Nota>, StoreError>;
}

/// Storage operations for tareas. Same contract as [`NotaStore`], plus
/// the completion flag on update.
#[async_trait]
pub trait TareaStore: Send + Sync {
    async fn insert(&self, title: String, content: String) -> Result<Tarea, StoreError>;
    async fn fetch_all(&self) -> Result<Vec<Tarea>, StoreError>;
    async fn fetch_one(&self, id: i64) -> Result<Option<Tarea>, StoreError>;
    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
        completed: Option<bool>,
    ) -> Result<u64, StoreError>;
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;
    async fn fetch_by_title(&self, title: &str) -> Result<Vec<Tarea>, StoreError>;
}

/// PostgreSQL-backed store for both entities.
pub struct Repository {
    client: Client,
}

impl Repository {
    pub async fn new(database_dsn: String) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(&database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self { client })
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }
}

/// Escapes LIKE metacharacters so a title query matches literally.
fn escape_like(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn nota_from_row(row: &Row) -> Nota {
    Nota {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
    }
}

fn tarea_from_row(row: &Row) -> Tarea {
    Tarea {
        id: row.get("id"),
        title: row.get("title"),
        content: row.get("content"),
        completed: row.get("completed"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl NotaStore for Repository {
    async fn insert(&self, title: String, content: String) -> Result<Nota, StoreError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO nota (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content",
                &[&title, &content],
            )
            .await?;

        Ok(nota_from_row(&row))
    }

    async fn fetch_all(&self) -> Result<Vec<Nota>, StoreError> {
        let rows = self
            .client
            .query("SELECT id, title, content FROM nota", &[])
            .await?;

        Ok(rows.iter().map(nota_from_row).collect())
    }

    async fn fetch_one(&self, id: i64) -> Result<Option<Nota>, StoreError> {
        let row = self
            .client
            .query_opt("SELECT id, title, content FROM nota WHERE id = $1", &[&id])
            .await?;

        Ok(row.as_ref().map(nota_from_row))
    }

    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<u64, StoreError> {
        let rows = self
            .client
            .execute(
                "UPDATE nota SET title = COALESCE($1, title), \
                 content = COALESCE($2, content) WHERE id = $3",
                &[&title, &content, &id],
            )
            .await?;

        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM nota WHERE id = $1", &[&id])
            .await?;

        Ok(rows)
    }

    async fn fetch_by_title(&self, title: &str) -> Result<Vec<Nota>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content FROM nota \
                 WHERE title LIKE '%' || $1 || '%'",
                &[&escape_like(title)],
            )
            .await?;

        Ok(rows.iter().map(nota_from_row).collect())
    }
}

#[async_trait]
impl TareaStore for Repository {
    async fn insert(&self, title: String, content: String) -> Result<Tarea, StoreError> {
        let row = self
            .client
            .query_one(
                "INSERT INTO tarea (title, content) VALUES ($1, $2) \
                 RETURNING id, title, content, completed, created_at",
                &[&title, &content],
            )
            .await?;

        Ok(tarea_from_row(&row))
    }

    async fn fetch_all(&self) -> Result<Vec<Tarea>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, completed, created_at FROM tarea",
                &[],
            )
            .await?;

        Ok(rows.iter().map(tarea_from_row).collect())
    }

    async fn fetch_one(&self, id: i64) -> Result<Option<Tarea>, StoreError> {
        let row = self
            .client
            .query_opt(
                "SELECT id, title, content, completed, created_at FROM tarea WHERE id = $1",
                &[&id],
            )
            .await?;

        Ok(row.as_ref().map(tarea_from_row))
    }

    async fn update(
        &self,
        id: i64,
        title: Option<String>,
        content: Option<String>,
        completed: Option<bool>,
    ) -> Result<u64, StoreError> {
        let rows = self
            .client
            .execute(
                "UPDATE tarea SET title = COALESCE($1, title), \
                 content = COALESCE($2, content), \
                 completed = COALESCE($3, completed) WHERE id = $4",
                &[&title, &content, &completed, &id],
            )
            .await?;

        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let rows = self
            .client
            .execute("DELETE FROM tarea WHERE id = $1", &[&id])
            .await?;

        Ok(rows)
    }

    async fn fetch_by_title(&self, title: &str) -> Result<Vec<Tarea>, StoreError> {
        let rows = self
            .client
            .query(
                "SELECT id, title, content, completed, created_at FROM tarea \
                 WHERE title LIKE '%' || $1 || '%'",
                &[&escape_like(title)],
            )
            .await?;

        Ok(rows.iter().map(tarea_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("sin comodines"), "sin comodines");
    }
}
