// db/locationdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::locationmodels::Location;

#[async_trait]
pub trait LocationPoolExt {
    async fn add_location(&self, product_id: i64, image_path: &str) -> Result<Location, sqlx::Error>;

    /// Destructive allocation: select-and-delete in one statement, so two
    /// concurrent approvals can never be handed the same location. `None`
    /// when the product's pool is empty.
    async fn allocate_location(&self, product_id: i64) -> Result<Option<String>, sqlx::Error>;

    async fn available_location_count(&self, product_id: i64) -> Result<i64, sqlx::Error>;

    /// Removes the row and returns its image path so the caller can unlink
    /// the backing file.
    async fn delete_location(&self, location_id: i64) -> Result<Option<String>, sqlx::Error>;

    async fn list_locations(&self) -> Result<Vec<Location>, sqlx::Error>;
}

#[async_trait]
impl LocationPoolExt for DBClient {
    async fn add_location(&self, product_id: i64, image_path: &str) -> Result<Location, sqlx::Error> {
        sqlx::query_as::<_, Location>(
            r#"
            INSERT INTO locations (product_id, image_path)
            VALUES ($1, $2)
            RETURNING id, product_id, image_path, created_at
            "#,
        )
        .bind(product_id)
        .bind(image_path)
        .fetch_one(&self.pool)
        .await
    }

    async fn allocate_location(&self, product_id: i64) -> Result<Option<String>, sqlx::Error> {
        let path = sqlx::query_scalar::<_, String>(
            r#"
            DELETE FROM locations
            WHERE id = (
                SELECT id
                FROM locations
                WHERE product_id = $1
                ORDER BY id
                LIMIT 1
                FOR UPDATE SKIP LOCKED
            )
            RETURNING image_path
            "#,
        )
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await?;

        match &path {
            Some(p) => tracing::info!("allocated location {} for product {}", p, product_id),
            None => tracing::warn!("no location available for product {}", product_id),
        }

        Ok(path)
    }

    async fn available_location_count(&self, product_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM locations WHERE product_id = $1")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await
    }

    async fn delete_location(&self, location_id: i64) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "DELETE FROM locations WHERE id = $1 RETURNING image_path",
        )
        .bind(location_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_locations(&self) -> Result<Vec<Location>, sqlx::Error> {
        sqlx::query_as::<_, Location>(
            "SELECT id, product_id, image_path, created_at FROM locations ORDER BY product_id, id",
        )
        .fetch_all(&self.pool)
        .await
    }
}
