// db/cartdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::cartmodels::{CartItem, CartLine};

#[async_trait]
pub trait CartExt {
    /// Adds a new line. Duplicate product lines are kept separate, never
    /// merged.
    async fn add_to_cart(
        &self,
        telegram_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartLine, sqlx::Error>;

    async fn get_cart_items(&self, telegram_id: i64) -> Result<Vec<CartItem>, sqlx::Error>;

    async fn remove_cart_item(&self, line_id: i64) -> Result<bool, sqlx::Error>;

    async fn clear_cart(&self, telegram_id: i64) -> Result<u64, sqlx::Error>;

    /// Sum of quantities across the user's lines.
    async fn cart_count(&self, telegram_id: i64) -> Result<i64, sqlx::Error>;
}

#[async_trait]
impl CartExt for DBClient {
    async fn add_to_cart(
        &self,
        telegram_id: i64,
        product_id: i64,
        quantity: i32,
    ) -> Result<CartLine, sqlx::Error> {
        sqlx::query_as::<_, CartLine>(
            r#"
            INSERT INTO cart (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, product_id, quantity
            "#,
        )
        .bind(telegram_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_cart_items(&self, telegram_id: i64) -> Result<Vec<CartItem>, sqlx::Error> {
        sqlx::query_as::<_, CartItem>(
            r#"
            SELECT c.id, c.product_id, p.name, p.price, c.quantity
            FROM cart c
            JOIN products p ON c.product_id = p.id
            WHERE c.user_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(telegram_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn remove_cart_item(&self, line_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart WHERE id = $1")
            .bind(line_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn clear_cart(&self, telegram_id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(telegram_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn cart_count(&self, telegram_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COALESCE(SUM(quantity), 0) FROM cart WHERE user_id = $1")
            .bind(telegram_id)
            .fetch_one(&self.pool)
            .await
    }
}
