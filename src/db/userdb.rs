// db/userdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::usermodel::{User, UserOverview};

#[async_trait]
pub trait UserExt {
    /// Insert-if-absent on first contact, then return the row.
    async fn ensure_user(&self, telegram_id: i64) -> Result<User, sqlx::Error>;

    async fn get_user(&self, telegram_id: i64) -> Result<Option<User>, sqlx::Error>;

    /// Admin action, independent of the strike policy. Flips the ban flag and
    /// clears the failure counter in both directions.
    async fn toggle_ban(&self, telegram_id: i64) -> Result<Option<User>, sqlx::Error>;

    async fn authorize_user(&self, telegram_id: i64) -> Result<bool, sqlx::Error>;

    async fn list_users_with_stats(&self) -> Result<Vec<UserOverview>, sqlx::Error>;
}

#[async_trait]
impl UserExt for DBClient {
    async fn ensure_user(&self, telegram_id: i64) -> Result<User, sqlx::Error> {
        sqlx::query("INSERT INTO users (telegram_id) VALUES ($1) ON CONFLICT (telegram_id) DO NOTHING")
            .bind(telegram_id)
            .execute(&self.pool)
            .await?;

        sqlx::query_as::<_, User>(
            "SELECT id, telegram_id, failed_payments, is_banned, authorized, created_at FROM users WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_user(&self, telegram_id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT id, telegram_id, failed_payments, is_banned, authorized, created_at FROM users WHERE telegram_id = $1",
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn toggle_ban(&self, telegram_id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_banned = NOT is_banned,
                failed_payments = 0
            WHERE telegram_id = $1
            RETURNING id, telegram_id, failed_payments, is_banned, authorized, created_at
            "#,
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn authorize_user(&self, telegram_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET authorized = TRUE WHERE telegram_id = $1")
            .bind(telegram_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_users_with_stats(&self) -> Result<Vec<UserOverview>, sqlx::Error> {
        sqlx::query_as::<_, UserOverview>(
            r#"
            SELECT
                u.telegram_id,
                u.failed_payments,
                u.is_banned,
                u.authorized,
                u.created_at,
                COUNT(pr.id) AS total_orders,
                COUNT(pr.id) FILTER (WHERE pr.status = 'completed') AS completed_orders,
                COALESCE(SUM(pr.total_amount) FILTER (WHERE pr.status = 'completed'), 0) AS total_spent
            FROM users u
            LEFT JOIN purchase_requests pr ON pr.user_id = u.telegram_id
            GROUP BY u.id
            ORDER BY u.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
