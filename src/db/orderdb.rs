// db/orderdb.rs
use async_trait::async_trait;

use super::db::DBClient;
use crate::models::ordermodels::{PendingRequestSummary, PurchaseRequest, RequestItemDetail};

const REQUEST_COLUMNS: &str =
    "id, user_id, total_amount, wallet, status, discount_percent, created_at, updated_at";

#[async_trait]
pub trait OrderExt {
    async fn get_request(&self, request_id: i64) -> Result<Option<PurchaseRequest>, sqlx::Error>;

    async fn get_request_items(
        &self,
        request_id: i64,
    ) -> Result<Vec<RequestItemDetail>, sqlx::Error>;

    /// Admin decision queue, newest first.
    async fn get_pending_requests(&self) -> Result<Vec<PendingRequestSummary>, sqlx::Error>;

    async fn get_user_orders(
        &self,
        telegram_id: i64,
        status: Option<&str>,
    ) -> Result<Vec<PurchaseRequest>, sqlx::Error>;

    async fn get_user_active_request(
        &self,
        telegram_id: i64,
    ) -> Result<Option<PurchaseRequest>, sqlx::Error>;

    /// Maintenance purge of closed requests older than the cutoff. Returns
    /// (requests deleted, line items deleted).
    async fn purge_closed_requests(&self, older_than_days: i32) -> Result<(u64, u64), sqlx::Error>;
}

#[async_trait]
impl OrderExt for DBClient {
    async fn get_request(&self, request_id: i64) -> Result<Option<PurchaseRequest>, sqlx::Error> {
        sqlx::query_as::<_, PurchaseRequest>(&format!(
            "SELECT {} FROM purchase_requests WHERE id = $1",
            REQUEST_COLUMNS
        ))
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn get_request_items(
        &self,
        request_id: i64,
    ) -> Result<Vec<RequestItemDetail>, sqlx::Error> {
        sqlx::query_as::<_, RequestItemDetail>(
            r#"
            SELECT
                pri.id,
                pri.request_id,
                pri.product_id,
                COALESCE(p.name, 'product #' || pri.product_id) AS name,
                pri.quantity,
                pri.price
            FROM purchase_request_items pri
            LEFT JOIN products p ON p.id = pri.product_id
            WHERE pri.request_id = $1
            ORDER BY pri.id
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_pending_requests(&self) -> Result<Vec<PendingRequestSummary>, sqlx::Error> {
        sqlx::query_as::<_, PendingRequestSummary>(
            r#"
            SELECT
                pr.id,
                pr.user_id,
                pr.total_amount,
                pr.discount_percent,
                pr.created_at,
                COUNT(pri.id) AS item_count
            FROM purchase_requests pr
            LEFT JOIN purchase_request_items pri ON pri.request_id = pr.id
            WHERE pr.status = 'pending'
            GROUP BY pr.id
            ORDER BY pr.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn get_user_orders(
        &self,
        telegram_id: i64,
        status: Option<&str>,
    ) -> Result<Vec<PurchaseRequest>, sqlx::Error> {
        match status {
            Some(status) => {
                sqlx::query_as::<_, PurchaseRequest>(&format!(
                    "SELECT {} FROM purchase_requests WHERE user_id = $1 AND status = $2::request_status ORDER BY created_at DESC",
                    REQUEST_COLUMNS
                ))
                .bind(telegram_id)
                .bind(status)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, PurchaseRequest>(&format!(
                    "SELECT {} FROM purchase_requests WHERE user_id = $1 ORDER BY created_at DESC",
                    REQUEST_COLUMNS
                ))
                .bind(telegram_id)
                .fetch_all(&self.pool)
                .await
            }
        }
    }

    async fn get_user_active_request(
        &self,
        telegram_id: i64,
    ) -> Result<Option<PurchaseRequest>, sqlx::Error> {
        sqlx::query_as::<_, PurchaseRequest>(&format!(
            "SELECT {} FROM purchase_requests WHERE user_id = $1 AND status = 'pending' ORDER BY created_at DESC LIMIT 1",
            REQUEST_COLUMNS
        ))
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn purge_closed_requests(&self, older_than_days: i32) -> Result<(u64, u64), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let items = sqlx::query(
            r#"
            DELETE FROM purchase_request_items
            WHERE request_id IN (
                SELECT id FROM purchase_requests
                WHERE status <> 'pending'
                  AND created_at < NOW() - make_interval(days => $1)
            )
            "#,
        )
        .bind(older_than_days)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let requests = sqlx::query(
            r#"
            DELETE FROM purchase_requests
            WHERE status <> 'pending'
              AND created_at < NOW() - make_interval(days => $1)
            "#,
        )
        .bind(older_than_days)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        tracing::info!(
            "purged {} closed request(s) and {} line item(s) older than {} days",
            requests,
            items,
            older_than_days
        );
        Ok((requests, items))
    }
}
