// db/walletdb.rs
use async_trait::async_trait;
use sqlx::{Postgres, Row, Transaction};

use super::db::DBClient;
use crate::models::walletmodels::{Wallet, WalletCounts, WalletOverview};

/// Claim-if-free wallet assignment, usable both standalone and inside the
/// checkout transaction. This is the only allocation code path.
///
/// Returns the user's existing address when one is already assigned (sticky
/// one-to-one assignment), otherwise claims the lowest-id free wallet. `None`
/// means pool exhaustion, an expected business state.
pub async fn claim_wallet(
    tx: &mut Transaction<'_, Postgres>,
    telegram_id: i64,
) -> Result<Option<String>, sqlx::Error> {
    let existing = sqlx::query_scalar::<_, String>(
        r#"
        SELECT w.address
        FROM user_wallets uw
        JOIN wallets w ON uw.wallet_id = w.id
        WHERE uw.user_id = $1
        "#,
    )
    .bind(telegram_id)
    .fetch_optional(&mut **tx)
    .await?;

    if let Some(address) = existing {
        return Ok(Some(address));
    }

    let candidate = sqlx::query(
        r#"
        SELECT id, address
        FROM wallets
        WHERE in_use = FALSE
        ORDER BY id
        LIMIT 1
        FOR UPDATE SKIP LOCKED
        "#,
    )
    .fetch_optional(&mut **tx)
    .await?;

    let Some(row) = candidate else {
        return Ok(None);
    };

    let wallet_id: i64 = row.get("id");
    let address: String = row.get("address");

    // Conditional update: only wins if the row is still free. SKIP LOCKED
    // already keeps racing claimers off this row; the guard also covers a
    // wallet grabbed between statements on a reused connection.
    let claimed = sqlx::query("UPDATE wallets SET in_use = TRUE WHERE id = $1 AND in_use = FALSE")
        .bind(wallet_id)
        .execute(&mut **tx)
        .await?
        .rows_affected();

    if claimed == 0 {
        return Ok(None);
    }

    sqlx::query("INSERT INTO user_wallets (user_id, wallet_id) VALUES ($1, $2)")
        .bind(telegram_id)
        .bind(wallet_id)
        .execute(&mut **tx)
        .await?;

    Ok(Some(address))
}

#[async_trait]
pub trait WalletPoolExt {
    async fn add_wallet(&self, address: &str) -> Result<Wallet, sqlx::Error>;

    /// Sticky assignment: idempotent per user, claims from the pool only on
    /// first call. `None` when the pool is exhausted.
    async fn assign_wallet(&self, telegram_id: i64) -> Result<Option<String>, sqlx::Error>;

    /// Severs the assignment and returns the wallet to the pool. Refused
    /// (returns false) while the user still has a pending purchase request,
    /// so a pending request's wallet snapshot always points at a wallet
    /// still bound to that user.
    async fn release_wallet(&self, telegram_id: i64) -> Result<bool, sqlx::Error>;

    /// Admin rotation: release then assign. The released wallet itself is
    /// free again, so the user may receive it back if it is the lowest id.
    async fn reassign_wallet(&self, telegram_id: i64) -> Result<Option<String>, sqlx::Error>;

    /// Only while unassigned.
    async fn delete_wallet(&self, wallet_id: i64) -> Result<bool, sqlx::Error>;

    async fn wallet_counts(&self) -> Result<WalletCounts, sqlx::Error>;

    async fn list_wallets(&self) -> Result<Vec<WalletOverview>, sqlx::Error>;
}

#[async_trait]
impl WalletPoolExt for DBClient {
    async fn add_wallet(&self, address: &str) -> Result<Wallet, sqlx::Error> {
        sqlx::query_as::<_, Wallet>(
            "INSERT INTO wallets (address, in_use) VALUES ($1, FALSE) RETURNING id, address, in_use",
        )
        .bind(address)
        .fetch_one(&self.pool)
        .await
    }

    async fn assign_wallet(&self, telegram_id: i64) -> Result<Option<String>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let address = claim_wallet(&mut tx, telegram_id).await?;
        tx.commit().await?;
        Ok(address)
    }

    async fn release_wallet(&self, telegram_id: i64) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let pending: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM purchase_requests WHERE user_id = $1 AND status = 'pending'",
        )
        .bind(telegram_id)
        .fetch_one(&mut *tx)
        .await?;

        if pending > 0 {
            tx.rollback().await?;
            tracing::warn!(
                "refusing to release wallet for user {}: {} pending request(s)",
                telegram_id,
                pending
            );
            return Ok(false);
        }

        let wallet_id: Option<i64> =
            sqlx::query_scalar("SELECT wallet_id FROM user_wallets WHERE user_id = $1 FOR UPDATE")
                .bind(telegram_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(wallet_id) = wallet_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("DELETE FROM user_wallets WHERE user_id = $1")
            .bind(telegram_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE wallets SET in_use = FALSE WHERE id = $1")
            .bind(wallet_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!("released wallet assignment for user {}", telegram_id);
        Ok(true)
    }

    async fn reassign_wallet(&self, telegram_id: i64) -> Result<Option<String>, sqlx::Error> {
        if !self.release_wallet(telegram_id).await? {
            tracing::warn!("no releasable wallet for user {}, keeping current assignment", telegram_id);
            return Ok(None);
        }

        self.assign_wallet(telegram_id).await
    }

    async fn delete_wallet(&self, wallet_id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM wallets WHERE id = $1 AND in_use = FALSE")
            .bind(wallet_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn wallet_counts(&self) -> Result<WalletCounts, sqlx::Error> {
        sqlx::query_as::<_, WalletCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE NOT in_use) AS available,
                COUNT(*) FILTER (WHERE in_use) AS in_use,
                COUNT(*) AS total
            FROM wallets
            "#,
        )
        .fetch_one(&self.pool)
        .await
    }

    async fn list_wallets(&self) -> Result<Vec<WalletOverview>, sqlx::Error> {
        sqlx::query_as::<_, WalletOverview>(
            r#"
            SELECT
                w.id,
                w.address,
                w.in_use,
                uw.user_id AS assigned_to,
                COUNT(pr.id) FILTER (WHERE pr.status = 'completed') AS completed_orders,
                COALESCE(SUM(pr.total_amount) FILTER (WHERE pr.status = 'completed'), 0) AS total_volume,
                MAX(pr.created_at) AS last_used
            FROM wallets w
            LEFT JOIN user_wallets uw ON uw.wallet_id = w.id
            LEFT JOIN purchase_requests pr ON pr.wallet = w.address
            GROUP BY w.id, uw.user_id
            ORDER BY w.in_use DESC, w.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}
