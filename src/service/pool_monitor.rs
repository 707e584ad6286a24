// service/pool_monitor.rs
use std::sync::Arc;

use tokio::time::{interval, Duration};

use crate::{db::walletdb::WalletPoolExt, AppState};

/// Periodic wallet-pool health check. Fire-and-forget: it only reads the
/// counts the pool exposes and raises an operator alert when availability
/// drops below the configured ratio.
pub async fn start_wallet_pool_monitor(app_state: Arc<AppState>) {
    let mut interval = interval(Duration::from_secs(app_state.env.pool_check_interval_secs));

    loop {
        interval.tick().await;

        match app_state.db_client.wallet_counts().await {
            Ok(counts) => {
                tracing::debug!(
                    "wallet pool: {} available / {} total ({} in use)",
                    counts.available,
                    counts.total,
                    counts.in_use
                );

                if counts.total > 0
                    && (counts.available as f64)
                        < counts.total as f64 * app_state.env.pool_alert_ratio
                {
                    tracing::warn!(
                        "wallet pool low: {} of {} available",
                        counts.available,
                        counts.total
                    );
                    app_state
                        .notification_service
                        .notify(
                            app_state.env.admin_chat_id,
                            &format!(
                                "Wallet pool is running low: {} of {} addresses available.",
                                counts.available, counts.total
                            ),
                            None,
                        )
                        .await;
                }
            }
            Err(e) => tracing::error!("wallet pool health check failed: {}", e),
        }
    }
}
