// service/notification_service.rs
use std::sync::Arc;

use crate::db::db::DBClient;

/// Best-effort sink towards the bot transport. The transport layer itself is
/// external; this service logs the payload and records the last message per
/// user so the transport can pick it up. A failure here is logged and never
/// propagated: a lost notification must not roll back a committed state
/// transition.
#[derive(Debug, Clone)]
pub struct NotificationService {
    db_client: Arc<DBClient>,
}

impl NotificationService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    pub async fn notify(&self, telegram_id: i64, message: &str, attachment: Option<&str>) {
        match attachment {
            Some(path) => tracing::info!(
                "notify user {}: {} (attachment: {})",
                telegram_id,
                message,
                path
            ),
            None => tracing::info!("notify user {}: {}", telegram_id, message),
        }

        let result = sqlx::query(
            r#"
            INSERT INTO user_notifications (user_id, last_message, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id)
            DO UPDATE SET last_message = EXCLUDED.last_message, updated_at = NOW()
            "#,
        )
        .bind(telegram_id)
        .bind(message)
        .execute(&self.db_client.pool)
        .await;

        if let Err(e) = result {
            tracing::warn!("failed to record notification for user {}: {}", telegram_id, e);
        }
    }
}
