// service/order_service.rs
use std::sync::Arc;

use serde::Serialize;

use crate::{
    config::Config,
    db::{
        cartdb::CartExt,
        coupondb::{consume_coupon, CouponExt},
        db::DBClient,
        locationdb::LocationPoolExt,
        orderdb::OrderExt,
        userdb::UserExt,
        walletdb::claim_wallet,
    },
    models::{
        couponmodels::CouponCheck,
        ordermodels::{Decision, PurchaseRequest},
    },
    service::{error::ServiceError, notification_service::NotificationService},
    utils::pricing::{self, CartTotals},
};

/// What the user is told about their strike count after a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "tier", content = "attempts_left")]
pub enum StrikeNotice {
    Banned,
    FinalWarning,
    AttemptsRemaining(i32),
}

impl StrikeNotice {
    pub fn for_count(failed_payments: i32, ban_threshold: i32) -> Self {
        if failed_payments >= ban_threshold {
            StrikeNotice::Banned
        } else if failed_payments == ban_threshold - 1 {
            StrikeNotice::FinalWarning
        } else {
            StrikeNotice::AttemptsRemaining(ban_threshold - failed_payments)
        }
    }

    pub fn message(&self) -> String {
        match self {
            StrikeNotice::Banned => "Your account has been banned.".to_string(),
            StrikeNotice::FinalWarning => {
                "FINAL WARNING: one more failed payment and your account will be banned.".to_string()
            }
            StrikeNotice::AttemptsRemaining(left) => {
                format!("Note: you have {} failed payment attempt(s) remaining.", left)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub request_id: i64,
    pub wallet: String,
    pub discount_percent: i32,
    pub totals: CartTotals,
}

/// Checkout either produces a pending request or reports pool exhaustion.
/// Exhaustion is an expected business state, not an error: nothing was
/// committed and the cart is untouched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome", content = "receipt")]
pub enum CheckoutOutcome {
    Created(CheckoutReceipt),
    WalletsExhausted,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecisionReceipt {
    pub request: PurchaseRequest,
    pub failed_payments: i32,
    pub notice: Option<StrikeNotice>,
    pub location: Option<String>,
}

/// The purchase-request state machine: pending -> completed | rejected,
/// never reversed. Creation snapshots the cart; the admin decision applies
/// the strike/ban policy and consumes a delivery location on approval.
#[derive(Debug, Clone)]
pub struct OrderService {
    db_client: Arc<DBClient>,
    notifications: Arc<NotificationService>,
    min_order_total: f64,
    max_order_total: f64,
    ban_threshold: i32,
    admin_chat_id: i64,
}

impl OrderService {
    pub fn new(
        db_client: Arc<DBClient>,
        notifications: Arc<NotificationService>,
        config: &Config,
    ) -> Self {
        Self {
            db_client,
            notifications,
            min_order_total: config.min_order_total,
            max_order_total: config.max_order_total,
            ban_threshold: config.ban_threshold,
            admin_chat_id: config.admin_chat_id,
        }
    }

    /// Turn the user's cart into a pending purchase request.
    ///
    /// The request row, its line items, the coupon consumption and the cart
    /// clear are one all-or-nothing transaction; when anything fails the
    /// cart and coupon are exactly as before.
    pub async fn checkout(
        &self,
        telegram_id: i64,
        coupon_code: Option<&str>,
    ) -> Result<CheckoutOutcome, ServiceError> {
        let user = self
            .db_client
            .get_user(telegram_id)
            .await?
            .ok_or(ServiceError::UserNotFound(telegram_id))?;

        if user.is_banned {
            return Err(ServiceError::UserBanned(telegram_id));
        }

        if self
            .db_client
            .get_user_active_request(telegram_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::PendingRequestExists(telegram_id));
        }

        let items = self.db_client.get_cart_items(telegram_id).await?;
        if items.is_empty() {
            return Err(ServiceError::EmptyCart);
        }

        let coupon = match coupon_code {
            Some(code) => match self.db_client.validate_coupon(code, telegram_id).await? {
                CouponCheck::Valid(coupon) => Some(coupon),
                other => return Err(ServiceError::InvalidCoupon(other.reason().to_string())),
            },
            None => None,
        };

        let discount_percent = coupon.as_ref().map(|c| c.discount_percent).unwrap_or(0);
        let totals = pricing::price_cart(&items, discount_percent);

        if !pricing::within_order_bounds(totals.total, self.min_order_total, self.max_order_total) {
            return Err(ServiceError::OrderOutOfBounds {
                total: totals.total,
                min: self.min_order_total,
                max: self.max_order_total,
            });
        }

        let mut tx = self.db_client.pool.begin().await?;

        let Some(wallet) = claim_wallet(&mut tx, telegram_id).await? else {
            tx.rollback().await?;
            tracing::warn!(
                "wallet pool exhausted, checkout aborted for user {}",
                telegram_id
            );
            self.notifications
                .notify(self.admin_chat_id, "Wallet pool exhausted: a checkout was turned away.", None)
                .await;
            return Ok(CheckoutOutcome::WalletsExhausted);
        };

        let request_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO purchase_requests (user_id, total_amount, wallet, status, discount_percent)
            VALUES ($1, $2, $3, 'pending', $4)
            RETURNING id
            "#,
        )
        .bind(telegram_id)
        .bind(totals.total)
        .bind(&wallet)
        .bind(discount_percent)
        .fetch_one(&mut *tx)
        .await?;

        for item in &items {
            sqlx::query(
                "INSERT INTO purchase_request_items (request_id, product_id, quantity, price) VALUES ($1, $2, $3, $4)",
            )
            .bind(request_id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.price)
            .execute(&mut *tx)
            .await?;
        }

        if let Some(ref coupon) = coupon {
            if !consume_coupon(&mut tx, coupon.id).await? {
                tx.rollback().await?;
                return Err(ServiceError::InvalidCoupon(
                    "coupon has already been used".to_string(),
                ));
            }
        }

        sqlx::query("DELETE FROM cart WHERE user_id = $1")
            .bind(telegram_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "created purchase request #{} for user {} ({} with {}% discount)",
            request_id,
            telegram_id,
            pricing::format_usdt(totals.total),
            discount_percent
        );

        Ok(CheckoutOutcome::Created(CheckoutReceipt {
            request_id,
            wallet,
            discount_percent,
            totals,
        }))
    }

    /// Apply the admin decision to a pending request.
    ///
    /// Returns `Ok(None)` when the request exists but is no longer pending:
    /// the transition is one-way and a second invocation has no effect. The
    /// status flip and the strike-counter mutation commit in one
    /// transaction; notifications and the location handoff happen strictly
    /// after commit.
    pub async fn decide(
        &self,
        request_id: i64,
        decision: Decision,
    ) -> Result<Option<DecisionReceipt>, ServiceError> {
        let mut tx = self.db_client.pool.begin().await?;

        let updated = sqlx::query_as::<_, PurchaseRequest>(
            r#"
            UPDATE purchase_requests
            SET status = $2::request_status, updated_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING id, user_id, total_amount, wallet, status, discount_percent, created_at, updated_at
            "#,
        )
        .bind(request_id)
        .bind(decision.as_status().to_str())
        .fetch_optional(&mut *tx)
        .await?;

        let Some(request) = updated else {
            tx.rollback().await?;
            return match self.db_client.get_request(request_id).await? {
                Some(existing) => {
                    tracing::warn!(
                        "ignoring decision for request #{}: already {}",
                        request_id,
                        existing.status.to_str()
                    );
                    Ok(None)
                }
                None => Err(ServiceError::RequestNotFound(request_id)),
            };
        };

        let receipt = match decision {
            Decision::Rejected => {
                let failed_payments: i32 = sqlx::query_scalar(
                    "UPDATE users SET failed_payments = failed_payments + 1 WHERE telegram_id = $1 RETURNING failed_payments",
                )
                .bind(request.user_id)
                .fetch_one(&mut *tx)
                .await?;

                if failed_payments >= self.ban_threshold {
                    sqlx::query("UPDATE users SET is_banned = TRUE WHERE telegram_id = $1")
                        .bind(request.user_id)
                        .execute(&mut *tx)
                        .await?;
                    tracing::warn!(
                        "user {} banned after {} failed payments",
                        request.user_id,
                        failed_payments
                    );
                }

                tx.commit().await?;

                DecisionReceipt {
                    failed_payments,
                    notice: Some(StrikeNotice::for_count(failed_payments, self.ban_threshold)),
                    location: None,
                    request,
                }
            }
            Decision::Completed => {
                sqlx::query("UPDATE users SET failed_payments = 0 WHERE telegram_id = $1")
                    .bind(request.user_id)
                    .execute(&mut *tx)
                    .await?;

                tx.commit().await?;

                let location = match self
                    .db_client
                    .get_request_items(request_id)
                    .await?
                    .first()
                {
                    Some(first) => self.db_client.allocate_location(first.product_id).await?,
                    None => None,
                };

                DecisionReceipt {
                    failed_payments: 0,
                    notice: None,
                    location,
                    request,
                }
            }
        };

        self.notify_decision(&receipt, decision).await;

        Ok(Some(receipt))
    }

    /// Post-commit, best-effort messaging. A failure here never reverses the
    /// committed transition.
    async fn notify_decision(&self, receipt: &DecisionReceipt, decision: Decision) {
        let request = &receipt.request;

        match decision {
            Decision::Completed => {
                let message = match &receipt.location {
                    Some(_) => format!(
                        "Order #{} confirmed ({}). Your delivery location is attached.",
                        request.id,
                        pricing::format_usdt(request.total_amount)
                    ),
                    None => format!(
                        "Order #{} confirmed ({}). Your delivery location is on its way.",
                        request.id,
                        pricing::format_usdt(request.total_amount)
                    ),
                };

                self.notifications
                    .notify(request.user_id, &message, receipt.location.as_deref())
                    .await;

                // The image is a one-time secret: once handed off it must not
                // be deliverable again. The row is already gone; a failed
                // unlink only leaks a file.
                if let Some(path) = &receipt.location {
                    if let Err(e) = tokio::fs::remove_file(path).await {
                        tracing::warn!("could not delete location file {}: {}", path, e);
                    }
                } else {
                    self.notifications
                        .notify(
                            self.admin_chat_id,
                            &format!("Order #{} completed without a location in the pool.", request.id),
                            None,
                        )
                        .await;
                }
            }
            Decision::Rejected => {
                let notice = receipt
                    .notice
                    .map(|n| n.message())
                    .unwrap_or_default();
                let message = format!(
                    "Order #{} was rejected: payment could not be confirmed. {}",
                    request.id, notice
                );

                self.notifications.notify(request.user_id, &message, None).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ordermodels::RequestStatus;

    #[test]
    fn test_strike_notice_tiers() {
        assert_eq!(StrikeNotice::for_count(1, 3), StrikeNotice::AttemptsRemaining(2));
        assert_eq!(StrikeNotice::for_count(2, 3), StrikeNotice::FinalWarning);
        assert_eq!(StrikeNotice::for_count(3, 3), StrikeNotice::Banned);
        assert_eq!(StrikeNotice::for_count(4, 3), StrikeNotice::Banned);
    }

    #[test]
    fn test_strike_notice_messages() {
        assert!(StrikeNotice::AttemptsRemaining(2).message().contains("2"));
        assert!(StrikeNotice::FinalWarning.message().contains("FINAL WARNING"));
        assert!(StrikeNotice::Banned.message().contains("banned"));
    }

    #[test]
    fn test_decision_maps_to_terminal_status() {
        assert_eq!(Decision::Completed.as_status(), RequestStatus::Completed);
        assert_eq!(Decision::Rejected.as_status(), RequestStatus::Rejected);
        assert_eq!(RequestStatus::Completed.to_str(), "completed");
        assert_eq!(RequestStatus::Rejected.to_str(), "rejected");
    }
}
