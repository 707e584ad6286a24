// db/coupondb.rs
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{Postgres, Transaction};

use super::db::DBClient;
use super::userdb::UserExt;
use crate::models::couponmodels::{CouponCheck, DiscountCoupon};
use crate::utils::coupon_code::generate_coupon_code;

const COUPON_COLUMNS: &str =
    "id, user_id, coupon_code, discount_percent, is_used, source, expires_at, created_at";

const COUPON_VALIDITY_DAYS: i64 = 30;

/// At-most-once consumption, shared with the checkout transaction. The
/// conditional guard makes a double consume observable as `false`.
pub async fn consume_coupon(
    tx: &mut Transaction<'_, Postgres>,
    coupon_id: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE discount_coupons SET is_used = TRUE WHERE id = $1 AND is_used = FALSE")
        .bind(coupon_id)
        .execute(&mut **tx)
        .await?;

    Ok(result.rows_affected() == 1)
}

#[async_trait]
pub trait CouponExt {
    /// Issues a coupon for a user (reward subsystem or admin). 30-day expiry.
    async fn create_coupon(
        &self,
        telegram_id: i64,
        discount_percent: i32,
        source: &str,
    ) -> Result<DiscountCoupon, sqlx::Error>;

    async fn validate_coupon(
        &self,
        code: &str,
        telegram_id: i64,
    ) -> Result<CouponCheck, sqlx::Error>;

    /// Unused, unexpired coupons for a user, best discount first.
    async fn user_coupons(&self, telegram_id: i64) -> Result<Vec<DiscountCoupon>, sqlx::Error>;
}

#[async_trait]
impl CouponExt for DBClient {
    async fn create_coupon(
        &self,
        telegram_id: i64,
        discount_percent: i32,
        source: &str,
    ) -> Result<DiscountCoupon, sqlx::Error> {
        self.ensure_user(telegram_id).await?;

        let code = generate_coupon_code();
        let expires_at = Utc::now() + Duration::days(COUPON_VALIDITY_DAYS);

        let coupon = sqlx::query_as::<_, DiscountCoupon>(&format!(
            r#"
            INSERT INTO discount_coupons (user_id, coupon_code, discount_percent, source, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            COUPON_COLUMNS
        ))
        .bind(telegram_id)
        .bind(&code)
        .bind(discount_percent)
        .bind(source)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(
            "created {}% coupon {} for user {} (source: {})",
            discount_percent,
            coupon.coupon_code,
            telegram_id,
            source
        );
        Ok(coupon)
    }

    async fn validate_coupon(
        &self,
        code: &str,
        telegram_id: i64,
    ) -> Result<CouponCheck, sqlx::Error> {
        let coupon = sqlx::query_as::<_, DiscountCoupon>(&format!(
            "SELECT {} FROM discount_coupons WHERE coupon_code = $1 AND user_id = $2",
            COUPON_COLUMNS
        ))
        .bind(code)
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await?;

        let check = match coupon {
            None => CouponCheck::NotFound,
            Some(c) if c.is_used => CouponCheck::AlreadyUsed,
            Some(c) if c.expires_at.map(|e| e < Utc::now()).unwrap_or(false) => CouponCheck::Expired,
            Some(c) => CouponCheck::Valid(c),
        };

        Ok(check)
    }

    async fn user_coupons(&self, telegram_id: i64) -> Result<Vec<DiscountCoupon>, sqlx::Error> {
        sqlx::query_as::<_, DiscountCoupon>(&format!(
            r#"
            SELECT {}
            FROM discount_coupons
            WHERE user_id = $1
              AND is_used = FALSE
              AND (expires_at IS NULL OR expires_at > NOW())
            ORDER BY discount_percent DESC
            "#,
            COUPON_COLUMNS
        ))
        .bind(telegram_id)
        .fetch_all(&self.pool)
        .await
    }
}
