/// Cart pricing.
///
/// All amounts are USDT. Arithmetic stays unrounded end to end so rounding
/// error never compounds across line items; round only at the presentation
/// edge with [`round2`] / [`format_usdt`].
use serde::Serialize;

use crate::models::cartmodels::CartItem;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartTotals {
    pub subtotal: f64,
    pub discount_amount: f64,
    pub total: f64,
}

/// Price a cart with an optional percentage discount applied to the subtotal.
pub fn price_cart(items: &[CartItem], discount_percent: i32) -> CartTotals {
    let subtotal: f64 = items
        .iter()
        .map(|item| item.price * item.quantity as f64)
        .sum();

    let discount_amount = if discount_percent > 0 {
        subtotal * discount_percent as f64 / 100.0
    } else {
        0.0
    };

    CartTotals {
        subtotal,
        discount_amount,
        total: subtotal - discount_amount,
    }
}

/// Whether a total may proceed to checkout. Out-of-bounds is a rejected
/// precondition, not an error: the cart stays as it was.
pub fn within_order_bounds(total: f64, min: f64, max: f64) -> bool {
    total >= min && total <= max
}

/// Round to 2 decimal places for display.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

pub fn format_usdt(amount: f64) -> String {
    format!("{:.2} USDT", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: i64, price: f64, quantity: i32) -> CartItem {
        CartItem {
            id: product_id,
            product_id,
            name: format!("product {}", product_id),
            price,
            quantity,
        }
    }

    #[test]
    fn test_price_cart_no_discount() {
        let totals = price_cart(&[item(1, 10.0, 2), item(2, 5.5, 1)], 0);
        assert_eq!(totals.subtotal, 25.5);
        assert_eq!(totals.discount_amount, 0.0);
        assert_eq!(totals.total, 25.5);
    }

    #[test]
    fn test_price_cart_with_discount() {
        let totals = price_cart(&[item(1, 100.0, 1)], 15);
        assert_eq!(totals.subtotal, 100.0);
        assert_eq!(totals.discount_amount, 15.0);
        assert_eq!(totals.total, 85.0);
    }

    #[test]
    fn test_price_cart_duplicate_lines_not_merged() {
        // Two lines for the same product both count.
        let totals = price_cart(&[item(1, 10.0, 1), item(1, 10.0, 3)], 0);
        assert_eq!(totals.subtotal, 40.0);
    }

    #[test]
    fn test_price_cart_empty() {
        let totals = price_cart(&[], 10);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_total_invariant_holds() {
        let totals = price_cart(&[item(1, 33.33, 3), item(2, 0.07, 10)], 7);
        let expected = totals.subtotal - totals.subtotal * 7.0 / 100.0;
        assert!((totals.total - expected).abs() < 1e-9);
    }

    #[test]
    fn test_order_bounds() {
        assert!(within_order_bounds(20.0, 20.0, 1000.0));
        assert!(within_order_bounds(1000.0, 20.0, 1000.0));
        assert!(!within_order_bounds(19.99, 20.0, 1000.0));
        assert!(!within_order_bounds(1000.01, 20.0, 1000.0));
    }

    #[test]
    fn test_rounding_at_presentation_only() {
        assert_eq!(round2(19.994), 19.99);
        assert_eq!(round2(19.996), 20.0);
        assert_eq!(format_usdt(85.5), "85.50 USDT");
    }
}
