//! Shipping fee estimate shown on product detail pages.

/// Product price from which shipping is waived.
const FREE_SHIPPING_THRESHOLD: f64 = 100.0;

/// Flat fee charged below the threshold.
const FLAT_FEE: f64 = 25.0;

/// Estimates the shipping fee for a product: a flat R$ 25,00, waived
/// for products costing R$ 100,00 or more.
#[must_use]
pub fn estimate(price: f64) -> f64 {
    if price >= FREE_SHIPPING_THRESHOLD {
        0.0
    } else {
        FLAT_FEE
    }
}
