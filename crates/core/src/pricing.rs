//! Promotion discount arithmetic.
//!
//! The same arithmetic prices cart lines on every view and freezes order
//! line totals at checkout, so it lives here rather than in either caller.

use rust_decimal::Decimal;

/// The price a buyer actually pays for one unit of a product.
///
/// Without a promotion this is the list price unchanged. With a promotion
/// the discounted price is floored to a whole currency unit, so 25% off
/// 9.99 sells at 7, not 7.4925.
pub fn final_price(price: Decimal, discount: Option<Decimal>) -> Decimal {
    match discount {
        Some(d) => ((Decimal::ONE - d) * price).floor(),
        None => price,
    }
}

/// The frozen total for one order or cart line.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Check that a promotion discount is a fraction in `[0, 1)`.
///
/// Returns `Ok(())` when acceptable, or `Err` with a human-readable
/// explanation.
pub fn validate_discount(discount: Decimal) -> Result<(), String> {
    if discount < Decimal::ZERO || discount >= Decimal::ONE {
        return Err(format!(
            "Discount must be a fraction in [0, 1), got {discount}"
        ));
    }
    Ok(())
}
