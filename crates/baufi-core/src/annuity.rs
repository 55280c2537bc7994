//! The single annuity formula shared by the amortization schedule and the
//! bank offer simulator. Keeping it in one place guarantees both produce
//! identical payments for identical loan terms.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

/// Fixed monthly payment for a level-pay annuity loan.
///
/// `monthly_rate` is the periodic rate as a decimal fraction
/// (nominal annual percent / 100 / 12). The zero-rate case is a straight
/// principal split; the closed-form expression would be 0/0 there.
pub fn annuity_payment(principal: Money, monthly_rate: Rate, months: u32) -> Money {
    if months == 0 || principal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if monthly_rate.is_zero() {
        return principal / Decimal::from(months);
    }

    let factor = (Decimal::ONE + monthly_rate).powd(Decimal::from(months));
    principal * monthly_rate * factor / (factor - Decimal::ONE)
}

/// Convert a nominal annual percent rate (3.45 = 3.45%) to the monthly
/// decimal fraction used by [`annuity_payment`].
pub fn monthly_rate(annual_percent: Rate) -> Rate {
    annual_percent / dec!(100) / dec!(12)
}
