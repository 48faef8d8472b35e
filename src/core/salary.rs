//! Salary arithmetic.
//!
//! All money is `rust_decimal::Decimal`; raises are truncated toward zero at the
//! cent so repeated raises never drift upward. The store keeps integer cents.

use crate::errors::{Error, Result};
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Number of fraction digits kept for salaries.
pub const SALARY_SCALE: u32 = 2;

/// Applies a percentage raise, dropping any sub-cent remainder.
///
/// `33333.33` raised by `7` percent is `35666.6631`, which becomes `35666.66`.
#[must_use]
pub fn apply_raise(salary: Decimal, percent: Decimal) -> Decimal {
    let factor = Decimal::ONE + percent / Decimal::ONE_HUNDRED;
    (salary * factor).round_dp_with_strategy(SALARY_SCALE, RoundingStrategy::ToZero)
}

/// Converts a salary into the integer cents stored in the `employees` table.
///
/// # Errors
/// Returns `InvalidArgument` when the amount has sub-cent digits or does not fit in `i64`.
pub fn to_cents(salary: Decimal) -> Result<i64> {
    let cents = salary
        .checked_mul(Decimal::ONE_HUNDRED)
        .filter(|cents| cents.fract().is_zero())
        .and_then(|cents| cents.to_i64());

    cents.ok_or_else(|| Error::InvalidArgument {
        message: format!("salary {salary} cannot be stored in whole cents"),
    })
}

/// Converts stored cents back into a two-digit decimal salary.
#[must_use]
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, SALARY_SCALE)
}
