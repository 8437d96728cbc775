//! Declining-balance loan amortization.
//!
//! For a monthly rate `r = annual_rate / 12`, the outstanding balance before
//! period `i` is
//!
//! ```text
//! B_i = P * (1 + r)^i - A * ((1 + r)^i - 1) / r
//! ```
//!
//! where `P` is the principal and `A` the fixed monthly payment. The interest
//! of period `i` is `B_i * r` and the principal component is `A - interest`.

use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;

/// Decimal places used for booked amounts.
pub const AMOUNT_SCALE: u32 = 2;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Interest/principal split of one loan period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSplit {
    /// Interest portion of the payment.
    pub interest: Decimal,
    /// Principal portion of the payment (negative under negative amortization).
    pub principal_component: Decimal,
    /// Balance outstanding before this period's payment.
    pub outstanding_balance_before: Decimal,
}

impl PeriodSplit {
    /// Returns true if the payment does not cover the interest.
    #[must_use]
    pub fn is_negative_amortization(&self) -> bool {
        self.principal_component <= Decimal::ZERO
    }

    /// Returns true if nothing is left to repay before this period.
    #[must_use]
    pub fn is_repaid(&self) -> bool {
        self.outstanding_balance_before <= Decimal::ZERO
    }
}

/// Pure amortization calculations.
pub struct AmortizationEngine;

impl AmortizationEngine {
    /// Monthly rate for an annual rate given as a fraction (0.03 = 3 %).
    #[must_use]
    pub fn monthly_rate(annual_rate: Decimal) -> Decimal {
        annual_rate / MONTHS_PER_YEAR
    }

    /// Splits the fixed payment of period `period_index` into interest and
    /// principal.
    ///
    /// Amounts are rounded to two decimal places with Banker's Rounding; the
    /// principal component is derived from the rounded interest so the two
    /// always add up to `fixed_payment`. A zero rate yields no interest and a
    /// linearly decreasing balance. A payment that does not cover the
    /// interest yields a negative principal component rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::ArithmeticOverflow` if the compounded balance
    /// does not fit in a `Decimal`.
    pub fn periodic_split(
        principal: Decimal,
        annual_rate: Decimal,
        fixed_payment: Decimal,
        period_index: u32,
    ) -> Result<PeriodSplit, ScheduleError> {
        let rate = Self::monthly_rate(annual_rate);

        if rate.is_zero() {
            let paid = fixed_payment
                .checked_mul(Decimal::from(period_index))
                .ok_or_else(|| overflow("linear balance"))?;
            return Ok(PeriodSplit {
                interest: Decimal::ZERO,
                principal_component: fixed_payment,
                outstanding_balance_before: (principal - paid).round_dp(AMOUNT_SCALE),
            });
        }

        let balance = Self::balance_before(principal, rate, fixed_payment, period_index)?;
        let interest = balance
            .checked_mul(rate)
            .ok_or_else(|| overflow("interest"))?
            .round_dp(AMOUNT_SCALE);

        Ok(PeriodSplit {
            interest,
            principal_component: fixed_payment - interest,
            outstanding_balance_before: balance.round_dp(AMOUNT_SCALE),
        })
    }

    /// Unrounded balance before period `period_index` for a non-zero monthly rate.
    fn balance_before(
        principal: Decimal,
        rate: Decimal,
        fixed_payment: Decimal,
        period_index: u32,
    ) -> Result<Decimal, ScheduleError> {
        let growth = (Decimal::ONE + rate)
            .checked_powu(u64::from(period_index))
            .ok_or_else(|| overflow("compound growth"))?;
        let grown_principal = principal
            .checked_mul(growth)
            .ok_or_else(|| overflow("grown principal"))?;
        let paid_off = fixed_payment
            .checked_mul(growth - Decimal::ONE)
            .and_then(|v| v.checked_div(rate))
            .ok_or_else(|| overflow("annuity value"))?;
        grown_principal
            .checked_sub(paid_off)
            .ok_or_else(|| overflow("balance"))
    }
}

fn overflow(what: &str) -> ScheduleError {
    ScheduleError::ArithmeticOverflow(format!("{what} exceeds decimal range"))
}
