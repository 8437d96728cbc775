//! Loans: fixed monthly instalments split into interest and principal.

use chrono::{Datelike, NaiveDate};
use immobook_shared::types::{BuildingId, FinancingId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    BookingLine, OccurrenceBookings, SchedulePlan, SourceAdapter, categories, month_label,
    require_positive,
};
use crate::schedule::amortization::AmortizationEngine;
use crate::schedule::cadence::{Cadence, Occurrence};
use crate::schedule::error::ScheduleError;
use crate::schedule::types::BookingComponent;

/// Loan/financing agreement of a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Financing {
    /// Financing ID.
    pub id: FinancingId,
    /// Financed building.
    pub building_id: BuildingId,
    /// Lending bank.
    pub lender: String,
    /// Original loan amount.
    pub principal: Option<Decimal>,
    /// Nominal annual rate as a fraction (0.03 = 3 %).
    pub annual_interest_rate: Option<Decimal>,
    /// Fixed monthly instalment.
    pub monthly_payment: Option<Decimal>,
    /// Number of instalments.
    pub term_months: Option<u32>,
    /// Date of the first instalment.
    pub start_date: NaiveDate,
    /// Date of the last instalment.
    pub end_date: Option<NaiveDate>,
}

/// Validated loan terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTerms {
    /// Original loan amount.
    pub principal: Decimal,
    /// Nominal annual rate.
    pub annual_rate: Decimal,
    /// Fixed monthly instalment.
    pub monthly_payment: Decimal,
}

impl Financing {
    /// Validates principal, rate, payment and term.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidSourceData` if principal or payment
    /// are not positive, the rate is missing or negative, or the term is zero.
    pub fn terms(&self) -> Result<LoanTerms, ScheduleError> {
        let principal = require_positive(self.principal, "principal")?;
        let monthly_payment = require_positive(self.monthly_payment, "monthly_payment")?;
        let annual_rate = match self.annual_interest_rate {
            Some(rate) if rate >= Decimal::ZERO => rate,
            Some(rate) => {
                return Err(ScheduleError::InvalidSourceData(format!(
                    "annual_interest_rate cannot be negative, got {rate}"
                )));
            }
            None => {
                return Err(ScheduleError::InvalidSourceData(
                    "annual_interest_rate is required".to_string(),
                ));
            }
        };
        if self.term_months == Some(0) {
            return Err(ScheduleError::InvalidSourceData(
                "term_months must be at least 1".to_string(),
            ));
        }
        Ok(LoanTerms {
            principal,
            annual_rate,
            monthly_payment,
        })
    }

    fn period_label(&self, index: u32) -> String {
        let number = u64::from(index) + 1;
        match self.term_months {
            Some(term) => format!("period {number}/{term}"),
            None => format!("period {number}"),
        }
    }
}

impl SourceAdapter for Financing {
    fn plan(&self, _today: NaiveDate) -> Result<SchedulePlan, ScheduleError> {
        self.terms()?;
        Ok(SchedulePlan {
            start: self.start_date,
            cadence: Cadence::monthly(),
            base_year: self.start_date.year(),
            end: self.end_date,
            max_periods: self.term_months,
            building_id: Some(self.building_id),
            unit_id: None,
            category: categories::LOAN_INTEREST.to_string(),
            warnings: Vec::new(),
        })
    }

    fn bookings_for(
        &self,
        _plan: &SchedulePlan,
        occurrence: &Occurrence,
    ) -> Result<OccurrenceBookings, ScheduleError> {
        let terms = self.terms()?;
        let split = AmortizationEngine::periodic_split(
            terms.principal,
            terms.annual_rate,
            terms.monthly_payment,
            occurrence.index,
        )?;
        let label = month_label(occurrence.date);
        let period = self.period_label(occurrence.index);

        if split.is_repaid() {
            return Ok(OccurrenceBookings {
                warnings: vec![format!(
                    "Loan from {} is repaid before {period} ({label}); no further instalments",
                    self.lender
                )],
                exhausted: true,
                ..OccurrenceBookings::default()
            });
        }

        let mut bookings = OccurrenceBookings::default();
        if split.interest > Decimal::ZERO {
            bookings.lines.push(BookingLine {
                amount: split.interest,
                description: format!("Loan interest {} {label} ({period})", self.lender),
                category: categories::LOAN_INTEREST.to_string(),
                component: BookingComponent::Interest,
            });
        }
        if split.is_negative_amortization() {
            bookings.warnings.push(format!(
                "Instalment {} does not cover interest {} in {period} ({label})",
                terms.monthly_payment, split.interest
            ));
        } else {
            bookings.lines.push(BookingLine {
                amount: split.principal_component,
                description: format!("Loan principal {} {label} ({period})", self.lender),
                category: categories::LOAN_PRINCIPAL.to_string(),
                component: BookingComponent::Principal,
            });
        }
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn financing() -> Financing {
        Financing {
            id: FinancingId::new(),
            building_id: BuildingId::new(),
            lender: "Sparkasse".to_string(),
            principal: Some(dec!(100000)),
            annual_interest_rate: Some(dec!(0.03)),
            monthly_payment: Some(dec!(843)),
            term_months: Some(360),
            start_date: date(2024, 1, 1),
            end_date: None,
        }
    }

    fn occurrence(index: u32, date: NaiveDate) -> Occurrence {
        Occurrence {
            index,
            date,
            slot: None,
        }
    }

    #[test]
    fn test_plan_is_monthly_bounded_by_term() {
        let plan = financing().plan(date(2025, 6, 1)).unwrap();
        assert_eq!(plan.start, date(2024, 1, 1));
        assert_eq!(plan.cadence, Cadence::monthly());
        assert_eq!(plan.max_periods, Some(360));
    }

    #[test]
    fn test_first_period_split() {
        let record = financing();
        let plan = record.plan(date(2024, 1, 1)).unwrap();
        let bookings = record
            .bookings_for(&plan, &occurrence(0, date(2024, 1, 1)))
            .unwrap();

        assert_eq!(bookings.lines.len(), 2);
        assert_eq!(bookings.lines[0].amount, dec!(250.00));
        assert_eq!(bookings.lines[0].component, BookingComponent::Interest);
        assert_eq!(
            bookings.lines[0].description,
            "Loan interest Sparkasse 01/2024 (period 1/360)"
        );
        assert_eq!(bookings.lines[1].amount, dec!(593.00));
        assert_eq!(bookings.lines[1].category, "Loan principal");
    }

    #[test]
    fn test_interest_and_principal_add_up_to_instalment() {
        let record = financing();
        let plan = record.plan(date(2025, 6, 1)).unwrap();
        let bookings = record
            .bookings_for(&plan, &occurrence(17, date(2025, 6, 1)))
            .unwrap();
        let total: Decimal = bookings.lines.iter().map(|l| l.amount).sum();
        assert_eq!(total, dec!(843));
        assert_eq!(
            bookings.lines[1].description,
            "Loan principal Sparkasse 06/2025 (period 18/360)"
        );
    }

    #[test]
    fn test_zero_rate_books_principal_only() {
        let mut record = financing();
        record.annual_interest_rate = Some(Decimal::ZERO);
        let plan = record.plan(date(2024, 1, 1)).unwrap();
        let bookings = record
            .bookings_for(&plan, &occurrence(3, date(2024, 4, 1)))
            .unwrap();
        assert_eq!(bookings.lines.len(), 1);
        assert_eq!(bookings.lines[0].component, BookingComponent::Principal);
        assert_eq!(bookings.lines[0].amount, dec!(843));
    }

    #[test]
    fn test_negative_amortization_skips_principal_and_warns() {
        let mut record = financing();
        record.monthly_payment = Some(dec!(200));
        let plan = record.plan(date(2024, 1, 1)).unwrap();
        let bookings = record
            .bookings_for(&plan, &occurrence(0, date(2024, 1, 1)))
            .unwrap();
        assert_eq!(bookings.lines.len(), 1);
        assert_eq!(bookings.lines[0].component, BookingComponent::Interest);
        assert_eq!(bookings.warnings.len(), 1);
    }

    #[test]
    fn test_repaid_loan_is_exhausted() {
        let mut record = financing();
        record.principal = Some(dec!(1000));
        record.annual_interest_rate = Some(Decimal::ZERO);
        record.monthly_payment = Some(dec!(500));
        record.term_months = None;
        let plan = record.plan(date(2024, 1, 1)).unwrap();
        let bookings = record
            .bookings_for(&plan, &occurrence(2, date(2024, 3, 1)))
            .unwrap();
        assert!(bookings.exhausted);
        assert!(bookings.lines.is_empty());
    }

    #[test]
    fn test_invalid_terms() {
        let mut record = financing();
        record.principal = Some(Decimal::ZERO);
        assert!(record.terms().is_err());

        let mut record = financing();
        record.annual_interest_rate = Some(dec!(-0.01));
        assert!(record.terms().is_err());

        let mut record = financing();
        record.annual_interest_rate = None;
        assert!(record.terms().is_err());

        let mut record = financing();
        record.term_months = Some(0);
        assert!(record.terms().is_err());
    }
}
