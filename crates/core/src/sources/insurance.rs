//! Insurance policies: the annual premium split over the payment rhythm.

use chrono::{Datelike, NaiveDate};
use immobook_shared::types::{BuildingId, InsurancePolicyId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    OccurrenceBookings, SchedulePlan, SourceAdapter, categories, month_label, parse_rhythm,
    bookable_amount, require_positive,
};
use crate::schedule::cadence::{Occurrence, PaymentRhythm};
use crate::schedule::error::ScheduleError;

/// Insurance policy of a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    /// Policy ID.
    pub id: InsurancePolicyId,
    /// Insured building.
    pub building_id: BuildingId,
    /// Insurance company.
    pub insurer: String,
    /// Kind of cover (e.g. "Building", "Liability").
    pub insurance_type: String,
    /// Yearly premium.
    pub annual_premium: Option<Decimal>,
    /// Stored payment rhythm (e.g. "quarterly", "jährlich").
    pub payment_rhythm: String,
    /// First premium date; today if absent.
    pub start_date: Option<NaiveDate>,
    /// Last day of cover.
    pub end_date: Option<NaiveDate>,
}

impl InsurancePolicy {
    /// Parsed payment rhythm.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidSourceData` for an unknown rhythm.
    pub fn rhythm(&self) -> Result<PaymentRhythm, ScheduleError> {
        parse_rhythm(&self.payment_rhythm)
    }

    /// Premium due per payment.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidSourceData` if the premium is missing
    /// or not positive, the rhythm is unknown, or the premium per payment
    /// rounds to zero.
    pub fn premium_per_payment(&self) -> Result<Decimal, ScheduleError> {
        let annual = require_positive(self.annual_premium, "annual_premium")?;
        let rhythm = self.rhythm()?;
        bookable_amount(
            annual / Decimal::from(rhythm.payments_per_year()),
            "annual_premium per payment",
        )
    }
}

impl SourceAdapter for InsurancePolicy {
    fn plan(&self, today: NaiveDate) -> Result<SchedulePlan, ScheduleError> {
        self.premium_per_payment()?;
        let start = self.start_date.unwrap_or(today);
        Ok(SchedulePlan {
            start,
            cadence: self.rhythm()?.cadence(),
            base_year: start.year(),
            end: self.end_date,
            max_periods: None,
            building_id: Some(self.building_id),
            unit_id: None,
            category: categories::INSURANCE.to_string(),
            warnings: Vec::new(),
        })
    }

    fn bookings_for(
        &self,
        plan: &SchedulePlan,
        occurrence: &Occurrence,
    ) -> Result<OccurrenceBookings, ScheduleError> {
        let label = month_label(occurrence.date);
        let description = if self.insurance_type.trim().is_empty() {
            format!("Insurance premium {} {label}", self.insurer)
        } else {
            format!(
                "Insurance premium {} ({}) {label}",
                self.insurer, self.insurance_type
            )
        };
        Ok(OccurrenceBookings::payment(
            self.premium_per_payment()?,
            description,
            &plan.category,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::cadence::Cadence;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy(rhythm: &str) -> InsurancePolicy {
        InsurancePolicy {
            id: InsurancePolicyId::new(),
            building_id: BuildingId::new(),
            insurer: "Allianz".to_string(),
            insurance_type: "Building".to_string(),
            annual_premium: Some(dec!(1200)),
            payment_rhythm: rhythm.to_string(),
            start_date: Some(date(2025, 1, 1)),
            end_date: None,
        }
    }

    #[test]
    fn test_premium_split_by_rhythm() {
        assert_eq!(policy("quarterly").premium_per_payment().unwrap(), dec!(300));
        assert_eq!(policy("monthly").premium_per_payment().unwrap(), dec!(100));
        assert_eq!(policy("halbjährlich").premium_per_payment().unwrap(), dec!(600));
        assert_eq!(policy("annual").premium_per_payment().unwrap(), dec!(1200));
    }

    #[test]
    fn test_premium_rounding_to_zero_is_invalid() {
        let mut record = policy("monthly");
        record.annual_premium = Some(dec!(0.05));
        assert!(matches!(
            record.plan(date(2025, 1, 1)),
            Err(ScheduleError::InvalidSourceData(_))
        ));
    }

    #[test]
    fn test_unknown_rhythm_is_invalid() {
        assert!(matches!(
            policy("weekly").plan(date(2025, 1, 1)),
            Err(ScheduleError::InvalidSourceData(_))
        ));
    }

    #[test]
    fn test_missing_start_uses_today() {
        let mut record = policy("quarterly");
        record.start_date = None;
        let plan = record.plan(date(2025, 6, 3)).unwrap();
        assert_eq!(plan.start, date(2025, 6, 3));
        assert_eq!(plan.cadence, Cadence::every_months(3));
    }

    #[test]
    fn test_booking_text() {
        let record = policy("quarterly");
        let plan = record.plan(date(2025, 1, 1)).unwrap();
        let occurrence = Occurrence {
            index: 1,
            date: date(2025, 4, 1),
            slot: None,
        };
        let bookings = record.bookings_for(&plan, &occurrence).unwrap();
        assert_eq!(
            bookings.lines[0].description,
            "Insurance premium Allianz (Building) 04/2025"
        );
        assert_eq!(bookings.lines[0].category, "Insurance");
    }
}
