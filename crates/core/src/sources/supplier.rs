//! Recurring supplier contracts (utilities, cleaning, maintenance).

use chrono::{Datelike, NaiveDate};
use immobook_shared::types::{BuildingId, SupplierContractId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    OccurrenceBookings, SchedulePlan, SourceAdapter, categories, month_label, parse_rhythm,
    bookable_amount, require_positive,
};
use crate::schedule::cadence::Occurrence;
use crate::schedule::error::ScheduleError;

/// Recurring supplier contract of a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierContract {
    /// Contract ID.
    pub id: SupplierContractId,
    /// Supplied building.
    pub building_id: BuildingId,
    /// Supplier name.
    pub supplier_name: String,
    /// Kind of supply, used as cost category (e.g. "Electricity").
    pub supplier_type: String,
    /// Amount per payment.
    pub amount: Option<Decimal>,
    /// Stored payment rhythm.
    pub payment_rhythm: String,
    /// First payment; today if absent.
    pub start_date: Option<NaiveDate>,
    /// End of the contract.
    pub end_date: Option<NaiveDate>,
}

impl SupplierContract {
    /// Amount booked per payment.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidSourceData` if the amount is missing,
    /// not positive, or rounds to zero.
    pub fn amount_per_payment(&self) -> Result<Decimal, ScheduleError> {
        bookable_amount(require_positive(self.amount, "amount")?, "amount")
    }

    fn category(&self) -> &str {
        let supplier_type = self.supplier_type.trim();
        if supplier_type.is_empty() {
            categories::SUPPLIER_SERVICES
        } else {
            supplier_type
        }
    }
}

impl SourceAdapter for SupplierContract {
    fn plan(&self, today: NaiveDate) -> Result<SchedulePlan, ScheduleError> {
        self.amount_per_payment()?;
        let rhythm = parse_rhythm(&self.payment_rhythm)?;
        let start = self.start_date.unwrap_or(today);
        Ok(SchedulePlan {
            start,
            cadence: rhythm.cadence(),
            base_year: start.year(),
            end: self.end_date,
            max_periods: None,
            building_id: Some(self.building_id),
            unit_id: None,
            category: self.category().to_string(),
            warnings: Vec::new(),
        })
    }

    fn bookings_for(
        &self,
        plan: &SchedulePlan,
        occurrence: &Occurrence,
    ) -> Result<OccurrenceBookings, ScheduleError> {
        Ok(OccurrenceBookings::payment(
            self.amount_per_payment()?,
            format!("{} {}", self.supplier_name, month_label(occurrence.date)),
            &plan.category,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn contract() -> SupplierContract {
        SupplierContract {
            id: SupplierContractId::new(),
            building_id: BuildingId::new(),
            supplier_name: "Stadtwerke".to_string(),
            supplier_type: "Electricity".to_string(),
            amount: Some(dec!(85.5)),
            payment_rhythm: "monthly".to_string(),
            start_date: Some(date(2025, 1, 15)),
            end_date: None,
        }
    }

    #[test]
    fn test_supplier_type_is_category() {
        let plan = contract().plan(date(2025, 3, 1)).unwrap();
        assert_eq!(plan.category, "Electricity");
    }

    #[test]
    fn test_empty_supplier_type_falls_back() {
        let mut record = contract();
        record.supplier_type = "  ".to_string();
        let plan = record.plan(date(2025, 3, 1)).unwrap();
        assert_eq!(plan.category, "Supplier services");
    }

    #[test]
    fn test_booking_text_and_amount() {
        let record = contract();
        let plan = record.plan(date(2025, 3, 1)).unwrap();
        let occurrence = Occurrence {
            index: 3,
            date: date(2025, 4, 15),
            slot: None,
        };
        let bookings = record.bookings_for(&plan, &occurrence).unwrap();
        assert_eq!(bookings.lines[0].description, "Stadtwerke 04/2025");
        assert_eq!(bookings.lines[0].amount, dec!(85.50));
    }

    #[test]
    fn test_missing_amount_is_invalid() {
        let mut record = contract();
        record.amount = None;
        assert!(matches!(
            record.plan(date(2025, 3, 1)),
            Err(ScheduleError::InvalidSourceData(_))
        ));
    }

    #[test]
    fn test_sub_cent_amount_is_invalid() {
        let mut record = contract();
        record.amount = Some(dec!(0.004));
        assert!(matches!(
            record.plan(date(2025, 3, 1)),
            Err(ScheduleError::InvalidSourceData(_))
        ));
    }
}
