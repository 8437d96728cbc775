//! Lease contracts: monthly rent on a fixed day of the month.

use chrono::{Datelike, NaiveDate};
use immobook_shared::types::{LeaseContractId, UnitId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    OccurrenceBookings, SchedulePlan, SourceAdapter, Unit, categories, month_label,
    bookable_amount, non_negative_or_zero, require_positive,
};
use crate::schedule::cadence::{Cadence, Occurrence};
use crate::schedule::error::ScheduleError;

/// Lease contract of a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseContract {
    /// Contract ID.
    pub id: LeaseContractId,
    /// Leased unit.
    pub unit_id: UnitId,
    /// Tenant name.
    pub tenant_name: String,
    /// Net cold rent.
    pub base_rent: Option<Decimal>,
    /// Advance payment for operating costs.
    pub utilities_advance: Option<Decimal>,
    /// Advance payment for heating.
    pub heating_advance: Option<Decimal>,
    /// Day of month the rent is due (1-31, clamped in short months).
    pub due_day: u32,
    /// Lease start.
    pub start_date: NaiveDate,
    /// Lease end.
    pub end_date: Option<NaiveDate>,
}

impl LeaseContract {
    /// Monthly rent including advances.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidSourceData` if the base rent is not
    /// positive, an advance is negative, or the total rounds to zero.
    pub fn total_rent(&self) -> Result<Decimal, ScheduleError> {
        let base = require_positive(self.base_rent, "base_rent")?;
        let utilities = non_negative_or_zero(self.utilities_advance, "utilities_advance")?;
        let heating = non_negative_or_zero(self.heating_advance, "heating_advance")?;
        bookable_amount(base + utilities + heating, "total rent")
    }
}

/// A lease together with its unit, if the unit could be found.
#[derive(Debug, Clone, Copy)]
pub struct LeaseSchedule<'a> {
    /// The lease.
    pub contract: &'a LeaseContract,
    /// The leased unit.
    pub unit: Option<&'a Unit>,
}

impl SourceAdapter for LeaseSchedule<'_> {
    fn plan(&self, _today: NaiveDate) -> Result<SchedulePlan, ScheduleError> {
        let contract = self.contract;
        if !(1..=31).contains(&contract.due_day) {
            return Err(ScheduleError::InvalidSourceData(format!(
                "due_day must be between 1 and 31, got {}",
                contract.due_day
            )));
        }
        contract.total_rent()?;

        let mut warnings = Vec::new();
        if self.unit.is_none() {
            warnings.push(format!(
                "Unit {} not found; building unknown",
                contract.unit_id
            ));
        }

        Ok(SchedulePlan {
            start: contract.start_date,
            cadence: Cadence::monthly_on(contract.due_day),
            base_year: contract.start_date.year(),
            end: contract.end_date,
            max_periods: None,
            building_id: self.unit.map(|unit| unit.building_id),
            unit_id: Some(contract.unit_id),
            category: categories::RENTAL_INCOME.to_string(),
            warnings,
        })
    }

    fn bookings_for(
        &self,
        plan: &SchedulePlan,
        occurrence: &Occurrence,
    ) -> Result<OccurrenceBookings, ScheduleError> {
        Ok(OccurrenceBookings::payment(
            self.contract.total_rent()?,
            format!(
                "Rent {} {}",
                self.contract.tenant_name,
                month_label(occurrence.date)
            ),
            &plan.category,
        ))
    }
}
