//! Property-tax assessments: four instalments a year on configured dates.

use chrono::{Datelike, NaiveDate};
use immobook_shared::types::{BuildingId, PropertyTaxId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    OccurrenceBookings, SchedulePlan, SourceAdapter, bookable_amount, categories,
    require_positive,
};
use crate::schedule::cadence::{AnchorDate, Cadence, Occurrence};
use crate::schedule::error::ScheduleError;

const QUARTERS_PER_YEAR: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Property-tax assessment of a building.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTaxAssessment {
    /// Assessment ID.
    pub id: PropertyTaxId,
    /// Taxed building.
    pub building_id: BuildingId,
    /// Year the assessment applies from.
    pub assessment_year: i32,
    /// Yearly tax.
    pub annual_amount: Option<Decimal>,
    /// Tax per instalment; takes precedence over `annual_amount`.
    pub quarterly_amount: Option<Decimal>,
    /// Due dates of the four instalments; only month and day are used.
    pub due_dates: [Option<NaiveDate>; 4],
}

impl PropertyTaxAssessment {
    /// Amount of one instalment.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidSourceData` if neither a positive
    /// quarterly nor a positive annual amount is recorded, or the instalment
    /// rounds to zero.
    pub fn instalment(&self) -> Result<Decimal, ScheduleError> {
        if let Some(quarterly) = self.quarterly_amount.filter(|q| *q > Decimal::ZERO) {
            return bookable_amount(quarterly, "quarterly_amount");
        }
        let annual = require_positive(self.annual_amount, "annual_amount")?;
        bookable_amount(annual / QUARTERS_PER_YEAR, "annual_amount per quarter")
    }

    fn cadence(&self) -> Cadence {
        Cadence::QuarterlySet {
            anchors: self
                .due_dates
                .iter()
                .map(|due| due.map(AnchorDate::from_date))
                .collect(),
        }
    }
}

impl SourceAdapter for PropertyTaxAssessment {
    fn plan(&self, _today: NaiveDate) -> Result<SchedulePlan, ScheduleError> {
        self.instalment()?;
        let start = NaiveDate::from_ymd_opt(self.assessment_year, 1, 1).ok_or_else(|| {
            ScheduleError::InvalidSourceData(format!(
                "assessment_year {} is out of range",
                self.assessment_year
            ))
        })?;

        let warnings = self
            .due_dates
            .iter()
            .enumerate()
            .filter(|(_, due)| due.is_none())
            .map(|(slot, _)| format!("Due date for Q{} is missing; quarter skipped", slot + 1))
            .collect();

        Ok(SchedulePlan {
            start,
            cadence: self.cadence(),
            base_year: self.assessment_year,
            end: None,
            max_periods: None,
            building_id: Some(self.building_id),
            unit_id: None,
            category: categories::PROPERTY_TAX.to_string(),
            warnings,
        })
    }

    fn bookings_for(
        &self,
        plan: &SchedulePlan,
        occurrence: &Occurrence,
    ) -> Result<OccurrenceBookings, ScheduleError> {
        let quarter = occurrence.slot.map_or(0, |slot| slot + 1);
        Ok(OccurrenceBookings::payment(
            self.instalment()?,
            format!("Property tax Q{quarter}/{}", occurrence.date.year()),
            &plan.category,
        ))
    }
}
