//! Schedule generation service.
//!
//! Resolves a source record, asks its adapter for a plan and turns the
//! occurrences inside the rolling window `[today, horizon]` into booking
//! suggestions. Nothing is persisted.

use chrono::NaiveDate;
use immobook_shared::ScheduleConfig;
use uuid::Uuid;

use super::cadence::{add_months, expand};
use super::error::ScheduleError;
use super::store::SourceStore;
use super::types::{BookingSuggestion, GeneratedSchedule};
use crate::sources::{LeaseSchedule, SourceAdapter, SourceRecord, SourceType, Unit};

/// A generated schedule together with the record it came from.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// The source record that was read.
    pub source: SourceRecord,
    /// The generated schedule.
    pub schedule: GeneratedSchedule,
}

/// Generates booking suggestions for recurring sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleService {
    horizon_months: u32,
}

impl Default for ScheduleService {
    fn default() -> Self {
        Self::from_config(ScheduleConfig::default())
    }
}

impl ScheduleService {
    /// Creates a service looking `horizon_months` ahead.
    #[must_use]
    pub const fn new(horizon_months: u32) -> Self {
        Self { horizon_months }
    }

    /// Creates a service from the schedule configuration section.
    #[must_use]
    pub const fn from_config(config: ScheduleConfig) -> Self {
        Self::new(config.horizon_months)
    }

    /// Months looked ahead.
    #[must_use]
    pub const fn horizon_months(&self) -> u32 {
        self.horizon_months
    }

    /// Last date that may carry a suggestion: `today + horizon_months`,
    /// cut off at the source's own end date.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::ArithmeticOverflow` if the horizon leaves the
    /// supported date range.
    pub fn horizon(
        &self,
        today: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<NaiveDate, ScheduleError> {
        let months = i32::try_from(self.horizon_months).map_err(|_| {
            ScheduleError::ArithmeticOverflow(format!(
                "horizon of {} months is too large",
                self.horizon_months
            ))
        })?;
        let rolling = add_months(today, months).ok_or_else(|| {
            ScheduleError::ArithmeticOverflow(format!(
                "{today} + {months} months is out of range"
            ))
        })?;
        Ok(end.map_or(rolling, |end| end.min(rolling)))
    }

    /// Generates the schedule of an already loaded record.
    ///
    /// `unit` is only consulted for lease contracts.
    ///
    /// # Errors
    ///
    /// Returns the first validation, cadence or arithmetic error; there is
    /// no partial result.
    pub fn generate(
        &self,
        record: &SourceRecord,
        unit: Option<&Unit>,
        today: NaiveDate,
    ) -> Result<GeneratedSchedule, ScheduleError> {
        let source_type = record.source_type();
        let source_id = record.id();
        match record {
            SourceRecord::PropertyTax(r) => self.run(r, source_type, source_id, today),
            SourceRecord::Insurance(r) => self.run(r, source_type, source_id, today),
            SourceRecord::Loan(r) => self.run(r, source_type, source_id, today),
            SourceRecord::SupplierContract(r) => self.run(r, source_type, source_id, today),
            SourceRecord::LeaseContract(contract) => self.run(
                &LeaseSchedule { contract, unit },
                source_type,
                source_id,
                today,
            ),
        }
    }

    /// Reads the record (and the unit of a lease) and generates its schedule.
    ///
    /// The source type is parsed before any read. An id that is not a UUID
    /// cannot name a record and is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSourceType`, `NotFound`, `Storage` or any error of
    /// [`ScheduleService::generate`].
    pub async fn generate_for<S: SourceStore + ?Sized>(
        &self,
        store: &S,
        source_type: &str,
        source_id: &str,
        today: NaiveDate,
    ) -> Result<GenerationOutcome, ScheduleError> {
        let source_type: SourceType = source_type.parse()?;
        let id = Uuid::parse_str(source_id.trim())
            .map_err(|_| ScheduleError::not_found(source_type.as_str(), source_id))?;

        let source = store
            .find_source(source_type, id)
            .await?
            .ok_or_else(|| ScheduleError::not_found(source_type.as_str(), id))?;

        let unit = match source.unit_id() {
            Some(unit_id) => store.find_unit(unit_id).await?,
            None => None,
        };

        let schedule = self.generate(&source, unit.as_ref(), today)?;
        Ok(GenerationOutcome { source, schedule })
    }

    fn run<A: SourceAdapter>(
        &self,
        adapter: &A,
        source_type: SourceType,
        source_id: Uuid,
        today: NaiveDate,
    ) -> Result<GeneratedSchedule, ScheduleError> {
        let plan = adapter.plan(today)?;
        let horizon = self.horizon(today, plan.end)?;
        let occurrences = expand(plan.start, &plan.cadence, horizon, plan.base_year)?;

        let mut warnings = plan.warnings.clone();
        let mut suggestions = Vec::new();

        for occurrence in occurrences
            .iter()
            .take_while(|o| plan.max_periods.is_none_or(|max| o.index < max))
            .filter(|o| o.date >= today)
        {
            let bookings = adapter.bookings_for(&plan, occurrence)?;
            warnings.extend(bookings.warnings);
            if bookings.exhausted {
                break;
            }
            suggestions.extend(bookings.lines.into_iter().map(|line| BookingSuggestion {
                due_date: occurrence.date,
                amount: line.amount,
                description: line.description,
                cost_category_suggestion: line.category,
                unit_id: plan.unit_id,
                component: line.component,
                period_index: occurrence.index,
            }));
        }

        suggestions.sort_by_key(|s| s.due_date);

        Ok(GeneratedSchedule {
            source_type,
            source_id,
            building_id: plan.building_id,
            horizon,
            suggestions,
            warnings,
        })
    }
}
