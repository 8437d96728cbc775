//! Recurring source records and their schedule adapters.
//!
//! Each source kind owns its policy for start date, cadence, amount,
//! booking text and cost category through [`SourceAdapter`]. The
//! orchestrator in `schedule::service` only drives the adapters.

pub mod insurance;
pub mod lease;
pub mod loan;
pub mod property_tax;
pub mod supplier;

use chrono::{Datelike, NaiveDate};
use immobook_shared::types::{BuildingId, UnitId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::schedule::amortization::AMOUNT_SCALE;
use crate::schedule::cadence::{Cadence, Occurrence, PaymentRhythm};
use crate::schedule::error::ScheduleError;
use crate::schedule::types::BookingComponent;

pub use insurance::InsurancePolicy;
pub use lease::{LeaseContract, LeaseSchedule};
pub use loan::Financing;
pub use property_tax::PropertyTaxAssessment;
pub use supplier::SupplierContract;

/// Suggested cost categories.
pub mod categories {
    /// Property tax instalments.
    pub const PROPERTY_TAX: &str = "Property tax";
    /// Insurance premiums.
    pub const INSURANCE: &str = "Insurance";
    /// Interest share of loan instalments.
    pub const LOAN_INTEREST: &str = "Loan interest";
    /// Principal share of loan instalments.
    pub const LOAN_PRINCIPAL: &str = "Loan principal";
    /// Supplier contracts without a supplier type.
    pub const SUPPLIER_SERVICES: &str = "Supplier services";
    /// Rent received from lease contracts.
    pub const RENTAL_INCOME: &str = "Rental income";
}

/// The kinds of recurring sources a schedule can be generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    /// Property-tax assessment.
    PropertyTax,
    /// Insurance policy.
    Insurance,
    /// Loan/financing agreement.
    Loan,
    /// Recurring supplier contract.
    SupplierContract,
    /// Lease contract of a unit.
    LeaseContract,
}

impl SourceType {
    /// All source types.
    pub const ALL: [Self; 5] = [
        Self::PropertyTax,
        Self::Insurance,
        Self::Loan,
        Self::SupplierContract,
        Self::LeaseContract,
    ];

    /// Canonical name used in requests and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PropertyTax => "PropertyTax",
            Self::Insurance => "Insurance",
            Self::Loan => "Loan",
            Self::SupplierContract => "SupplierContract",
            Self::LeaseContract => "LeaseContract",
        }
    }
}

impl std::fmt::Display for SourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceType {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "propertytax" | "grundsteuer" => Ok(Self::PropertyTax),
            "insurance" | "versicherung" => Ok(Self::Insurance),
            "loan" | "financing" | "finanzierung" => Ok(Self::Loan),
            "suppliercontract" | "supplier" | "versorger" => Ok(Self::SupplierContract),
            "leasecontract" | "lease" | "mietvertrag" => Ok(Self::LeaseContract),
            _ => Err(ScheduleError::UnknownSourceType(s.to_string())),
        }
    }
}

/// A rentable unit; leases reach their building through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit ID.
    pub id: UnitId,
    /// Building the unit belongs to.
    pub building_id: BuildingId,
    /// Display name (e.g. "WE 3, 2nd floor left").
    pub name: String,
}

/// One recurring financial source record, read from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SourceRecord {
    /// Property-tax assessment.
    PropertyTax(PropertyTaxAssessment),
    /// Insurance policy.
    Insurance(InsurancePolicy),
    /// Loan/financing agreement.
    Loan(Financing),
    /// Recurring supplier contract.
    SupplierContract(SupplierContract),
    /// Lease contract.
    LeaseContract(LeaseContract),
}

impl SourceRecord {
    /// Kind of this record.
    #[must_use]
    pub const fn source_type(&self) -> SourceType {
        match self {
            Self::PropertyTax(_) => SourceType::PropertyTax,
            Self::Insurance(_) => SourceType::Insurance,
            Self::Loan(_) => SourceType::Loan,
            Self::SupplierContract(_) => SourceType::SupplierContract,
            Self::LeaseContract(_) => SourceType::LeaseContract,
        }
    }

    /// Identifier of this record.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::PropertyTax(r) => r.id.into_inner(),
            Self::Insurance(r) => r.id.into_inner(),
            Self::Loan(r) => r.id.into_inner(),
            Self::SupplierContract(r) => r.id.into_inner(),
            Self::LeaseContract(r) => r.id.into_inner(),
        }
    }

    /// Unit that has to be resolved to find the building (leases only).
    #[must_use]
    pub const fn unit_id(&self) -> Option<UnitId> {
        match self {
            Self::LeaseContract(r) => Some(r.unit_id),
            _ => None,
        }
    }
}

/// Everything the orchestrator needs to expand a source's dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePlan {
    /// First possible occurrence.
    pub start: NaiveDate,
    /// Repetition rule.
    pub cadence: Cadence,
    /// First year of a quarterly set.
    pub base_year: i32,
    /// Source's own end date.
    pub end: Option<NaiveDate>,
    /// Maximum number of occurrences counted from `start`.
    pub max_periods: Option<u32>,
    /// Building the source belongs to.
    pub building_id: Option<BuildingId>,
    /// Unit the source belongs to.
    pub unit_id: Option<UnitId>,
    /// Default cost category.
    pub category: String,
    /// Data-quality notes found while planning.
    pub warnings: Vec<String>,
}

/// One booking produced for an occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingLine {
    /// Amount to book.
    pub amount: Decimal,
    /// Booking text.
    pub description: String,
    /// Suggested cost category.
    pub category: String,
    /// Part of the payment being booked.
    pub component: BookingComponent,
}

/// Bookings an adapter produced for one occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccurrenceBookings {
    /// Lines to book, in booking order.
    pub lines: Vec<BookingLine>,
    /// Data-quality notes for this occurrence.
    pub warnings: Vec<String>,
    /// Set when the source has nothing left to book from here on.
    pub exhausted: bool,
}

impl OccurrenceBookings {
    /// A single full-payment line.
    #[must_use]
    pub fn payment(amount: Decimal, description: String, category: &str) -> Self {
        Self {
            lines: vec![BookingLine {
                amount,
                description,
                category: category.to_string(),
                component: BookingComponent::Payment,
            }],
            ..Self::default()
        }
    }
}

/// Per-kind schedule policy.
pub trait SourceAdapter {
    /// Validates the record and derives start, cadence and bounds.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidSourceData` if a required field is
    /// missing, zero or negative.
    fn plan(&self, today: NaiveDate) -> Result<SchedulePlan, ScheduleError>;

    /// Produces the bookings for one occurrence of the plan.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount for this occurrence cannot be computed.
    fn bookings_for(
        &self,
        plan: &SchedulePlan,
        occurrence: &Occurrence,
    ) -> Result<OccurrenceBookings, ScheduleError>;
}

/// Returns the value if it is present and strictly positive.
pub(crate) fn require_positive(
    value: Option<Decimal>,
    field: &str,
) -> Result<Decimal, ScheduleError> {
    match value {
        Some(v) if v > Decimal::ZERO => Ok(v),
        Some(v) => Err(ScheduleError::InvalidSourceData(format!(
            "{field} must be positive, got {v}"
        ))),
        None => Err(ScheduleError::InvalidSourceData(format!(
            "{field} is required"
        ))),
    }
}

/// Rejects negative optional amounts and treats a missing one as zero.
pub(crate) fn non_negative_or_zero(
    value: Option<Decimal>,
    field: &str,
) -> Result<Decimal, ScheduleError> {
    match value {
        Some(v) if v < Decimal::ZERO => Err(ScheduleError::InvalidSourceData(format!(
            "{field} cannot be negative, got {v}"
        ))),
        Some(v) => Ok(v),
        None => Ok(Decimal::ZERO),
    }
}

/// Parses a stored payment rhythm.
pub(crate) fn parse_rhythm(raw: &str) -> Result<PaymentRhythm, ScheduleError> {
    raw.parse::<PaymentRhythm>()
        .map_err(ScheduleError::InvalidSourceData)
}

/// Rounds a booked amount.
pub(crate) fn round_amount(amount: Decimal) -> Decimal {
    amount.round_dp(AMOUNT_SCALE)
}

/// Rounds a booked amount and rejects one that rounds to zero.
pub(crate) fn bookable_amount(amount: Decimal, field: &str) -> Result<Decimal, ScheduleError> {
    let rounded = round_amount(amount);
    if rounded > Decimal::ZERO {
        Ok(rounded)
    } else {
        Err(ScheduleError::InvalidSourceData(format!(
            "{field} {amount} rounds to a zero booking amount"
        )))
    }
}

/// "MM/YYYY" label used in booking texts.
pub(crate) fn month_label(date: NaiveDate) -> String {
    format!("{:02}/{}", date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("PropertyTax", SourceType::PropertyTax)]
    #[case("property_tax", SourceType::PropertyTax)]
    #[case("Grundsteuer", SourceType::PropertyTax)]
    #[case("insurance", SourceType::Insurance)]
    #[case("Financing", SourceType::Loan)]
    #[case("LOAN", SourceType::Loan)]
    #[case("supplier-contract", SourceType::SupplierContract)]
    #[case("Mietvertrag", SourceType::LeaseContract)]
    #[case("LeaseContract", SourceType::LeaseContract)]
    fn test_source_type_parsing(#[case] raw: &str, #[case] expected: SourceType) {
        assert_eq!(raw.parse::<SourceType>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_source_type() {
        let err = "Foo".parse::<SourceType>().unwrap_err();
        assert!(matches!(err, ScheduleError::UnknownSourceType(ref s) if s == "Foo"));
    }

    #[test]
    fn test_source_type_names_round_trip() {
        for source_type in SourceType::ALL {
            assert_eq!(
                source_type.as_str().parse::<SourceType>().unwrap(),
                source_type
            );
        }
    }

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive(Some(dec!(1)), "x").unwrap(), dec!(1));
        assert!(require_positive(Some(Decimal::ZERO), "x").is_err());
        assert!(require_positive(Some(dec!(-5)), "x").is_err());
        assert!(require_positive(None, "x").is_err());
    }

    #[rstest]
    #[case(dec!(0.005), dec!(0.00))]
    #[case(dec!(0.004), dec!(0.00))]
    #[case(dec!(0.001), dec!(0.00))]
    fn test_sub_cent_amount_is_not_bookable(#[case] amount: Decimal, #[case] rounded: Decimal) {
        assert_eq!(round_amount(amount), rounded);
        assert!(matches!(
            bookable_amount(amount, "amount"),
            Err(ScheduleError::InvalidSourceData(_))
        ));
    }

    #[test]
    fn test_bookable_amount_rounds() {
        assert_eq!(bookable_amount(dec!(0.006), "amount").unwrap(), dec!(0.01));
        assert_eq!(bookable_amount(dec!(85.499), "amount").unwrap(), dec!(85.50));
    }

    #[test]
    fn test_month_label() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(month_label(date), "03/2025");
    }
}
