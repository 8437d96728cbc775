//! Schedule output types.

use chrono::NaiveDate;
use immobook_shared::types::{BuildingId, UnitId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::sources::SourceType;

/// Which part of a payment a suggestion books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingComponent {
    /// The full periodic payment.
    Payment,
    /// Interest share of a loan instalment.
    Interest,
    /// Principal share of a loan instalment.
    Principal,
}

/// A proposed future ledger entry. Never persisted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSuggestion {
    /// Due date of the booking.
    pub due_date: NaiveDate,
    /// Amount, always positive.
    pub amount: Decimal,
    /// Human-readable booking text.
    pub description: String,
    /// Suggested cost category.
    pub cost_category_suggestion: String,
    /// Unit the booking belongs to, if any.
    pub unit_id: Option<UnitId>,
    /// Part of the payment this suggestion books.
    pub component: BookingComponent,
    /// Position of the occurrence counted from the source's start.
    pub period_index: u32,
}

/// Booking suggestions generated for one source record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    /// Kind of source the schedule was generated from.
    pub source_type: SourceType,
    /// Identifier of the source record.
    pub source_id: Uuid,
    /// Building the source belongs to, if it could be resolved.
    pub building_id: Option<BuildingId>,
    /// Last date that may carry a suggestion.
    pub horizon: NaiveDate,
    /// Suggestions in ascending due-date order.
    pub suggestions: Vec<BookingSuggestion>,
    /// Data-quality notes collected while generating.
    pub warnings: Vec<String>,
}

impl GeneratedSchedule {
    /// Number of suggestions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.suggestions.len()
    }

    /// Sum of all suggested amounts.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.suggestions.iter().map(|s| s.amount).sum()
    }
}
