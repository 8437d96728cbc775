//! Booking schedule generation.
//!
//! - [`cadence`]: calendar stepping and occurrence expansion
//! - [`amortization`]: declining-balance interest/principal split
//! - [`service`]: horizon, window and suggestion assembly
//! - [`store`]: read-only storage seam

pub mod amortization;
pub mod cadence;
pub mod error;
pub mod service;
pub mod store;
pub mod types;

#[cfg(test)]
mod cadence_props;
#[cfg(test)]
mod service_props;

pub use amortization::{AmortizationEngine, PeriodSplit};
pub use cadence::{AnchorDate, Cadence, Occurrence, PaymentRhythm, add_months, expand};
pub use error::ScheduleError;
pub use service::{GenerationOutcome, ScheduleService};
pub use store::{SourceStore, StoreError};
pub use types::{BookingComponent, BookingSuggestion, GeneratedSchedule};
