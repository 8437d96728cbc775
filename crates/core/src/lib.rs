//! Core business logic for Immobook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! It turns recurring financial source records into booking suggestions for the
//! rolling forecast window.
//!
//! # Modules
//!
//! - `schedule` - Date cadences, loan amortization and schedule orchestration
//! - `sources` - One adapter per recurring source kind (tax, insurance, loan, supplier, lease)
//! - `clock` - Injectable notion of "today"

pub mod clock;
pub mod schedule;
pub mod sources;

pub use clock::{Clock, FixedClock, SystemClock};
