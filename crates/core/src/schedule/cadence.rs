//! Date cadences and calendar-month arithmetic.
//!
//! All month stepping in the crate goes through [`add_months`]: the day of
//! month is kept when the target month has it and clamped to the last day
//! otherwise (Jan 31 + 1 month = Feb 28/29).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::ScheduleError;

/// Maximum number of anchors in a quarterly set.
pub const MAX_ANCHORS: usize = 4;

/// A (month, day) pair that recurs every calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorDate {
    /// Month of year (1-12).
    pub month: u32,
    /// Day of month (1-31, clamped to the month's length).
    pub day: u32,
}

impl AnchorDate {
    /// Creates a new anchor.
    #[must_use]
    pub const fn new(month: u32, day: u32) -> Self {
        Self { month, day }
    }

    /// Takes month and day from a full date, ignoring the year.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.month(), date.day())
    }

    /// Resolves the anchor in the given year.
    fn in_year(self, year: i32) -> Option<NaiveDate> {
        let day = self.day.min(days_in_month(year, self.month));
        NaiveDate::from_ymd_opt(year, self.month, day)
    }
}

/// Repetition rule for a recurring obligation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Cadence {
    /// Every `months_between` months from the start date.
    FixedInterval {
        /// Step in calendar months.
        months_between: u32,
        /// Day of month every occurrence is pinned to, if any.
        pinned_day: Option<u32>,
    },
    /// Fixed yearly anchor dates; `None` anchors produce no occurrence.
    QuarterlySet {
        /// Up to four anchors.
        anchors: Vec<Option<AnchorDate>>,
    },
}

impl Cadence {
    /// Monthly cadence keeping the start date's day.
    #[must_use]
    pub const fn monthly() -> Self {
        Self::every_months(1)
    }

    /// Cadence stepping `months_between` months.
    #[must_use]
    pub const fn every_months(months_between: u32) -> Self {
        Self::FixedInterval {
            months_between,
            pinned_day: None,
        }
    }

    /// Monthly cadence pinned to a day of month.
    #[must_use]
    pub const fn monthly_on(day: u32) -> Self {
        Self::FixedInterval {
            months_between: 1,
            pinned_day: Some(day),
        }
    }

    /// Checks that the cadence advances and its dates are well-formed.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::InvalidCadence` for a zero step, a pinned day
    /// outside 1-31, or a malformed anchor list.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        match self {
            Self::FixedInterval {
                months_between,
                pinned_day,
            } => {
                if *months_between == 0 {
                    return Err(ScheduleError::InvalidCadence(
                        "months_between must be at least 1".to_string(),
                    ));
                }
                if let Some(day) = pinned_day
                    && !(1..=31).contains(day)
                {
                    return Err(ScheduleError::InvalidCadence(format!(
                        "pinned day {day} is outside 1-31"
                    )));
                }
            }
            Self::QuarterlySet { anchors } => {
                if anchors.is_empty() || anchors.len() > MAX_ANCHORS {
                    return Err(ScheduleError::InvalidCadence(format!(
                        "quarterly set needs 1-{MAX_ANCHORS} anchors, got {}",
                        anchors.len()
                    )));
                }
                for anchor in anchors.iter().flatten() {
                    if !(1..=12).contains(&anchor.month) || !(1..=31).contains(&anchor.day) {
                        return Err(ScheduleError::InvalidCadence(format!(
                            "anchor {:02}-{:02} is not a calendar date",
                            anchor.month, anchor.day
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// One date produced by a cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Zero-based position in the sequence counted from the start date.
    pub index: u32,
    /// Due date.
    pub date: NaiveDate,
    /// Anchor position that produced this date (quarterly sets only).
    pub slot: Option<usize>,
}

/// Payment rhythm of insurance and supplier contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentRhythm {
    /// Every month.
    Monthly,
    /// Every three months.
    Quarterly,
    /// Every six months.
    SemiAnnual,
    /// Once a year.
    Annual,
}

impl PaymentRhythm {
    /// Months between two payments.
    #[must_use]
    pub const fn months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::SemiAnnual => 6,
            Self::Annual => 12,
        }
    }

    /// Number of payments per year.
    #[must_use]
    pub const fn payments_per_year(self) -> u32 {
        12 / self.months()
    }

    /// Cadence for this rhythm.
    #[must_use]
    pub const fn cadence(self) -> Cadence {
        Cadence::every_months(self.months())
    }
}

impl std::fmt::Display for PaymentRhythm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
            Self::SemiAnnual => write!(f, "semiannual"),
            Self::Annual => write!(f, "annual"),
        }
    }
}

impl std::str::FromStr for PaymentRhythm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "monatlich" => Ok(Self::Monthly),
            "quarterly" | "quarter" | "vierteljaehrlich" | "vierteljährlich" => {
                Ok(Self::Quarterly)
            }
            "semiannual" | "semi_annual" | "half_yearly" | "halbjaehrlich" | "halbjährlich" => {
                Ok(Self::SemiAnnual)
            }
            "annual" | "yearly" | "jaehrlich" | "jährlich" => Ok(Self::Annual),
            _ => Err(format!("Unknown payment rhythm: {s}")),
        }
    }
}

/// Number of days in the given month (1-12).
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if NaiveDate::from_ymd_opt(year, 2, 29).is_some() => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Adds calendar months, clamping the day to the target month's length.
///
/// Returns `None` when the result leaves chrono's supported range.
#[must_use]
pub fn add_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    month_with_day(date, months, date.day())
}

/// Moves `months` months from `date` and sets the day, clamped.
fn month_with_day(date: NaiveDate, months: i32, day: u32) -> Option<NaiveDate> {
    let total = date
        .year()
        .checked_mul(12)?
        .checked_add(date.month0().cast_signed())?
        .checked_add(months)?;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12).cast_unsigned() + 1;
    NaiveDate::from_ymd_opt(year, month, day.min(days_in_month(year, month)))
}

/// Expands a cadence into its occurrences between `start` and `horizon`.
///
/// Both ends are inclusive. Fixed intervals are computed from the original
/// start for every step, so clamping in a short month does not drift later
/// occurrences. With a pinned day, months whose pinned date falls before
/// `start` are skipped. Quarterly sets repeat their anchors for every year
/// from `base_year` through `horizon.year() + 1`. An empty result is not an
/// error.
///
/// # Errors
///
/// Returns `ScheduleError::InvalidCadence` if the cadence does not validate.
pub fn expand(
    start: NaiveDate,
    cadence: &Cadence,
    horizon: NaiveDate,
    base_year: i32,
) -> Result<Vec<Occurrence>, ScheduleError> {
    cadence.validate()?;

    if start > horizon {
        return Ok(Vec::new());
    }

    match cadence {
        Cadence::FixedInterval {
            months_between,
            pinned_day,
        } => Ok(expand_fixed(start, *months_between, *pinned_day, horizon)),
        Cadence::QuarterlySet { anchors } => Ok(expand_anchors(start, anchors, horizon, base_year)),
    }
}

fn expand_fixed(
    start: NaiveDate,
    months_between: u32,
    pinned_day: Option<u32>,
    horizon: NaiveDate,
) -> Vec<Occurrence> {
    let step = i32::try_from(months_between).unwrap_or(i32::MAX);
    let day = pinned_day.unwrap_or_else(|| start.day());
    let mut occurrences = Vec::new();
    let mut offset: i32 = 0;

    loop {
        let Some(date) = month_with_day(start, offset, day) else {
            break;
        };
        if date > horizon {
            break;
        }
        if date >= start {
            let index = u32::try_from(occurrences.len()).unwrap_or(u32::MAX);
            occurrences.push(Occurrence {
                index,
                date,
                slot: None,
            });
        }
        let Some(next) = offset.checked_add(step) else {
            break;
        };
        offset = next;
    }

    occurrences
}

fn expand_anchors(
    start: NaiveDate,
    anchors: &[Option<AnchorDate>],
    horizon: NaiveDate,
    base_year: i32,
) -> Vec<Occurrence> {
    let mut dated: Vec<(NaiveDate, usize)> = Vec::new();

    for year in base_year.max(start.year())..=horizon.year() + 1 {
        for (slot, anchor) in anchors.iter().enumerate() {
            let Some(date) = anchor.as_ref().and_then(|a| a.in_year(year)) else {
                continue;
            };
            if date >= start && date <= horizon {
                dated.push((date, slot));
            }
        }
    }

    dated.sort_unstable();
    dated
        .into_iter()
        .zip(0u32..)
        .map(|((date, slot), index)| Occurrence {
            index,
            date,
            slot: Some(slot),
        })
        .collect()
}
