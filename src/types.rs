use crate::consts::{
    CENTURY_CYCLE, DAYS_BEFORE_MONTH, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE,
    LEAP_YEAR_CYCLE, MONTHS_PER_YEAR,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// The coarsest calendar unit at which a value is meaningful.
///
/// Variants are ordered from coarse to fine, so `Precision::Year < Precision::Day`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "minute")]
    Minute,
    #[default]
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "hundredth")]
    Hundredth,
}

impl Precision {
    /// Next coarser precision, or `None` for `Year`
    pub const fn coarser(self) -> Option<Self> {
        match self {
            Self::Year => None,
            Self::Month => Some(Self::Year),
            Self::Day => Some(Self::Month),
            Self::Hour => Some(Self::Day),
            Self::Minute => Some(Self::Hour),
            Self::Second => Some(Self::Minute),
            Self::Hundredth => Some(Self::Second),
        }
    }

    /// True for the date units (year, month, day)
    pub const fn is_date(self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Day)
    }
}

/// Construction-time behavior of a [`FuzzyTime`](crate::FuzzyTime).
///
/// Built with chained calls:
///
/// ```
/// use fuzzy_time::{Options, Precision};
///
/// let options = Options::new(Precision::Minute).with_strict(true).with_time_zone(true);
/// assert!(options.strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub precision: Precision,
    /// Setters validate their argument
    pub strict: bool,
    /// Skip day-of-year and leap flag maintenance on mutation
    pub fast: bool,
    pub use_time_zone: bool,
    pub time_only: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self::new(Precision::default())
    }
}

impl Options {
    pub const fn new(precision: Precision) -> Self {
        Self {
            precision,
            strict: false,
            fast: false,
            use_time_zone: false,
            time_only: false,
        }
    }

    pub const fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub const fn with_fast(mut self, fast: bool) -> Self {
        self.fast = fast;
        self
    }

    pub const fn with_time_zone(mut self, use_time_zone: bool) -> Self {
        self.use_time_zone = use_time_zone;
        self
    }

    pub const fn with_time_only(mut self, time_only: bool) -> Self {
        self.time_only = time_only;
        self
    }
}

/// A partial update of the precision and the zone/time-only flags.
/// Unset entries are kept or reset depending on [`Apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Settings {
    pub precision: Option<Precision>,
    pub use_time_zone: Option<bool>,
    pub time_only: Option<bool>,
}

impl Settings {
    pub const fn precision(mut self, precision: Precision) -> Self {
        self.precision = Some(precision);
        self
    }

    pub const fn use_time_zone(mut self, on: bool) -> Self {
        self.use_time_zone = Some(on);
        self
    }

    pub const fn time_only(mut self, on: bool) -> Self {
        self.time_only = Some(on);
        self
    }
}

/// How [`Settings`] combine with the current configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Apply {
    /// Keep prior settings for entries left unset
    Cumulative,
    /// Reset entries left unset to their defaults
    Reset,
}

/// Interval units shared by [`add_interval`](crate::FuzzyTime::add_interval) and
/// [`round`](crate::FuzzyTime::round).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    #[display(fmt = "second")]
    Second,
    #[display(fmt = "minute")]
    Minute,
    #[display(fmt = "hour")]
    Hour,
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "week")]
    Week,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
    #[display(fmt = "irregular")]
    Irregular,
}

impl IntervalUnit {
    /// Looks up a unit by name, case-insensitively, accepting a plural `s`
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        let singular = lower.strip_suffix('s').unwrap_or(&lower);
        match singular {
            "second" => Some(Self::Second),
            "minute" => Some(Self::Minute),
            "hour" => Some(Self::Hour),
            "day" => Some(Self::Day),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            "year" => Some(Self::Year),
            _ => None,
        }
    }

    /// The field this unit steps, if it maps onto one
    pub const fn precision(self) -> Option<Precision> {
        match self {
            Self::Second => Some(Precision::Second),
            Self::Minute => Some(Precision::Minute),
            Self::Hour => Some(Precision::Hour),
            Self::Day | Self::Week => Some(Precision::Day),
            Self::Month => Some(Precision::Month),
            Self::Year => Some(Precision::Year),
            Self::Irregular => None,
        }
    }
}

/// Rounding direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Retreat to the prior boundary
    Backward,
    /// Advance to the next boundary
    Forward,
}

/// Signed deltas applied together by [`add`](crate::FuzzyTime::add), smallest unit first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeOffset {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub hundredths: i64,
}

impl TimeOffset {
    pub const fn years(years: i64) -> Self {
        Self { years, ..Self::zero() }
    }

    pub const fn months(months: i64) -> Self {
        Self { months, ..Self::zero() }
    }

    pub const fn days(days: i64) -> Self {
        Self { days, ..Self::zero() }
    }

    pub const fn hours(hours: i64) -> Self {
        Self { hours, ..Self::zero() }
    }

    pub const fn minutes(minutes: i64) -> Self {
        Self { minutes, ..Self::zero() }
    }

    pub const fn zero() -> Self {
        Self {
            years: 0,
            months: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
            hundredths: 0,
        }
    }

    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
            && self.hundredths == 0
    }
}

// Helper functions

pub const fn is_leap_year(year: i64) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

/// Days in `month` of `year`. Out-of-range months report 31 so raw values never index past the
/// table.
pub const fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        FEBRUARY if is_leap_year(year) => FEBRUARY_DAYS_LEAP,
        1..=12 => DAYS_IN_MONTH[month as usize],
        _ => 31,
    }
}

pub const fn days_in_year(year: i64) -> u16 {
    if is_leap_year(year) { 366 } else { 365 }
}

/// 1-based ordinal day. Expects a month in `1..=12`.
pub const fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    let month = if month == 0 || month > 12 { 1 } else { month };
    let leap_shift = if month > FEBRUARY && is_leap_year(year) { 1 } else { 0 };
    DAYS_BEFORE_MONTH[month as usize] + leap_shift + day as u16
}

/// Folds a zero-based month count onto (year, 1-based month)
pub(crate) fn normalize_year_month(year: i64, month_zero_based: i64) -> (i64, u8) {
    let total = year.saturating_mul(MONTHS_PER_YEAR).saturating_add(month_zero_based);
    (total.div_euclid(MONTHS_PER_YEAR), narrow(total.rem_euclid(MONTHS_PER_YEAR) + 1))
}

/// Days since 1970-01-01. Linear in `day`, so days past the month end roll forward.
pub(crate) const fn days_from_civil(year: i64, month: u8, day: u8) -> i64 {
    let month = month as i64;
    let adjusted_year = if month <= 2 { year - 1 } else { year };
    let era = adjusted_year.div_euclid(400);
    let yoe = adjusted_year - era * 400;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let doy = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`]
pub(crate) fn civil_from_days(days: i64) -> (i64, u8, u8) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, narrow(month), narrow(day))
}

/// ISO weekday, 0 = Monday
pub(crate) const fn weekday_from_days(days: i64) -> i64 {
    // 1970-01-01 was a Thursday
    (days + 3).rem_euclid(7)
}

/// Narrows a value already reduced into a field's range
pub(crate) fn narrow(value: i64) -> u8 {
    u8::try_from(value).unwrap_or_default()
}
