mod arith;
mod compare;
mod consts;
mod error;
mod format;
mod numeric;
mod parse;
mod prelude;
pub mod relative;
mod types;
pub mod zone;

#[cfg(test)]
mod test_utils;

pub use consts::*;
pub use error::{DecodeError, FieldError, ParseError, ZoneError};
pub use parse::{Format, Layout};
pub use types::{
    Apply, Direction, IntervalUnit, Options, Precision, Settings, TimeOffset, day_of_year,
    days_in_month, days_in_year, is_leap_year,
};
pub use zone::{OffsetResolver, TzResolver};

use crate::error::check_range;
use std::str::FromStr;

/// A calendar time whose meaning stops at an explicit [`Precision`].
///
/// Fields finer than the precision are zeroed by precision-setting operations and ignored by
/// comparison and formatting. The value also caches its absolute month, day of year and leap
/// flag; with [`Options::fast`] set the latter two are only refreshed by [`FuzzyTime::recompute`].
#[derive(Debug, Clone)]
pub struct FuzzyTime {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    hundredth: u8,
    zone: Option<String>,
    options: Options,

    absolute_month: i64,
    day_of_year: u16,
    leap_year: bool,
    zero: bool,
}

impl Default for FuzzyTime {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

impl FuzzyTime {
    /// Creates a zeroed value: year 0, January 1st, midnight.
    pub fn new(options: Options) -> Self {
        let mut value = Self {
            year: 0,
            month: JANUARY,
            day: MIN_DAY,
            hour: 0,
            minute: 0,
            second: 0,
            hundredth: 0,
            zone: None,
            options,
            absolute_month: 0,
            day_of_year: 1,
            leap_year: true,
            zero: true,
        };
        value.refresh();
        value
    }

    /// Sets the calendar date, validating it regardless of the strict flag.
    ///
    /// # Errors
    /// Returns `FieldError::OutOfRange` for the first field that is invalid.
    pub fn with_date(mut self, year: i64, month: u8, day: u8) -> Result<Self, FieldError> {
        check_range(Precision::Year, year, MIN_YEAR, MAX_YEAR)?;
        check_range(Precision::Month, i64::from(month), i64::from(JANUARY), i64::from(MAX_MONTH))?;
        check_range(
            Precision::Day,
            i64::from(day),
            i64::from(MIN_DAY),
            i64::from(days_in_month(year, month)),
        )?;
        self.year = year;
        self.month = month;
        self.day = day;
        self.touch();
        Ok(self)
    }

    /// Sets the clock fields, validating them regardless of the strict flag.
    ///
    /// # Errors
    /// Returns `FieldError::OutOfRange` for the first field that is invalid.
    pub fn with_time(
        mut self,
        hour: u8,
        minute: u8,
        second: u8,
        hundredth: u8,
    ) -> Result<Self, FieldError> {
        check_range(Precision::Hour, i64::from(hour), 0, HOURS_PER_DAY - 1)?;
        check_range(Precision::Minute, i64::from(minute), 0, MINUTES_PER_HOUR - 1)?;
        check_range(Precision::Second, i64::from(second), 0, SECONDS_PER_MINUTE - 1)?;
        check_range(Precision::Hundredth, i64::from(hundredth), 0, HUNDREDTHS_PER_SECOND - 1)?;
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self.hundredth = hundredth;
        self.touch();
        Ok(self)
    }

    /// Attaches a zone label
    #[must_use]
    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }

    pub const fn year(&self) -> i64 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    pub const fn hundredth(&self) -> u8 {
        self.hundredth
    }

    pub fn zone(&self) -> Option<&str> {
        self.zone.as_deref()
    }

    pub const fn precision(&self) -> Precision {
        self.options.precision
    }

    pub const fn options(&self) -> Options {
        self.options
    }

    pub const fn is_strict(&self) -> bool {
        self.options.strict
    }

    pub const fn is_fast(&self) -> bool {
        self.options.fast
    }

    pub const fn uses_time_zone(&self) -> bool {
        self.options.use_time_zone
    }

    pub const fn is_time_only(&self) -> bool {
        self.options.time_only
    }

    /// `year * 12 + month`
    pub const fn absolute_month(&self) -> i64 {
        self.absolute_month
    }

    /// Cached day of year. Stale under fast mode until [`recompute`](Self::recompute).
    pub const fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    /// Cached leap flag. Stale under fast mode until [`recompute`](Self::recompute).
    pub const fn is_leap_year(&self) -> bool {
        self.leap_year
    }

    /// True while no setter or arithmetic has touched the zeroed defaults
    pub const fn is_zero(&self) -> bool {
        self.zero
    }

    /// Refreshes the cached fields. Day of year and the leap flag are skipped in fast mode.
    pub fn recompute(&mut self) {
        self.absolute_month =
            self.year.saturating_mul(MONTHS_PER_YEAR).saturating_add(i64::from(self.month));
        if !self.options.fast {
            self.refresh_calendar();
        }
    }

    /// Refreshes every cached field, fast mode or not
    pub(crate) fn refresh(&mut self) {
        self.recompute();
        self.refresh_calendar();
    }

    fn refresh_calendar(&mut self) {
        self.leap_year = types::is_leap_year(self.year);
        self.day_of_year = types::day_of_year(self.year, self.month, self.day);
    }

    /// Marks the value as mutated and refreshes the cache
    pub(crate) fn touch(&mut self) {
        self.zero = false;
        self.recompute();
    }

    /// Sets the precision and zeroes every field finer than it.
    pub fn set_precision(&mut self, precision: Precision) {
        self.options.precision = precision;
        self.truncate();
    }

    /// Applies a partial settings update.
    ///
    /// With [`Apply::Reset`], entries left unset return to the [`Options::default`] values.
    pub fn configure(&mut self, settings: Settings, apply: Apply) {
        let defaults = Options::default();
        let keep = apply == Apply::Cumulative;
        let precision = settings
            .precision
            .unwrap_or(if keep { self.options.precision } else { defaults.precision });
        self.options.use_time_zone = settings
            .use_time_zone
            .unwrap_or(if keep { self.options.use_time_zone } else { defaults.use_time_zone });
        self.options.time_only = settings
            .time_only
            .unwrap_or(if keep { self.options.time_only } else { defaults.time_only });
        self.set_precision(precision);
    }

    /// Zeroes the fields finer than the current precision
    pub(crate) fn truncate(&mut self) {
        self.zero_finer_than(self.options.precision);
    }

    pub(crate) fn zero_finer_than(&mut self, precision: Precision) {
        let before = (self.month, self.day, self.hour, self.minute, self.second, self.hundredth);
        if precision < Precision::Month {
            self.month = JANUARY;
        }
        if precision < Precision::Day {
            self.day = MIN_DAY;
        }
        if precision < Precision::Hour {
            self.hour = 0;
        }
        if precision < Precision::Minute {
            self.minute = 0;
        }
        if precision < Precision::Second {
            self.second = 0;
        }
        if precision < Precision::Hundredth {
            self.hundredth = 0;
        }
        if before != (self.month, self.day, self.hour, self.minute, self.second, self.hundredth) {
            self.touch();
        }
    }

    /// # Errors
    /// In strict mode, returns `FieldError::OutOfRange` when outside `MIN_YEAR..=MAX_YEAR`.
    pub fn set_year(&mut self, year: i64) -> Result<(), FieldError> {
        if self.options.strict {
            check_range(Precision::Year, year, MIN_YEAR, MAX_YEAR)?;
        }
        self.year = year;
        self.touch();
        Ok(())
    }

    /// # Errors
    /// In strict mode, returns `FieldError::OutOfRange` when outside `1..=12`.
    pub fn set_month(&mut self, month: u8) -> Result<(), FieldError> {
        if self.options.strict {
            check_range(
                Precision::Month,
                i64::from(month),
                i64::from(JANUARY),
                i64::from(MAX_MONTH),
            )?;
        }
        self.month = month;
        self.touch();
        Ok(())
    }

    /// # Errors
    /// In strict mode, returns `FieldError::OutOfRange` when the day does not exist in the current
    /// month.
    pub fn set_day(&mut self, day: u8) -> Result<(), FieldError> {
        if self.options.strict {
            let max = days_in_month(self.year, self.month);
            check_range(Precision::Day, i64::from(day), i64::from(MIN_DAY), i64::from(max))?;
        }
        self.day = day;
        self.touch();
        Ok(())
    }

    /// # Errors
    /// In strict mode, returns `FieldError::OutOfRange` when outside `0..=23`.
    pub fn set_hour(&mut self, hour: u8) -> Result<(), FieldError> {
        if self.options.strict {
            check_range(Precision::Hour, i64::from(hour), 0, HOURS_PER_DAY - 1)?;
        }
        self.hour = hour;
        self.touch();
        Ok(())
    }

    /// # Errors
    /// In strict mode, returns `FieldError::OutOfRange` when outside `0..=59`.
    pub fn set_minute(&mut self, minute: u8) -> Result<(), FieldError> {
        if self.options.strict {
            check_range(Precision::Minute, i64::from(minute), 0, MINUTES_PER_HOUR - 1)?;
        }
        self.minute = minute;
        self.touch();
        Ok(())
    }

    /// # Errors
    /// In strict mode, returns `FieldError::OutOfRange` when outside `0..=59`.
    pub fn set_second(&mut self, second: u8) -> Result<(), FieldError> {
        if self.options.strict {
            check_range(Precision::Second, i64::from(second), 0, SECONDS_PER_MINUTE - 1)?;
        }
        self.second = second;
        self.touch();
        Ok(())
    }

    /// # Errors
    /// In strict mode, returns `FieldError::OutOfRange` when outside `0..=99`.
    pub fn set_hundredth(&mut self, hundredth: u8) -> Result<(), FieldError> {
        if self.options.strict {
            check_range(Precision::Hundredth, i64::from(hundredth), 0, HUNDREDTHS_PER_SECOND - 1)?;
        }
        self.hundredth = hundredth;
        self.touch();
        Ok(())
    }

    pub fn set_zone(&mut self, zone: Option<String>) {
        self.zone = zone;
    }

    /// Current local wall-clock time, labelled with the local UTC offset and truncated to the
    /// precision.
    pub fn now(options: Options) -> Self {
        let now = chrono::Local::now();
        let mut value = Self::from_naive(now.naive_local(), options);
        value.zone = Some(now.format("%:z").to_string());
        value
    }
}

impl std::fmt::Display for FuzzyTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(self.default_format()))
    }
}

impl FromStr for FuzzyTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, None, &Options::new(Precision::Hundredth))
    }
}

impl serde::Serialize for FuzzyTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for FuzzyTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
