//! Carry-propagating arithmetic.
//!
//! Every `add_*` accepts any signed delta and leaves a valid calendar value behind. Multi-unit
//! deltas are resolved in closed form: clock fields through `div_euclid`/`rem_euclid`, and days
//! through a day-number conversion that keeps the month-length and leap-year rules of repeated
//! single-day steps.

use crate::consts::{
    DAYS_PER_WEEK, HOURS_PER_DAY, HUNDREDTHS_PER_SECOND, JANUARY, MAX_MONTH, MAX_YEAR, MIN_DAY,
    MIN_YEAR, MINUTES_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::types::{
    Direction, IntervalUnit, Precision, TimeOffset, civil_from_days, days_from_civil, days_in_month,
    narrow, normalize_year_month, weekday_from_days,
};

/// Day numbers of the first and last day of the sentinel year range
const FIRST_DAY_NUMBER: i64 = days_from_civil(MIN_YEAR, JANUARY, MIN_DAY);
const LAST_DAY_NUMBER: i64 = days_from_civil(MAX_YEAR, MAX_MONTH, 31);
use crate::FuzzyTime;

/// Splits `field + delta` into the in-range remainder and the carry for the parent unit
fn carry(field: u8, delta: i64, radix: i64) -> (u8, i64) {
    let total = i64::from(field).saturating_add(delta);
    (narrow(total.rem_euclid(radix)), total.div_euclid(radix))
}

impl FuzzyTime {
    /// Adds whole years, saturating at `MIN_YEAR..=MAX_YEAR`.
    /// A February 29th landing on a common year becomes the 28th.
    pub fn add_year(&mut self, years: i64) {
        if years == 0 {
            return;
        }
        self.year = self.year.saturating_add(years).clamp(MIN_YEAR, MAX_YEAR);
        self.clamp_day();
        self.touch();
    }

    /// Adds months, carrying into the year and saturating at the sentinel years.
    /// The day is clamped to the length of the new month.
    pub fn add_month(&mut self, months: i64) {
        if months == 0 {
            return;
        }
        let (year, month) =
            normalize_year_month(self.year, (i64::from(self.month) - 1).saturating_add(months));
        (self.year, self.month) = if year > MAX_YEAR {
            (MAX_YEAR, MAX_MONTH)
        } else if year < MIN_YEAR {
            (MIN_YEAR, JANUARY)
        } else {
            (year, month)
        };
        self.clamp_day();
        self.touch();
    }

    /// Adds days, carrying through month ends and leap days.
    /// The result saturates at the first and last day of `MIN_YEAR..=MAX_YEAR`.
    pub fn add_day(&mut self, days: i64) {
        if days == 0 {
            return;
        }
        let number = self
            .day_number()
            .saturating_add(days)
            .clamp(FIRST_DAY_NUMBER, LAST_DAY_NUMBER);
        let (year, month, day) = civil_from_days(number);
        self.year = year;
        self.month = month;
        self.day = day;
        self.touch();
    }

    pub fn add_hour(&mut self, hours: i64) {
        if hours == 0 {
            return;
        }
        let (hour, days) = carry(self.hour, hours, HOURS_PER_DAY);
        self.hour = hour;
        self.add_day(days);
        self.touch();
    }

    pub fn add_minute(&mut self, minutes: i64) {
        if minutes == 0 {
            return;
        }
        let (minute, hours) = carry(self.minute, minutes, MINUTES_PER_HOUR);
        self.minute = minute;
        self.add_hour(hours);
        self.touch();
    }

    pub fn add_second(&mut self, seconds: i64) {
        if seconds == 0 {
            return;
        }
        let (second, minutes) = carry(self.second, seconds, SECONDS_PER_MINUTE);
        self.second = second;
        self.add_minute(minutes);
        self.touch();
    }

    pub fn add_hundredth(&mut self, hundredths: i64) {
        if hundredths == 0 {
            return;
        }
        let (hundredth, seconds) = carry(self.hundredth, hundredths, HUNDREDTHS_PER_SECOND);
        self.hundredth = hundredth;
        self.add_second(seconds);
        self.touch();
    }

    /// Applies every delta of `offset`, smallest unit first, so carries from the finer fields
    /// land before the coarser deltas are added.
    pub fn add(&mut self, offset: &TimeOffset) {
        self.add_hundredth(offset.hundredths);
        self.add_second(offset.seconds);
        self.add_minute(offset.minutes);
        self.add_hour(offset.hours);
        self.add_day(offset.days);
        self.add_month(offset.months);
        self.add_year(offset.years);
    }

    /// Adds `multiplier` units. `Irregular` does nothing.
    pub fn add_interval(&mut self, unit: IntervalUnit, multiplier: i64) {
        match unit {
            IntervalUnit::Second => self.add_second(multiplier),
            IntervalUnit::Minute => self.add_minute(multiplier),
            IntervalUnit::Hour => self.add_hour(multiplier),
            IntervalUnit::Day => self.add_day(multiplier),
            IntervalUnit::Week => self.add_day(multiplier.saturating_mul(DAYS_PER_WEEK)),
            IntervalUnit::Month => self.add_month(multiplier),
            IntervalUnit::Year => self.add_year(multiplier),
            IntervalUnit::Irregular => {},
        }
    }

    /// Rounds onto a `multiplier`-unit boundary.
    ///
    /// Fields finer than `unit` are zeroed first. `Forward` then advances to the next boundary
    /// unless the value is already aligned; `Backward` retreats to the prior one. A multiplier of
    /// 0 selects the boundary of the next coarser unit. `Month` and `Year` reset to the start of
    /// the unit in either direction, and `Week` rounds onto Mondays.
    pub fn round(&mut self, direction: Direction, unit: IntervalUnit, multiplier: u32) {
        let multiplier = i64::from(multiplier);
        match unit {
            IntervalUnit::Year => self.zero_finer_than(Precision::Year),
            IntervalUnit::Month => self.zero_finer_than(Precision::Month),
            IntervalUnit::Week => self.round_week(direction),
            IntervalUnit::Day => {
                self.zero_finer_than(Precision::Day);
                let index = i64::from(self.day) - i64::from(MIN_DAY);
                self.step_to_boundary(direction, index, multiplier, Precision::Month);
            },
            IntervalUnit::Hour => {
                self.zero_finer_than(Precision::Hour);
                self.step_to_boundary(direction, i64::from(self.hour), multiplier, Precision::Day);
            },
            IntervalUnit::Minute => {
                self.zero_finer_than(Precision::Minute);
                self.step_to_boundary(
                    direction,
                    i64::from(self.minute),
                    multiplier,
                    Precision::Hour,
                );
            },
            IntervalUnit::Second => {
                self.zero_finer_than(Precision::Second);
                self.step_to_boundary(
                    direction,
                    i64::from(self.second),
                    multiplier,
                    Precision::Minute,
                );
            },
            IntervalUnit::Irregular => {
                tracing::debug!("irregular intervals have no boundaries; round is a no-op");
            },
        }
    }

    /// Moves a zero-based `index` of the unit below `parent` onto a multiple of `multiplier`
    fn step_to_boundary(
        &mut self,
        direction: Direction,
        index: i64,
        multiplier: i64,
        parent: Precision,
    ) {
        let unit = match parent {
            Precision::Month => IntervalUnit::Day,
            Precision::Day => IntervalUnit::Hour,
            Precision::Hour => IntervalUnit::Minute,
            _ => IntervalUnit::Second,
        };

        if multiplier == 0 {
            let aligned = index == 0;
            self.zero_finer_than(parent);
            if direction == Direction::Forward && !aligned {
                let parent_unit = match parent {
                    Precision::Month => IntervalUnit::Month,
                    Precision::Day => IntervalUnit::Day,
                    Precision::Hour => IntervalUnit::Hour,
                    _ => IntervalUnit::Minute,
                };
                self.add_interval(parent_unit, 1);
            }
            return;
        }

        let remainder = index.rem_euclid(multiplier);
        if remainder == 0 {
            return;
        }
        match direction {
            Direction::Forward => self.add_interval(unit, multiplier - remainder),
            Direction::Backward => self.add_interval(unit, -remainder),
        }
    }

    fn round_week(&mut self, direction: Direction) {
        self.zero_finer_than(Precision::Day);
        let weekday = weekday_from_days(self.day_number());
        if weekday == 0 {
            return;
        }
        match direction {
            Direction::Forward => self.add_day(DAYS_PER_WEEK - weekday),
            Direction::Backward => self.add_day(-weekday),
        }
    }

    /// Days since 1970-01-01, with raw out-of-range months and years folded back in
    pub(crate) fn day_number(&self) -> i64 {
        let year = self.year.clamp(MIN_YEAR, MAX_YEAR);
        let (year, month) = normalize_year_month(year, i64::from(self.month) - 1);
        days_from_civil(year, month, self.day)
    }

    fn clamp_day(&mut self) {
        let max = days_in_month(self.year, self.month);
        if self.day > max {
            self.day = max;
        }
    }
}
