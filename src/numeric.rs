//! Numeric and external timestamp encodings.
//!
//! The numeric form is a single `f64`: the integer part is the year and the fraction is the
//! elapsed share of that year's day count. Plot axes and offset arithmetic use it.

use crate::consts::{
    HUNDREDTHS_PER_DAY, HUNDREDTHS_PER_SECOND, JANUARY, MAX_YEAR, MIN_DAY, MIN_YEAR,
    MINUTES_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::error::DecodeError;
use crate::types::{Options, TimeOffset, civil_from_days, days_from_civil, days_in_year, narrow};
use crate::FuzzyTime;
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Nanoseconds per hundredth of a second
const NANOS_PER_HUNDREDTH: u32 = 10_000_000;

/// Splits a finite numeric value into its year and the hundredths elapsed within that year
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn split_numeric(value: f64) -> Result<(i64, i64), DecodeError> {
    if !value.is_finite() {
        return Err(DecodeError::NonFinite(value));
    }
    let whole = value.floor();
    if whole < MIN_YEAR as f64 || whole > MAX_YEAR as f64 {
        return Err(DecodeError::OutOfRange);
    }
    // bounded by the sentinel year range above
    let year = whole as i64;
    let share = (value - whole) * f64::from(days_in_year(year)) * HUNDREDTHS_PER_DAY as f64;
    Ok((year, share.round() as i64))
}

impl FuzzyTime {
    /// Encodes the value as `year + fraction of the year`.
    ///
    /// Raw out-of-range months and days are folded onto the calendar first, so day 0 of a month
    /// encodes as the last day of the month before.
    #[allow(clippy::cast_precision_loss)]
    pub fn to_numeric(&self) -> f64 {
        let number = self.day_number();
        let (year, _, _) = civil_from_days(number);
        let elapsed_days = number - days_from_civil(year, JANUARY, MIN_DAY);
        let clock = ((i64::from(self.hour) * MINUTES_PER_HOUR + i64::from(self.minute))
            * SECONDS_PER_MINUTE
            + i64::from(self.second))
            * HUNDREDTHS_PER_SECOND
            + i64::from(self.hundredth);
        let elapsed = elapsed_days as f64 + clock as f64 / HUNDREDTHS_PER_DAY as f64;
        year as f64 + elapsed / f64::from(days_in_year(year))
    }

    /// Decodes a numeric value, resolving month and day on the calendar.
    ///
    /// # Errors
    /// Returns `DecodeError` for non-finite values or years outside the sentinel range.
    pub fn from_numeric(value: f64, options: Options) -> Result<Self, DecodeError> {
        let (year, hundredths) = split_numeric(value)?;
        let mut decoded = Self::new(options);
        decoded.year = year;
        decoded.add_hundredth(hundredths);
        decoded.zero = false;
        decoded.truncate();
        decoded.refresh();
        Ok(decoded)
    }

    /// Decodes seconds since the Unix epoch as a UTC value.
    ///
    /// # Errors
    /// Returns `DecodeError::OutOfRange` when chrono cannot represent the timestamp.
    pub fn from_timestamp(seconds: i64, options: Options) -> Result<Self, DecodeError> {
        let utc = chrono::DateTime::from_timestamp(seconds, 0).ok_or(DecodeError::OutOfRange)?;
        let mut value = Self::from_naive(utc.naive_utc(), options);
        value.zone = Some("UTC".to_owned());
        Ok(value)
    }

    /// Copies the fields of a chrono `NaiveDateTime`, truncated to the precision.
    pub fn from_naive(naive: NaiveDateTime, options: Options) -> Self {
        let mut value = Self::new(options);
        value.year = i64::from(naive.year());
        value.month = narrow(i64::from(naive.month()));
        value.day = narrow(i64::from(naive.day()));
        value.hour = narrow(i64::from(naive.hour()));
        value.minute = narrow(i64::from(naive.minute()));
        value.second = narrow(i64::from(naive.second()));
        // leap-second nanos run past one second
        value.hundredth = narrow(i64::from((naive.nanosecond() / NANOS_PER_HUNDREDTH).min(99)));
        value.zero = false;
        value.truncate();
        value.refresh();
        value
    }

    /// The wall-clock fields as a chrono `NaiveDateTime`, or `None` if they do not form a valid
    /// instant.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let year = i32::try_from(self.year).ok()?;
        NaiveDate::from_ymd_opt(year, self.month.into(), self.day.into())?.and_hms_milli_opt(
            self.hour.into(),
            self.minute.into(),
            self.second.into(),
            u32::from(self.hundredth) * 10,
        )
    }
}

impl TimeOffset {
    /// Decodes a numeric value as an offset, keeping the day share as a raw day count.
    ///
    /// # Errors
    /// Returns `DecodeError` for non-finite values or years outside the sentinel range.
    pub fn from_numeric(value: f64) -> Result<Self, DecodeError> {
        let (years, hundredths) = split_numeric(value)?;
        let seconds = hundredths.div_euclid(HUNDREDTHS_PER_SECOND);
        let minutes = seconds.div_euclid(SECONDS_PER_MINUTE);
        let hours = minutes.div_euclid(MINUTES_PER_HOUR);
        Ok(Self {
            years,
            months: 0,
            days: hundredths.div_euclid(HUNDREDTHS_PER_DAY),
            hours: hours.rem_euclid(24),
            minutes: minutes.rem_euclid(MINUTES_PER_HOUR),
            seconds: seconds.rem_euclid(SECONDS_PER_MINUTE),
            hundredths: hundredths.rem_euclid(HUNDREDTHS_PER_SECOND),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, datetime};
    use crate::Precision;

    #[test]
    fn test_to_numeric() {
        assert!((date(2023, 1, 1).to_numeric() - 2023.0).abs() < 1e-12);
        // July 2nd 2023 at noon is 182.5 days into a 365-day year
        let value = datetime(Precision::Hour, (2023, 7, 2), (12, 0, 0, 0));
        assert!((value.to_numeric() - (2023.0 + 182.5 / 365.0)).abs() < 1e-9);
    }

    #[test]
    fn test_to_numeric_folds_raw_fields() {
        let mut value = date(2023, 3, 1);
        value.set_day(0).expect("lenient setter");
        // March 0th is February 28th
        let expected = date(2023, 2, 28).to_numeric();
        assert!((value.to_numeric() - expected).abs() < 1e-12);

        let mut value = date(2023, 1, 1);
        value.set_day(0).expect("lenient setter");
        assert!((value.to_numeric() - date(2022, 12, 31).to_numeric()).abs() < 1e-12);

        let mut value = date(2023, 1, 15);
        value.set_month(14).expect("lenient setter");
        assert!((value.to_numeric() - date(2024, 2, 15).to_numeric()).abs() < 1e-12);
    }

    #[test]
    fn test_numeric_round_trip() {
        let cases = [
            ((2024, 2, 29), (23, 59, 59, 99)),
            ((2023, 12, 31), (0, 0, 0, 0)),
            ((1987, 6, 15), (8, 30, 12, 50)),
            ((-44, 3, 15), (11, 0, 0, 0)),
        ];
        for (ymd, clock) in cases {
            let value = datetime(Precision::Hundredth, ymd, clock);
            let decoded =
                FuzzyTime::from_numeric(value.to_numeric(), Options::new(Precision::Hundredth))
                .expect("finite value must decode");
            assert!(decoded.equals(&value), "{value} decoded as {decoded}");
        }
    }

    #[test]
    fn test_from_numeric_truncates() {
        let decoded =
            FuzzyTime::from_numeric(2023.5, Options::new(Precision::Day)).expect("finite value");
        // day index 182.5 of 2023
        assert_eq!((decoded.year(), decoded.month(), decoded.day()), (2023, 7, 2));
        assert_eq!(decoded.hour(), 0);
        assert!(!decoded.is_zero());
    }

    #[test]
    fn test_from_numeric_rejects_non_finite() {
        assert!(matches!(
            FuzzyTime::from_numeric(f64::NAN, Options::default()),
            Err(DecodeError::NonFinite(_))
        ));
        assert_eq!(
            FuzzyTime::from_numeric(1e12, Options::default()).err(),
            Some(DecodeError::OutOfRange)
        );
    }

    #[test]
    fn test_offset_from_numeric() {
        // 2 years plus 36.25 days of a common year
        let offset = TimeOffset::from_numeric(2.0 + 36.25 / 365.0).expect("finite offset");
        assert_eq!(offset.years, 2);
        assert_eq!(offset.days, 36);
        assert_eq!((offset.hours, offset.minutes, offset.seconds, offset.hundredths), (6, 0, 0, 0));
    }

    #[test]
    fn test_from_timestamp() {
        let value = FuzzyTime::from_timestamp(1_700_000_000, Options::new(Precision::Second))
            .expect("valid timestamp");
        assert_eq!(value.to_string(), "2023-11-14 22:13:20");
        assert_eq!(value.zone(), Some("UTC"));

        assert_eq!(
            FuzzyTime::from_timestamp(i64::MAX, Options::default()).err(),
            Some(DecodeError::OutOfRange)
        );
    }

    #[test]
    fn test_to_naive() {
        let value = datetime(Precision::Hundredth, (2024, 2, 29), (23, 59, 59, 99));
        let naive = value.to_naive().expect("valid instant");
        assert_eq!(naive.to_string(), "2024-02-29 23:59:59.990");

        let mut invalid = date(2023, 2, 1);
        invalid.set_day(30).expect("lenient setter");
        assert!(invalid.to_naive().is_none());
    }
}
