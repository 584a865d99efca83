//! Text parsing.
//!
//! Parsing happens in two stages. [`Format::detect`] infers a format code from the length of
//! the input and the position of its delimiters; extraction then reads fixed-width digit fields
//! for that format straight into the value, and one validation pass checks the result.
//!
//! Years outside `0..=9999` are written with a sign and seven digits (`-0000044`, `+0010000`).
//!
//! Shape detection is a convenience for free-form input. Callers that know their format should
//! use [`FuzzyTime::parse_as`], which is unambiguous.

use crate::consts::{
    DATE_SEPARATOR, FIELD_SEPARATOR, HOURS_PER_DAY, JANUARY, MAX_MONTH, MAX_YEAR, MIN_DAY, MIN_YEAR,
    MINUTES_PER_HOUR, MONTH_FIRST_SEPARATOR, SECONDS_PER_MINUTE, TIME_SEPARATOR,
};
use crate::error::ParseError;
use crate::prelude::*;
use crate::types::{Options, Precision, days_in_month, narrow};
use crate::FuzzyTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// The catalog of textual layouts shared by parsing and formatting.
///
/// `Display` shows the template. Formats with 1-or-2-digit month/day sub-variants are parsed
/// through a [`Layout`] and always formatted zero-padded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Format {
    #[display(fmt = "YYYY")]
    Year,
    #[display(fmt = "YYYY-MM")]
    YearMonth,
    #[display(fmt = "MM/YYYY")]
    MonthYear,
    #[display(fmt = "YYYY-MM-DD")]
    Date,
    #[display(fmt = "MM/DD")]
    MonthDay,
    #[display(fmt = "MM/DD/YYYY")]
    MonthDayYear,
    #[display(fmt = "YYYYMMDD")]
    CompactDate,
    #[display(fmt = "YYYYMMDDHHmm")]
    CompactMinute,
    #[display(fmt = "HH:MM")]
    HourMinute,
    #[display(fmt = "HH:MM:SS")]
    HourMinuteSecond,
    #[display(fmt = "HH:MM:SS:hh")]
    HourMinuteHundredth,
    #[display(fmt = "YYYY-MM-DD HH")]
    DateHour,
    #[display(fmt = "YYYY-MM-DD HH ZZZ")]
    DateHourZone,
    #[display(fmt = "YYYY-MM-DD HH:MM")]
    DateMinute,
    #[display(fmt = "YYYY-MM-DD HH:MM ZZZ")]
    DateMinuteZone,
    #[display(fmt = "YYYY-MM-DD HH:MM:SS")]
    DateSecond,
    #[display(fmt = "YYYY-MM-DD HH:MM:SS ZZZ")]
    DateSecondZone,
    #[display(fmt = "YYYY-MM-DD HH:MM:SS:hh")]
    DateHundredth,
    #[display(fmt = "YYYY-MM-DD HH:MM:SS:hh ZZZ")]
    DateHundredthZone,
}

/// Digit widths of the month and day fields, for formats that accept single digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Layout {
    pub short_month: bool,
    pub short_day: bool,
}

impl Format {
    /// The finest unit this format carries
    pub const fn precision(self) -> Precision {
        match self {
            Self::Year => Precision::Year,
            Self::YearMonth | Self::MonthYear => Precision::Month,
            Self::Date | Self::MonthDay | Self::MonthDayYear | Self::CompactDate => Precision::Day,
            Self::DateHour | Self::DateHourZone => Precision::Hour,
            Self::CompactMinute | Self::HourMinute | Self::DateMinute | Self::DateMinuteZone => {
                Precision::Minute
            },
            Self::HourMinuteSecond | Self::DateSecond | Self::DateSecondZone => Precision::Second,
            Self::HourMinuteHundredth | Self::DateHundredth | Self::DateHundredthZone => {
                Precision::Hundredth
            },
        }
    }

    /// Formats ending in a zone label
    pub const fn has_zone(self) -> bool {
        matches!(
            self,
            Self::DateHourZone
                | Self::DateMinuteZone
                | Self::DateSecondZone
                | Self::DateHundredthZone
        )
    }

    /// Formats without any date part
    pub const fn is_time_only(self) -> bool {
        matches!(self, Self::HourMinute | Self::HourMinuteSecond | Self::HourMinuteHundredth)
    }

    /// The zone-suffixed counterpart of a date-and-time format
    pub(crate) const fn zoned(self) -> Self {
        match self {
            Self::DateHour => Self::DateHourZone,
            Self::DateMinute => Self::DateMinuteZone,
            Self::DateSecond => Self::DateSecondZone,
            Self::DateHundredth => Self::DateHundredthZone,
            other => other,
        }
    }

    /// Infers the format of trimmed ASCII input from its length and delimiter positions.
    ///
    /// # Errors
    /// Returns `ParseError::UnrecognizedFormat` when no row of the detection table matches.
    pub fn detect(text: &str) -> Result<(Self, Layout), ParseError> {
        let shape = fold_signed_years(text);
        let bytes = shape.as_bytes();
        let at = |index: usize| bytes.get(index).copied().unwrap_or_default();
        // a zone label follows a space and opens with a letter or an offset sign
        let zone_at = |index: usize| {
            let first = at(index);
            at(index - 1) == b' ' && (first.is_ascii_alphabetic() || first == b'+' || first == b'-')
        };
        let all_digits = bytes.iter().all(u8::is_ascii_digit);
        let dash = DATE_SEPARATOR as u8;
        let slash = MONTH_FIRST_SEPARATOR as u8;
        let colon = TIME_SEPARATOR as u8;

        let format = match bytes.len() {
            4 => Some(Self::Year),
            5 if at(2) == colon => Some(Self::HourMinute),
            5 => Some(Self::MonthDay),
            6 if at(4) == dash => Some(Self::YearMonth),
            6 if at(1) == slash => Some(Self::MonthYear),
            7 if at(4) == dash => Some(Self::YearMonth),
            7 if at(2) == slash => Some(Self::MonthYear),
            8 if at(2) == colon => Some(Self::HourMinuteSecond),
            8 if all_digits => Some(Self::CompactDate),
            8 if at(4) == dash && at(6) == dash => Some(Self::Date),
            8 if at(1) == slash && at(3) == slash => Some(Self::MonthDayYear),
            9 if at(4) == dash && (at(6) == dash || at(7) == dash) => Some(Self::Date),
            9 if at(4) == slash && (at(1) == slash || at(2) == slash) => Some(Self::MonthDayYear),
            10 if at(4) == dash && at(7) == dash => Some(Self::Date),
            10 if at(2) == slash && at(5) == slash => Some(Self::MonthDayYear),
            11 if at(2) == colon => Some(Self::HourMinuteHundredth),
            12 if all_digits => Some(Self::CompactMinute),
            len if len >= 15 && zone_at(14) => Some(Self::DateHourZone),
            len if len >= 18 && zone_at(17) => Some(Self::DateMinuteZone),
            len if len >= 21 && zone_at(20) => Some(Self::DateSecondZone),
            len if len >= 24 && zone_at(23) => Some(Self::DateHundredthZone),
            13 => Some(Self::DateHour),
            16 => Some(Self::DateMinute),
            19 => Some(Self::DateSecond),
            22 => Some(Self::DateHundredth),
            _ => None,
        };

        match format {
            Some(format) => Ok((format, Layout::infer(format, bytes))),
            None => {
                tracing::trace!(input = text, "no format matches the input shape");
                Err(ParseError::UnrecognizedFormat(text.to_owned()))
            },
        }
    }
}

/// Width of a signed year: the sign and seven digits
const SIGNED_YEAR_WIDTH: usize = 8;

fn is_signed_year(bytes: &[u8]) -> bool {
    match bytes.split_first() {
        Some((sign, digits)) => {
            (*sign == b'+' || *sign == b'-')
                && digits.len() >= SIGNED_YEAR_WIDTH - 1
                && digits.iter().take(SIGNED_YEAR_WIDTH - 1).all(u8::is_ascii_digit)
        },
        None => false,
    }
}

/// Replaces a signed year, at the start or after the last month-first separator, with a
/// four-digit placeholder so the shape matches the plain-year layouts.
fn fold_signed_years(text: &str) -> Cow<'_, str> {
    let start = if is_signed_year(text.as_bytes()) {
        Some(0)
    } else {
        text.rfind(MONTH_FIRST_SEPARATOR)
            .map(|slash| slash + 1)
            .filter(|&after| is_signed_year(text.as_bytes().get(after..).unwrap_or_default()))
    };
    match start {
        Some(start) => {
            let mut folded = String::with_capacity(text.len());
            folded.push_str(text.get(..start).unwrap_or_default());
            folded.push_str("0000");
            folded.push_str(text.get(start + SIGNED_YEAR_WIDTH..).unwrap_or_default());
            Cow::Owned(folded)
        },
        None => Cow::Borrowed(text),
    }
}

impl Layout {
    /// Reads the month/day widths of `format` from the delimiter positions in `bytes`
    pub fn infer(format: Format, bytes: &[u8]) -> Self {
        let dash = DATE_SEPARATOR as u8;
        let slash = MONTH_FIRST_SEPARATOR as u8;
        match format {
            Format::YearMonth => Self { short_month: bytes.len() == 6, short_day: false },
            Format::MonthYear => {
                Self { short_month: bytes.get(1) == Some(&slash), short_day: false }
            },
            Format::Date => {
                let short_month = bytes.get(6) == Some(&dash);
                let day_start = if short_month { 7 } else { 8 };
                Self { short_month, short_day: bytes.len() == day_start + 1 }
            },
            Format::MonthDayYear => {
                let short_month = bytes.get(1) == Some(&slash);
                let day_end = if short_month { 3 } else { 4 };
                Self { short_month, short_day: bytes.get(day_end) == Some(&slash) }
            },
            _ => Self::default(),
        }
    }
}

/// Sequential reader over fixed-width fields
struct Fields<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Fields<'a> {
    const fn new(input: &'a str) -> Self {
        Self { input, bytes: input.as_bytes(), pos: 0 }
    }

    fn number(&mut self, width: usize) -> Result<i64, ParseError> {
        let end = self.pos + width;
        let digits = self.bytes.get(self.pos..end).ok_or_else(|| self.structural())?;
        let mut value = 0i64;
        for (i, byte) in digits.iter().enumerate() {
            if !byte.is_ascii_digit() {
                return Err(ParseError::InvalidDigits {
                    offset: self.pos + i,
                    input: self.input.to_owned(),
                });
            }
            value = value * 10 + i64::from(byte - b'0');
        }
        self.pos = end;
        Ok(value)
    }

    /// Four digits, or a sign and seven digits
    fn year(&mut self) -> Result<i64, ParseError> {
        let sign = match self.bytes.get(self.pos) {
            Some(b'-') => -1,
            Some(b'+') => 1,
            _ => return self.number(4),
        };
        self.pos += 1;
        self.number(SIGNED_YEAR_WIDTH - 1).map(|digits| sign * digits)
    }

    fn field(&mut self, width: usize) -> Result<u8, ParseError> {
        self.number(width).map(narrow)
    }

    fn literal(&mut self, expected: char) -> Result<(), ParseError> {
        if self.bytes.get(self.pos) != Some(&(expected as u8)) {
            return Err(self.structural());
        }
        self.pos += 1;
        Ok(())
    }

    /// Everything after the separator, which must be a non-empty run without whitespace
    fn zone(&mut self) -> Result<String, ParseError> {
        self.literal(FIELD_SEPARATOR)?;
        let rest = self.input.get(self.pos..).unwrap_or_default();
        if rest.is_empty() || rest.bytes().any(|b| b.is_ascii_whitespace()) {
            return Err(self.structural());
        }
        self.pos = self.bytes.len();
        Ok(rest.to_owned())
    }

    fn finish(&self) -> Result<(), ParseError> {
        if self.pos != self.bytes.len() {
            return Err(self.structural());
        }
        Ok(())
    }

    fn structural(&self) -> ParseError {
        ParseError::UnrecognizedFormat(self.input.to_owned())
    }
}

const fn width(short: bool) -> usize {
    if short { 1 } else { 2 }
}

impl FuzzyTime {
    /// Parses `text` in an explicit format. This is the unambiguous entry point.
    ///
    /// # Errors
    /// Returns a structural `ParseError` when the text does not follow `format`, or
    /// `ParseError::OutOfRange` when a field is invalid.
    pub fn parse_as(text: &str, format: Format) -> Result<Self, ParseError> {
        Self::parse_with(text, Some(format), &Options::new(format.precision()))
    }

    /// Parses `text`, detecting the format from its shape unless one is given.
    ///
    /// The result takes the strict/fast flags of `options` and the coarser of its precision and the
    /// format's. Validation stops at that precision, and finer fields are zeroed.
    ///
    /// # Errors
    /// Returns a structural `ParseError` for unrecognized input, or `ParseError::OutOfRange` when
    /// a field is invalid.
    pub fn parse_with(
        text: &str,
        format: Option<Format>,
        options: &Options,
    ) -> Result<Self, ParseError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }
        if !trimmed.is_ascii() {
            return Err(ParseError::UnrecognizedFormat(text.to_owned()));
        }

        let (format, layout) = match format {
            Some(format) => (format, Layout::infer(format, fold_signed_years(trimmed).as_bytes())),
            None => Format::detect(trimmed)?,
        };

        let target = options.precision.min(format.precision());
        let mut value = Self::new(
            options
                .with_precision(target)
                .with_time_only(format.is_time_only())
                .with_time_zone(options.use_time_zone || format.has_zone()),
        );
        value.extract(trimmed, format, layout)?;
        value.validate(trimmed, target)?;
        value.truncate();
        value.zero = false;
        value.refresh();
        Ok(value)
    }

    /// Writes the raw fields of `format` without validating them
    fn extract(&mut self, text: &str, format: Format, layout: Layout) -> Result<(), ParseError> {
        let mut fields = Fields::new(text);
        let month_width = width(layout.short_month);
        let day_width = width(layout.short_day);

        match format {
            Format::Year => self.year = fields.year()?,
            Format::YearMonth => {
                self.year = fields.year()?;
                fields.literal(DATE_SEPARATOR)?;
                self.month = fields.field(month_width)?;
            },
            Format::MonthYear => {
                self.month = fields.field(month_width)?;
                fields.literal(MONTH_FIRST_SEPARATOR)?;
                self.year = fields.year()?;
            },
            Format::Date => {
                self.year = fields.year()?;
                fields.literal(DATE_SEPARATOR)?;
                self.month = fields.field(month_width)?;
                fields.literal(DATE_SEPARATOR)?;
                self.day = fields.field(day_width)?;
            },
            Format::MonthDay => {
                self.month = fields.field(2)?;
                fields.literal(MONTH_FIRST_SEPARATOR)?;
                self.day = fields.field(2)?;
            },
            Format::MonthDayYear => {
                self.month = fields.field(month_width)?;
                fields.literal(MONTH_FIRST_SEPARATOR)?;
                self.day = fields.field(day_width)?;
                fields.literal(MONTH_FIRST_SEPARATOR)?;
                self.year = fields.year()?;
            },
            Format::CompactDate | Format::CompactMinute => {
                self.year = fields.year()?;
                self.month = fields.field(2)?;
                self.day = fields.field(2)?;
                if format == Format::CompactMinute {
                    self.hour = fields.field(2)?;
                    self.minute = fields.field(2)?;
                }
            },
            Format::HourMinute | Format::HourMinuteSecond | Format::HourMinuteHundredth => {
                self.extract_clock(&mut fields, format.precision())?;
            },
            _ => {
                self.year = fields.year()?;
                fields.literal(DATE_SEPARATOR)?;
                self.month = fields.field(2)?;
                fields.literal(DATE_SEPARATOR)?;
                self.day = fields.field(2)?;
                fields.literal(FIELD_SEPARATOR)?;
                self.extract_clock(&mut fields, format.precision())?;
                if format.has_zone() {
                    self.zone = Some(fields.zone()?);
                }
            },
        }
        fields.finish()
    }

    /// `HH[:MM[:SS[:hh]]]` down to `depth`
    fn extract_clock(
        &mut self,
        fields: &mut Fields<'_>,
        depth: Precision,
    ) -> Result<(), ParseError> {
        self.hour = fields.field(2)?;
        if depth >= Precision::Minute {
            fields.literal(TIME_SEPARATOR)?;
            self.minute = fields.field(2)?;
        }
        if depth >= Precision::Second {
            fields.literal(TIME_SEPARATOR)?;
            self.second = fields.field(2)?;
        }
        if depth >= Precision::Hundredth {
            fields.literal(TIME_SEPARATOR)?;
            self.hundredth = fields.field(2)?;
        }
        Ok(())
    }

    /// Range checks in field order, stopping once `target` is covered.
    /// An hour of 24 rolls over to midnight of the next day before the clock fields are checked.
    fn validate(&mut self, input: &str, target: Precision) -> Result<(), ParseError> {
        let out_of_range = |field: Precision, value: i64| ParseError::OutOfRange {
            field,
            value,
            input: input.to_owned(),
        };

        if !self.options.time_only {
            if self.year < MIN_YEAR || self.year > MAX_YEAR {
                return Err(out_of_range(Precision::Year, self.year));
            }
            if target == Precision::Year {
                return Ok(());
            }
            if self.month < JANUARY || self.month > MAX_MONTH {
                return Err(out_of_range(Precision::Month, self.month.into()));
            }
            if target == Precision::Month {
                return Ok(());
            }
            if self.day < MIN_DAY || self.day > days_in_month(self.year, self.month) {
                return Err(out_of_range(Precision::Day, self.day.into()));
            }
        }
        if target.is_date() {
            return Ok(());
        }

        if i64::from(self.hour) == HOURS_PER_DAY {
            self.hour = 0;
            if !self.options.time_only {
                self.add_day(1);
            }
        }
        if i64::from(self.hour) >= HOURS_PER_DAY {
            return Err(out_of_range(Precision::Hour, self.hour.into()));
        }
        if target == Precision::Hour {
            return Ok(());
        }
        if i64::from(self.minute) >= MINUTES_PER_HOUR {
            return Err(out_of_range(Precision::Minute, self.minute.into()));
        }
        if target == Precision::Minute {
            return Ok(());
        }
        if i64::from(self.second) >= SECONDS_PER_MINUTE {
            return Err(out_of_range(Precision::Second, self.second.into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> FuzzyTime {
        text.parse::<FuzzyTime>()
            .unwrap_or_else(|err| panic!("failed to parse {text:?}: {err}"))
    }

    fn ymd(value: &FuzzyTime) -> (i64, u8, u8) {
        (value.year(), value.month(), value.day())
    }

    fn hms(value: &FuzzyTime) -> (u8, u8, u8, u8) {
        (value.hour(), value.minute(), value.second(), value.hundredth())
    }

    #[test]
    fn test_detection_table() {
        struct TestCase {
            input: &'static str,
            expected: Format,
        }

        let cases = [
            TestCase { input: "1987", expected: Format::Year },
            TestCase { input: "09:30", expected: Format::HourMinute },
            TestCase { input: "08/15", expected: Format::MonthDay },
            TestCase { input: "2023-7", expected: Format::YearMonth },
            TestCase { input: "7/2023", expected: Format::MonthYear },
            TestCase { input: "2023-07", expected: Format::YearMonth },
            TestCase { input: "07/2023", expected: Format::MonthYear },
            TestCase { input: "09:30:15", expected: Format::HourMinuteSecond },
            TestCase { input: "20230715", expected: Format::CompactDate },
            TestCase { input: "2023-7-5", expected: Format::Date },
            TestCase { input: "7/5/2023", expected: Format::MonthDayYear },
            TestCase { input: "2023-07-5", expected: Format::Date },
            TestCase { input: "2023-7-15", expected: Format::Date },
            TestCase { input: "07/5/2023", expected: Format::MonthDayYear },
            TestCase { input: "7/15/2023", expected: Format::MonthDayYear },
            TestCase { input: "2023-07-15", expected: Format::Date },
            TestCase { input: "07/15/2023", expected: Format::MonthDayYear },
            TestCase { input: "09:30:15:25", expected: Format::HourMinuteHundredth },
            TestCase { input: "202307150930", expected: Format::CompactMinute },
            TestCase { input: "2023-07-15 09", expected: Format::DateHour },
            TestCase { input: "2023-07-15 09 EST", expected: Format::DateHourZone },
            TestCase { input: "2023-07-15 09:30", expected: Format::DateMinute },
            TestCase { input: "2023-07-15 09:30 CEST", expected: Format::DateMinuteZone },
            TestCase {
                input: "2023-07-15 09:30 America/New_York",
                expected: Format::DateMinuteZone,
            },
            TestCase { input: "2023-07-15 09:30:15", expected: Format::DateSecond },
            TestCase { input: "2023-07-15 09:30:15 UTC", expected: Format::DateSecondZone },
            TestCase { input: "2023-07-15 09:30:15:25", expected: Format::DateHundredth },
            TestCase { input: "2023-07-15 09:30:15:25 UTC", expected: Format::DateHundredthZone },
        ];

        for case in &cases {
            let (format, _) =
                Format::detect(case.input).unwrap_or_else(|err| panic!("{}: {err}", case.input));
            assert_eq!(format, case.expected, "detected format of {:?}", case.input);
        }
    }

    #[test]
    fn test_unrecognized_shapes() {
        for input in ["19", "2023-07-15T", "2023/07/15", "abcd", "2023-07-15 09:3", "9:30"] {
            let result = input.parse::<FuzzyTime>();
            assert!(
                matches!(
                    result,
                    Err(ParseError::UnrecognizedFormat(_) | ParseError::InvalidDigits { .. })
                ),
                "{input:?} should be rejected, got {result:?}"
            );
        }
    }

    #[test]
    fn test_layout_variants() {
        let layout = |short_month, short_day| Layout { short_month, short_day };
        assert_eq!(Layout::infer(Format::Date, b"2023-7-5"), layout(true, true));
        assert_eq!(Layout::infer(Format::Date, b"2023-07-5"), layout(false, true));
        assert_eq!(Layout::infer(Format::Date, b"2023-7-15"), layout(true, false));
        assert_eq!(Layout::infer(Format::MonthDayYear, b"07/5/2023"), layout(false, true));
        assert_eq!(Layout::infer(Format::MonthDayYear, b"7/15/2023"), layout(true, false));

        assert_eq!(ymd(&parse("2023-7-5")), (2023, 7, 5));
        assert_eq!(ymd(&parse("7/15/2023")), (2023, 7, 15));
        assert_eq!(ymd(&parse("07/5/2023")), (2023, 7, 5));
    }

    #[test]
    fn test_leap_day() {
        let result = "2023-02-29".parse::<FuzzyTime>();
        assert!(matches!(
            result,
            Err(ParseError::OutOfRange { field: Precision::Day, value: 29, .. })
        ));

        let value = parse("2024-02-29");
        assert_eq!(ymd(&value), (2024, 2, 29));
        assert_eq!(value.precision(), Precision::Day);

        assert!("02/29/1900".parse::<FuzzyTime>().is_err());
        assert!("02/29/2000".parse::<FuzzyTime>().is_ok());
    }

    #[test]
    fn test_hour_24_rolls_over() {
        let value = parse("2023-01-01 24:00");
        assert_eq!(ymd(&value), (2023, 1, 2));
        assert_eq!(hms(&value), (0, 0, 0, 0));
        assert_eq!(value.precision(), Precision::Minute);

        let value = parse("2023-12-31 24:00:00");
        assert_eq!(ymd(&value), (2024, 1, 1));

        let value = parse("24:00");
        assert!(value.is_time_only());
        assert_eq!(hms(&value), (0, 0, 0, 0));
    }

    #[test]
    fn test_out_of_range_fields() {
        struct TestCase {
            input: &'static str,
            field: Precision,
            value: i64,
        }

        let cases = [
            TestCase { input: "2023-13", field: Precision::Month, value: 13 },
            TestCase { input: "2023-00-10", field: Precision::Month, value: 0 },
            TestCase { input: "2023-04-31", field: Precision::Day, value: 31 },
            TestCase { input: "2023-04-00", field: Precision::Day, value: 0 },
            TestCase { input: "2023-04-30 25", field: Precision::Hour, value: 25 },
            TestCase { input: "2023-04-30 23:60", field: Precision::Minute, value: 60 },
            TestCase { input: "23:59:61", field: Precision::Second, value: 61 },
        ];

        for case in &cases {
            match case.input.parse::<FuzzyTime>() {
                Err(ParseError::OutOfRange { field, value, input }) => {
                    assert_eq!((field, value), (case.field, case.value), "{}", case.input);
                    assert_eq!(input, case.input);
                },
                other => panic!("{}: expected a range error, got {other:?}", case.input),
            }
        }
    }

    #[test]
    fn test_validation_stops_at_target_precision() {
        // the hour is never examined at day precision
        let value = FuzzyTime::parse_with("2023-04-30 25", None, &Options::new(Precision::Day))
            .expect("day precision ignores the hour");
        assert_eq!(value.precision(), Precision::Day);
        assert_eq!(value.hour(), 0);
    }

    #[test]
    fn test_zone_and_time_only_flags() {
        let value = parse("2023-07-15 09:30 EST");
        assert_eq!(value.zone(), Some("EST"));
        assert!(value.uses_time_zone());
        assert_eq!(hms(&value), (9, 30, 0, 0));

        let value = parse("09:30:15:25");
        assert!(value.is_time_only());
        assert_eq!(hms(&value), (9, 30, 15, 25));
        assert_eq!(ymd(&value), (0, 1, 1));
        assert_eq!(value.precision(), Precision::Hundredth);
    }

    #[test]
    fn test_compact_formats() {
        let value = parse("202307150930");
        assert_eq!(ymd(&value), (2023, 7, 15));
        assert_eq!(hms(&value), (9, 30, 0, 0));
        assert_eq!(value.precision(), Precision::Minute);

        assert_eq!(ymd(&parse("20230715")), (2023, 7, 15));
    }

    #[test]
    fn test_month_day_leaves_year_zero() {
        let value = parse("02/29");
        assert_eq!(ymd(&value), (0, 2, 29));
    }

    #[test]
    fn test_explicit_format() {
        let value = FuzzyTime::parse_as("2023-07-15", Format::Date).expect("explicit date");
        assert_eq!(ymd(&value), (2023, 7, 15));

        let result = FuzzyTime::parse_as("2023-07-15", Format::MonthDayYear);
        assert!(result.is_err());

        let value = FuzzyTime::parse_as("2023-7", Format::YearMonth).expect("explicit short month");
        assert_eq!((value.year(), value.month()), (2023, 7));
    }

    #[test]
    fn test_invalid_digits() {
        let result = "2023-0X-15".parse::<FuzzyTime>();
        assert!(matches!(result, Err(ParseError::InvalidDigits { offset: 6, .. })));

        let result = "19A7".parse::<FuzzyTime>();
        assert!(matches!(result, Err(ParseError::InvalidDigits { offset: 2, .. })));

        let result = "08-15".parse::<FuzzyTime>();
        assert!(matches!(result, Err(ParseError::UnrecognizedFormat(_))));
    }

    #[test]
    fn test_offset_zone_labels() {
        struct TestCase {
            input: &'static str,
            expected: Format,
            zone: &'static str,
        }

        let cases = [
            TestCase {
                input: "2023-07-15 09 +05:30",
                expected: Format::DateHourZone,
                zone: "+05:30",
            },
            TestCase {
                input: "2023-01-01 05:30 +05:30",
                expected: Format::DateMinuteZone,
                zone: "+05:30",
            },
            TestCase {
                input: "2023-01-01 05:30:10 -03:00",
                expected: Format::DateSecondZone,
                zone: "-03:00",
            },
            TestCase {
                input: "2023-01-01 05:30:10:01 +00:00",
                expected: Format::DateHundredthZone,
                zone: "+00:00",
            },
        ];

        for case in &cases {
            let (format, _) =
                Format::detect(case.input).unwrap_or_else(|err| panic!("{}: {err}", case.input));
            assert_eq!(format, case.expected, "detected format of {:?}", case.input);
            assert_eq!(parse(case.input).zone(), Some(case.zone), "{}", case.input);
        }
    }

    #[test]
    fn test_signed_years() {
        struct TestCase {
            input: &'static str,
            expected: (i64, u8, u8),
            precision: Precision,
        }

        let cases = [
            TestCase { input: "-0000001-12-31", expected: (-1, 12, 31), precision: Precision::Day },
            TestCase { input: "+0010000", expected: (10_000, 1, 1), precision: Precision::Year },
            TestCase {
                input: "-1000000-01",
                expected: (-1_000_000, 1, 1),
                precision: Precision::Month,
            },
            TestCase {
                input: "07/+0010000",
                expected: (10_000, 7, 1),
                precision: Precision::Month,
            },
            TestCase { input: "02/29/-0000004", expected: (-4, 2, 29), precision: Precision::Day },
            TestCase {
                input: "+00100000229",
                expected: (10_000, 2, 29),
                precision: Precision::Day,
            },
            TestCase { input: "+0002023", expected: (2023, 1, 1), precision: Precision::Year },
        ];

        for case in &cases {
            let value = parse(case.input);
            assert_eq!(ymd(&value), case.expected, "{}", case.input);
            assert_eq!(value.precision(), case.precision, "{}", case.input);
        }

        let value = parse("-0000044-03-15 11:00 UTC");
        assert_eq!(ymd(&value), (-44, 3, 15));
        assert_eq!(value.zone(), Some("UTC"));
    }

    #[test]
    fn test_signed_year_bounds() {
        assert!(matches!(
            "+2000000-01-01".parse::<FuzzyTime>(),
            Err(ParseError::OutOfRange { field: Precision::Year, value: 2_000_000, .. })
        ));
        assert!(matches!(
            "-1000001".parse::<FuzzyTime>(),
            Err(ParseError::OutOfRange { field: Precision::Year, value: -1_000_001, .. })
        ));
        assert!("-000001-01-01".parse::<FuzzyTime>().is_err());
        assert!("+12".parse::<FuzzyTime>().is_err());
    }

    #[test]
    fn test_hour_24_at_hour_precision() {
        let value = parse("2023-12-31 24");
        assert_eq!(ymd(&value), (2024, 1, 1));
        assert_eq!(hms(&value), (0, 0, 0, 0));
        assert_eq!(value.precision(), Precision::Hour);

        let value = parse("2023-12-31 24 UTC");
        assert_eq!(ymd(&value), (2024, 1, 1));
        assert_eq!(value.hour(), 0);
        assert_eq!(value.zone(), Some("UTC"));

        let value = parse("2023-02-28 24:00:00:00");
        assert_eq!(ymd(&value), (2023, 3, 1));
    }

    #[test]
    fn test_whitespace_and_empty() {
        assert_eq!(ymd(&parse("  2023-07-15 ")), (2023, 7, 15));
        assert_eq!("   ".parse::<FuzzyTime>().err(), Some(ParseError::EmptyInput));
        assert!("2023-07-1５".parse::<FuzzyTime>().is_err());
    }

    #[test]
    fn test_parse_options_carried() {
        let options = Options::new(Precision::Hundredth).with_strict(true).with_time_zone(true);
        let value =
            FuzzyTime::parse_with("2023-07-15 09:30", None, &options).expect("minute value");
        assert!(value.is_strict());
        assert!(value.uses_time_zone());
        assert_eq!(value.precision(), Precision::Minute);
        assert!(!value.is_zero());
        assert_eq!(value.day_of_year(), 196);
    }
}
