use crate::consts::{DATE_SEPARATOR, FIELD_SEPARATOR, MONTH_FIRST_SEPARATOR, TIME_SEPARATOR};
use crate::parse::Format;
use crate::types::Precision;
use crate::FuzzyTime;

/// Largest year written without a sign
const PLAIN_YEAR_MAX: i64 = 9999;

impl FuzzyTime {
    /// The format `Display` uses, chosen from the precision and the time-only/zone flags.
    ///
    /// Each choice is detected back as the same format, so formatting and re-parsing at the same
    /// precision reproduces the value.
    pub fn default_format(&self) -> Format {
        let precision = self.options.precision;
        if self.options.time_only {
            return match precision {
                Precision::Hundredth => Format::HourMinuteHundredth,
                Precision::Second => Format::HourMinuteSecond,
                _ => Format::HourMinute,
            };
        }
        let format = match precision {
            Precision::Year => Format::Year,
            Precision::Month => Format::YearMonth,
            Precision::Day => Format::Date,
            Precision::Hour => Format::DateHour,
            Precision::Minute => Format::DateMinute,
            Precision::Second => Format::DateSecond,
            Precision::Hundredth => Format::DateHundredth,
        };
        if self.options.use_time_zone && self.zone.is_some() {
            format.zoned()
        } else {
            format
        }
    }

    /// Renders the fixed, zero-padded template of `format`.
    /// Zone formats omit the trailing label when none is set.
    pub fn format(&self, format: Format) -> String {
        match format {
            Format::Year => self.year_text(),
            Format::YearMonth => format!("{}{DATE_SEPARATOR}{:02}", self.year_text(), self.month),
            Format::MonthYear => {
                format!("{:02}{MONTH_FIRST_SEPARATOR}{}", self.month, self.year_text())
            },
            Format::Date => self.date_text(),
            Format::MonthDay => format!("{:02}{MONTH_FIRST_SEPARATOR}{:02}", self.month, self.day),
            Format::MonthDayYear => format!(
                "{:02}{MONTH_FIRST_SEPARATOR}{:02}{MONTH_FIRST_SEPARATOR}{}",
                self.month,
                self.day,
                self.year_text()
            ),
            Format::CompactDate => format!("{}{:02}{:02}", self.year_text(), self.month, self.day),
            Format::CompactMinute => format!(
                "{}{:02}{:02}{:02}{:02}",
                self.year_text(),
                self.month,
                self.day,
                self.hour,
                self.minute
            ),
            Format::HourMinute | Format::HourMinuteSecond | Format::HourMinuteHundredth => {
                self.clock_text(format.precision())
            },
            _ => {
                let mut out = self.date_text();
                out.push(FIELD_SEPARATOR);
                out.push_str(&self.clock_text(format.precision()));
                match &self.zone {
                    Some(zone) if format.has_zone() => {
                        out.push(FIELD_SEPARATOR);
                        out.push_str(zone);
                    },
                    _ => {},
                }
                out
            },
        }
    }

    /// Four digits inside `0..=9999`, otherwise a sign and seven digits
    fn year_text(&self) -> String {
        if (0..=PLAIN_YEAR_MAX).contains(&self.year) {
            format!("{:04}", self.year)
        } else {
            format!("{:+08}", self.year)
        }
    }

    fn date_text(&self) -> String {
        format!(
            "{}{DATE_SEPARATOR}{:02}{DATE_SEPARATOR}{:02}",
            self.year_text(),
            self.month,
            self.day
        )
    }

    fn clock_text(&self, depth: Precision) -> String {
        let mut out = format!("{:02}", self.hour);
        let finer = [
            (Precision::Minute, self.minute),
            (Precision::Second, self.second),
            (Precision::Hundredth, self.hundredth),
        ];
        for (precision, field) in finer {
            if depth >= precision {
                out.push(TIME_SEPARATOR);
                out.push_str(&format!("{field:02}"));
            }
        }
        out
    }
}
