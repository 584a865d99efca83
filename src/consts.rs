/// Lower sentinel bound for years accepted by the parser and strict setters
pub const MIN_YEAR: i64 = -1_000_000;
/// Upper sentinel bound for years accepted by the parser and strict setters
pub const MAX_YEAR: i64 = 1_000_000;

/// December, the last month
pub const MAX_MONTH: u8 = 12;
pub const JANUARY: u8 = 1;
pub const FEBRUARY: u8 = 2;
/// Days are 1-based
pub const MIN_DAY: u8 = 1;
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Month lengths of a common year, indexed by 1-based month
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days preceding the first of each month in a common year, indexed by 1-based month
pub(crate) const DAYS_BEFORE_MONTH: [u16; 13] =
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

pub const HOURS_PER_DAY: i64 = 24;
pub const MINUTES_PER_HOUR: i64 = 60;
pub const SECONDS_PER_MINUTE: i64 = 60;
pub const HUNDREDTHS_PER_SECOND: i64 = 100;
pub const MONTHS_PER_YEAR: i64 = 12;
pub const DAYS_PER_WEEK: i64 = 7;

/// Hundredths of a second in one day
pub(crate) const HUNDREDTHS_PER_DAY: i64 =
    HOURS_PER_DAY * MINUTES_PER_HOUR * SECONDS_PER_MINUTE * HUNDREDTHS_PER_SECOND;

// Gregorian leap rule: every 4th year, except centuries not divisible by 400
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
pub(crate) const CENTURY_CYCLE: i64 = 100;
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// Separator of year-first dates
pub const DATE_SEPARATOR: char = '-';
/// Separator of month-first dates
pub const MONTH_FIRST_SEPARATOR: char = '/';
/// Separator between clock fields, including hundredths
pub const TIME_SEPARATOR: char = ':';
/// Separator between the date, the clock and the zone label
pub const FIELD_SEPARATOR: char = ' ';

/// Characters that may not appear in a substituted symbol value
pub const OPERATOR_CHARS: [char; 4] = ['+', '-', '*', '/'];
