//! Shared constructors for unit tests.

use crate::{FuzzyTime, Options, Precision};

pub fn date(year: i64, month: u8, day: u8) -> FuzzyTime {
    datetime(Precision::Day, (year, month, day), (0, 0, 0, 0))
}

pub fn datetime(
    precision: Precision,
    (year, month, day): (i64, u8, u8),
    clock: (u8, u8, u8, u8),
) -> FuzzyTime {
    with_options(Options::new(precision), (year, month, day), clock)
}

pub fn with_options(
    options: Options,
    (year, month, day): (i64, u8, u8),
    clock: (u8, u8, u8, u8),
) -> FuzzyTime {
    let (hour, minute, second, hundredth) = clock;
    FuzzyTime::new(options)
        .with_date(year, month, day)
        .and_then(|value| value.with_time(hour, minute, second, hundredth))
        .expect("test fixture must be a valid calendar time")
}

pub fn clock(precision: Precision, clock: (u8, u8, u8, u8)) -> FuzzyTime {
    let options = Options::new(precision).with_time_only(true);
    let (hour, minute, second, hundredth) = clock;
    FuzzyTime::new(options)
        .with_time(hour, minute, second, hundredth)
        .expect("test fixture must be a valid clock time")
}
