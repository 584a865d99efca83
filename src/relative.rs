//! Relative time expressions.
//!
//! An expression is a base optionally followed by one signed interval:
//!
//! ```text
//! now
//! startOfCurrentDay
//! endOfCurrentMonth-1Day
//! deadline+6Hour
//! ```
//!
//! The base is `now`, `startOfCurrent<Unit>`, `endOfCurrent<Unit>` or a name from the caller's
//! symbol table. Bases are matched case-insensitively. A symbol's value is either one of the
//! anchors above or a time literal without operator characters.

use crate::consts::{
    DAYS_PER_WEEK, HOURS_PER_DAY, MAX_YEAR, MIN_YEAR, MINUTES_PER_HOUR, MONTHS_PER_YEAR,
    OPERATOR_CHARS, SECONDS_PER_MINUTE,
};
use crate::error::ParseError;
use crate::types::{IntervalUnit, Options, Precision};
use crate::FuzzyTime;
use std::collections::HashMap;
use std::hash::BuildHasher;

const NOW: &str = "now";
const START_OF_CURRENT: &str = "startofcurrent";
const END_OF_CURRENT: &str = "endofcurrent";

/// Resolves `expression` against `reference`, which stands for the current instant.
///
/// The result carries the reference's options and is truncated to its precision.
///
/// # Errors
/// - `ParseError::UnknownToken` when the base is neither an anchor nor a symbol.
/// - `ParseError::OperatorInSymbol` when a symbol's value contains `+`, `-`, `*` or `/`.
/// - `ParseError::InvalidInterval` when the suffix is not `(+|-)[count]<unit>`.
/// - Any error from parsing a symbol's literal value.
pub fn resolve<S: BuildHasher>(
    expression: &str,
    reference: &FuzzyTime,
    symbols: &HashMap<String, String, S>,
) -> Result<FuzzyTime, ParseError> {
    let expression = expression.trim();
    let (base, suffix) = match expression.find(['+', '-']) {
        Some(at) => expression.split_at(at),
        None => (expression, ""),
    };
    let base = base.trim();

    let mut value = match anchor(base, reference) {
        Some(value) => value,
        None => symbol(base, expression, reference, symbols)?,
    };

    if !suffix.is_empty() {
        let (unit, count) = interval(suffix)?;
        value.add_interval(unit, count);
    }
    value.truncate();
    Ok(value)
}

/// [`resolve`] against the current wall-clock time
///
/// # Errors
/// See [`resolve`].
pub fn resolve_now<S: BuildHasher>(
    expression: &str,
    options: Options,
    symbols: &HashMap<String, String, S>,
) -> Result<FuzzyTime, ParseError> {
    resolve(expression, &FuzzyTime::now(options), symbols)
}

fn symbol<S: BuildHasher>(
    name: &str,
    expression: &str,
    reference: &FuzzyTime,
    symbols: &HashMap<String, String, S>,
) -> Result<FuzzyTime, ParseError> {
    let Some(text) = symbols.get(name) else {
        return Err(ParseError::UnknownToken {
            token: name.to_owned(),
            input: expression.to_owned(),
        });
    };
    if text.contains(OPERATOR_CHARS) {
        return Err(ParseError::OperatorInSymbol { name: name.to_owned(), value: text.clone() });
    }
    match anchor(text.trim(), reference) {
        Some(value) => Ok(value),
        None => FuzzyTime::parse_with(text, None, &reference.options()),
    }
}

fn anchor(base: &str, reference: &FuzzyTime) -> Option<FuzzyTime> {
    let lower = base.to_ascii_lowercase();
    if lower == NOW {
        return Some(reference.clone());
    }
    if let Some(unit) = lower.strip_prefix(START_OF_CURRENT) {
        return anchor_unit(unit).map(|unit| start_of(reference, unit));
    }
    if let Some(unit) = lower.strip_prefix(END_OF_CURRENT) {
        return anchor_unit(unit).map(|unit| end_of(reference, unit));
    }
    None
}

/// Units an anchor can name, with the precision their start lies on
fn anchor_unit(name: &str) -> Option<(IntervalUnit, Precision)> {
    let unit = match name {
        "minute" => IntervalUnit::Minute,
        "hour" => IntervalUnit::Hour,
        "day" => IntervalUnit::Day,
        "month" => IntervalUnit::Month,
        "year" => IntervalUnit::Year,
        _ => return None,
    };
    unit.precision().map(|precision| (unit, precision))
}

fn start_of(reference: &FuzzyTime, (_, precision): (IntervalUnit, Precision)) -> FuzzyTime {
    let mut value = reference.clone();
    value.zero_finer_than(precision);
    value
}

/// One hundredth before the start of the next unit
fn end_of(reference: &FuzzyTime, (unit, precision): (IntervalUnit, Precision)) -> FuzzyTime {
    let mut value = start_of(reference, (unit, precision));
    value.add_interval(unit, 1);
    value.add_hundredth(-1);
    value
}

/// Parses `(+|-)[count]<unit>`; the count defaults to 1
fn interval(suffix: &str) -> Result<(IntervalUnit, i64), ParseError> {
    let invalid = || ParseError::InvalidInterval(suffix.to_owned());
    let mut chars = suffix.chars();
    let sign = match chars.next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(invalid()),
    };
    let rest = chars.as_str().trim_start();
    let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let (digits, name) = rest.split_at(digits_end);
    let count = if digits.is_empty() { 1 } else { digits.parse::<i64>().map_err(|_| invalid())? };
    let unit = match IntervalUnit::from_name(name) {
        Some(IntervalUnit::Irregular) | None => return Err(invalid()),
        Some(unit) => unit,
    };
    if count > span_limit(unit) {
        return Err(invalid());
    }
    Ok((unit, sign * count))
}

/// Most units of `unit` that fit between `MIN_YEAR` and `MAX_YEAR`
const fn span_limit(unit: IntervalUnit) -> i64 {
    const DAYS_PER_LONG_YEAR: i64 = 366;
    let years = MAX_YEAR - MIN_YEAR + 1;
    let days = years * DAYS_PER_LONG_YEAR;
    match unit {
        IntervalUnit::Year | IntervalUnit::Irregular => years,
        IntervalUnit::Month => years * MONTHS_PER_YEAR,
        IntervalUnit::Week => days / DAYS_PER_WEEK + 1,
        IntervalUnit::Day => days,
        IntervalUnit::Hour => days * HOURS_PER_DAY,
        IntervalUnit::Minute => days * HOURS_PER_DAY * MINUTES_PER_HOUR,
        IntervalUnit::Second => days * HOURS_PER_DAY * MINUTES_PER_HOUR * SECONDS_PER_MINUTE,
    }
}
