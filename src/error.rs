use crate::Precision;

/// Errors raised while turning text into a [`FuzzyTime`](crate::FuzzyTime).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty time string")]
    EmptyInput,

    /// The length or delimiter layout matches no known format.
    #[error("Unrecognized time format: {0:?}")]
    UnrecognizedFormat(String),

    /// A digit field holds something other than ASCII digits.
    #[error("Expected digits at offset {offset} in {input:?}")]
    InvalidDigits { offset: usize, input: String },

    /// A field parsed cleanly but lies outside its valid bound.
    #[error("Invalid {field} {value} in {input:?}")]
    OutOfRange { field: Precision, value: i64, input: String },

    #[error("Unknown token {token:?} in relative expression {input:?}")]
    UnknownToken { token: String, input: String },

    #[error("Symbol {name:?} expands to {value:?}, which contains an arithmetic operator")]
    OperatorInSymbol { name: String, value: String },

    #[error("Invalid interval suffix {0:?}")]
    InvalidInterval(String),
}

/// Raised by strict setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{field} value {value} is out of range {min}..={max}")]
    OutOfRange { field: Precision, value: i64, min: i64, max: i64 },
}

/// Zone offset resolution failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneError {
    #[error("Value carries no time zone label")]
    MissingZone,

    #[error("Unknown time zone: {0}")]
    UnknownZone(String),

    /// The value is not a valid calendar instant, so no offset applies.
    #[error("Cannot resolve an offset at {0}")]
    Unresolvable(String),
}

/// Numeric and timestamp decoding failures.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DecodeError {
    #[error("Numeric time value is not finite: {0}")]
    NonFinite(f64),

    #[error("Encoded time is outside the representable range")]
    OutOfRange,
}

pub(crate) const fn check_range(
    field: Precision,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), FieldError> {
    if value < min || value > max {
        return Err(FieldError::OutOfRange { field, value, min, max });
    }
    Ok(())
}
