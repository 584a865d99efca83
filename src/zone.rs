//! Time zone shifting.
//!
//! Zone labels are opaque to [`FuzzyTime`]. Turning a pair of labels into a minute offset is the
//! job of an [`OffsetResolver`]; [`TzResolver`] answers from the chrono-tz database.

use crate::error::ZoneError;
use crate::FuzzyTime;
use chrono::{FixedOffset, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

/// Resolves the offset between two zone labels at a given wall-clock instant.
pub trait OffsetResolver {
    /// Signed minutes to add to `at`, read as a wall-clock time in `from`, to express it in `to`.
    ///
    /// # Errors
    /// Returns `ZoneError` when either label is unknown or `at` is not a valid instant.
    fn offset_minutes(&self, from: &str, to: &str, at: &FuzzyTime) -> Result<i64, ZoneError>;
}

/// [`OffsetResolver`] backed by chrono-tz.
///
/// Accepts IANA names (`Europe/Paris`), the aliases chrono-tz carries (`EST`, `UTC`), `Z`, and
/// fixed offsets written `+HH:MM`, `-HHMM` or `+HH`. Offsets are taken at the instant itself, so
/// daylight saving transitions are honored.
#[derive(Debug, Clone, Copy, Default)]
pub struct TzResolver;

enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl Zone {
    fn lookup(label: &str) -> Result<Self, ZoneError> {
        let label = label.trim();
        if label.eq_ignore_ascii_case("z") {
            return Ok(Self::Fixed(FixedOffset::east_opt(0).ok_or_else(|| unknown(label))?));
        }
        if label.starts_with('+') || label.starts_with('-') {
            return parse_fixed(label).map(Self::Fixed).ok_or_else(|| unknown(label));
        }
        label.parse::<Tz>().map(Self::Named).map_err(|_| unknown(label))
    }

    /// Offset in seconds for a wall-clock time in this zone. Times skipped by a transition
    /// use the offset in force just after it.
    fn offset_at_local(&self, local: &NaiveDateTime) -> i64 {
        match self {
            Self::Fixed(offset) => i64::from(offset.local_minus_utc()),
            Self::Named(tz) => {
                let offset = tz
                    .offset_from_local_datetime(local)
                    .earliest()
                    .unwrap_or_else(|| tz.offset_from_utc_datetime(local));
                i64::from(offset.fix().local_minus_utc())
            },
        }
    }

    fn offset_at_utc(&self, utc: &NaiveDateTime) -> i64 {
        match self {
            Self::Fixed(offset) => i64::from(offset.local_minus_utc()),
            Self::Named(tz) => i64::from(tz.offset_from_utc_datetime(utc).fix().local_minus_utc()),
        }
    }
}

fn unknown(label: &str) -> ZoneError {
    ZoneError::UnknownZone(label.to_owned())
}

/// `+HH`, `+HHMM` or `+HH:MM`, with either sign
fn parse_fixed(label: &str) -> Option<FixedOffset> {
    let (sign, digits) = label.split_at(1);
    let digits: String = digits.chars().filter(|c| *c != ':').collect();
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits.get(..2)?.parse::<i32>().ok()?, digits.get(2..)?.parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    let seconds = (hours * 60 + minutes) * 60;
    FixedOffset::east_opt(if sign == "-" { -seconds } else { seconds })
}

impl OffsetResolver for TzResolver {
    fn offset_minutes(&self, from: &str, to: &str, at: &FuzzyTime) -> Result<i64, ZoneError> {
        let source = Zone::lookup(from)?;
        let target = Zone::lookup(to)?;
        let local = at.to_naive().ok_or_else(|| ZoneError::Unresolvable(at.to_string()))?;
        let source_offset = source.offset_at_local(&local);
        let utc = local - chrono::Duration::seconds(source_offset);
        let target_offset = target.offset_at_utc(&utc);
        Ok((target_offset - source_offset) / 60)
    }
}

impl FuzzyTime {
    /// Moves the wall-clock fields from the current zone into `target` and relabels the value.
    ///
    /// If the offset cannot be resolved, including when the value has no zone label, the shift
    /// is zero minutes and a warning is logged; the label still changes. Use
    /// [`try_shift_zone`](Self::try_shift_zone) to handle the failure instead.
    pub fn shift_zone(&mut self, target: &str, resolver: &impl OffsetResolver) {
        let minutes = match self.zone_offset(target, resolver) {
            Ok(minutes) => minutes,
            Err(err) => {
                tracing::warn!(
                    from = ?self.zone,
                    to = target,
                    error = %err,
                    "zone offset unresolved; shifting by zero"
                );
                0
            },
        };
        self.add_minute(minutes);
        self.zone = Some(target.to_owned());
    }

    /// Like [`shift_zone`](Self::shift_zone), but leaves the value untouched on failure.
    ///
    /// # Errors
    /// Returns `ZoneError::MissingZone` without a current label, or the resolver's error.
    pub fn try_shift_zone(
        &mut self,
        target: &str,
        resolver: &impl OffsetResolver,
    ) -> Result<(), ZoneError> {
        let minutes = self.zone_offset(target, resolver)?;
        self.add_minute(minutes);
        self.zone = Some(target.to_owned());
        Ok(())
    }

    /// Copies `source`, shifting the copy into `target` when one is given.
    pub fn converted(source: &Self, target: Option<&str>, resolver: &impl OffsetResolver) -> Self {
        let mut value = source.clone();
        if let Some(target) = target {
            value.shift_zone(target, resolver);
        }
        value
    }

    fn zone_offset(&self, target: &str, resolver: &impl OffsetResolver) -> Result<i64, ZoneError> {
        let from = self.zone.as_deref().ok_or(ZoneError::MissingZone)?;
        resolver.offset_minutes(from, target, self)
    }
}
