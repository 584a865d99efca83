//! Precision-scoped equality and ordering.
//!
//! `equals` and `less_than` each walk the fields from year down to the cutoff precision on their
//! own, so neither pays for the other in tight iteration loops. Everything else is derived from
//! those two walks.

use crate::consts::{JANUARY, MIN_DAY};
use crate::types::Precision;
use crate::FuzzyTime;
use std::cmp::Ordering;

/// Which parts of a value take part in a comparison
#[derive(Clone, Copy)]
struct Scope {
    cutoff: Precision,
    time_only: bool,
    zone: bool,
}

impl FuzzyTime {
    const fn scope(&self, cutoff: Precision) -> Scope {
        Scope {
            cutoff,
            time_only: self.options.time_only,
            zone: self.options.use_time_zone,
        }
    }

    /// Equality at this value's own precision
    #[inline]
    pub fn equals(&self, other: &Self) -> bool {
        self.equal_within(other, self.scope(self.options.precision))
    }

    /// Equality at an explicit precision
    #[inline]
    pub fn equals_at(&self, other: &Self, precision: Precision) -> bool {
        self.equal_within(other, self.scope(precision))
    }

    /// Strictly earlier, at this value's own precision
    #[inline]
    pub fn less_than(&self, other: &Self) -> bool {
        self.less_within(other, self.scope(self.options.precision))
    }

    /// Strictly earlier, at an explicit precision
    #[inline]
    pub fn less_than_at(&self, other: &Self, precision: Precision) -> bool {
        self.less_within(other, self.scope(precision))
    }

    pub fn greater_than(&self, other: &Self) -> bool {
        !self.equals(other) && !self.less_than(other)
    }

    pub fn greater_than_at(&self, other: &Self, precision: Precision) -> bool {
        !self.equals_at(other, precision) && !self.less_than_at(other, precision)
    }

    pub fn less_than_or_equal(&self, other: &Self) -> bool {
        self.equals(other) || self.less_than(other)
    }

    pub fn less_than_or_equal_at(&self, other: &Self, precision: Precision) -> bool {
        self.equals_at(other, precision) || self.less_than_at(other, precision)
    }

    pub fn greater_than_or_equal(&self, other: &Self) -> bool {
        !self.less_than(other)
    }

    pub fn greater_than_or_equal_at(&self, other: &Self, precision: Precision) -> bool {
        !self.less_than_at(other, precision)
    }

    /// Three-way comparison built from `equals` and `less_than` at this value's precision
    pub fn compare_to(&self, other: &Self) -> Ordering {
        if self.equals(other) {
            Ordering::Equal
        } else if self.less_than(other) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    pub fn compare_at(&self, other: &Self, precision: Precision) -> Ordering {
        if self.equals_at(other, precision) {
            Ordering::Equal
        } else if self.less_than_at(other, precision) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    fn equal_within(&self, other: &Self, scope: Scope) -> bool {
        let cutoff = scope.cutoff;
        if !scope.time_only {
            if self.year != other.year {
                return false;
            }
            if cutoff == Precision::Year {
                return !scope.zone || self.zone == other.zone;
            }
            if self.month != other.month {
                return false;
            }
            if cutoff == Precision::Month {
                return true;
            }
            if self.day != other.day {
                return false;
            }
        }
        if cutoff.is_date() {
            return true;
        }
        if self.hour != other.hour {
            return false;
        }
        if cutoff == Precision::Hour {
            return true;
        }
        if self.minute != other.minute {
            return false;
        }
        if cutoff == Precision::Minute {
            return true;
        }
        if self.second != other.second {
            return false;
        }
        if cutoff == Precision::Second {
            return true;
        }
        self.hundredth == other.hundredth
    }

    fn less_within(&self, other: &Self, scope: Scope) -> bool {
        let cutoff = scope.cutoff;
        if !scope.time_only {
            if self.year != other.year {
                return self.year < other.year;
            }
            if cutoff == Precision::Year {
                return false;
            }
            if self.month != other.month {
                return self.month < other.month;
            }
            if cutoff == Precision::Month {
                return false;
            }
            if self.day != other.day {
                return self.day < other.day;
            }
        }
        if cutoff.is_date() {
            return false;
        }
        if self.hour != other.hour {
            return self.hour < other.hour;
        }
        if cutoff == Precision::Hour {
            return false;
        }
        if self.minute != other.minute {
            return self.minute < other.minute;
        }
        if cutoff == Precision::Minute {
            return false;
        }
        if self.second != other.second {
            return self.second < other.second;
        }
        if cutoff == Precision::Second {
            return false;
        }
        self.hundredth < other.hundredth
    }

    /// Fields finer than the value's own precision read as their zero defaults, date fields of
    /// time-only values read as year 0, January 1st, and the zone label only counts when the
    /// value uses zones.
    fn sort_key(&self) -> SortKey<'_> {
        let precision = self.options.precision;
        let masked =
            |field: u8, unit: Precision, zero: u8| if precision >= unit { field } else { zero };
        let dated = !self.options.time_only;
        SortKey {
            year: if dated { self.year } else { 0 },
            month: if dated { masked(self.month, Precision::Month, JANUARY) } else { JANUARY },
            day: if dated { masked(self.day, Precision::Day, MIN_DAY) } else { MIN_DAY },
            hour: masked(self.hour, Precision::Hour, 0),
            minute: masked(self.minute, Precision::Minute, 0),
            second: masked(self.second, Precision::Second, 0),
            hundredth: masked(self.hundredth, Precision::Hundredth, 0),
            zone: if self.options.use_time_zone { self.zone.as_deref() } else { None },
        }
    }
}

/// Total order behind `Eq` and `Ord`
#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct SortKey<'a> {
    year: i64,
    month: u8,
    day: u8,
    hour: u8,
    minute: u8,
    second: u8,
    hundredth: u8,
    zone: Option<&'a str>,
}

/// A coarse value equals a finer one only when the finer fields of the latter are zero, so
/// `2023-05-05` equals `2023-05-05 00:00` but sorts before `2023-05-05 18:30`. Labels break
/// ties between otherwise equal zoned values. Use [`FuzzyTime::equals_at`] to compare at a
/// chosen precision.
impl PartialEq for FuzzyTime {
    fn eq(&self, other: &Self) -> bool {
        self.sort_key() == other.sort_key()
    }
}

impl Eq for FuzzyTime {}

impl PartialOrd for FuzzyTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FuzzyTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}
