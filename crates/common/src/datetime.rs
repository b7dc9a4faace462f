//! Date arithmetic, null-aware comparison, and pattern-based formatting.
//!
//! The free functions work in UTC with the system clock. [`DateHelper`]
//! does the same work in a configured zone with an injected [`Clock`].

use chrono::{DateTime, FixedOffset, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::comparator::{self, TimeComparator};
use crate::config::HelperConfig;
use crate::error::{HelperError, Result};
use crate::pattern::DatePattern;

/// Duration unit with a fixed conversion to milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
    Weeks,
}

impl TimeUnit {
    /// The next smaller unit in the conversion chain and the factor to it.
    fn step_down(self) -> Option<(TimeUnit, i64)> {
        match self {
            TimeUnit::Weeks => Some((TimeUnit::Days, 7)),
            TimeUnit::Days => Some((TimeUnit::Hours, 24)),
            TimeUnit::Hours => Some((TimeUnit::Minutes, 60)),
            TimeUnit::Minutes => Some((TimeUnit::Seconds, 60)),
            TimeUnit::Seconds => Some((TimeUnit::Milliseconds, 1000)),
            TimeUnit::Milliseconds | TimeUnit::Microseconds | TimeUnit::Nanoseconds => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeUnit::Nanoseconds => "nanoseconds",
            TimeUnit::Microseconds => "microseconds",
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
            TimeUnit::Weeks => "weeks",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = HelperError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ns" | "nanosecond" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "us" | "microsecond" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ms" | "millisecond" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            "w" | "week" | "weeks" => Ok(TimeUnit::Weeks),
            _ => Err(HelperError::unknown_variant("time unit", s)),
        }
    }
}

/// Converts `amount` of `unit` to milliseconds.
///
/// An absent unit means milliseconds. Sub-millisecond units truncate toward
/// zero; overflow saturates at the `i64` bounds.
///
/// # Examples
///
/// ```
/// use nullguard_common::datetime::{to_milliseconds, TimeUnit};
///
/// assert_eq!(to_milliseconds(2, Some(TimeUnit::Days)), 172_800_000);
/// assert_eq!(to_milliseconds(2, None), 2);
/// ```
pub fn to_milliseconds(amount: i64, unit: Option<TimeUnit>) -> i64 {
    let mut unit = unit.unwrap_or(TimeUnit::Milliseconds);
    let mut value = amount;

    match unit {
        TimeUnit::Nanoseconds => return value / 1_000_000,
        TimeUnit::Microseconds => return value / 1_000,
        _ => {}
    }

    while let Some((smaller, factor)) = unit.step_down() {
        value = value.saturating_mul(factor);
        unit = smaller;
    }
    value
}

fn shift(date: DateTime<Utc>, millis: i64) -> DateTime<Utc> {
    let delta = TimeDelta::try_milliseconds(millis).unwrap_or(if millis < 0 {
        TimeDelta::MIN
    } else {
        TimeDelta::MAX
    });
    date.checked_add_signed(delta).unwrap_or(if millis < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

/// Adds `diff` of `unit` to `date`; `None` when the date is absent.
pub fn add(
    date: Option<DateTime<Utc>>,
    diff: i64,
    unit: Option<TimeUnit>,
) -> Option<DateTime<Utc>> {
    date.map(|d| shift(d, to_milliseconds(diff, unit)))
}

/// Subtracts `diff` of `unit` from `date`; `None` when the date is absent.
pub fn minus(
    date: Option<DateTime<Utc>>,
    diff: i64,
    unit: Option<TimeUnit>,
) -> Option<DateTime<Utc>> {
    date.map(|d| shift(d, to_milliseconds(diff, unit).saturating_neg()))
}

/// Null-aware date comparison.
///
/// `EqualTo` holds for two absent dates and `NotEqualTo` for exactly one;
/// every other comparator is `false` when a date is absent.
pub fn is<Tz: chrono::TimeZone>(
    first: Option<&DateTime<Tz>>,
    cmp: TimeComparator,
    second: Option<&DateTime<Tz>>,
) -> bool {
    comparator::is(first, cmp.as_comparator(), second)
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// The current UTC time rendered with `pattern`.
pub fn now_formatted(pattern: &str) -> Result<String> {
    DateHelper::default().now_formatted(pattern)
}

/// Parses `input` with `pattern` as a UTC time.
///
/// Absent or blank input or pattern yields `Ok(None)`.
pub fn to_date(input: Option<&str>, pattern: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    DateHelper::default().to_date(input, pattern)
}

/// Renders `date` in UTC with `pattern`.
///
/// Absent date or blank pattern yields an empty string.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use nullguard_common::datetime::to_string;
///
/// let date = Utc.with_ymd_and_hms(2017, 3, 21, 8, 30, 0).unwrap();
/// assert_eq!(to_string(Some(&date), Some("dd-MMM-yyyy")).unwrap(), "21-Mar-2017");
/// assert_eq!(to_string(None, Some("dd-MMM-yyyy")).unwrap(), "");
/// assert!(to_string(Some(&date), Some("invalidpattern")).is_err());
/// ```
pub fn to_string(date: Option<&DateTime<Utc>>, pattern: Option<&str>) -> Result<String> {
    DateHelper::default().to_string(date, pattern)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Date helpers bound to a zone and a clock
#[derive(Clone)]
pub struct DateHelper {
    offset: FixedOffset,
    clock: Arc<dyn Clock>,
}

impl Default for DateHelper {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Debug for DateHelper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateHelper")
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl DateHelper {
    pub fn new(offset: FixedOffset, clock: Arc<dyn Clock>) -> Self {
        Self { offset, clock }
    }

    /// UTC with the system clock.
    pub fn utc() -> Self {
        Self::new(Utc.fix(), Arc::new(SystemClock))
    }

    /// Zone from `config`, system clock.
    pub fn from_config(config: &HelperConfig) -> Self {
        Self::new(config.utc_offset(), Arc::new(SystemClock))
    }

    /// Replace the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The clock's current time rendered in this helper's zone.
    pub fn now_formatted(&self, pattern: &str) -> Result<String> {
        let now = self.now();
        self.to_string(Some(&now), Some(pattern))
    }

    /// Parses `input` with `pattern`, reading local times in this zone.
    ///
    /// Absent or blank input or pattern yields `Ok(None)`. Malformed input
    /// and malformed patterns are errors.
    pub fn to_date(
        &self,
        input: Option<&str>,
        pattern: Option<&str>,
    ) -> Result<Option<DateTime<Utc>>> {
        let (Some(input), Some(pattern)) = (non_blank(input), non_blank(pattern)) else {
            return Ok(None);
        };

        let compiled = DatePattern::compile(pattern)?;
        compiled
            .parse(input, &self.offset)
            .map(Some)
            .inspect_err(|e| tracing::debug!(error = %e, "Date parse failed"))
    }

    /// Renders `date` in this zone with `pattern`.
    ///
    /// Absent date or blank pattern yields an empty string. A malformed
    /// pattern is an error.
    pub fn to_string(&self, date: Option<&DateTime<Utc>>, pattern: Option<&str>) -> Result<String> {
        let (Some(date), Some(pattern)) = (date, non_blank(pattern)) else {
            return Ok(String::new());
        };

        let compiled = DatePattern::compile(pattern)?;
        compiled.format(&date.with_timezone(&self.offset))
    }

    pub fn add(
        &self,
        date: Option<DateTime<Utc>>,
        diff: i64,
        unit: Option<TimeUnit>,
    ) -> Option<DateTime<Utc>> {
        add(date, diff, unit)
    }

    pub fn minus(
        &self,
        date: Option<DateTime<Utc>>,
        diff: i64,
        unit: Option<TimeUnit>,
    ) -> Option<DateTime<Utc>> {
        minus(date, diff, unit)
    }
}
