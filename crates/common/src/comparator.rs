//! Comparator tags and null-aware comparison
//!
//! A single null policy applies to every comparison in this crate:
//!
//! - `Equal` between two absent operands is `true`
//! - `NotEqual` with exactly one absent operand is `true`
//! - any other comparator with an absent operand is `false`
//!
//! Present operands are compared with their [`TotalOrd`] ordering.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::error::HelperError;

/// Ordering relation used by [`is`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    LessThan,
    LessThanOrEqual,
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl Comparator {
    /// All comparators, in declaration order
    pub fn all() -> &'static [Comparator] {
        &[
            Comparator::LessThan,
            Comparator::LessThanOrEqual,
            Comparator::Equal,
            Comparator::NotEqual,
            Comparator::GreaterThan,
            Comparator::GreaterThanOrEqual,
        ]
    }

    /// Whether `ordering` (left compared to right) satisfies this comparator.
    pub fn evaluate(self, ordering: Ordering) -> bool {
        match self {
            Comparator::LessThan => ordering.is_lt(),
            Comparator::LessThanOrEqual => ordering.is_le(),
            Comparator::Equal => ordering.is_eq(),
            Comparator::NotEqual => ordering.is_ne(),
            Comparator::GreaterThan => ordering.is_gt(),
            Comparator::GreaterThanOrEqual => ordering.is_ge(),
        }
    }

    /// Outcome when at least one operand is absent.
    pub fn evaluate_absent(self, left_present: bool, right_present: bool) -> bool {
        match self {
            Comparator::Equal => !left_present && !right_present,
            Comparator::NotEqual => left_present != right_present,
            _ => false,
        }
    }

    /// Short operator symbol, e.g. `<=`
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::LessThan => "<",
            Comparator::LessThanOrEqual => "<=",
            Comparator::Equal => "==",
            Comparator::NotEqual => "!=",
            Comparator::GreaterThan => ">",
            Comparator::GreaterThanOrEqual => ">=",
        }
    }

    /// The comparator that holds when the operands are swapped.
    pub fn flip(self) -> Self {
        match self {
            Comparator::LessThan => Comparator::GreaterThan,
            Comparator::LessThanOrEqual => Comparator::GreaterThanOrEqual,
            Comparator::Equal => Comparator::Equal,
            Comparator::NotEqual => Comparator::NotEqual,
            Comparator::GreaterThan => Comparator::LessThan,
            Comparator::GreaterThanOrEqual => Comparator::LessThanOrEqual,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::str::FromStr for Comparator {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "<" | "lt" | "less_than" => Ok(Comparator::LessThan),
            "<=" | "lte" | "less_than_or_equal" => Ok(Comparator::LessThanOrEqual),
            "==" | "=" | "eq" | "equal" => Ok(Comparator::Equal),
            "!=" | "<>" | "neq" | "not_equal" => Ok(Comparator::NotEqual),
            ">" | "gt" | "greater_than" => Ok(Comparator::GreaterThan),
            ">=" | "gte" | "greater_than_or_equal" => Ok(Comparator::GreaterThanOrEqual),
            _ => Err(HelperError::unknown_variant("comparator", s)),
        }
    }
}

/// Comparator with temporal wording, for date comparisons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeComparator {
    Before,
    BeforeOrEqualTo,
    EqualTo,
    NotEqualTo,
    After,
    AfterOrEqualTo,
}

impl TimeComparator {
    /// The ordering comparator this temporal wording stands for.
    pub fn as_comparator(self) -> Comparator {
        match self {
            TimeComparator::Before => Comparator::LessThan,
            TimeComparator::BeforeOrEqualTo => Comparator::LessThanOrEqual,
            TimeComparator::EqualTo => Comparator::Equal,
            TimeComparator::NotEqualTo => Comparator::NotEqual,
            TimeComparator::After => Comparator::GreaterThan,
            TimeComparator::AfterOrEqualTo => Comparator::GreaterThanOrEqual,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TimeComparator::Before => "before",
            TimeComparator::BeforeOrEqualTo => "before or equal to",
            TimeComparator::EqualTo => "equal to",
            TimeComparator::NotEqualTo => "not equal to",
            TimeComparator::After => "after",
            TimeComparator::AfterOrEqualTo => "after or equal to",
        }
    }
}

impl From<TimeComparator> for Comparator {
    fn from(value: TimeComparator) -> Self {
        value.as_comparator()
    }
}

impl From<Comparator> for TimeComparator {
    fn from(value: Comparator) -> Self {
        match value {
            Comparator::LessThan => TimeComparator::Before,
            Comparator::LessThanOrEqual => TimeComparator::BeforeOrEqualTo,
            Comparator::Equal => TimeComparator::EqualTo,
            Comparator::NotEqual => TimeComparator::NotEqualTo,
            Comparator::GreaterThan => TimeComparator::After,
            Comparator::GreaterThanOrEqual => TimeComparator::AfterOrEqualTo,
        }
    }
}

impl fmt::Display for TimeComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for TimeComparator {
    type Err = HelperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "before" => Ok(TimeComparator::Before),
            "before_or_equal_to" => Ok(TimeComparator::BeforeOrEqualTo),
            "equal_to" => Ok(TimeComparator::EqualTo),
            "not_equal_to" => Ok(TimeComparator::NotEqualTo),
            "after" => Ok(TimeComparator::After),
            "after_or_equal_to" => Ok(TimeComparator::AfterOrEqualTo),
            _ => s
                .parse::<Comparator>()
                .map(TimeComparator::from)
                .map_err(|_| HelperError::unknown_variant("time comparator", s)),
        }
    }
}

/// Total ordering used by null-aware comparisons.
///
/// Floats compare with `total_cmp`, so `NaN` equals `NaN` and `-0.0` sorts
/// before `0.0`.
pub trait TotalOrd {
    fn total_order(&self, other: &Self) -> Ordering;
}

macro_rules! total_ord_via_ord {
    ($($t:ty),* $(,)?) => {
        $(
            impl TotalOrd for $t {
                fn total_order(&self, other: &Self) -> Ordering {
                    Ord::cmp(self, other)
                }
            }
        )*
    };
}

total_ord_via_ord!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, str, String,
    chrono::NaiveDate, chrono::NaiveDateTime, chrono::NaiveTime, chrono::Duration,
);

impl TotalOrd for f32 {
    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl TotalOrd for f64 {
    fn total_order(&self, other: &Self) -> Ordering {
        self.total_cmp(other)
    }
}

impl<Tz: chrono::TimeZone> TotalOrd for chrono::DateTime<Tz> {
    fn total_order(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

impl<T: TotalOrd + ?Sized> TotalOrd for &T {
    fn total_order(&self, other: &Self) -> Ordering {
        (**self).total_order(*other)
    }
}

/// Evaluates `left` against `right` with `cmp`, honouring the null policy.
///
/// # Examples
///
/// ```
/// use nullguard_common::comparator::{is, Comparator};
///
/// assert!(is(Some(4), Comparator::LessThanOrEqual, Some(5)));
/// assert!(!is(None, Comparator::LessThanOrEqual, Some(5)));
/// assert!(is(None::<i32>, Comparator::Equal, None));
/// assert!(!is(None::<i32>, Comparator::LessThanOrEqual, None));
/// ```
pub fn is<T: TotalOrd>(left: Option<T>, cmp: Comparator, right: Option<T>) -> bool {
    match (left, right) {
        (Some(l), Some(r)) => cmp.evaluate(l.total_order(&r)),
        (l, r) => cmp.evaluate_absent(l.is_some(), r.is_some()),
    }
}
