//! Default-value substitution and other optional-value shortcuts.
//!
//! Every "denullify" helper is an unwrap-or-default with a specific default:
//! `false`, `0`, `0.0`, `""`, an empty collection, or the current time.

use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::clock::Clock;

/// Returns the value, or `T::default()` when absent.
///
/// Covers `bool` (`false`), integers (`0`), floats (`0.0`), `String` (`""`)
/// and the standard collections (empty).
///
/// # Examples
///
/// ```
/// use nullguard_common::common::denullify;
/// use std::collections::HashMap;
///
/// assert!(!denullify(None::<bool>));
/// assert_eq!(denullify(None::<i32>), 0);
/// assert_eq!(denullify(Some(7_i64)), 7);
/// assert_eq!(denullify(None::<String>), "");
/// assert!(denullify(None::<HashMap<String, i32>>).is_empty());
/// ```
pub fn denullify<T: Default>(value: Option<T>) -> T {
    value.unwrap_or_default()
}

/// Returns the value, or the result of `make` when absent.
pub fn denullify_with<T, F>(value: Option<T>, make: F) -> T
where
    F: FnOnce() -> T,
{
    value.unwrap_or_else(make)
}

/// Returns the first present value among `value`, `sub`, then `subs`.
///
/// May still be `None` when every candidate is absent.
///
/// # Examples
///
/// ```
/// use nullguard_common::common::denullify_or;
///
/// assert_eq!(denullify_or(Some(1), Some(2), [None]), Some(1));
/// assert_eq!(denullify_or(None, None, [None, Some(3), Some(4)]), Some(3));
/// assert_eq!(denullify_or::<i32, _>(None, None, [None]), None);
/// ```
pub fn denullify_or<T, I>(value: Option<T>, sub: Option<T>, subs: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    value
        .or(sub)
        .or_else(|| subs.into_iter().flatten().next())
}

/// Returns the date, or the clock's current time when absent.
pub fn denullify_date(date: Option<DateTime<Utc>>, clock: &dyn Clock) -> DateTime<Utc> {
    date.unwrap_or_else(|| clock.now())
}

/// Runs `action` on the value when present.
pub fn do_if_not_null<T, F>(value: Option<T>, action: F)
where
    F: FnOnce(T),
{
    if let Some(v) = value {
        action(v);
    }
}

/// Applies `func` to the value when present.
pub fn get_if_not_null<T, R, F>(value: Option<T>, func: F) -> Option<R>
where
    F: FnOnce(T) -> R,
{
    value.map(func)
}

pub fn to_lower_case(value: Option<&str>) -> Option<String> {
    value.map(str::to_lowercase)
}

pub fn to_upper_case(value: Option<&str>) -> Option<String> {
    value.map(str::to_uppercase)
}

/// Converts a name into an enum-like value through its `FromStr`.
///
/// Absent or blank input yields `Ok(None)`. A name that matches no variant
/// is always an error.
pub fn value_of<E: FromStr>(name: Option<&str>) -> Result<Option<E>, E::Err> {
    match name {
        Some(s) if !s.trim().is_empty() => s.parse().map(Some),
        _ => Ok(None),
    }
}

/// Generates a new random (v4) UUID string.
pub fn generate_uuid() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::comparator::Comparator;
    use crate::error::HelperError;
    use chrono::TimeZone;
    use std::cell::Cell;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_denullify_primitives() {
        assert!(!denullify(None::<bool>));
        assert!(denullify(Some(true)));
        assert_eq!(denullify(None::<f64>), 0.0);
        assert_eq!(denullify(Some(2.5_f64)), 2.5);
        assert_eq!(denullify(None::<i32>), 0);
        assert_eq!(denullify(None::<i64>), 0);
        assert_eq!(denullify(Some(42_i64)), 42);
    }

    #[test]
    fn test_denullify_collections_and_strings() {
        assert!(denullify(None::<Vec<u8>>).is_empty());
        assert_eq!(denullify(Some(vec![1, 2])), vec![1, 2]);
        assert!(denullify(None::<HashMap<String, String>>).is_empty());
        assert!(denullify(None::<HashSet<i32>>).is_empty());
        assert_eq!(denullify(None::<String>), "");
        assert_eq!(denullify(Some("abc".to_string())), "abc");
    }

    #[test]
    fn test_denullify_with_is_lazy() {
        let calls = Cell::new(0);
        let make = || {
            calls.set(calls.get() + 1);
            vec!["fresh"]
        };
        assert_eq!(denullify_with(Some(vec!["kept"]), make), vec!["kept"]);
        assert_eq!(calls.get(), 0);
        assert_eq!(denullify_with(None, || vec!["fresh"]), vec!["fresh"]);
    }

    #[test]
    fn test_denullify_or_picks_first_present() {
        assert_eq!(denullify_or(Some("t"), Some("sub"), [Some("x")]), Some("t"));
        assert_eq!(denullify_or(None, Some("sub"), [Some("x")]), Some("sub"));
        assert_eq!(denullify_or(None, None, [None, Some("x")]), Some("x"));
        assert_eq!(denullify_or::<&str, _>(None, None, Vec::new()), None);
    }

    #[test]
    fn test_denullify_date_uses_clock_only_when_absent() {
        let fixed = Utc.with_ymd_and_hms(2018, 2, 20, 12, 44, 59).unwrap();
        let given = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();

        let mut clock = MockClock::new();
        clock.expect_now().times(1).returning(move || fixed);

        assert_eq!(denullify_date(None, &clock), fixed);
        assert_eq!(denullify_date(Some(given), &clock), given);
    }

    #[test]
    fn test_do_if_not_null() {
        let mut seen = Vec::new();
        do_if_not_null(Some(3), |v| seen.push(v));
        do_if_not_null(None, |v| seen.push(v));
        assert_eq!(seen, vec![3]);
    }

    #[test]
    fn test_get_if_not_null() {
        assert_eq!(get_if_not_null(Some("abc"), str::len), Some(3));
        assert_eq!(get_if_not_null(None::<&str>, str::len), None);
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(to_lower_case(Some("MiXeD")), Some("mixed".to_string()));
        assert_eq!(to_upper_case(Some("MiXeD")), Some("MIXED".to_string()));
        assert_eq!(to_lower_case(None), None);
        assert_eq!(to_upper_case(None), None);
    }

    #[test]
    fn test_value_of_blank_is_none() {
        assert_eq!(value_of::<Comparator>(None).unwrap(), None);
        assert_eq!(value_of::<Comparator>(Some("")).unwrap(), None);
        assert_eq!(value_of::<Comparator>(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_value_of_known_and_unknown() {
        assert_eq!(
            value_of::<Comparator>(Some("EQ")).unwrap(),
            Some(Comparator::Equal)
        );
        assert!(matches!(
            value_of::<Comparator>(Some("NOPE")),
            Err(HelperError::UnknownVariant { .. })
        ));
    }

    #[test]
    fn test_generate_uuid_is_random_v4() {
        let a = generate_uuid();
        let b = generate_uuid();
        assert_ne!(a, b);
        let parsed = uuid::Uuid::parse_str(&a).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }
}
