//! Number parsing with a strict / suppress switch, plus null-aware
//! numeric comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HelperError, Result};

pub use crate::comparator::{is, Comparator};

/// What to do when a string is not a valid number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    /// Swallow the error and return zero
    SuppressException,
    /// Return the error to the caller
    #[default]
    Strict,
}

impl fmt::Display for ParseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMode::SuppressException => write!(f, "suppress_exception"),
            ParseMode::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for ParseMode {
    type Err = HelperError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "strict" => Ok(ParseMode::Strict),
            "suppress" | "suppress_exception" => Ok(ParseMode::SuppressException),
            _ => Err(HelperError::unknown_variant("parse mode", s)),
        }
    }
}

/// Parses `input` as `T`, or returns `T::default()` in suppress mode.
///
/// # Examples
///
/// ```
/// use nullguard_common::number::{parse_number, ParseMode};
///
/// assert_eq!(parse_number::<u8>("42", ParseMode::Strict).unwrap(), 42);
/// assert_eq!(parse_number::<u8>("300", ParseMode::SuppressException).unwrap(), 0);
/// assert!(parse_number::<u8>("300", ParseMode::Strict).is_err());
/// ```
pub fn parse_number<T>(input: &str, mode: ParseMode) -> Result<T>
where
    T: FromStr + Default,
    T::Err: fmt::Display,
{
    match input.parse::<T>() {
        Ok(value) => Ok(value),
        Err(e) => {
            let target = std::any::type_name::<T>();
            match mode {
                ParseMode::SuppressException => {
                    tracing::debug!(input, target, error = %e, "Suppressed number parse failure");
                    Ok(T::default())
                }
                ParseMode::Strict => Err(HelperError::number_parse(input, target, e)),
            }
        }
    }
}

/// Parses `input` as `i32`.
///
/// # Examples
///
/// ```
/// use nullguard_common::number::{parse_int, ParseMode};
///
/// assert_eq!(parse_int("5", ParseMode::Strict).unwrap(), 5);
/// assert_eq!(parse_int("5,0", ParseMode::SuppressException).unwrap(), 0);
/// assert!(parse_int("5,0", ParseMode::Strict).is_err());
/// ```
pub fn parse_int(input: &str, mode: ParseMode) -> Result<i32> {
    parse_number(input, mode)
}

/// Parses `input` as `i64`.
pub fn parse_long(input: &str, mode: ParseMode) -> Result<i64> {
    parse_number(input, mode)
}

/// Parses `input` as `f64`. Surrounding whitespace is ignored.
pub fn parse_double(input: &str, mode: ParseMode) -> Result<f64> {
    parse_number(input.trim(), mode)
}
