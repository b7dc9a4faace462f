//! Helper configuration with environment overrides.
//!
//! Supported environment variables:
//! - NULLGUARD_UTC_OFFSET: zone used by [`DateHelper`](crate::datetime::DateHelper),
//!   e.g. `+07:00`, `-0330`, `Z`
//! - NULLGUARD_PARSE_MODE: `strict` or `suppress`

use chrono::{FixedOffset, Offset, Utc};

use crate::error::{HelperError, Result};
use crate::number::{self, ParseMode};

pub const UTC_OFFSET_ENV: &str = "NULLGUARD_UTC_OFFSET";
pub const PARSE_MODE_ENV: &str = "NULLGUARD_PARSE_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelperConfig {
    utc_offset: FixedOffset,
    parse_mode: ParseMode,
}

impl Default for HelperConfig {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            parse_mode: ParseMode::Strict,
        }
    }
}

impl HelperConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`.
    ///
    /// Invalid values are ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup(UTC_OFFSET_ENV) {
            match parse_utc_offset(&val) {
                Ok(offset) => {
                    config.utc_offset = offset;
                    tracing::info!(
                        offset = %offset,
                        "Applied {} environment variable",
                        UTC_OFFSET_ENV
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        val = %val,
                        error = %e,
                        "{} is not a valid offset, ignoring",
                        UTC_OFFSET_ENV
                    );
                }
            }
        }

        if let Some(val) = lookup(PARSE_MODE_ENV) {
            match val.parse::<ParseMode>() {
                Ok(mode) => {
                    config.parse_mode = mode;
                    tracing::info!(mode = %mode, "Applied {} environment variable", PARSE_MODE_ENV);
                }
                Err(e) => {
                    tracing::warn!(
                        val = %val,
                        error = %e,
                        "{} is not a valid parse mode, ignoring",
                        PARSE_MODE_ENV
                    );
                }
            }
        }

        config
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = mode;
        self
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.utc_offset
    }

    pub fn parse_mode(&self) -> ParseMode {
        self.parse_mode
    }

    pub fn parse_int(&self, input: &str) -> Result<i32> {
        number::parse_int(input, self.parse_mode)
    }

    pub fn parse_long(&self, input: &str) -> Result<i64> {
        number::parse_long(input, self.parse_mode)
    }

    pub fn parse_double(&self, input: &str) -> Result<f64> {
        number::parse_double(input, self.parse_mode)
    }
}

/// Parses `Z`, `+HH`, `+HHMM` or `+HH:MM` (sign required except for `Z`).
pub fn parse_utc_offset(text: &str) -> Result<FixedOffset> {
    let invalid =
        |reason: &str| HelperError::unknown_variant("utc offset", format!("{text} ({reason})"));
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case("z") || trimmed.eq_ignore_ascii_case("utc") {
        return Ok(Utc.fix());
    }

    let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = trimmed.strip_prefix('-') {
        (-1, rest)
    } else {
        return Err(invalid("missing sign"));
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("non-digit characters"));
    }

    let (hours, minutes) = match digits.len() {
        2 => (&digits[..2], "0"),
        4 => (&digits[..2], &digits[2..]),
        _ => return Err(invalid("expected HH, HHMM or HH:MM")),
    };
    let hours: i32 = hours.parse().map_err(|_| invalid("bad hours"))?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid("bad minutes"))?;
    if hours > 18 || minutes > 59 {
        return Err(invalid("out of range"));
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| invalid("out of range"))
}
